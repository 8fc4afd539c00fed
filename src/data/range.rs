use crate::error::RangeError;

pub const DEFAULT_X_MIN: f64 = 0.0;
pub const DEFAULT_X_MAX: f64 = 30.0;

/// Horizontal plot window. Always `x_min <= x_max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotRange {
    pub x_min: f64,
    pub x_max: f64,
}

impl Default for PlotRange {
    fn default() -> Self {
        PlotRange {
            x_min: DEFAULT_X_MIN,
            x_max: DEFAULT_X_MAX,
        }
    }
}

impl PlotRange {
    /// Turn the two range text fields into a usable window.
    ///
    /// Blank fields fall back to the defaults, and an inverted pair is
    /// repaired to a one-unit window starting at `x_min` instead of being
    /// rejected.
    pub fn normalize(x_min_raw: &str, x_max_raw: &str) -> Result<Self, RangeError> {
        let x_min = parse_bound("x min", x_min_raw)?.unwrap_or(DEFAULT_X_MIN);
        let mut x_max = parse_bound("x max", x_max_raw)?.unwrap_or(DEFAULT_X_MAX);
        if x_min > x_max {
            x_max = x_min + 1.0;
        }
        Ok(PlotRange { x_min, x_max })
    }

    /// Bounds safe to hand to a renderer; a zero-width window is widened.
    pub fn drawable(&self) -> (f64, f64) {
        if self.x_max > self.x_min {
            (self.x_min, self.x_max)
        } else {
            (self.x_min, self.x_min + 1.0)
        }
    }
}

fn parse_bound(field: &'static str, raw: &str) -> Result<Option<f64>, RangeError> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(RangeError::InvalidRange {
            field,
            input: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_use_defaults() {
        assert_eq!(
            PlotRange::normalize("", "").unwrap(),
            PlotRange {
                x_min: 0.0,
                x_max: 30.0
            }
        );
        assert_eq!(PlotRange::normalize("  ", "12").unwrap().x_min, 0.0);
        assert_eq!(PlotRange::normalize("5", "").unwrap().x_max, 30.0);
    }

    #[test]
    fn inverted_range_is_repaired() {
        let r = PlotRange::normalize("10", "5").unwrap();
        assert_eq!((r.x_min, r.x_max), (10.0, 11.0));

        let beyond_default = PlotRange::normalize("40", "").unwrap();
        assert_eq!((beyond_default.x_min, beyond_default.x_max), (40.0, 41.0));
    }

    #[test]
    fn equal_bounds_are_kept() {
        let r = PlotRange::normalize("7", "7").unwrap();
        assert_eq!((r.x_min, r.x_max), (7.0, 7.0));
        assert_eq!(r.drawable(), (7.0, 8.0));
    }

    #[test]
    fn non_numeric_input_is_rejected() {
        assert_eq!(
            PlotRange::normalize("abc", "5"),
            Err(RangeError::InvalidRange {
                field: "x min",
                input: "abc".into()
            })
        );
        assert!(PlotRange::normalize("1", "inf").is_err());
        assert!(PlotRange::normalize("1", "NaN").is_err());
    }

    #[test]
    fn accepts_negative_and_fractional_bounds() {
        let r = PlotRange::normalize(" -2.5 ", "1e1").unwrap();
        assert_eq!((r.x_min, r.x_max), (-2.5, 10.0));
    }
}
