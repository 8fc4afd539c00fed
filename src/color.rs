use eframe::egui::Color32;
use palette::{Hsv, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Rainbow colour cycle
// ---------------------------------------------------------------------------

/// Hue span of the cycle: red through yellow, green, cyan and blue to magenta.
/// Stopping short of 360° keeps the last trace distinguishable from the first.
const HUE_SPAN_DEG: f32 = 300.0;

/// Colour of trace `index` out of `total`, sampled at `index / total` along
/// the cycle. Depends on position only.
pub fn color_at(index: usize, total: usize) -> Color32 {
    let t = if total == 0 {
        0.0
    } else {
        index as f32 / total as f32
    };
    let hsv: Hsv = Hsv::new(t * HUE_SPAN_DEG, 1.0, 1.0);
    let rgb: Srgb = hsv.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

/// Generates `n` colours evenly spaced along the cycle.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n).map(|i| color_at(i, n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_colour_is_red() {
        assert_eq!(color_at(0, 5), Color32::from_rgb(255, 0, 0));
        assert_eq!(color_at(0, 0), Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn palette_is_distinct_and_sized() {
        let p = generate_palette(6);
        assert_eq!(p.len(), 6);
        for (i, a) in p.iter().enumerate() {
            for b in &p[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn colour_depends_on_position_and_total() {
        assert_eq!(color_at(2, 4), color_at(1, 2));
        assert_ne!(color_at(1, 3), color_at(1, 4));
    }
}
