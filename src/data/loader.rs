use std::path::Path;

use super::model::LogEntry;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How log files are read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadOptions {
    /// Flow rate given to each newly loaded trace.
    pub flow_rate: f64,
    /// Column delimiter; sniffed from the file when `None`.
    pub delimiter: Option<u8>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            flow_rate: 1.0,
            delimiter: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load one FSEC log file. The entry is labelled with the file name.
///
/// Expected layout: an optional preamble (instrument header, column titles),
/// then rows whose first two columns are volume and intensity:
///
/// ```text
/// [Header]
/// Sample Name    GFP-fusion 12
/// Volume(ml)     Intensity
/// 0.000          1502
/// 0.010          1499
/// ```
pub fn load_log(path: &Path, options: &LoadOptions) -> Result<LogEntry, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let label = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let rows = parse_rows(path, &text, options.delimiter)?;
    let entry = LogEntry::new(label, rows, options.flow_rate).map_err(|source| {
        LoadError::Rejected {
            path: path.to_path_buf(),
            source,
        }
    })?;
    log::info!(
        "Loaded {} rows from {}",
        entry.len(),
        path.display()
    );
    Ok(entry)
}

/// Parse `(volume, intensity)` rows from log text.
pub fn parse_rows(
    path: &Path,
    text: &str,
    delimiter: Option<u8>,
) -> Result<Vec<(f64, f64)>, LoadError> {
    let delimiter = delimiter.unwrap_or_else(|| sniff_delimiter(text));
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let fields: Vec<&str> = record.iter().filter(|f| !f.is_empty()).collect();
        if fields.is_empty() {
            continue;
        }

        let numbers: Vec<Option<f64>> = fields.iter().take(2).map(|f| f.parse().ok()).collect();
        match numbers.as_slice() {
            [Some(volume), Some(intensity)] => rows.push((*volume, *intensity)),
            // still inside the preamble
            _ if rows.is_empty() => continue,
            [Some(_)] => {
                return Err(LoadError::MissingColumn {
                    path: path.to_path_buf(),
                    line,
                })
            }
            _ => {
                let field = fields
                    .iter()
                    .take(2)
                    .find(|f| f.parse::<f64>().is_err())
                    .map(|f| f.to_string())
                    .unwrap_or_default();
                return Err(LoadError::NotANumber {
                    path: path.to_path_buf(),
                    line,
                    field,
                });
            }
        }
    }

    if rows.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(rows)
}

const DELIMITERS: [u8; 4] = [b'\t', b',', b';', b' '];

/// Delimiter of the first data line: the first of tab, comma, semicolon,
/// space that splits some line into two leading numbers. Preamble text is
/// never consulted. Tab when no line qualifies.
fn sniff_delimiter(text: &str) -> u8 {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .find_map(|line| {
            DELIMITERS
                .into_iter()
                .find(|&d| starts_with_two_numbers(line, d))
        })
        .unwrap_or(b'\t')
}

fn starts_with_two_numbers(line: &str, delimiter: u8) -> bool {
    let mut fields = line
        .split(char::from(delimiter))
        .map(str::trim)
        .filter(|f| !f.is_empty());
    matches!(
        (fields.next(), fields.next()),
        (Some(a), Some(b)) if a.parse::<f64>().is_ok() && b.parse::<f64>().is_ok()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn p() -> PathBuf {
        PathBuf::from("trace.txt")
    }

    #[test]
    fn parses_tab_separated_rows_after_preamble() {
        let text = "[Header]\nSample Name\tGFP\nVolume(ml)\tIntensity\n0.0\t10\n0.5\t12.5\n";
        let rows = parse_rows(&p(), text, None).unwrap();
        assert_eq!(rows, vec![(0.0, 10.0), (0.5, 12.5)]);
    }

    #[test]
    fn parses_comma_and_space_separated_rows() {
        let csv = "volume,intensity\n1,2\n3,4\n";
        assert_eq!(parse_rows(&p(), csv, None).unwrap(), vec![(1.0, 2.0), (3.0, 4.0)]);

        let spaced = "1.0   2.0\n  3.0 4.0  \n";
        assert_eq!(
            parse_rows(&p(), spaced, None).unwrap(),
            vec![(1.0, 2.0), (3.0, 4.0)]
        );
    }

    #[test]
    fn punctuation_in_preamble_does_not_pick_the_delimiter() {
        let text = "Sample: GFP, run 2\n1.0 2.0\n3.0 4.0\n";
        assert_eq!(sniff_delimiter(text), b' ');
        assert_eq!(
            parse_rows(&p(), text, None).unwrap(),
            vec![(1.0, 2.0), (3.0, 4.0)]
        );
    }

    #[test]
    fn tab_in_preamble_does_not_override_comma_data() {
        let text = "Sample Name\tGFP\nvolume,intensity\n1,2\n3,4\n";
        assert_eq!(sniff_delimiter(text), b',');
        assert_eq!(
            parse_rows(&p(), text, None).unwrap(),
            vec![(1.0, 2.0), (3.0, 4.0)]
        );
    }

    #[test]
    fn skips_comments_blank_lines_and_extra_columns() {
        let text = "# exported\n\n1\t2\t99\n\n# mid comment\n3\t4\n";
        assert_eq!(
            parse_rows(&p(), text, Some(b'\t')).unwrap(),
            vec![(1.0, 2.0), (3.0, 4.0)]
        );
    }

    #[test]
    fn empty_file_is_a_load_error() {
        assert!(matches!(
            parse_rows(&p(), "", None),
            Err(LoadError::Empty { .. })
        ));
        assert!(matches!(
            parse_rows(&p(), "only\theader\n", None),
            Err(LoadError::Empty { .. })
        ));
    }

    #[test]
    fn non_numeric_row_after_data_is_rejected() {
        let text = "1\t2\nfoo\t3\n";
        match parse_rows(&p(), text, None) {
            Err(LoadError::NotANumber { line, field, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(field, "foo");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn single_column_row_after_data_is_rejected() {
        let text = "1\t2\n3\n";
        assert!(matches!(
            parse_rows(&p(), text, None),
            Err(LoadError::MissingColumn { line: 2, .. })
        ));
    }

    #[test]
    fn load_log_labels_with_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_01.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "Volume(ml)\tIntensity").unwrap();
        writeln!(f, "0.1\t5").unwrap();
        writeln!(f, "0.2\t6").unwrap();
        drop(f);

        let options = LoadOptions {
            flow_rate: 0.5,
            delimiter: None,
        };
        let entry = load_log(&path, &options).unwrap();
        assert_eq!(entry.filename(), "run_01.txt");
        assert_eq!(entry.flow_rate(), 0.5);
        assert_eq!(entry.volume(), &[0.1, 0.2]);
        assert_eq!(entry.intensity(), &[5.0, 6.0]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let err = load_log(&path, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert_eq!(err.path(), &path);
    }
}
