use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::loader::LoadOptions;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FSEC_PLOTTER_CONFIG";
/// Config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "fsec-plotter.json";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotterConfig {
    /// Flow rate assigned to newly loaded files.
    pub default_flow_rate: f64,
    /// Single-character column delimiter; sniffed per file when absent.
    pub delimiter: Option<char>,
    pub export: ExportSettings,
    pub window_size: [f32; 2],
}

/// Pixel size of exported figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            default_flow_rate: 1.0,
            delimiter: None,
            export: ExportSettings::default(),
            window_size: [1200.0, 800.0],
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
        }
    }
}

impl PlotterConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: PlotterConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// `$FSEC_PLOTTER_CONFIG`, else `./fsec-plotter.json`, else defaults.
    /// A broken file is logged and replaced by defaults.
    pub fn discover() -> Self {
        let candidate = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(|| {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                local.exists().then_some(local)
            });
        let Some(path) = candidate else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Using config {}", path.display());
                config
            }
            Err(e) => {
                log::error!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.default_flow_rate.is_finite() && self.default_flow_rate > 0.0) {
            bail!(
                "default_flow_rate must be positive, got {}",
                self.default_flow_rate
            );
        }
        if let Some(d) = self.delimiter {
            if !d.is_ascii() {
                bail!("delimiter must be a single ASCII character, got {d:?}");
            }
        }
        if self.export.width == 0 || self.export.height == 0 {
            bail!("export size must be non-zero");
        }
        Ok(())
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            flow_rate: self.default_flow_rate,
            delimiter: self.delimiter.map(|c| c as u8),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let f = write_config(r#"{ "default_flow_rate": 0.5, "export": { "width": 800 } }"#);
        let config = PlotterConfig::load(f.path()).unwrap();
        assert_eq!(config.default_flow_rate, 0.5);
        assert_eq!(config.export.width, 800);
        assert_eq!(config.export.height, 900);
        assert_eq!(config.delimiter, None);
    }

    #[test]
    fn delimiter_feeds_load_options() {
        let f = write_config(r#"{ "delimiter": "," }"#);
        let options = PlotterConfig::load(f.path()).unwrap().load_options();
        assert_eq!(options.delimiter, Some(b','));
        assert_eq!(options.flow_rate, 1.0);
    }

    #[test]
    fn rejects_non_positive_flow_rate() {
        let f = write_config(r#"{ "default_flow_rate": 0 }"#);
        let err = PlotterConfig::load(f.path()).unwrap_err();
        assert!(err.to_string().contains("default_flow_rate"));
    }

    #[test]
    fn rejects_malformed_json() {
        let f = write_config("{ not json");
        assert!(PlotterConfig::load(f.path()).is_err());
    }
}
