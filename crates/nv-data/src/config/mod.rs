//! Data file configuration
//!
//! Where the dataset lives is a deployment detail, so it is read from a
//! small JSON file next to the binary when one exists.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Configuration for locating and parsing the input dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the CSV file
    pub path: PathBuf,

    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_delimiter() -> char {
    ','
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/stats-oecd.csv"),
            delimiter: ',',
        }
    }
}

impl DataConfig {
    /// Load the config file, falling back to defaults when it is absent
    /// or unreadable
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!("Loaded data config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Ignoring invalid data config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Delimiter as the single byte the CSV reader expects.
    /// Non-ASCII delimiters fall back to a comma.
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            b','
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DataConfig::default();
        assert_eq!(config.path, PathBuf::from("data/stats-oecd.csv"));
        assert_eq!(config.delimiter_byte(), b',');
    }

    #[test]
    fn test_parse_config() {
        let config: DataConfig =
            serde_json::from_str(r#"{"path": "input/health.csv", "delimiter": ";"}"#).unwrap();
        assert_eq!(config.path, PathBuf::from("input/health.csv"));
        assert_eq!(config.delimiter_byte(), b';');
    }

    #[test]
    fn test_parse_config_default_delimiter() {
        let config: DataConfig = serde_json::from_str(r#"{"path": "input/health.csv"}"#).unwrap();
        assert_eq!(config.delimiter_byte(), b',');
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = DataConfig::load_or_default(Path::new("/nonexistent/config.json"));
        assert_eq!(config.path, DataConfig::default().path);
    }

    #[test]
    fn test_load_or_default_invalid_json() {
        let path = std::env::temp_dir().join(format!("nv_data_cfg_test_{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let config = DataConfig::load_or_default(&path);
        assert_eq!(config.path, DataConfig::default().path);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_non_ascii_delimiter_falls_back() {
        let config = DataConfig {
            path: PathBuf::from("x.csv"),
            delimiter: 'é',
        };
        assert_eq!(config.delimiter_byte(), b',');
    }
}
