use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;

use crate::options::DetectOptions;

/// Detection defaults, loadable from an optional `framescan.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Directory scanned when the caller names none.
    #[serde(default)]
    pub root_path: Option<String>,
    /// Glob-like filename filters (`*`, `?`).
    #[serde(default)]
    pub filters: Vec<String>,
    /// Include filenames starting with a dot.
    #[serde(default)]
    pub dot_files: bool,
    /// Capture signed frame numbers.
    #[serde(default)]
    pub negative: bool,
    /// Report single numbered files as one-frame sequences.
    #[serde(default)]
    pub sequence_based_on_filename: bool,
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("framescan").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

impl AppConfig {
    pub fn detect_options(&self) -> DetectOptions {
        let mut options = DetectOptions::default();
        if self.dot_files {
            options |= DetectOptions::DOT_FILE;
        }
        if self.negative {
            options |= DetectOptions::NEGATIVE;
        }
        if self.sequence_based_on_filename {
            options |= DetectOptions::SEQUENCE_BASED_ON_FILENAME;
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let config = AppConfig::default();
        assert_eq!(config.detect_options(), DetectOptions::SEQUENCE_BASED_ON_NUMBERS);
    }

    #[test]
    fn test_flags_map_onto_options() {
        let config = AppConfig {
            dot_files: true,
            negative: true,
            ..AppConfig::default()
        };
        let options = config.detect_options();
        assert!(options.contains(DetectOptions::DOT_FILE));
        assert!(options.contains(DetectOptions::NEGATIVE));
        assert!(options.contains(DetectOptions::SEQUENCE_BASED_ON_NUMBERS));
        assert!(!options.contains(DetectOptions::SEQUENCE_BASED_ON_FILENAME));
    }
}
