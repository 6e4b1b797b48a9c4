use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::log::LogConfig;
use self::markdown::MarkdownConfig;
use self::stream::StreamConfig;

pub mod log;
pub mod markdown;
pub mod stream;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub markdown: MarkdownConfig,
    pub stream: StreamConfig,
    pub log: LogConfig,
}

impl Config {
    /// Configuration from `LEXIS_*` environment variables, defaults for the rest.
    pub fn new() -> Self {
        Config {
            markdown: MarkdownConfig::new(),
            stream: StreamConfig::new(),
            log: LogConfig::new(),
        }
    }

    /// Same as [`Config::new`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Config {
            markdown: MarkdownConfig::from_lookup(&lookup),
            stream: StreamConfig::from_lookup(&lookup),
            log: LogConfig::from_lookup(&lookup),
        }
    }

    /// Load a JSON profile. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Parse an optional variable, falling back to `default` when it is unset
/// or malformed.
pub(crate) fn parsed_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexis_types::LabelLanguage;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.markdown.label_language, LabelLanguage::Zh);
        assert_eq!(config.stream.max_buffer_bytes, 1024 * 1024);
        assert_eq!(config.stream.channel_capacity, 64);
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn test_environment_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("LEXIS_LABEL_LANGUAGE", "en"),
            ("LEXIS_MAX_BUFFER_BYTES", "4096"),
            ("LEXIS_CHANNEL_CAPACITY", "not a number"),
            ("LEXIS_LOG_FORMAT", "json"),
            ("LEXIS_LOG", "lexis=debug"),
        ]));
        assert_eq!(config.markdown.label_language, LabelLanguage::En);
        assert_eq!(config.stream.max_buffer_bytes, 4096);
        assert_eq!(config.stream.channel_capacity, 64);
        assert_eq!(config.log.format, log::LogFormat::Json);
        assert_eq!(config.log.filter, "lexis=debug");
    }

    #[test]
    fn test_partial_json_profile() {
        let config: Config =
            serde_json::from_str(r#"{ "markdown": { "label_language": "en" } }"#).unwrap();
        assert_eq!(config.markdown.label_language, LabelLanguage::En);
        assert_eq!(config.stream, StreamConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
