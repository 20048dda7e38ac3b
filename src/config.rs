//! Engine configuration loaded from a JSON file.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Tokenization settings shared by the indexer and the searcher.
///
/// Both sides must parse text with the same configuration or query n-grams
/// will not line up with indexed terms.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub ngram_min_length: usize,
    pub ngram_max_length: usize,
    pub stop_words: Vec<String>,
}

impl EngineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.ngram_max_length < self.ngram_min_length {
            return Err(ConfigError::NgramBounds {
                min: self.ngram_min_length,
                max: self.ngram_max_length,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_valid_config() {
        let config = EngineConfig::from_json(
            r#"{"ngram_min_length": 3, "ngram_max_length": 6, "stop_words": ["the", "a"]}"#,
        )
        .unwrap();
        assert_eq!(config.ngram_min_length, 3);
        assert_eq!(config.ngram_max_length, 6);
        assert_eq!(config.stop_words, ["the", "a"]);
    }

    #[test]
    fn test_invalid_json_fails() {
        let err = EngineConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Format(_)));
    }

    #[test]
    fn test_missing_field_fails() {
        let err = EngineConfig::from_json(r#"{"ngram_min_length": 3}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Format(_)));
    }

    #[test]
    fn test_max_below_min_fails() {
        let err = EngineConfig::from_json(
            r#"{"ngram_min_length": 6, "ngram_max_length": 3, "stop_words": []}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::NgramBounds { min: 6, max: 3 }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"ngram_min_length": 2, "ngram_max_length": 4, "stop_words": []}}"#
        )
        .unwrap();
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.ngram_max_length, 4);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = EngineConfig::load("/nonexistent/config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
