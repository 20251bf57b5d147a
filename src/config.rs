//! Configuration for near query evaluation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NearSpanError, Result};

/// Parameters of a near query evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NearQueryConfig {
    /// Maximum slop a match may have to be reported.
    pub allowed_slop: u32,

    /// Stop after this many matching documents.
    pub max_docs: Option<usize>,

    /// Keep at most this many matches per document.
    /// Further matches are still counted.
    pub max_matches_per_doc: Option<usize>,
}

impl NearQueryConfig {
    /// Create a configuration with the given slop and no limits.
    pub fn with_slop(allowed_slop: u32) -> Self {
        Self {
            allowed_slop,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Missing keys take defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: NearQueryConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every limit is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_docs == Some(0) {
            return Err(NearSpanError::config("max_docs must be greater than 0"));
        }
        if self.max_matches_per_doc == Some(0) {
            return Err(NearSpanError::config(
                "max_matches_per_doc must be greater than 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = NearQueryConfig::default();
        assert_eq!(config.allowed_slop, 0);
        assert!(config.max_docs.is_none());
        assert!(config.validate().is_ok());
        assert_eq!(NearQueryConfig::with_slop(4).allowed_slop, 4);
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let config = NearQueryConfig {
            max_docs: Some(0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(NearSpanError::Config(_))));

        let config = NearQueryConfig {
            max_matches_per_doc: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"allowed_slop": 3, "max_docs": 10}}"#).unwrap();

        let config = NearQueryConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.allowed_slop, 3);
        assert_eq!(config.max_docs, Some(10));
        assert_eq!(config.max_matches_per_doc, None);

        let mut bad = NamedTempFile::new().unwrap();
        write!(bad, "not json").unwrap();
        assert!(matches!(
            NearQueryConfig::from_json_file(bad.path()),
            Err(NearSpanError::Json(_))
        ));
    }
}
