//! Analysis configuration.
//!
//! Values come from an optional TOML file and are then overridden by
//! command-line flags. Every field has a default, so an empty file (or no
//! file at all) is a valid configuration.
//!
//! ```toml
//! usage_threshold = 30
//! top_n = 5
//!
//! [weights]
//! usage = 0.6
//! impact = 0.3
//! confidence = 0.1
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::report::RemovalCandidateWeights;

/// Usage percentage below which a dependency is flagged as low usage.
pub const DEFAULT_USAGE_THRESHOLD: u8 = 20;

/// Number of dependencies kept in the waste ranking.
pub const DEFAULT_TOP_N: usize = 10;

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Usage percentage (0-100) below which `reduce-low-usage-package-surface` is recommended.
    pub usage_threshold: u8,
    /// Number of dependencies kept in the ranking; 0 keeps all.
    pub top_n: usize,
    /// Weights of the composite waste score.
    pub weights: RemovalCandidateWeights,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            usage_threshold: DEFAULT_USAGE_THRESHOLD,
            top_n: DEFAULT_TOP_N,
            weights: RemovalCandidateWeights::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: AnalysisConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.usage_threshold > 100 {
            return Err(ConfigError::Invalid(format!(
                "usage_threshold must be between 0 and 100, got {}",
                self.usage_threshold
            )));
        }
        let weights = [
            ("usage", self.weights.usage),
            ("impact", self.weights.impact),
            ("confidence", self.weights.confidence),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "weights.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if !self.weights.is_valid() {
            return Err(ConfigError::Invalid("weights must not all be zero".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.usage_threshold, 20);
        assert_eq!(config.top_n, 10);
        assert_eq!(config.weights, RemovalCandidateWeights::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AnalysisConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = AnalysisConfig::from_toml_str(
            r#"
usage_threshold = 35

[weights]
impact = 0.5
"#,
        )
        .unwrap();
        assert_eq!(config.usage_threshold, 35);
        assert_eq!(config.top_n, DEFAULT_TOP_N);
        assert_eq!(config.weights, RemovalCandidateWeights::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_threshold_out_of_range() {
        let err = AnalysisConfig::from_toml_str("usage_threshold = 150").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let err = AnalysisConfig::from_toml_str("[weights]\nusage = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("weights.usage")));
    }

    #[test]
    fn test_all_zero_weights_rejected() {
        let toml = "[weights]\nusage = 0.0\nimpact = 0.0\nconfidence = 0.0";
        let err = AnalysisConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("all be zero")));
    }

    #[test]
    fn test_malformed_toml() {
        let err = AnalysisConfig::from_toml_str("top_n = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "top_n = 3").unwrap();
        let config = AnalysisConfig::from_file(file.path()).unwrap();
        assert_eq!(config.top_n, 3);
    }

    #[test]
    fn test_missing_file() {
        let err = AnalysisConfig::from_file(Path::new("/nonexistent/usagescope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead(_)));
    }
}
