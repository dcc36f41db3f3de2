//! Environment-driven configuration for the `ledgerbell` binary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ledgerbell_accounting::ValidationPolicy;
use ledgerbell_observability::{LogFormat, ParseLogFormatError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: unknown validation mode {value:?} (expected \"permissive\" or \"strict\")")]
    InvalidValidation { var: &'static str, value: String },

    #[error("{var}: {source}")]
    InvalidLogFormat {
        var: &'static str,
        #[source]
        source: ParseLogFormatError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Sign checks applied to every account the directory opens.
    pub validation: ValidationPolicy,
    pub log_format: LogFormat,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            validation: ValidationPolicy::Permissive,
            log_format: LogFormat::Json,
            log_filter: "warn".to_string(),
        }
    }
}

impl CliConfig {
    pub const VALIDATION_VAR: &'static str = "LEDGERBELL_VALIDATION";
    pub const LOG_FORMAT_VAR: &'static str = "LEDGERBELL_LOG_FORMAT";
    pub const LOG_FILTER_VAR: &'static str = "LEDGERBELL_LOG";

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source. Unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(Self::VALIDATION_VAR) {
            config.validation = match value.trim().to_ascii_lowercase().as_str() {
                "permissive" => ValidationPolicy::Permissive,
                "strict" => ValidationPolicy::Strict,
                _ => {
                    return Err(ConfigError::InvalidValidation {
                        var: Self::VALIDATION_VAR,
                        value,
                    });
                }
            };
        }

        if let Some(value) = lookup(Self::LOG_FORMAT_VAR) {
            config.log_format = value.parse().map_err(|source| ConfigError::InvalidLogFormat {
                var: Self::LOG_FORMAT_VAR,
                source,
            })?;
        }

        if let Some(value) = lookup(Self::LOG_FILTER_VAR).filter(|v| !v.trim().is_empty()) {
            config.log_filter = value.trim().to_string();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = CliConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.validation, ValidationPolicy::Permissive);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn blank_log_filter_keeps_default() {
        let config = CliConfig::from_lookup(lookup(&[("LEDGERBELL_LOG", "  ")])).unwrap();
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn reads_every_variable() {
        let config = CliConfig::from_lookup(lookup(&[
            ("LEDGERBELL_VALIDATION", "Strict"),
            ("LEDGERBELL_LOG_FORMAT", "text"),
            ("LEDGERBELL_LOG", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.validation, ValidationPolicy::Strict);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn unknown_values_are_errors() {
        let err = CliConfig::from_lookup(lookup(&[("LEDGERBELL_VALIDATION", "lenient")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValidation { .. }));

        let err = CliConfig::from_lookup(lookup(&[("LEDGERBELL_LOG_FORMAT", "xml")])).unwrap_err();
        assert!(err.to_string().starts_with("LEDGERBELL_LOG_FORMAT: unknown log format"));
    }
}
