//! Settings loaded from the environment.

use crate::compare::{CompareOptions, Granularity};
use crate::error::ConfigError;
use crate::interchange::Format;
use serde::{Deserialize, Serialize};

pub const GRANULARITY_VAR: &str = "MULTILINE_DIFF_GRANULARITY";
pub const EXPORT_PREFIX_VAR: &str = "MULTILINE_EXPORT_PREFIX";
pub const EXPORT_FORMAT_VAR: &str = "MULTILINE_EXPORT_FORMAT";

const DEFAULT_EXPORT_PREFIX: &str = "flashcards";

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub compare: CompareOptions,
    #[serde(default = "default_export_prefix")]
    pub export_prefix: String,
    #[serde(default)]
    pub export_format: Format,
}

fn default_export_prefix() -> String {
    DEFAULT_EXPORT_PREFIX.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            compare: CompareOptions::default(),
            export_prefix: default_export_prefix(),
            export_format: Format::default(),
        }
    }
}

impl Settings {
    /// Load settings from the process environment, reading `.env` first if
    /// one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup. Missing keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(value) = lookup(GRANULARITY_VAR) {
            settings.compare.granularity =
                Granularity::from_str(value.trim()).ok_or_else(|| ConfigError::InvalidValue {
                    key: GRANULARITY_VAR.to_string(),
                    value: value.clone(),
                })?;
        }

        if let Some(prefix) = lookup(EXPORT_PREFIX_VAR) {
            let prefix = prefix.trim();
            if !prefix.is_empty() {
                settings.export_prefix = prefix.to_string();
            }
        }

        if let Some(value) = lookup(EXPORT_FORMAT_VAR) {
            settings.export_format =
                Format::from_str(value.trim()).ok_or_else(|| ConfigError::InvalidValue {
                    key: EXPORT_FORMAT_VAR.to_string(),
                    value: value.clone(),
                })?;
        }

        tracing::debug!(
            granularity = settings.compare.granularity.as_str(),
            export_prefix = %settings.export_prefix,
            export_format = settings.export_format.as_str(),
            "loaded settings"
        );

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.compare.granularity, Granularity::Word);
        assert_eq!(settings.export_prefix, "flashcards");
        assert_eq!(settings.export_format, Format::Yaml);
    }

    #[test]
    fn reads_granularity_and_prefix() {
        let settings = Settings::from_lookup(lookup(&[
            (GRANULARITY_VAR, "character"),
            (EXPORT_PREFIX_VAR, "backup"),
            (EXPORT_FORMAT_VAR, "JSON"),
        ]))
        .unwrap();
        assert_eq!(settings.compare.granularity, Granularity::Character);
        assert_eq!(settings.export_prefix, "backup");
        assert_eq!(settings.export_format, Format::Json);
    }

    #[test]
    fn rejects_unknown_export_format() {
        let result = Settings::from_lookup(lookup(&[(EXPORT_FORMAT_VAR, "toml")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { key, .. }) if key == EXPORT_FORMAT_VAR));
    }

    #[test]
    fn blank_prefix_keeps_default() {
        let settings = Settings::from_lookup(lookup(&[(EXPORT_PREFIX_VAR, "  ")])).unwrap();
        assert_eq!(settings.export_prefix, "flashcards");
    }

    #[test]
    fn rejects_unknown_granularity() {
        let result = Settings::from_lookup(lookup(&[(GRANULARITY_VAR, "sentence")]));
        assert_eq!(
            result,
            Err(ConfigError::InvalidValue {
                key: GRANULARITY_VAR.to_string(),
                value: "sentence".to_string(),
            })
        );
    }

    #[test]
    fn deserializes_partial_settings() {
        let settings: Settings = serde_json::from_str(r#"{"compare": {"granularity": "character"}}"#).unwrap();
        assert_eq!(settings.compare.granularity, Granularity::Character);
        assert_eq!(settings.export_prefix, "flashcards");
    }
}
