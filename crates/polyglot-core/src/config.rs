//! Resolver configuration: naming prefix and language overrides.
//!
//! ```yaml
//! prefix: lemmatizer
//! overrides:
//!   de: my-custom-german-lemmatizer
//!   "*": lemmatizer-default
//! ```
//!
//! Languages without an override resolve to `<prefix>-<language>`. The
//! wildcard entry names the strategy used when no language-specific one
//! exists, and must always be present.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Reserved override key naming the universal default strategy.
pub const WILDCARD: &str = "*";

/// Prefix used to derive identifiers from language keys.
pub const DEFAULT_PREFIX: &str = "lemmatizer";

/// Identifier of the built-in universal default strategy.
pub const DEFAULT_STRATEGY: &str = "lemmatizer-default";

/// Errors that can occur when loading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config validation failed: {0}")]
    ValidationError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// On-disk shape of the configuration, wildcard kept in `overrides`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default = "default_prefix")]
    prefix: String,

    #[serde(default = "default_overrides")]
    overrides: BTreeMap<String, String>,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_overrides() -> BTreeMap<String, String> {
    BTreeMap::from([(WILDCARD.to_string(), DEFAULT_STRATEGY.to_string())])
}

/// Static mapping from language keys to strategy identifiers.
///
/// Fixed once a resolver is built from it. The wildcard default is held
/// apart from the language overrides, so it is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ConfigFile", into = "ConfigFile")]
pub struct ResolverConfig {
    prefix: String,
    overrides: BTreeMap<String, String>,
    default: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            overrides: BTreeMap::new(),
            default: DEFAULT_STRATEGY.to_string(),
        }
    }
}

impl TryFrom<ConfigFile> for ResolverConfig {
    type Error = ConfigError;

    fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
        let mut overrides = file.overrides;
        let default = overrides
            .remove(WILDCARD)
            .ok_or_else(|| ConfigError::MissingField(format!("overrides.\"{}\"", WILDCARD)))?;
        let config = Self {
            prefix: file.prefix,
            overrides,
            default,
        };
        config.validate()?;
        Ok(config)
    }
}

impl From<ResolverConfig> for ConfigFile {
    fn from(config: ResolverConfig) -> Self {
        let mut overrides = config.overrides;
        overrides.insert(WILDCARD.to_string(), config.default);
        Self {
            prefix: config.prefix,
            overrides,
        }
    }
}

impl ResolverConfig {
    /// Parse a config from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a config from JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a config from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Add a language override. The `"*"` key replaces the default.
    pub fn with_override(mut self, language: impl Into<String>, identifier: impl Into<String>) -> Self {
        let language = language.into();
        if language == WILDCARD {
            self.default = identifier.into();
        } else {
            self.overrides.insert(language, identifier.into());
        }
        self
    }

    /// Replace the universal default strategy.
    pub fn with_default(mut self, identifier: impl Into<String>) -> Self {
        self.default = identifier.into();
        self
    }

    /// Replace the naming prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Check the prefix and identifiers.
    ///
    /// Loading from YAML or JSON always validates; configs assembled with the
    /// `with_*` helpers are checked by [`crate::Resolver::try_new`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefix.trim().is_empty() {
            return Err(ConfigError::MissingField("prefix".to_string()));
        }

        if self.default.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "Empty strategy identifier for '{}'",
                WILDCARD
            )));
        }

        for (language, identifier) in &self.overrides {
            if language.is_empty() {
                return Err(ConfigError::ValidationError(
                    "Override with empty language key".to_string(),
                ));
            }
            if identifier.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "Empty strategy identifier for language '{}'",
                    language
                )));
            }
        }

        Ok(())
    }

    /// Naming prefix for derived identifiers.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Language-specific overrides, without the wildcard.
    pub fn overrides(&self) -> &BTreeMap<String, String> {
        &self.overrides
    }

    /// Identifier of the universal default strategy.
    pub fn default_identifier(&self) -> &str {
        &self.default
    }

    /// First identifier to try for `language`: its override, else
    /// `<prefix>-<language>`.
    pub fn candidate_identifier(&self, language: &str) -> String {
        if language == WILDCARD {
            return self.default.clone();
        }
        match self.overrides.get(language) {
            Some(identifier) => identifier.clone(),
            None => format!("{}-{}", self.prefix, language),
        }
    }
}
