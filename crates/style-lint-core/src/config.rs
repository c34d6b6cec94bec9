//! Configuration types for style-lint.

use crate::rule::RuleBox;
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use tracing::debug;

/// Top-level configuration, usually read from `style-lint.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Rules that should not run.
    #[serde(default)]
    pub disabled_rules: Vec<String>,

    /// When set, only these rules run.
    #[serde(default)]
    pub only_rules: Option<Vec<String>>,

    /// Glob patterns of files to lint (default: every `*.swift` file).
    #[serde(default)]
    pub included: Vec<String>,

    /// Glob patterns of files to skip.
    #[serde(default)]
    pub excluded: Vec<String>,

    /// Per-rule configurations keyed by rule identifier.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, identifier: &str) -> bool {
        if self.disabled_rules.iter().any(|r| r == identifier) {
            return false;
        }
        self.only_rules
            .as_ref()
            .map_or(true, |only| only.iter().any(|r| r == identifier))
    }

    /// Validates every identifier this config mentions and hands each rule
    /// its section.
    ///
    /// Must run before any file is processed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownRule`] for identifiers that match no
    /// rule, and whatever a rule reports for its own section.
    pub fn apply(&self, rules: &mut [RuleBox]) -> Result<(), ConfigError> {
        let known: BTreeSet<&str> = rules.iter().map(|r| r.identifier()).collect();

        let mentioned = self
            .rules
            .keys()
            .chain(&self.disabled_rules)
            .chain(self.only_rules.iter().flatten());
        for identifier in mentioned {
            if !known.contains(identifier.as_str()) {
                return Err(ConfigError::UnknownRule {
                    identifier: identifier.clone(),
                });
            }
        }

        for rule in rules.iter_mut() {
            if let Some(section) = self.rules.get(rule.identifier()) {
                debug!("Configuring rule: {}", rule.identifier());
                rule.configure(section)?;
            }
        }

        Ok(())
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: BTreeMap<String, toml::Value>,
}

impl RuleConfig {
    /// Fails on any option key outside `allowed`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] naming the first unknown key.
    pub fn reject_unknown(&self, rule: &str, allowed: &[&str]) -> Result<(), ConfigError> {
        match self.options.keys().find(|k| !allowed.contains(&k.as_str())) {
            Some(key) => Err(ConfigError::invalid(rule, key, "unknown option")),
            None => Ok(()),
        }
    }

    /// Gets a non-negative integer option.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if the value is not a
    /// non-negative integer.
    pub fn get_usize(&self, rule: &str, key: &str) -> Result<Option<usize>, ConfigError> {
        self.options
            .get(key)
            .map(|value| {
                as_usize(value).ok_or_else(|| {
                    ConfigError::invalid(rule, key, "expected a non-negative integer")
                })
            })
            .transpose()
    }

    /// Gets an array of non-negative integers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if the value is not such an array.
    pub fn get_usize_array(&self, rule: &str, key: &str) -> Result<Option<Vec<usize>>, ConfigError> {
        let Some(value) = self.options.get(key) else {
            return Ok(None);
        };
        let invalid = || ConfigError::invalid(rule, key, "expected an array of non-negative integers");
        let array = value.as_array().ok_or_else(invalid)?;
        array
            .iter()
            .map(|v| as_usize(v).ok_or_else(invalid))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Gets a string array option.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if the value is not an array of
    /// strings.
    pub fn get_str_array(&self, rule: &str, key: &str) -> Result<Option<Vec<String>>, ConfigError> {
        let Some(value) = self.options.get(key) else {
            return Ok(None);
        };
        let invalid = || ConfigError::invalid(rule, key, "expected an array of strings");
        let array = value.as_array().ok_or_else(invalid)?;
        array
            .iter()
            .map(|v| v.as_str().map(String::from).ok_or_else(invalid))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

fn as_usize(value: &toml::Value) -> Option<usize> {
    value.as_integer().and_then(|i| usize::try_from(i).ok())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// The config names a rule that does not exist.
    #[error("Unknown rule identifier `{identifier}`")]
    UnknownRule {
        /// The unrecognized identifier.
        identifier: String,
    },

    /// A rule option has the wrong type or value.
    #[error("Invalid option `{key}` for rule `{rule}`: {message}")]
    InvalidOption {
        /// Rule identifier.
        rule: String,
        /// Option key.
        key: String,
        /// What was wrong.
        message: String,
    },
}

impl ConfigError {
    /// Creates an [`ConfigError::InvalidOption`].
    #[must_use]
    pub fn invalid(rule: &str, key: &str, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            rule: rule.to_string(),
            key: key.to_string(),
            message: message.into(),
        }
    }
}
