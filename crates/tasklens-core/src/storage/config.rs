//! TOML-based application configuration.
//!
//! Stores engine defaults:
//! - Suggestion budget, cap and energy preference
//! - Related-task limit and signal weights
//!
//! Configuration is stored at `~/.config/tasklens/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::related::{RelatednessWeights, DEFAULT_RELATED_LIMIT};
use crate::suggest::{SuggestionOptions, DEFAULT_MAX_SUGGESTIONS, DEFAULT_WORKING_HOURS};

/// Suggestion defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionsConfig {
    #[serde(default = "default_working_hours")]
    pub working_hours: f64,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    #[serde(default)]
    pub consider_energy: bool,
}

/// Related-task defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedConfig {
    #[serde(default = "default_related_limit")]
    pub limit: usize,
    #[serde(default)]
    pub weights: RelatednessWeights,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/tasklens/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub suggestions: SuggestionsConfig,
    #[serde(default)]
    pub related: RelatedConfig,
}

fn default_working_hours() -> f64 {
    DEFAULT_WORKING_HOURS
}
fn default_max_suggestions() -> usize {
    DEFAULT_MAX_SUGGESTIONS
}
fn default_related_limit() -> usize {
    DEFAULT_RELATED_LIMIT
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            working_hours: default_working_hours(),
            max_suggestions: default_max_suggestions(),
            consider_energy: false,
        }
    }
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            limit: default_related_limit(),
            weights: RelatednessWeights::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(n) if n.is_f64() => value
                        .parse::<f64>()
                        .ok()
                        .and_then(serde_json::Number::from_f64)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?,
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "writing default configuration");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a leaf value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, names a section, or the value
    /// does not parse as the existing value's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        Ok(())
    }

    /// Suggestion options seeded from this configuration.
    ///
    /// Out-of-range stored values fall back to the built-in defaults.
    pub fn suggestion_options(&self) -> SuggestionOptions {
        let opts = SuggestionOptions::new()
            .with_working_hours(self.suggestions.working_hours)
            .with_max_suggestions(self.suggestions.max_suggestions)
            .with_consider_energy(self.suggestions.consider_energy);
        if opts.working_hours() != self.suggestions.working_hours
            || opts.max_suggestions() != self.suggestions.max_suggestions
        {
            tracing::warn!("configured suggestion values out of range, using defaults");
        }
        opts
    }

    pub fn relatedness_weights(&self) -> RelatednessWeights {
        self.related.weights
    }

    /// Flattened `key = value` pairs for display.
    pub fn entries(&self) -> Vec<(String, String)> {
        fn walk(prefix: &str, value: &serde_json::Value, out: &mut Vec<(String, String)>) {
            match value {
                serde_json::Value::Object(map) => {
                    for (k, v) in map {
                        let key = if prefix.is_empty() {
                            k.clone()
                        } else {
                            format!("{prefix}.{k}")
                        };
                        walk(&key, v, out);
                    }
                }
                other => out.push((prefix.to_string(), other.to_string())),
            }
        }

        let mut out = Vec::new();
        if let Ok(json) = serde_json::to_value(self) {
            walk("", &json, &mut out);
        }
        out
    }
}
