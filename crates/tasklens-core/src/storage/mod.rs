mod config;
pub mod pool;

pub use config::{Config, RelatedConfig, SuggestionsConfig};
pub use pool::{load_pool, parse_pool};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns `~/.config/tasklens[-dev]/` based on TASKLENS_ENV.
///
/// Set TASKLENS_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .ok_or(ConfigError::NoHomeDir)?
        .join(".config");

    let env = std::env::var("TASKLENS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("tasklens-dev")
    } else {
        base_dir.join("tasklens")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
