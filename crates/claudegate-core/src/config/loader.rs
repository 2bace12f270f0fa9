//! Config loader — reads `~/.claudegate/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.claudegate/config.json`
//! 3. Environment variables `CLAUDEGATE_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{ActionSettings, Config};
use crate::types::ActionKind;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be
/// parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    // Ensure parent directory exists
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `CLAUDEGATE_<SECTION>__<FIELD>` (double underscore as
/// delimiter).
///
/// Supported overrides:
/// - `CLAUDEGATE_PROVIDER__API_KEY` → `provider.api_key`
/// - `CLAUDEGATE_PROVIDER__USER_RATE_LIMIT` → `provider.user_rate_limit`
/// - `CLAUDEGATE_PROVIDER__GLOBAL_RATE_LIMIT` → `provider.global_rate_limit`
/// - `CLAUDEGATE_ACTIONS__<ACTION>__MODEL` → `actions.<action>.model`
/// - `CLAUDEGATE_ACTIONS__<ACTION>__ENDPOINT` → `actions.<action>.endpoint`
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(val) = std::env::var("CLAUDEGATE_PROVIDER__API_KEY") {
        config.provider.api_key = val;
    }
    if let Ok(val) = std::env::var("CLAUDEGATE_PROVIDER__USER_RATE_LIMIT") {
        if let Ok(n) = val.parse::<u32>() {
            config.provider.user_rate_limit = n;
            config.provider.enable_user_rate_limit = true;
        }
    }
    if let Ok(val) = std::env::var("CLAUDEGATE_PROVIDER__GLOBAL_RATE_LIMIT") {
        if let Ok(n) = val.parse::<u32>() {
            config.provider.global_rate_limit = n;
            config.provider.enable_global_rate_limit = true;
        }
    }

    for kind in ActionKind::all() {
        let settings = config.actions.get_mut(*kind);
        apply_action_env(settings, &kind.as_str().to_uppercase());
    }

    config
}

/// Apply env var overrides for a single action's settings.
fn apply_action_env(settings: &mut ActionSettings, name: &str) {
    if let Ok(val) = std::env::var(format!("CLAUDEGATE_ACTIONS__{name}__MODEL")) {
        settings.model = val;
    }
    if let Ok(val) = std::env::var(format!("CLAUDEGATE_ACTIONS__{name}__ENDPOINT")) {
        settings.endpoint = val;
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
