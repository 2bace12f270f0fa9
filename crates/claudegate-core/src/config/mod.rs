//! Configuration system — schema, loading, and env var overrides.
//!
//! # Usage
//! ```no_run
//! use claudegate_core::config;
//!
//! let cfg = config::load_config(None);
//! println!("Model: {}", cfg.actions.generate_text.model);
//! ```

pub mod loader;
pub mod schema;

// Re-export key types
pub use loader::{get_config_path, load_config, save_config};
pub use schema::{
    ActionSettings, ActionsConfig, Config, ProviderSettings, DEFAULT_ENDPOINT, DEFAULT_MAX_TOKENS,
    DEFAULT_MODEL,
};
