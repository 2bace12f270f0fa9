//! Core types and configuration for Claudegate.
//!
//! # Architecture
//!
//! - [`types`] — actions, normalized results, and the Messages API wire format
//! - [`config`] — configuration schema, JSON loading, env var overrides
//! - [`utils`] — data paths and pseudonymous user ids

pub mod config;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use config::{ActionSettings, Config, ProviderSettings};
pub use types::{Action, ActionFailure, ActionKind, ActionResult, ActionSuccess};
