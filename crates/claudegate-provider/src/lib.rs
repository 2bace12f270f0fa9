//! Anthropic provider layer for Claudegate.
//!
//! # Architecture
//!
//! - [`provider::AnthropicProvider`] — facade: config + rate limiting + dispatch
//! - [`traits::ActionProcessor`] — trait the HTTP layer implements
//! - [`processor::MessagesProcessor`] — direct Messages API HTTP client
//! - [`request`] — request body construction with extra-params merging
//! - [`settings`] — form-level settings validation and normalization
//! - [`models`] — static specs for the predefined Claude models
//! - [`rate_limit`] — hourly per-user and global rate-limit gate
//! - [`errors`] — user-facing error message templates

pub mod errors;
pub mod models;
pub mod processor;
pub mod provider;
pub mod rate_limit;
pub mod request;
pub mod settings;
pub mod traits;

// Re-export main types for convenience
pub use errors::{friendly_error_message, GLOBAL_RATE_LIMIT_MESSAGE, USER_RATE_LIMIT_MESSAGE};
pub use models::{ModelSpec, CUSTOM_TEMPLATE, MODELS, MODEL_NAME_PREFIX};
pub use processor::MessagesProcessor;
pub use provider::AnthropicProvider;
pub use rate_limit::{RateLimitConfig, RateLimitDenial, RateLimiter};
pub use request::build_request_body;
pub use settings::{RawActionSettings, SettingsError};
pub use traits::ActionProcessor;
