//! Provider facade — the single entry point the surrounding application
//! calls.
//!
//! Owns the configuration, the rate-limit gate, and the HTTP processor.
//! `process` runs the pre-flight checks (configured key, rate limits) before
//! any request is built, and always returns an [`ActionResult`].

use tracing::{debug, warn};

use claudegate_core::config::{ActionSettings, Config};
use claudegate_core::types::{Action, ActionKind, ActionResult};

use crate::errors::{GLOBAL_RATE_LIMIT_MESSAGE, USER_RATE_LIMIT_MESSAGE};
use crate::processor::MessagesProcessor;
use crate::rate_limit::{RateLimitDenial, RateLimiter};
use crate::settings::RawActionSettings;
use crate::traits::ActionProcessor;

/// Message returned when the API key has not been set.
const NOT_CONFIGURED_MESSAGE: &str =
    "The Anthropic provider is not configured. Please set an API key in the provider settings.";

/// The Anthropic provider: configuration, rate limiting, and dispatch.
pub struct AnthropicProvider {
    config: Config,
    limiter: RateLimiter,
    processor: Box<dyn ActionProcessor>,
}

impl std::fmt::Debug for AnthropicProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicProvider")
            .field("configured", &self.is_configured())
            .finish_non_exhaustive()
    }
}

impl AnthropicProvider {
    /// Create a provider backed by the real Messages API processor.
    pub fn new(config: Config) -> Self {
        let processor = MessagesProcessor::new(config.provider.api_key.clone());
        Self::with_processor(config, Box::new(processor))
    }

    /// Create a provider with a custom processor. Used by tests.
    pub fn with_processor(config: Config, processor: Box<dyn ActionProcessor>) -> Self {
        let config = validate_config(config);
        let limiter = RateLimiter::new((&config.provider).into());
        AnthropicProvider {
            config,
            limiter,
            processor,
        }
    }

    /// The actions this provider can handle.
    pub fn supported_actions() -> &'static [ActionKind] {
        ActionKind::all()
    }

    /// Whether the provider has the configuration it needs to make requests.
    pub fn is_configured(&self) -> bool {
        self.config.provider.is_configured()
    }

    /// The resolved settings for one action.
    pub fn action_settings(&self, kind: ActionKind) -> &ActionSettings {
        self.config.actions.get(kind)
    }

    /// Check the rate limits for `user_id` and consume quota if admitted.
    pub fn is_request_allowed(&self, user_id: &str) -> Result<(), RateLimitDenial> {
        self.limiter.check_and_record(user_id)
    }

    /// Run one action end to end.
    ///
    /// Pre-flight failures (missing key, rate limits) come back as failure
    /// results without touching the network.
    pub async fn process(&self, action: &Action) -> ActionResult {
        if !self.is_configured() {
            warn!(action = %action.kind, "Rejecting request: provider not configured");
            return ActionResult::failure(0, NOT_CONFIGURED_MESSAGE);
        }

        if let Err(denial) = self.is_request_allowed(&action.user_id) {
            warn!(
                action = %action.kind,
                user = %action.user_id,
                denial = ?denial,
                "Rejecting request: rate limit reached"
            );
            let message = match denial {
                RateLimitDenial::User => USER_RATE_LIMIT_MESSAGE,
                RateLimitDenial::Global => GLOBAL_RATE_LIMIT_MESSAGE,
            };
            return ActionResult::failure(429, message);
        }

        let settings = self.action_settings(action.kind);
        debug!(action = %action.kind, model = %settings.model, "Dispatching action");
        self.processor.process(action, settings).await
    }
}

/// Re-validate each action's stored settings through the same rules that
/// apply at settings entry.
///
/// A hand-edited config file can hold values `RawActionSettings::resolve`
/// would reject. Invalid blocks are replaced with defaults, the same way
/// the loader falls back on an unparsable file.
fn validate_config(mut config: Config) -> Config {
    for kind in ActionKind::all() {
        let settings = config.actions.get_mut(*kind);
        match RawActionSettings::from_settings(settings).resolve() {
            Ok(resolved) => *settings = resolved,
            Err(errors) => {
                for error in &errors {
                    warn!(action = %kind, %error, "Invalid stored action settings");
                }
                warn!(action = %kind, "Falling back to default action settings");
                *settings = ActionSettings::default();
            }
        }
    }
    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
