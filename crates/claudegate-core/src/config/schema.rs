//! Configuration schema — provider-level settings plus one settings block per
//! supported action.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

use crate::types::ActionKind;

/// Default Messages API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

/// Default model for new action configurations.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// `max_tokens` used when an action has no explicit value. The API requires
/// the parameter, so new actions must work without configuration first.
pub const DEFAULT_MAX_TOKENS: u32 = 16384;

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.claudegate/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub provider: ProviderSettings,
    pub actions: ActionsConfig,
}

// ─────────────────────────────────────────────
// Provider-level settings
// ─────────────────────────────────────────────

/// Installation-wide provider settings: API key and rate-limit toggles.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderSettings {
    /// Anthropic API key.
    #[serde(default)]
    pub api_key: String,
    /// Whether per-user hourly rate limiting is enabled.
    #[serde(default)]
    pub enable_user_rate_limit: bool,
    /// Maximum requests a single user may make per hour.
    #[serde(default = "default_user_rate_limit")]
    pub user_rate_limit: u32,
    /// Whether installation-wide hourly rate limiting is enabled.
    #[serde(default)]
    pub enable_global_rate_limit: bool,
    /// Maximum requests across all users per hour.
    #[serde(default = "default_global_rate_limit")]
    pub global_rate_limit: u32,
}

fn default_user_rate_limit() -> u32 {
    60
}

fn default_global_rate_limit() -> u32 {
    1000
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            enable_user_rate_limit: false,
            user_rate_limit: 60,
            enable_global_rate_limit: false,
            global_rate_limit: 1000,
        }
    }
}

impl ProviderSettings {
    /// Whether the provider has the minimal configuration to work.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// ─────────────────────────────────────────────
// Per-action settings
// ─────────────────────────────────────────────

/// Settings for one action: endpoint, model, system instruction, and model
/// parameters.
///
/// Optional sampling parameters are `None` when unset and are then omitted
/// from the outgoing payload; an explicit `0` is preserved.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionSettings {
    /// Messages API endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model identifier (a template name or a custom `claude-…` name).
    #[serde(default = "default_model")]
    pub model: String,
    /// System instruction sent with each request; empty means "use the
    /// action's built-in default".
    #[serde(default)]
    pub system_instruction: String,
    /// Maximum tokens to generate. Required by the API.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature (0.0 – 1.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Nucleus sampling threshold (0.0 – 1.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Sample from the top K most likely tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Free-form extra parameters as a JSON object string; merged over the
    /// named parameters at request-build time. Empty means none.
    #[serde(default)]
    pub extra_params: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

impl Default for ActionSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            system_instruction: String::new(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
            top_p: None,
            top_k: None,
            extra_params: String::new(),
        }
    }
}

impl ActionSettings {
    /// The system instruction to send for `kind`: the configured one, or the
    /// action's built-in default when blank.
    pub fn system_instruction_for(&self, kind: ActionKind) -> String {
        if self.system_instruction.is_empty() {
            kind.default_system_instruction().to_string()
        } else {
            self.system_instruction.clone()
        }
    }
}

/// One [`ActionSettings`] block per supported action.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionsConfig {
    #[serde(default)]
    pub generate_text: ActionSettings,
    #[serde(default)]
    pub summarise_text: ActionSettings,
    #[serde(default)]
    pub explain_text: ActionSettings,
}

impl ActionsConfig {
    /// Get the settings for an action kind.
    pub fn get(&self, kind: ActionKind) -> &ActionSettings {
        match kind {
            ActionKind::GenerateText => &self.generate_text,
            ActionKind::SummariseText => &self.summarise_text,
            ActionKind::ExplainText => &self.explain_text,
        }
    }

    /// Mutable access to the settings for an action kind.
    pub fn get_mut(&mut self, kind: ActionKind) -> &mut ActionSettings {
        match kind {
            ActionKind::GenerateText => &mut self.generate_text,
            ActionKind::SummariseText => &mut self.summarise_text,
            ActionKind::ExplainText => &mut self.explain_text,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.provider.is_configured());
        assert_eq!(config.provider.user_rate_limit, 60);
        assert_eq!(config.provider.global_rate_limit, 1000);
        assert_eq!(config.actions.generate_text.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.actions.generate_text.model, DEFAULT_MODEL);
        assert_eq!(config.actions.generate_text.max_tokens, DEFAULT_MAX_TOKENS);
        assert!(config.actions.generate_text.temperature.is_none());
    }

    #[test]
    fn test_config_from_json_camel_case() {
        let json = serde_json::json!({
            "provider": {
                "apiKey": "sk-ant-test",
                "enableUserRateLimit": true,
                "userRateLimit": 10
            },
            "actions": {
                "summariseText": {
                    "model": "claude-opus-4-1-20250805",
                    "maxTokens": 4096,
                    "temperature": 0.3
                }
            }
        });

        let config: Config = serde_json::from_value(json).unwrap();
        assert_eq!(config.provider.api_key, "sk-ant-test");
        assert!(config.provider.enable_user_rate_limit);
        assert_eq!(config.provider.user_rate_limit, 10);
        // Global limit keeps its default
        assert_eq!(config.provider.global_rate_limit, 1000);
        assert_eq!(
            config.actions.summarise_text.model,
            "claude-opus-4-1-20250805"
        );
        assert_eq!(config.actions.summarise_text.max_tokens, 4096);
        assert_eq!(config.actions.summarise_text.temperature, Some(0.3));
        // Untouched action keeps its defaults
        assert_eq!(config.actions.generate_text.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_config_json_uses_camel_case() {
        let config = Config::default();
        let json = serde_json::to_value(&config).unwrap();

        assert!(json["provider"].get("apiKey").is_some());
        assert!(json["provider"].get("userRateLimit").is_some());
        assert!(json["actions"].get("generateText").is_some());
        assert!(json["actions"]["generateText"].get("maxTokens").is_some());
        // Should NOT have snake_case keys
        assert!(json["provider"].get("api_key").is_none());
        assert!(json["actions"].get("generate_text").is_none());
    }

    #[test]
    fn test_unset_sampling_params_not_serialized() {
        let settings = ActionSettings::default();
        let json = serde_json::to_value(&settings).unwrap();

        assert!(json.get("temperature").is_none());
        assert!(json.get("topP").is_none());
        assert!(json.get("topK").is_none());
    }

    #[test]
    fn test_zero_sampling_param_is_preserved() {
        let settings = ActionSettings {
            temperature: Some(0.0),
            top_k: Some(0),
            ..Default::default()
        };
        let json = serde_json::to_value(&settings).unwrap();

        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["topK"], 0);
    }

    #[test]
    fn test_actions_config_get() {
        let mut config = ActionsConfig::default();
        config.get_mut(ActionKind::ExplainText).model = "claude-haiku-4-5-20251001".to_string();

        assert_eq!(
            config.get(ActionKind::ExplainText).model,
            "claude-haiku-4-5-20251001"
        );
        assert_eq!(config.get(ActionKind::GenerateText).model, DEFAULT_MODEL);
    }

    #[test]
    fn test_system_instruction_fallback() {
        let settings = ActionSettings::default();
        let instruction = settings.system_instruction_for(ActionKind::SummariseText);
        assert!(instruction.contains("Summarise"));

        let overridden = ActionSettings {
            system_instruction: "Be terse.".to_string(),
            ..Default::default()
        };
        assert_eq!(
            overridden.system_instruction_for(ActionKind::SummariseText),
            "Be terse."
        );
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let mut config = Config::default();
        config.provider.api_key = "sk-ant-rt".to_string();
        config.actions.generate_text.top_k = Some(50);

        let json_str = serde_json::to_string_pretty(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&json_str).unwrap();

        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }
}
