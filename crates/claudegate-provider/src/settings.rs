//! Per-action settings entry and validation.
//!
//! [`RawActionSettings`] holds the fields exactly as an admin entered them —
//! all strings, blanks allowed. [`RawActionSettings::resolve`] validates and
//! normalizes them into the typed [`ActionSettings`] stored in config.
//!
//! Normalization rules: a blank numeric field means "unset" and is dropped;
//! an explicit `"0"` is kept as zero. Validation happens here, never at
//! request-build time.

use thiserror::Error;

use claudegate_core::config::{ActionSettings, DEFAULT_ENDPOINT};

use crate::models::{self, CUSTOM_TEMPLATE};

/// A settings-entry error, one per offending field.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("A custom model name is required when the custom template is selected")]
    MissingCustomModel,
    #[error("Model name must start with \"claude-\". Example: claude-sonnet-4-20250514")]
    InvalidModelName,
    #[error("Max tokens must be a positive number")]
    MaxTokensNotPositive,
    #[error("Max tokens cannot exceed {max} for this model")]
    MaxTokensExceedsLimit { max: u32 },
    #[error("Temperature must be between 0.0 and 1.0")]
    TemperatureOutOfRange,
    #[error("Top P must be between 0.0 and 1.0")]
    TopPOutOfRange,
    #[error("Top K must be a positive number")]
    TopKNotPositive,
    #[error("Invalid number for {field}")]
    InvalidNumber { field: &'static str },
    #[error("Invalid JSON string")]
    InvalidExtraParams,
}

/// Settings fields as entered, before validation.
///
/// `model_template` is either a predefined model name or `"custom"`, in which
/// case `custom_model` carries the full model name.
#[derive(Clone, Debug, Default)]
pub struct RawActionSettings {
    pub model_template: String,
    pub custom_model: String,
    pub endpoint: String,
    pub system_instruction: String,
    pub max_tokens: String,
    pub temperature: String,
    pub top_p: String,
    pub top_k: String,
    pub extra_params: String,
}

impl RawActionSettings {
    /// Build the raw (string-valued) view of stored settings, for editing.
    pub fn from_settings(settings: &ActionSettings) -> Self {
        let template = models::template_for(&settings.model);
        RawActionSettings {
            model_template: template.to_string(),
            custom_model: if template == CUSTOM_TEMPLATE {
                settings.model.clone()
            } else {
                String::new()
            },
            endpoint: settings.endpoint.clone(),
            system_instruction: settings.system_instruction.clone(),
            max_tokens: settings.max_tokens.to_string(),
            temperature: settings
                .temperature
                .map(|v| v.to_string())
                .unwrap_or_default(),
            top_p: settings.top_p.map(|v| v.to_string()).unwrap_or_default(),
            top_k: settings
                .top_k
                .map(|v| v.to_string())
                .unwrap_or_default(),
            extra_params: settings.extra_params.clone(),
        }
    }

    /// Validate every field and produce typed settings.
    ///
    /// Returns all errors found, keyed by order of the offending fields, so a
    /// caller can report more than the first problem.
    pub fn resolve(&self) -> Result<ActionSettings, Vec<SettingsError>> {
        let mut errors = Vec::new();

        // Model template vs custom name
        let model = if self.model_template == CUSTOM_TEMPLATE {
            if self.custom_model.is_empty() {
                errors.push(SettingsError::MissingCustomModel);
                String::new()
            } else if !models::is_valid_model_name(&self.custom_model) {
                errors.push(SettingsError::InvalidModelName);
                String::new()
            } else {
                self.custom_model.clone()
            }
        } else if !models::is_valid_model_name(&self.model_template) {
            errors.push(SettingsError::InvalidModelName);
            String::new()
        } else {
            self.model_template.clone()
        };

        // max_tokens: required, positive, within the template's limit.
        // Blank falls back to the template's own default.
        let mut max_tokens = models::find_by_name(&model).map_or(
            claudegate_core::config::DEFAULT_MAX_TOKENS,
            |spec| spec.default_max_tokens,
        );
        match parse_optional::<u32>(&self.max_tokens, "max_tokens") {
            Ok(Some(0)) => errors.push(SettingsError::MaxTokensNotPositive),
            Ok(Some(v)) => max_tokens = v,
            Ok(None) => {}
            Err(e) => errors.push(e),
        }
        if let Some(spec) = models::find_by_name(&model) {
            if max_tokens > spec.max_tokens_limit {
                errors.push(SettingsError::MaxTokensExceedsLimit {
                    max: spec.max_tokens_limit,
                });
            }
        }

        // Sampling parameters: blank means unset, zero is a real value
        let temperature = match parse_optional::<f64>(&self.temperature, "temperature") {
            Ok(v) => v,
            Err(e) => {
                errors.push(e);
                None
            }
        };
        if let Some(t) = temperature {
            if !(0.0..=1.0).contains(&t) {
                errors.push(SettingsError::TemperatureOutOfRange);
            }
        }

        let top_p = match parse_optional::<f64>(&self.top_p, "top_p") {
            Ok(v) => v,
            Err(e) => {
                errors.push(e);
                None
            }
        };
        if let Some(p) = top_p {
            if !(0.0..=1.0).contains(&p) {
                errors.push(SettingsError::TopPOutOfRange);
            }
        }

        let top_k = match parse_optional::<u32>(&self.top_k, "top_k") {
            Ok(v) => v,
            Err(e) => {
                errors.push(e);
                None
            }
        };
        if top_k == Some(0) {
            errors.push(SettingsError::TopKNotPositive);
        }

        // Extra parameters must be a JSON object when present
        if !self.extra_params.is_empty() {
            match serde_json::from_str::<serde_json::Value>(&self.extra_params) {
                Ok(serde_json::Value::Object(_)) => {}
                _ => errors.push(SettingsError::InvalidExtraParams),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ActionSettings {
            endpoint: if self.endpoint.is_empty() {
                DEFAULT_ENDPOINT.to_string()
            } else {
                self.endpoint.clone()
            },
            model,
            system_instruction: self.system_instruction.clone(),
            max_tokens,
            temperature,
            top_p,
            top_k,
            extra_params: self.extra_params.clone(),
        })
    }
}

/// Parse a numeric field: blank → `None`, otherwise the parsed value.
fn parse_optional<T: std::str::FromStr>(
    raw: &str,
    field: &'static str,
) -> Result<Option<T>, SettingsError> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(|_| SettingsError::InvalidNumber { field })
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use claudegate_core::config::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL};

    fn raw_with_model(template: &str) -> RawActionSettings {
        RawActionSettings {
            model_template: template.to_string(),
            max_tokens: "4096".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_predefined_model() {
        let settings = raw_with_model(DEFAULT_MODEL).resolve().unwrap();
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.max_tokens, 4096);
    }

    #[test]
    fn test_resolve_custom_model() {
        let mut raw = raw_with_model(CUSTOM_TEMPLATE);
        raw.custom_model = "claude-opus-5-20260101".to_string();

        let settings = raw.resolve().unwrap();
        assert_eq!(settings.model, "claude-opus-5-20260101");
    }

    #[test]
    fn test_custom_template_requires_name() {
        let errors = raw_with_model(CUSTOM_TEMPLATE).resolve().unwrap_err();
        assert!(errors.contains(&SettingsError::MissingCustomModel));
    }

    #[test]
    fn test_custom_model_must_have_claude_prefix() {
        let mut raw = raw_with_model(CUSTOM_TEMPLATE);
        raw.custom_model = "gpt-4o".to_string();

        let errors = raw.resolve().unwrap_err();
        assert!(errors.contains(&SettingsError::InvalidModelName));
    }

    #[test]
    fn test_blank_max_tokens_uses_template_default() {
        let mut raw = raw_with_model(DEFAULT_MODEL);
        raw.max_tokens = String::new();

        let settings = raw.resolve().unwrap();
        let spec = models::find_by_name(DEFAULT_MODEL).unwrap();
        assert_eq!(settings.max_tokens, spec.default_max_tokens);
    }

    #[test]
    fn test_blank_max_tokens_for_custom_model() {
        let mut raw = raw_with_model(CUSTOM_TEMPLATE);
        raw.custom_model = "claude-opus-5-20260101".to_string();
        raw.max_tokens = String::new();

        // No template, no per-model default
        let settings = raw.resolve().unwrap();
        assert_eq!(settings.max_tokens, DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn test_zero_max_tokens_rejected() {
        let mut raw = raw_with_model(DEFAULT_MODEL);
        raw.max_tokens = "0".to_string();

        let errors = raw.resolve().unwrap_err();
        assert!(errors.contains(&SettingsError::MaxTokensNotPositive));
    }

    #[test]
    fn test_max_tokens_over_model_limit() {
        let mut raw = raw_with_model("claude-opus-4-1-20250805");
        raw.max_tokens = "40000".to_string(); // Opus limit is 32000

        let errors = raw.resolve().unwrap_err();
        assert!(errors.contains(&SettingsError::MaxTokensExceedsLimit { max: 32000 }));
    }

    #[test]
    fn test_max_tokens_over_limit_allowed_for_custom() {
        let mut raw = raw_with_model(CUSTOM_TEMPLATE);
        raw.custom_model = "claude-opus-5-20260101".to_string();
        raw.max_tokens = "1000000".to_string();

        // No template, no known limit
        assert!(raw.resolve().is_ok());
    }

    #[test]
    fn test_temperature_range() {
        let mut raw = raw_with_model(DEFAULT_MODEL);
        raw.temperature = "1.5".to_string();
        let errors = raw.resolve().unwrap_err();
        assert!(errors.contains(&SettingsError::TemperatureOutOfRange));

        let mut raw = raw_with_model(DEFAULT_MODEL);
        raw.temperature = "0.7".to_string();
        assert_eq!(raw.resolve().unwrap().temperature, Some(0.7));
    }

    #[test]
    fn test_zero_temperature_is_kept() {
        let mut raw = raw_with_model(DEFAULT_MODEL);
        raw.temperature = "0".to_string();

        // "0" is a real value, not "unset"
        assert_eq!(raw.resolve().unwrap().temperature, Some(0.0));
    }

    #[test]
    fn test_blank_sampling_params_are_unset() {
        let settings = raw_with_model(DEFAULT_MODEL).resolve().unwrap();
        assert!(settings.temperature.is_none());
        assert!(settings.top_p.is_none());
        assert!(settings.top_k.is_none());
    }

    #[test]
    fn test_top_p_range() {
        let mut raw = raw_with_model(DEFAULT_MODEL);
        raw.top_p = "1.2".to_string();
        let errors = raw.resolve().unwrap_err();
        assert!(errors.contains(&SettingsError::TopPOutOfRange));
    }

    #[test]
    fn test_top_k_must_be_positive() {
        let mut raw = raw_with_model(DEFAULT_MODEL);
        raw.top_k = "0".to_string();
        let errors = raw.resolve().unwrap_err();
        assert!(errors.contains(&SettingsError::TopKNotPositive));

        let mut raw = raw_with_model(DEFAULT_MODEL);
        raw.top_k = "40".to_string();
        assert_eq!(raw.resolve().unwrap().top_k, Some(40));
    }

    #[test]
    fn test_non_numeric_field_rejected() {
        let mut raw = raw_with_model(DEFAULT_MODEL);
        raw.temperature = "warm".to_string();
        let errors = raw.resolve().unwrap_err();
        assert!(errors.contains(&SettingsError::InvalidNumber {
            field: "temperature"
        }));
    }

    #[test]
    fn test_invalid_extra_params_rejected() {
        let mut raw = raw_with_model(DEFAULT_MODEL);
        raw.extra_params = "{not json".to_string();
        let errors = raw.resolve().unwrap_err();
        assert!(errors.contains(&SettingsError::InvalidExtraParams));
    }

    #[test]
    fn test_extra_params_must_be_object() {
        let mut raw = raw_with_model(DEFAULT_MODEL);
        raw.extra_params = "[1, 2, 3]".to_string();
        let errors = raw.resolve().unwrap_err();
        assert!(errors.contains(&SettingsError::InvalidExtraParams));
    }

    #[test]
    fn test_valid_extra_params_accepted() {
        let mut raw = raw_with_model(DEFAULT_MODEL);
        raw.extra_params = r#"{"temperature": 0.5, "top_k": 10}"#.to_string();
        let settings = raw.resolve().unwrap();
        assert_eq!(settings.extra_params, r#"{"temperature": 0.5, "top_k": 10}"#);
    }

    #[test]
    fn test_multiple_errors_reported() {
        let mut raw = raw_with_model(DEFAULT_MODEL);
        raw.temperature = "2.0".to_string();
        raw.top_k = "0".to_string();
        raw.extra_params = "nope".to_string();

        let errors = raw.resolve().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_round_trip_from_settings() {
        let mut raw = raw_with_model(DEFAULT_MODEL);
        raw.temperature = "0.3".to_string();
        raw.extra_params = r#"{"top_k": 5}"#.to_string();
        let settings = raw.resolve().unwrap();

        let raw_again = RawActionSettings::from_settings(&settings);
        let settings_again = raw_again.resolve().unwrap();
        assert_eq!(settings, settings_again);
    }

    #[test]
    fn test_from_settings_custom_model() {
        let settings = ActionSettings {
            model: "claude-opus-5-20260101".to_string(),
            ..Default::default()
        };

        let raw = RawActionSettings::from_settings(&settings);
        assert_eq!(raw.model_template, CUSTOM_TEMPLATE);
        assert_eq!(raw.custom_model, "claude-opus-5-20260101");
    }
}
