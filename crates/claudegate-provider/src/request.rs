//! Request builder — turns an action plus resolved settings into a Messages
//! API request body.
//!
//! The body always carries `model`, `max_tokens` (API-mandated), and a single
//! user-role message with the prompt. Configured sampling parameters are
//! appended when set; the extra-parameters JSON blob is merged last, so extra
//! params override same-named settings. Validation happened when the settings
//! were saved — a malformed blob here is skipped, not an error.

use serde_json::Value;
use tracing::warn;

use claudegate_core::config::ActionSettings;
use claudegate_core::types::{Action, ChatMessage, MessagesRequest, RequestMetadata};

/// Build the JSON body for `POST /v1/messages`.
pub fn build_request_body(
    action: &Action,
    settings: &ActionSettings,
    pseudonymous_user_id: &str,
) -> Value {
    let system = settings.system_instruction_for(action.kind);

    let request = MessagesRequest {
        model: settings.model.clone(),
        system: if system.is_empty() { None } else { Some(system) },
        messages: vec![ChatMessage::user(action.prompt_text.clone())],
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
        top_p: settings.top_p,
        top_k: settings.top_k,
        metadata: Some(RequestMetadata {
            user_id: pseudonymous_user_id.to_string(),
        }),
    };

    let mut body = serde_json::to_value(&request)
        .expect("MessagesRequest serialization cannot fail");

    merge_extra_params(&mut body, &settings.extra_params);

    body
}

/// Merge the extra-parameters JSON object into the body, overriding any
/// same-named keys.
fn merge_extra_params(body: &mut Value, extra_params: &str) {
    if extra_params.is_empty() {
        return;
    }

    let extra: Value = match serde_json::from_str(extra_params) {
        Ok(v) => v,
        Err(e) => {
            warn!("Ignoring malformed extra parameters: {}", e);
            return;
        }
    };

    let (Some(target), Value::Object(extra)) = (body.as_object_mut(), extra) else {
        warn!("Ignoring extra parameters: not a JSON object");
        return;
    };

    for (key, value) in extra {
        target.insert(key, value);
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use claudegate_core::types::ActionKind;

    fn summarise_action() -> Action {
        Action::new(
            ActionKind::SummariseText,
            "7",
            1,
            "This is a long text that needs to be summarised",
        )
    }

    #[test]
    fn test_minimal_settings_body() {
        let settings = ActionSettings::default();
        let body = build_request_body(&summarise_action(), &settings, "pseudo-7");

        // max_tokens is always present (API-mandated)
        assert_eq!(body["max_tokens"], settings.max_tokens);
        // Exactly one user-role message carrying the prompt
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(
            messages[0]["content"],
            "This is a long text that needs to be summarised"
        );
        assert_eq!(body["model"], settings.model);
        assert_eq!(body["metadata"]["user_id"], "pseudo-7");
    }

    #[test]
    fn test_default_system_instruction_applied() {
        let settings = ActionSettings::default();
        let body = build_request_body(&summarise_action(), &settings, "pseudo-7");

        let system = body["system"].as_str().unwrap();
        assert!(system.contains("Summarise"));
        // System never appears as a message role
        for msg in body["messages"].as_array().unwrap() {
            assert_ne!(msg["role"], "system");
        }
    }

    #[test]
    fn test_configured_system_instruction_wins() {
        let settings = ActionSettings {
            system_instruction: "Respond in French.".to_string(),
            ..Default::default()
        };
        let body = build_request_body(&summarise_action(), &settings, "pseudo-7");

        assert_eq!(body["system"], "Respond in French.");
    }

    #[test]
    fn test_unset_params_omitted_zero_kept() {
        let settings = ActionSettings {
            temperature: Some(0.0),
            top_p: None,
            top_k: None,
            ..Default::default()
        };
        let body = build_request_body(&summarise_action(), &settings, "pseudo-7");

        assert_eq!(body["temperature"], 0.0);
        assert!(body.get("top_p").is_none());
        assert!(body.get("top_k").is_none());
    }

    #[test]
    fn test_extra_params_override_named_settings() {
        let settings = ActionSettings {
            max_tokens: 4096,
            temperature: Some(0.7),
            extra_params: r#"{"temperature": 0.2, "max_tokens": 2048}"#.to_string(),
            ..Default::default()
        };
        let body = build_request_body(&summarise_action(), &settings, "pseudo-7");

        assert_eq!(body["temperature"], 0.2);
        assert_eq!(body["max_tokens"], 2048);
    }

    #[test]
    fn test_extra_params_add_new_keys() {
        let settings = ActionSettings {
            extra_params: r#"{"stop_sequences": ["END"]}"#.to_string(),
            ..Default::default()
        };
        let body = build_request_body(&summarise_action(), &settings, "pseudo-7");

        assert_eq!(body["stop_sequences"][0], "END");
    }

    #[test]
    fn test_malformed_extra_params_skipped() {
        let settings = ActionSettings {
            extra_params: "{broken".to_string(),
            ..Default::default()
        };
        let body = build_request_body(&summarise_action(), &settings, "pseudo-7");

        // The valid parts of the body survive untouched
        assert_eq!(body["max_tokens"], settings.max_tokens);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_same_input_same_body() {
        let settings = ActionSettings {
            temperature: Some(0.3),
            extra_params: r#"{"top_k": 5}"#.to_string(),
            ..Default::default()
        };
        let action = summarise_action();

        let a = build_request_body(&action, &settings, "pseudo-7");
        let b = build_request_body(&action, &settings, "pseudo-7");
        assert_eq!(a, b);
    }
}
