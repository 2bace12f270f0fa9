//! HTTP processor for the Anthropic Messages API.
//!
//! Builds the request body, posts it with the Anthropic auth headers, and
//! maps every outcome to an [`ActionResult`]. Transport failures and
//! unparseable bodies become failure results with code 0 — nothing here
//! propagates an error to the caller.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, error};

use claudegate_core::config::ActionSettings;
use claudegate_core::types::{
    Action, ActionResult, ActionSuccess, ApiErrorBody, MessagesResponse,
};
use claudegate_core::utils::pseudonymous_user_id;

use crate::errors::friendly_error_message;
use crate::request::build_request_body;
use crate::traits::ActionProcessor;

/// API version header value required by Anthropic.
const ANTHROPIC_VERSION: &str = "2023-06-01";

// ─────────────────────────────────────────────
// MessagesProcessor
// ─────────────────────────────────────────────

/// Processes actions by calling `POST /v1/messages` directly via `reqwest`.
pub struct MessagesProcessor {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// Anthropic API key, sent as `x-api-key`.
    api_key: String,
}

impl std::fmt::Debug for MessagesProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessagesProcessor").finish_non_exhaustive()
    }
}

impl MessagesProcessor {
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to build HTTP client");

        MessagesProcessor {
            client,
            api_key: api_key.into(),
        }
    }

    /// Map a success body to a result, falling back to the configured model
    /// name when the API omits its own.
    fn map_success(resp: MessagesResponse, settings: &ActionSettings) -> ActionResult {
        let Some(text) = resp.first_text() else {
            error!(id = %resp.id, "Claude response contained no text content");
            return ActionResult::failure(0, "Claude API response contained no text content.");
        };

        ActionResult::Success(ActionSuccess {
            generated_content: text.to_string(),
            finish_reason: resp.stop_reason.clone(),
            prompt_tokens: resp.usage.input_tokens,
            completion_tokens: resp.usage.output_tokens,
            model: resp
                .model
                .clone()
                .unwrap_or_else(|| settings.model.clone()),
            id: resp.id,
        })
    }

    /// Map a non-2xx response to a failure result.
    ///
    /// For client errors the raw message comes from the API's JSON error
    /// body when it parses; server errors only surface the reason phrase.
    async fn map_error(status: StatusCode, response: reqwest::Response) -> ActionResult {
        let reason = status.canonical_reason().unwrap_or("Unknown error");

        let raw_message = if status.is_client_error() {
            response
                .text()
                .await
                .ok()
                .and_then(|body| serde_json::from_str::<ApiErrorBody>(&body).ok())
                .map_or_else(|| reason.to_string(), |body| body.error.message)
        } else {
            reason.to_string()
        };

        error!(status = %status, message = %raw_message, "Claude API error");
        ActionResult::failure(
            status.as_u16(),
            friendly_error_message(status.as_u16(), &raw_message),
        )
    }
}

#[async_trait]
impl ActionProcessor for MessagesProcessor {
    async fn process(&self, action: &Action, settings: &ActionSettings) -> ActionResult {
        let user_hash = pseudonymous_user_id(&action.user_id);
        let body = build_request_body(action, settings, &user_hash);

        debug!(
            action = %action.kind,
            model = %settings.model,
            endpoint = %settings.endpoint,
            "Calling Claude API"
        );

        let result = self
            .client
            .post(&settings.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await;

        let response = match result {
            Ok(resp) => resp,
            Err(e) => {
                error!(error = %e, "HTTP request to Claude API failed");
                return ActionResult::failure(0, format!("Error contacting Claude API: {}", e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Self::map_error(status, response).await;
        }

        match response.json::<MessagesResponse>().await {
            Ok(resp) => {
                debug!(
                    id = %resp.id,
                    stop_reason = resp.stop_reason.as_deref().unwrap_or("?"),
                    output_tokens = resp.usage.output_tokens,
                    "Claude response received"
                );
                Self::map_success(resp, settings)
            }
            Err(e) => {
                error!(error = %e, "Failed to parse Claude API response");
                ActionResult::failure(0, format!("Error parsing Claude API response: {}", e))
            }
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
