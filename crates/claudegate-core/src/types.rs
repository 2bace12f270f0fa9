//! Core types for Claudegate — actions, results, and the Anthropic Messages
//! API wire format.
//!
//! An [`Action`] is what the surrounding application asks for (generate,
//! summarise, or explain text). An [`ActionResult`] is the normalized outcome
//! handed back: exactly one of success or failure, never both.

use serde::{Deserialize, Serialize};
use serde_json::json;

// ─────────────────────────────────────────────
// Actions
// ─────────────────────────────────────────────

/// The capability being requested from the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    GenerateText,
    SummariseText,
    ExplainText,
}

impl ActionKind {
    /// All supported actions, in display order.
    pub fn all() -> &'static [ActionKind] {
        &[
            ActionKind::GenerateText,
            ActionKind::SummariseText,
            ActionKind::ExplainText,
        ]
    }

    /// Stable snake_case name (used in config keys and logs).
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::GenerateText => "generate_text",
            ActionKind::SummariseText => "summarise_text",
            ActionKind::ExplainText => "explain_text",
        }
    }

    /// The system instruction sent with this action when the settings don't
    /// override it.
    pub fn default_system_instruction(&self) -> &'static str {
        match self {
            ActionKind::GenerateText => {
                "You are a helpful assistant. Generate a text response to the user's prompt."
            }
            ActionKind::SummariseText => {
                "Summarise the provided text. Keep the summary concise and faithful \
                 to the original content."
            }
            ActionKind::ExplainText => {
                "Explain the provided text in clear, simple language suitable for \
                 someone unfamiliar with the topic."
            }
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single AI action request from the surrounding application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Which capability is requested.
    pub kind: ActionKind,
    /// The requesting user (opaque application-level identifier).
    pub user_id: String,
    /// The application context the request originates from.
    pub context_id: u64,
    /// Free-text prompt to send to the model.
    pub prompt_text: String,
}

impl Action {
    pub fn new(
        kind: ActionKind,
        user_id: impl Into<String>,
        context_id: u64,
        prompt_text: impl Into<String>,
    ) -> Self {
        Action {
            kind,
            user_id: user_id.into(),
            context_id,
            prompt_text: prompt_text.into(),
        }
    }
}

// ─────────────────────────────────────────────
// Results
// ─────────────────────────────────────────────

/// Successful outcome of an action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionSuccess {
    /// Provider-side response id.
    pub id: String,
    /// The generated text.
    pub generated_content: String,
    /// Why the model stopped generating (e.g. `"end_turn"`, `"max_tokens"`).
    pub finish_reason: Option<String>,
    /// Tokens consumed by the prompt.
    pub prompt_tokens: u32,
    /// Tokens generated in the completion.
    pub completion_tokens: u32,
    /// The model that actually produced the response.
    pub model: String,
}

/// Failed outcome of an action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionFailure {
    /// HTTP status code, 429 for rate-limit denials, 0 when no usable status
    /// applies (transport errors, unparseable response bodies).
    pub error_code: u16,
    /// User-facing message.
    pub error_message: String,
}

/// Normalized outcome of processing an action.
///
/// Exactly one of the success or failure payloads is populated — the enum
/// makes the invariant structural.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionResult {
    Success(ActionSuccess),
    Failure(ActionFailure),
}

impl ActionResult {
    /// Build a failure result.
    pub fn failure(error_code: u16, error_message: impl Into<String>) -> Self {
        ActionResult::Failure(ActionFailure {
            error_code,
            error_message: error_message.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success(_))
    }

    /// The error code, if this is a failure.
    pub fn error_code(&self) -> Option<u16> {
        match self {
            ActionResult::Success(_) => None,
            ActionResult::Failure(f) => Some(f.error_code),
        }
    }

    /// Flatten into the associative shape consumed by callers: a `success`
    /// flag plus either the success or the failure fields.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ActionResult::Success(s) => json!({
                "success": true,
                "id": s.id,
                "generatedcontent": s.generated_content,
                "finishreason": s.finish_reason,
                "prompttokens": s.prompt_tokens,
                "completiontokens": s.completion_tokens,
                "model": s.model,
            }),
            ActionResult::Failure(f) => json!({
                "success": false,
                "errorcode": f.error_code,
                "errormessage": f.error_message,
            }),
        }
    }
}

// ─────────────────────────────────────────────
// Anthropic Messages API wire format
// ─────────────────────────────────────────────

/// A chat message in the Anthropic Messages format.
///
/// Anthropic takes the system instruction as a top-level `system` field, so
/// only user and assistant roles appear in `messages`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
    User { content: String },
    Assistant { content: String },
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage::User {
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        ChatMessage::Assistant {
            content: content.into(),
        }
    }
}

/// Request metadata object; `user_id` carries the pseudonymous user id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RequestMetadata {
    pub user_id: String,
}

/// Request body for `POST /v1/messages`.
///
/// `max_tokens` is required by the API; the optional sampling parameters are
/// omitted entirely when unset.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MessagesRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RequestMetadata>,
}

/// A content block in a Messages API response.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
}

/// Token usage reported by the API.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Successful response body from `POST /v1/messages`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MessagesResponse {
    pub id: String,
    #[serde(default)]
    pub model: Option<String>,
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    pub usage: Usage,
}

impl MessagesResponse {
    /// The first text content block, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().map(|b| match b {
            ContentBlock::Text { text } => text.as_str(),
        }).next()
    }
}

/// Error body returned by the API on non-2xx responses.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

/// The inner error object of an [`ApiErrorBody`].
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ApiErrorDetail {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
