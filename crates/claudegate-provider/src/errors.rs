//! User-facing error message templates for Claude API failures.
//!
//! Maps HTTP status codes (plus best-effort substring heuristics for 400
//! responses) to fixed messages a non-technical user can act on. The raw API
//! wording only surfaces through the generic templates.

/// Message shown when a request is denied by the per-user rate limit.
pub const USER_RATE_LIMIT_MESSAGE: &str = "You have reached the maximum number of AI requests \
     you can make in an hour. Please try again later.";

/// Message shown when a request is denied by the global rate limit.
pub const GLOBAL_RATE_LIMIT_MESSAGE: &str = "The AI service has reached the maximum number of \
     site-wide requests per hour. Please try again later.";

/// Map a status code and raw API message to a user-friendly message.
///
/// The 400 heuristics key off "max_tokens" / "model" substrings in the raw
/// message; fragile to provider wording changes, but the generic template
/// still carries the raw text when neither matches.
pub fn friendly_error_message(status: u16, raw_message: &str) -> String {
    match status {
        400 => {
            let lower = raw_message.to_lowercase();
            if lower.contains("max_tokens") {
                "Missing or invalid max_tokens parameter. Please configure max_tokens \
                 in the action settings."
                    .to_string()
            } else if lower.contains("model") {
                "Invalid model name. Please check that the model name is correct and \
                 starts with \"claude-\"."
                    .to_string()
            } else {
                format!("Invalid request to Claude API: {raw_message}")
            }
        }
        401 => "Invalid Anthropic API key. Please check your API key in the provider settings."
            .to_string(),
        403 => "Access forbidden. Your API key may not have permission to access this resource."
            .to_string(),
        404 => "Resource not found. The API endpoint or model may not exist.".to_string(),
        429 => "Rate limit exceeded. Please wait a moment and try again.".to_string(),
        500 => "Claude API server error. Please try again later.".to_string(),
        529 => "Claude servers are currently overloaded. Please try again in a few moments."
            .to_string(),
        _ => format!("Claude API error (HTTP {status}): {raw_message}"),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
