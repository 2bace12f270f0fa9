//! Model template registry — static specs for the predefined Claude models.
//!
//! Each [`ModelSpec`] describes one selectable model: its API name, display
//! name, and `max_tokens` bounds. A "custom" escape hatch lets installations
//! use any other `claude-…` model by entering its full name.

/// Static specification describing one predefined Claude model.
#[derive(Clone, Debug)]
pub struct ModelSpec {
    /// Full API model name (e.g. `"claude-sonnet-4-5-20250929"`).
    pub name: &'static str,
    /// Human-readable name for display.
    pub display_name: &'static str,
    /// Default `max_tokens` for new configurations.
    pub default_max_tokens: u32,
    /// Upper bound on configurable `max_tokens` for this model.
    pub max_tokens_limit: u32,
}

/// Required prefix for any model name, predefined or custom.
pub const MODEL_NAME_PREFIX: &str = "claude-";

/// The sentinel template name meaning "use a custom model name".
pub const CUSTOM_TEMPLATE: &str = "custom";

/// Complete list of predefined models, in display order.
///
/// Sonnet and Haiku generations support up to 64k output tokens; Opus tops
/// out at 32k.
pub static MODELS: &[ModelSpec] = &[
    ModelSpec {
        name: "claude-sonnet-4-5-20250929",
        display_name: "Claude Sonnet 4.5",
        default_max_tokens: 16384,
        max_tokens_limit: 64000,
    },
    ModelSpec {
        name: "claude-sonnet-4-20250514",
        display_name: "Claude Sonnet 4",
        default_max_tokens: 16384,
        max_tokens_limit: 64000,
    },
    ModelSpec {
        name: "claude-haiku-4-5-20251001",
        display_name: "Claude Haiku 4.5",
        default_max_tokens: 16384,
        max_tokens_limit: 64000,
    },
    ModelSpec {
        name: "claude-opus-4-1-20250805",
        display_name: "Claude Opus 4.1",
        default_max_tokens: 16384,
        max_tokens_limit: 32000,
    },
    ModelSpec {
        name: "claude-opus-4-20250514",
        display_name: "Claude Opus 4",
        default_max_tokens: 16384,
        max_tokens_limit: 32000,
    },
];

/// Find a predefined model spec by its API name.
pub fn find_by_name(name: &str) -> Option<&'static ModelSpec> {
    MODELS.iter().find(|spec| spec.name == name)
}

/// Whether a model name is acceptable: predefined names always are, custom
/// names must start with `claude-`.
pub fn is_valid_model_name(name: &str) -> bool {
    !name.is_empty() && name.starts_with(MODEL_NAME_PREFIX)
}

/// Resolve a stored model name to the template it came from: the model name
/// itself when predefined, [`CUSTOM_TEMPLATE`] otherwise.
pub fn template_for(model: &str) -> &str {
    if find_by_name(model).is_some() {
        model
    } else {
        CUSTOM_TEMPLATE
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
