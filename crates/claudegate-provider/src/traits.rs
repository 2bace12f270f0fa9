//! Action processor trait — the seam between the provider facade and the
//! HTTP layer.
//!
//! The production implementation is `MessagesProcessor` in `processor.rs`;
//! tests substitute their own.

use async_trait::async_trait;

use claudegate_core::config::ActionSettings;
use claudegate_core::types::{Action, ActionResult};

/// Processes one action against the Claude API.
#[async_trait]
pub trait ActionProcessor: Send + Sync {
    /// Execute `action` with the given resolved settings.
    ///
    /// Every outcome, including transport failures, comes back as an
    /// [`ActionResult`] — implementations never propagate errors.
    async fn process(&self, action: &Action, settings: &ActionSettings) -> ActionResult;
}
