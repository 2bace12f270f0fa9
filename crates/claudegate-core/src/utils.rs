//! Utility helpers — data paths and pseudonymous user ids.

use std::path::PathBuf;
use uuid::Uuid;

/// Get the Claudegate data directory (e.g. `~/.claudegate/`).
pub fn get_data_path() -> PathBuf {
    let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".claudegate")
}

/// Derive a pseudonymous user identifier from an application-level user id.
///
/// The application's user id never leaves the installation; the external API
/// only ever sees this UUIDv5. Deterministic, so the same user maps to the
/// same pseudonym across requests.
pub fn pseudonymous_user_id(user_id: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, user_id.as_bytes()).to_string()
}

/// Helper to get home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}
