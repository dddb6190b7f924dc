//! Local user identity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, stable identifier of a chat participant.
///
/// The local user's id is generated once and never changes afterwards.
/// Peer ids come from fixtures and may be any string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wraps an existing identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh globally-unique identifier (UUID v7).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The local user's persisted id/name/status triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable identifier, assigned at first run.
    pub id: UserId,
    /// Editable display name.
    pub name: String,
    /// Editable status text.
    pub status: String,
}

impl Identity {
    /// Creates an identity from its three parts.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: status.into(),
        }
    }

    /// Creates a first-run identity with a freshly generated id and an empty status.
    #[must_use]
    pub fn fresh(name: impl Into<String>) -> Self {
        Self::new(UserId::generate(), name, String::new())
    }
}
