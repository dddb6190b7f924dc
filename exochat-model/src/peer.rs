//! Roster entries for remote participants.

use serde::{Deserialize, Serialize};

use crate::identity::UserId;

/// Presence category of a peer, used to pick a display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Presence {
    /// Peer is connected.
    Online,
    /// Peer is not connected.
    Offline,
}

impl std::fmt::Display for Presence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// A fixed, non-local chat participant shown in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    /// Unique identifier within the roster.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Status text shown next to the name.
    #[serde(default)]
    pub status: String,
    /// Whether the peer is currently online.
    #[serde(default)]
    pub online: bool,
}

impl Peer {
    /// Creates a roster entry with an empty status.
    #[must_use]
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, online: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: String::new(),
            online,
        }
    }

    /// Sets the status text.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Presence category derived from the online flag.
    #[must_use]
    pub const fn presence(&self) -> Presence {
        if self.online {
            Presence::Online
        } else {
            Presence::Offline
        }
    }
}
