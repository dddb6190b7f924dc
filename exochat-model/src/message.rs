//! Chat log entries.

use serde::{Deserialize, Serialize};

use crate::identity::UserId;

/// A single entry in the append-only message log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Id of the local identity or of a roster peer. Unknown ids are allowed.
    pub sender: UserId,
    /// Message text.
    pub body: String,
}

impl Message {
    /// Creates a message from a sender and body.
    #[must_use]
    pub fn new(sender: impl Into<UserId>, body: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
        }
    }
}
