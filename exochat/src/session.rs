//! Session state: identity, roster, message log and the three input fields.

use std::collections::HashSet;

use exochat_model::{Identity, Message, Peer, UserId};

use crate::input::{Keystroke, LineInput, TextInput};

/// Errors that can occur when building a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Two roster entries share the same id.
    #[error("duplicate peer id in roster: {0}")]
    DuplicatePeer(UserId),
}

/// Which input field currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Composition field is focused (default).
    Composing,
    /// Display name field is focused.
    EditingName,
    /// Status text field is focused.
    EditingStatus,
}

/// Everything needed to construct a [`Session`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// The local identity, id already assigned.
    pub identity: Identity,
    /// Static roster, in display order.
    pub peers: Vec<Peer>,
    /// Messages already in the log.
    pub messages: Vec<Message>,
}

/// Single source of truth for one rendering pass.
///
/// Exactly one of the three fields is focused at any time. The roster is
/// fixed at construction and the message log only grows.
#[derive(Debug, Clone)]
pub struct Session {
    id: UserId,
    name: LineInput,
    status: LineInput,
    composition: LineInput,
    focus: Focus,
    peers: Vec<Peer>,
    messages: Vec<Message>,
}

impl Session {
    /// Build a session from its configuration. Composition starts focused.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::DuplicatePeer`] if two peers share an id.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let mut seen = HashSet::new();
        for peer in &config.peers {
            if !seen.insert(&peer.id) {
                return Err(SessionError::DuplicatePeer(peer.id.clone()));
            }
        }

        let SessionConfig {
            identity,
            peers,
            messages,
        } = config;

        let mut session = Self {
            id: identity.id,
            name: LineInput::new()
                .with_value(&identity.name)
                .with_placeholder("name"),
            status: LineInput::new()
                .with_value(&identity.status)
                .with_placeholder("status"),
            composition: LineInput::new().with_placeholder("Type a message..."),
            focus: Focus::Composing,
            peers,
            messages,
        };
        session.focus_on(Focus::Composing);
        Ok(session)
    }

    /// Snapshot of the identity as currently edited.
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::new(self.id.clone(), self.name.value(), self.status.value())
    }

    /// The local user's id.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Which field has focus.
    #[must_use]
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    /// Display name field.
    #[must_use]
    pub const fn name_field(&self) -> &LineInput {
        &self.name
    }

    /// Status text field.
    #[must_use]
    pub const fn status_field(&self) -> &LineInput {
        &self.status
    }

    /// Message composition field.
    #[must_use]
    pub const fn composition(&self) -> &LineInput {
        &self.composition
    }

    /// Roster in display order.
    #[must_use]
    pub fn peers(&self) -> &[Peer] {
        &self.peers
    }

    /// Message log in chronological order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Move focus to `target`, blurring the other two fields.
    pub fn focus_on(&mut self, target: Focus) {
        self.name.blur();
        self.status.blur();
        self.composition.blur();
        match target {
            Focus::Composing => self.composition.focus(),
            Focus::EditingName => self.name.focus(),
            Focus::EditingStatus => self.status.focus(),
        }
        self.focus = target;
    }

    /// Number of fields whose focused flag is set.
    #[must_use]
    pub fn focused_field_count(&self) -> usize {
        [&self.name, &self.status, &self.composition]
            .into_iter()
            .filter(|field| field.is_focused())
            .count()
    }

    /// Forward a keystroke to all three fields. Unfocused fields ignore it.
    pub(crate) fn broadcast(&mut self, key: Keystroke) {
        self.composition.apply(key);
        self.name.apply(key);
        self.status.apply(key);
    }

    /// Append the composition buffer as a message from the local user and
    /// clear it. Returns `false` without touching the log if the buffer is
    /// empty.
    pub(crate) fn submit_composition(&mut self) -> bool {
        if self.composition.value().is_empty() {
            return false;
        }
        let message = Message::new(self.id.clone(), self.composition.value());
        self.messages.push(message);
        self.composition.reset();
        true
    }
}
