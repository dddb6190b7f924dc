//! Windowed message log rendering with sender name resolution.

use std::collections::HashMap;

use exochat_model::{Message, UserId};
use ratatui::text::{Line, Span};

use super::theme::Theme;
use crate::input::TextInput;
use crate::session::Session;

/// The most recent `size` messages, oldest first.
#[must_use]
pub fn window(messages: &[Message], size: usize) -> &[Message] {
    &messages[messages.len().saturating_sub(size)..]
}

/// Display names for every known sender.
///
/// The local user's entry reflects the live name field, so in-progress
/// edits show up immediately. It is inserted last and wins over a peer
/// with the same id.
pub fn name_lookup(session: &Session) -> HashMap<&UserId, &str> {
    let mut names: HashMap<&UserId, &str> = session
        .peers()
        .iter()
        .map(|peer| (&peer.id, peer.name.as_str()))
        .collect();
    names.insert(session.id(), session.name_field().value());
    names
}

/// `"<name>: <body>"` lines for the visible window.
///
/// A sender missing from the lookup is shown as `<user ID>`.
pub fn lines(session: &Session, size: usize, theme: &Theme) -> Vec<Line<'static>> {
    let names = name_lookup(session);
    window(session.messages(), size)
        .iter()
        .map(|msg| {
            let name = names
                .get(&msg.sender)
                .map_or_else(|| format!("<user {}>", msg.sender), |n| (*n).to_string());
            Line::from(vec![
                Span::styled(name, theme.normal),
                Span::raw(": "),
                Span::styled(msg.body.clone(), theme.normal),
            ])
        })
        .collect()
}
