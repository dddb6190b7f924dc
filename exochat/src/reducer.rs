//! Event reducer: the focus state machine and message submission.
//!
//! ```text
//!            Advance              Advance (save)
//! Composing ────────▶ EditingName ────────▶ EditingStatus
//!     ▲                   │                      │
//!     │   Submit (save)   │                      │
//!     ├───────────────────┘                      │
//!     └──────────── Advance / Submit (save) ─────┘
//! ```
//!
//! Leaving an identity field always persists the identity first. A failed
//! save terminates the session and focus does not move.

use crate::input::Keystroke;
use crate::session::{Focus, Session};
use crate::store::{IdentityStore, StoreError};

/// Abstract input event, already mapped from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Quit the client.
    Cancel,
    /// Send the composed message, or commit an identity edit.
    Submit,
    /// Cycle focus to the next field.
    Advance,
    /// Any other key, forwarded to every field.
    TextEdit(Keystroke),
}

/// Why the session ended.
#[derive(Debug)]
pub enum Termination {
    /// The user cancelled.
    Cancelled,
    /// Persisting the identity failed.
    SaveFailed(StoreError),
}

/// Outcome of reducing one event.
#[derive(Debug)]
pub enum Effect {
    /// Keep running; render the next frame.
    Continue,
    /// Stop the event loop.
    Terminate(Termination),
}

impl Effect {
    /// Whether the event loop should stop.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminate(_))
    }
}

/// Apply one event to the session.
///
/// Store calls are blocking and complete before this returns.
pub fn reduce<S>(session: &mut Session, event: InputEvent, store: &S) -> Effect
where
    S: IdentityStore + ?Sized,
{
    match event {
        InputEvent::Cancel => {
            tracing::debug!("cancel requested");
            Effect::Terminate(Termination::Cancelled)
        }
        InputEvent::Submit => submit(session, store),
        InputEvent::Advance => advance(session, store),
        InputEvent::TextEdit(key) => {
            session.broadcast(key);
            Effect::Continue
        }
    }
}

fn submit<S>(session: &mut Session, store: &S) -> Effect
where
    S: IdentityStore + ?Sized,
{
    match session.focus() {
        Focus::Composing => {
            if session.submit_composition() {
                tracing::debug!(count = session.messages().len(), "message appended");
            }
            Effect::Continue
        }
        Focus::EditingName | Focus::EditingStatus => {
            commit_and_focus(session, store, Focus::Composing)
        }
    }
}

fn advance<S>(session: &mut Session, store: &S) -> Effect
where
    S: IdentityStore + ?Sized,
{
    match session.focus() {
        Focus::Composing => {
            session.focus_on(Focus::EditingName);
            tracing::debug!(focus = ?Focus::EditingName, "focus moved");
            Effect::Continue
        }
        Focus::EditingName => commit_and_focus(session, store, Focus::EditingStatus),
        Focus::EditingStatus => commit_and_focus(session, store, Focus::Composing),
    }
}

/// Persist the edited identity, then move focus to `next`.
fn commit_and_focus<S>(session: &mut Session, store: &S, next: Focus) -> Effect
where
    S: IdentityStore + ?Sized,
{
    let identity = session.identity();
    if let Err(e) = store.save(&identity) {
        tracing::error!(error = %e, from = ?session.focus(), "failed to save identity");
        return Effect::Terminate(Termination::SaveFailed(e));
    }
    tracing::info!(id = %identity.id, name = %identity.name, "identity saved");

    session.focus_on(next);
    tracing::debug!(focus = ?next, "focus moved");
    Effect::Continue
}
