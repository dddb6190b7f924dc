//! Integration tests for frame rendering.
//!
//! # Verification Focus
//!
//! - Section order and blank-line separators
//! - Identity line shows in-progress edits
//! - Roster names styled by presence
//! - Message window keeps the last N in order
//! - Unknown senders render with a placeholder
//! - Rendering is deterministic
//! - Drawing through a ratatui test terminal

use exochat::input::Keystroke;
use exochat::reducer::{InputEvent, reduce};
use exochat::session::{Session, SessionConfig};
use exochat::store::InMemoryStore;
use exochat::ui::{self, Renderer, theme::Theme};
use exochat_model::{Identity, Message, Peer, UserId};
use ratatui::{Terminal, backend::TestBackend, style::Color};

fn session_with(peers: Vec<Peer>, messages: Vec<Message>) -> Session {
    Session::new(SessionConfig {
        identity: Identity::new(UserId::new("me"), "anon", ""),
        peers,
        messages,
    })
    .expect("valid session config")
}

fn default_session() -> Session {
    session_with(
        vec![
            Peer::new("1", "bob", true),
            Peer::new("2", "fred", false).with_status("away"),
        ],
        vec![Message::new("1", "hi everyone"), Message::new("2", "hi bob")],
    )
}

fn message_lines(frame: &str) -> Vec<&str> {
    // Sections: identity, roster, messages, composition.
    let sections: Vec<&str> = frame.split("\n\n").collect();
    assert_eq!(sections.len(), 4, "frame should have four sections: {frame:?}");
    if sections[2].is_empty() {
        Vec::new()
    } else {
        sections[2].lines().collect()
    }
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_frame_layout_matches_contract() {
    let frame = Renderer::default().render_plain(&default_session());

    assert_eq!(
        frame,
        "> anon > status\n\nbob \nfred away\n\nbob: hi everyone\nfred: hi bob\n\n> █"
    );
}

#[test]
fn test_empty_roster_and_log_keep_separators() {
    let session = session_with(Vec::new(), Vec::new());
    let frame = Renderer::default().render_plain(&session);

    assert_eq!(frame, "> anon > status\n\n\n\n> █");
}

#[test]
fn test_rendering_is_idempotent() {
    let renderer = Renderer::default();
    let session = default_session();

    assert_eq!(renderer.render(&session), renderer.render(&session));
    assert_eq!(renderer.render_plain(&session), renderer.render_plain(&session));
}

// =============================================================================
// Identity line
// =============================================================================

#[test]
fn test_identity_line_reflects_uncommitted_edits() {
    let store = InMemoryStore::new();
    let mut session = default_session();
    reduce(&mut session, InputEvent::Advance, &store);
    reduce(
        &mut session,
        InputEvent::TextEdit(Keystroke::Char('!')),
        &store,
    );

    let frame = Renderer::default().render_plain(&session);

    assert!(frame.starts_with("> anon!█ > status\n"), "{frame:?}");
    assert_eq!(store.save_count(), 0);
}

#[test]
fn test_local_messages_use_live_name() {
    let store = InMemoryStore::new();
    let mut session = session_with(
        vec![Peer::new("1", "bob", true)],
        vec![Message::new("me", "hello")],
    );
    reduce(&mut session, InputEvent::Advance, &store);
    reduce(
        &mut session,
        InputEvent::TextEdit(Keystroke::DeleteToStart),
        &store,
    );
    for c in "zed".chars() {
        reduce(&mut session, InputEvent::TextEdit(Keystroke::Char(c)), &store);
    }

    let frame = Renderer::default().render_plain(&session);

    assert_eq!(message_lines(&frame), vec!["zed: hello"]);
}

// =============================================================================
// Roster
// =============================================================================

#[test]
fn test_roster_names_styled_by_presence() {
    let theme = Theme::with_presence_colors(Color::Green, Color::Red);
    let text = Renderer::new(theme, 8).render(&default_session());

    // Line 0 identity, line 1 blank, lines 2.. roster.
    let bob = &text.lines[2].spans[0];
    let fred = &text.lines[3].spans[0];
    assert_eq!(bob.content, "bob");
    assert_eq!(bob.style.fg, Some(Color::Green));
    assert_eq!(fred.content, "fred");
    assert_eq!(fred.style.fg, Some(Color::Red));
}

// =============================================================================
// Message window
// =============================================================================

#[test]
fn test_window_shows_last_eight_of_ten() {
    let messages = (0..10).map(|i| Message::new("1", format!("m{i}"))).collect();
    let session = session_with(vec![Peer::new("1", "bob", true)], messages);

    let frame = Renderer::default().render_plain(&session);

    let expected: Vec<String> = (2..10).map(|i| format!("bob: m{i}")).collect();
    assert_eq!(message_lines(&frame), expected);
}

#[test]
fn test_window_size_is_configurable() {
    let messages = (0..5).map(|i| Message::new("1", format!("m{i}"))).collect();
    let session = session_with(vec![Peer::new("1", "bob", true)], messages);

    let frame = Renderer::new(Theme::default(), 2).render_plain(&session);

    assert_eq!(message_lines(&frame), vec!["bob: m3", "bob: m4"]);
}

#[test]
fn test_unknown_sender_renders_placeholder() {
    let session = session_with(
        vec![Peer::new("1", "bob", true)],
        vec![Message::new("ghost-42", "boo"), Message::new("1", "who?")],
    );

    let frame = Renderer::default().render_plain(&session);

    assert_eq!(
        message_lines(&frame),
        vec!["<user ghost-42>: boo", "bob: who?"]
    );
}

#[test]
fn test_local_identity_wins_over_peer_with_same_id() {
    let session = session_with(
        vec![Peer::new("me", "impostor", true)],
        vec![Message::new("me", "it's me")],
    );

    let frame = Renderer::default().render_plain(&session);

    assert_eq!(message_lines(&frame), vec!["anon: it's me"]);
}

// =============================================================================
// Terminal drawing
// =============================================================================

#[test]
fn test_draw_to_test_backend() {
    let session = default_session();
    let renderer = Renderer::default();
    let mut terminal = Terminal::new(TestBackend::new(40, 10)).expect("test terminal");

    terminal
        .draw(|frame| ui::draw(frame, &session, &renderer))
        .expect("draw succeeds");

    let buffer = terminal.backend().buffer();
    let row = |y: u16| -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    };
    assert_eq!(row(0), "> anon > status");
    assert_eq!(row(2), "bob");
    assert_eq!(row(5), "bob: hi everyone");
    assert_eq!(row(8), "> █");
}
