//! Terminal UI rendering.
//!
//! [`Renderer::render`] is a pure projection of a [`Session`] into styled
//! text. The frame is laid out as four sections separated by blank lines:
//!
//! ```text
//! > anon > status            identity (live name and status fields)
//!
//! bob                        roster, coloured by presence
//! fred
//!
//! bob: hi everyone           last N messages
//! fred: hi bob
//!
//! > █                        composition
//! ```

pub mod field;
pub mod message_log;
pub mod roster;
pub mod theme;

use ratatui::{
    Frame,
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

use crate::session::Session;
use theme::Theme;

/// Number of messages shown when no window size is configured.
pub const DEFAULT_MESSAGE_WINDOW: usize = 8;

/// Projects session state into a frame of styled text.
#[derive(Debug, Clone)]
pub struct Renderer {
    theme: Theme,
    message_window: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Theme::default(), DEFAULT_MESSAGE_WINDOW)
    }
}

impl Renderer {
    /// Create a renderer with the given styles and message window size.
    #[must_use]
    pub const fn new(theme: Theme, message_window: usize) -> Self {
        Self {
            theme,
            message_window,
        }
    }

    /// Styles in use.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Maximum number of messages shown.
    #[must_use]
    pub const fn message_window(&self) -> usize {
        self.message_window
    }

    /// Build the full frame for `session`.
    #[must_use]
    pub fn render(&self, session: &Session) -> Text<'static> {
        let mut lines = Vec::new();

        let mut identity = field::spans(session.name_field(), &self.theme);
        identity.push(Span::raw(" "));
        identity.extend(field::spans(session.status_field(), &self.theme));
        lines.push(Line::from(identity));
        lines.push(Line::default());

        lines.extend(roster::lines(session.peers(), &self.theme));
        lines.push(Line::default());

        lines.extend(message_log::lines(
            session,
            self.message_window,
            &self.theme,
        ));
        lines.push(Line::default());

        lines.push(Line::from(field::spans(
            session.composition(),
            &self.theme,
        )));

        Text::from(lines)
    }

    /// The frame as unstyled text, one line per row.
    #[must_use]
    pub fn render_plain(&self, session: &Session) -> String {
        to_plain(&self.render(session))
    }
}

/// Concatenate span contents, joining lines with `\n`.
#[must_use]
pub fn to_plain(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, session: &Session, renderer: &Renderer) {
    let paragraph = Paragraph::new(renderer.render(session)).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, frame.area());
}
