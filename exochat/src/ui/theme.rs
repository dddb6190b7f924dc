//! Presentation styles for the TUI.
//!
//! A [`Theme`] is plain data handed to the renderer; nothing here is global.

use exochat_model::Presence;
use ratatui::style::{Color, Modifier, Style};

/// Default colour for online peers.
pub const ONLINE: Color = Color::Rgb(0x04, 0xB5, 0x75);

/// Default colour for offline peers.
pub const OFFLINE: Color = Color::Indexed(9);

/// Primary foreground colour.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground colour (placeholders).
pub const FG_SECONDARY: Color = Color::Gray;

/// Styles used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Peer name style when online.
    pub online: Style,
    /// Peer name style when offline.
    pub offline: Style,
    /// Ordinary text.
    pub normal: Style,
    /// Field prompt.
    pub prompt: Style,
    /// Placeholder shown in an empty, unfocused field.
    pub placeholder: Style,
    /// Block cursor in the focused field.
    pub cursor: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::with_presence_colors(ONLINE, OFFLINE)
    }
}

impl Theme {
    /// Default theme with custom presence colours.
    #[must_use]
    pub fn with_presence_colors(online: Color, offline: Color) -> Self {
        Self {
            online: Style::default().fg(online),
            offline: Style::default().fg(offline),
            normal: Style::default().fg(FG_PRIMARY),
            prompt: Style::default().fg(FG_SECONDARY),
            placeholder: Style::default().fg(FG_SECONDARY),
            cursor: Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD),
        }
    }

    /// Style for a peer name in the given presence category.
    #[must_use]
    pub const fn presence(&self, presence: Presence) -> Style {
        match presence {
            Presence::Online => self.online,
            Presence::Offline => self.offline,
        }
    }
}
