//! Peer roster rendering.

use exochat_model::Peer;
use ratatui::text::{Line, Span};

use super::theme::Theme;

/// One line per peer: name styled by presence, then the status text.
pub fn lines(peers: &[Peer], theme: &Theme) -> Vec<Line<'static>> {
    peers
        .iter()
        .map(|peer| {
            Line::from(vec![
                Span::styled(peer.name.clone(), theme.presence(peer.presence())),
                Span::raw(" "),
                Span::styled(peer.status.clone(), theme.normal),
            ])
        })
        .collect()
}
