//! Shared data model for `ExoChat`.
//!
//! These types are what the client persists and renders: the local
//! [`Identity`], the roster of [`Peer`]s and the [`Message`] log.

pub mod identity;
pub mod message;
pub mod peer;

pub use identity::{Identity, UserId};
pub use message::Message;
pub use peer::{Peer, Presence};
