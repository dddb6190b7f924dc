//! `ExoChat`: terminal chat client with a persistent local identity.

pub mod app;
pub mod config;
pub mod input;
pub mod keymap;
pub mod reducer;
pub mod session;
pub mod store;
pub mod ui;
