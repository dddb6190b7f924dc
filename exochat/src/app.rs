//! Application wiring: startup, the event loop, and exit status.

use std::io;

use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::Backend};

use crate::config::ClientConfig;
use crate::keymap;
use crate::reducer::{self, Effect, Termination};
use crate::session::{Session, SessionError};
use crate::store::{self, IdentityStore, JsonFileStore, StoreError};
use crate::ui::{self, Renderer};

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// User cancelled.
    Clean,
    /// Saving the identity failed while running.
    StoreFailure,
    /// The client could not start (config, identity load, terminal setup).
    Startup,
    /// Terminal I/O failed while running.
    Terminal,
}

impl ExitStatus {
    /// Numeric exit code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Clean => 0,
            Self::StoreFailure => 1,
            Self::Startup => 2,
            Self::Terminal => 3,
        }
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        Self::from(status.code())
    }
}

impl From<&Termination> for ExitStatus {
    fn from(termination: &Termination) -> Self {
        match termination {
            Termination::Cancelled => Self::Clean,
            Termination::SaveFailed(_) => Self::StoreFailure,
        }
    }
}

/// Errors that prevent the client from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Loading or creating the identity failed.
    #[error("identity store: {0}")]
    Store(#[from] StoreError),

    /// The configured roster is invalid.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Running client: session state, identity store and renderer.
pub struct App<S> {
    session: Session,
    store: S,
    renderer: Renderer,
}

impl App<JsonFileStore> {
    /// Load (or create) the identity and build the session from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] if the identity cannot be loaded or
    /// created, or if the roster contains duplicate ids.
    pub fn bootstrap(config: &ClientConfig) -> Result<Self, StartupError> {
        let store = config.identity_store()?;
        tracing::info!(path = %store.path().display(), "using identity file");
        Self::with_store(config, store)
    }
}

impl<S: IdentityStore> App<S> {
    /// Load (or create) the identity from `store` and build the session.
    ///
    /// # Errors
    ///
    /// Same as [`App::bootstrap`].
    pub fn with_store(config: &ClientConfig, store: S) -> Result<Self, StartupError> {
        let identity = store::bootstrap_identity(&store, &config.default_name)?;
        let session = Session::new(config.session_config(identity))?;
        Ok(Self::new(session, store, config.renderer()))
    }

    /// Assemble an app from existing parts.
    #[must_use]
    pub const fn new(session: Session, store: S, renderer: Renderer) -> Self {
        Self {
            session,
            store,
            renderer,
        }
    }

    /// Current session state.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Identity store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Renderer in use.
    #[must_use]
    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Map a key press and reduce it.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Effect {
        reducer::reduce(&mut self.session, keymap::map_key(key), &self.store)
    }

    /// Draw, read one event, reduce it; repeat until the session ends.
    ///
    /// `next_event` blocks until the terminal produces an event. Only key
    /// presses reach the reducer; any other event just triggers a redraw.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if drawing or reading an event fails.
    pub fn run<B, F>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut next_event: F,
    ) -> io::Result<Termination>
    where
        B: Backend,
        F: FnMut() -> io::Result<Event>,
    {
        loop {
            terminal.draw(|frame| ui::draw(frame, &self.session, &self.renderer))?;

            let Event::Key(key) = next_event()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if let Effect::Terminate(termination) = self.handle_key_event(key) {
                return Ok(termination);
            }
        }
    }
}
