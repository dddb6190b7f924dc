//! Persistence of the local identity.
//!
//! The [`IdentityStore`] trait is the whole contract the rest of the client
//! depends on: `load` the saved identity or `save` the current one. A
//! missing identity is reported as [`StoreError::NotFound`], which callers
//! treat as "first run". Every other error is fatal.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use exochat_model::Identity;

/// Directory name under the user's config dir.
pub const APP_DIR: &str = "exochat";

/// File name of the persisted identity.
pub const IDENTITY_FILE: &str = "id.json";

/// Errors that can occur while loading or saving the identity.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No identity has been saved yet.
    #[error("no stored identity")]
    NotFound,

    /// Could not determine the user's config directory.
    #[error("could not determine config directory (no HOME or XDG_CONFIG_HOME)")]
    NoConfigDir,

    /// Reading or writing the identity file failed.
    #[error("identity file {path}: {source}")]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The identity file exists but does not hold a valid identity.
    #[error("malformed identity file {path}: {source}")]
    Malformed {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Whether this error only means "nothing saved yet".
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Trait for persistent identity storage.
///
/// Calls are blocking and must complete before the caller continues.
pub trait IdentityStore: Send + Sync {
    /// Load the saved identity.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if nothing has been saved, or
    /// another [`StoreError`] if the stored data is inaccessible.
    fn load(&self) -> Result<Identity, StoreError>;

    /// Persist `identity`, replacing any previously saved one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the identity cannot be written.
    fn save(&self, identity: &Identity) -> Result<(), StoreError>;
}

/// Identity stored as a JSON file with `id`, `name` and `status` fields.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by an explicit file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the well-known location `<config dir>/exochat/id.json`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoConfigDir`] if the platform config
    /// directory cannot be determined.
    pub fn default_location() -> Result<Self, StoreError> {
        let dir = dirs::config_dir().ok_or(StoreError::NoConfigDir)?;
        Ok(Self::new(dir.join(APP_DIR).join(IDENTITY_FILE)))
    }

    /// Path of the identity file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl IdentityStore for JsonFileStore {
    fn load(&self) -> Result<Identity, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(StoreError::NotFound),
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_str(&contents).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, identity: &Identity) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(identity).map_err(|source| {
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;

        // Write beside the target and rename so a crash never leaves a
        // truncated identity behind.
        let tmp_path = self.path.with_extension("json.tmp");
        let mut tmp_file = File::create(&tmp_path).map_err(|e| self.io_error(e))?;
        tmp_file
            .write_all(json.as_bytes())
            .and_then(|()| tmp_file.write_all(b"\n"))
            .and_then(|()| tmp_file.sync_all())
            .map_err(|e| self.io_error(e))?;
        drop(tmp_file);
        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))?;

        tracing::debug!(path = %self.path.display(), "identity written");
        Ok(())
    }
}

/// In-memory identity store.
///
/// Does not persist beyond the lifetime of the struct. Counts saves so
/// callers can observe when the client commits an identity.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    identity: parking_lot::Mutex<Option<Identity>>,
    saves: parking_lot::Mutex<usize>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `identity`.
    #[must_use]
    pub fn with_identity(identity: Identity) -> Self {
        Self {
            identity: parking_lot::Mutex::new(Some(identity)),
            saves: parking_lot::Mutex::new(0),
        }
    }

    /// Number of successful `save` calls.
    #[must_use]
    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }

    /// The most recently saved (or seeded) identity.
    #[must_use]
    pub fn stored(&self) -> Option<Identity> {
        self.identity.lock().clone()
    }
}

impl IdentityStore for InMemoryStore {
    fn load(&self) -> Result<Identity, StoreError> {
        self.identity.lock().clone().ok_or(StoreError::NotFound)
    }

    fn save(&self, identity: &Identity) -> Result<(), StoreError> {
        *self.identity.lock() = Some(identity.clone());
        *self.saves.lock() += 1;
        Ok(())
    }
}

/// Load the saved identity, or create and persist a fresh one on first run.
///
/// A fresh identity gets a generated id, `default_name` and an empty
/// status. It is saved immediately so the id stays stable across runs.
///
/// # Errors
///
/// Returns any [`StoreError`] other than [`StoreError::NotFound`] from
/// `load`, or the error from saving the fresh identity.
pub fn bootstrap_identity<S>(store: &S, default_name: &str) -> Result<Identity, StoreError>
where
    S: IdentityStore + ?Sized,
{
    match store.load() {
        Ok(identity) => {
            tracing::info!(id = %identity.id, "loaded stored identity");
            Ok(identity)
        }
        Err(e) if e.is_not_found() => {
            let identity = Identity::fresh(default_name);
            store.save(&identity)?;
            tracing::info!(id = %identity.id, "created new identity");
            Ok(identity)
        }
        Err(e) => Err(e),
    }
}
