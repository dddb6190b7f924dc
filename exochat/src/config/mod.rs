//! Configuration system for the `ExoChat` client.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/exochat/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::str::FromStr;

use exochat_model::{Identity, Message, Peer};
use ratatui::style::Color;

use crate::session::SessionConfig;
use crate::store::{APP_DIR, JsonFileStore, StoreError};
use crate::ui::theme::{self, Theme};
use crate::ui::{DEFAULT_MESSAGE_WINDOW, Renderer};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// A colour setting could not be parsed.
    #[error("invalid colour for {key}: {value:?}")]
    InvalidColor {
        /// Setting name.
        key: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The message window must show at least one message.
    #[error("message_window must be at least 1")]
    InvalidWindow,
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    identity: IdentityFileConfig,
    ui: UiFileConfig,
    peers: Option<Vec<Peer>>,
    messages: Option<Vec<Message>>,
}

/// `[identity]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct IdentityFileConfig {
    path: Option<PathBuf>,
    default_name: Option<String>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    message_window: Option<usize>,
    online_color: Option<String>,
    offline_color: Option<String>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -- Identity --
    /// Identity file override; `None` means the well-known location.
    pub identity_path: Option<PathBuf>,
    /// Name given to a freshly generated identity.
    pub default_name: String,

    // -- UI --
    /// Number of most recent messages shown.
    pub message_window: usize,
    /// Colour of online peer names.
    pub online_color: Color,
    /// Colour of offline peer names.
    pub offline_color: Color,

    // -- Roster --
    /// Static peer roster.
    pub peers: Vec<Peer>,
    /// Messages the log starts with.
    pub messages: Vec<Message>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            identity_path: None,
            default_name: "anon".to_string(),
            message_window: DEFAULT_MESSAGE_WINDOW,
            online_color: theme::ONLINE,
            offline_color: theme::OFFLINE,
            peers: default_peers(),
            messages: default_messages(),
        }
    }
}

impl ClientConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an
    /// error. Otherwise the default path (`~/.config/exochat/config.toml`)
    /// is tried and silently ignored if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or
    /// parsed, or if a resolved value is invalid.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Self::resolve(cli, &file)
    }

    /// Resolve a `ClientConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. This is separated from `load()` to
    /// enable unit testing without CLI parsing.
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let message_window = cli
            .message_window
            .or(file.ui.message_window)
            .unwrap_or(defaults.message_window);
        if message_window == 0 {
            return Err(ConfigError::InvalidWindow);
        }

        Ok(Self {
            identity_path: cli
                .identity_file
                .clone()
                .or_else(|| file.identity.path.clone()),
            default_name: cli
                .name
                .clone()
                .or_else(|| file.identity.default_name.clone())
                .unwrap_or(defaults.default_name),
            message_window,
            online_color: parse_color("online_color", file.ui.online_color.as_deref())?
                .unwrap_or(defaults.online_color),
            offline_color: parse_color("offline_color", file.ui.offline_color.as_deref())?
                .unwrap_or(defaults.offline_color),
            peers: file.peers.clone().unwrap_or(defaults.peers),
            messages: file.messages.clone().unwrap_or(defaults.messages),
        })
    }

    /// Identity store at the configured path, or the well-known one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoConfigDir`] if no path is configured and
    /// the platform config directory cannot be determined.
    pub fn identity_store(&self) -> Result<JsonFileStore, StoreError> {
        self.identity_path
            .as_ref()
            .map_or_else(JsonFileStore::default_location, |path| {
                Ok(JsonFileStore::new(path.clone()))
            })
    }

    /// Renderer built from the UI settings.
    #[must_use]
    pub fn renderer(&self) -> Renderer {
        Renderer::new(
            Theme::with_presence_colors(self.online_color, self.offline_color),
            self.message_window,
        )
    }

    /// Session payload for `identity` with the configured roster and log.
    #[must_use]
    pub fn session_config(&self, identity: Identity) -> SessionConfig {
        SessionConfig {
            identity,
            peers: self.peers.clone(),
            messages: self.messages.clone(),
        }
    }
}

/// Built-in roster used when the config file has no `[[peers]]`.
#[must_use]
pub fn default_peers() -> Vec<Peer> {
    vec![Peer::new("1", "bob", true), Peer::new("2", "fred", false)]
}

/// Built-in log used when the config file has no `[[messages]]`.
#[must_use]
pub fn default_messages() -> Vec<Message> {
    vec![
        Message::new("1", "hi everyone"),
        Message::new("2", "hi bob"),
    ]
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal chat client with a persistent local identity")]
pub struct CliArgs {
    /// Path to config file (default: `~/.config/exochat/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the identity file (default: `~/.config/exochat/id.json`).
    #[arg(long, env = "EXOCHAT_IDENTITY")]
    pub identity_file: Option<PathBuf>,

    /// Display name for a newly created identity.
    #[arg(long)]
    pub name: Option<String>,

    /// Number of recent messages to show.
    #[arg(long)]
    pub message_window: Option<usize>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "EXOCHAT_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/exochat.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn parse_color(key: &'static str, value: Option<&str>) -> Result<Option<Color>, ConfigError> {
    value
        .map(|v| {
            Color::from_str(v).map_err(|_| ConfigError::InvalidColor {
                key,
                value: v.to_string(),
            })
        })
        .transpose()
}

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            // No config dir available, use defaults.
            return Ok(ConfigFile::default());
        };
        config_dir.join(APP_DIR).join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
