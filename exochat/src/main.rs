//! `ExoChat`: terminal chat client.
//!
//! Loads (or creates) the local identity, then runs the TUI until the user
//! cancels. Configuration via CLI flags, environment variables, or config
//! file (`~/.config/exochat/config.toml`).
//!
//! ```bash
//! cargo run --bin exochat
//!
//! # Use a scratch identity and verbose logs
//! cargo run --bin exochat -- --identity-file /tmp/id.json --log-level debug
//! ```

use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_appender::non_blocking::WorkerGuard;

use exochat::app::{App, ExitStatus};
use exochat::config::{CliArgs, ClientConfig};
use exochat::reducer::Termination;

fn main() -> ExitCode {
    let cli = CliArgs::parse();

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("exochat starting");
    let status = run(&cli);
    tracing::info!(code = status.code(), "exochat exiting");
    status.into()
}

/// Resolve configuration, bootstrap the identity, and run the TUI.
fn run(cli: &CliArgs) -> ExitStatus {
    let config = match ClientConfig::load(cli) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            eprintln!("exochat: {e}");
            return ExitStatus::Startup;
        }
    };

    let mut app = match App::bootstrap(&config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            eprintln!("exochat: {e}");
            return ExitStatus::Startup;
        }
    };

    let result = match with_terminal(|terminal| app.run(terminal, event::read)) {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, "terminal setup or teardown failed");
            eprintln!("exochat: terminal: {e}");
            return ExitStatus::Startup;
        }
    };

    match result {
        Ok(termination) => {
            if let Termination::SaveFailed(e) = &termination {
                eprintln!("exochat: could not save identity: {e}");
            }
            ExitStatus::from(&termination)
        }
        Err(e) => {
            tracing::error!(error = %e, "terminal I/O failed");
            eprintln!("exochat: terminal: {e}");
            ExitStatus::Terminal
        }
    }
}

/// Set up the terminal, run `f`, and restore the terminal afterwards.
///
/// The outer `Result` covers setup and teardown; the inner one is
/// whatever `f` returned.
fn with_terminal<T>(
    f: impl FnOnce(&mut Terminal<CrosstermBackend<io::Stdout>>) -> T,
) -> io::Result<T> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = f(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(result)
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("exochat.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}
