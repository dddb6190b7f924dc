//! Integration tests for identity persistence and startup.
//!
//! # Verification Focus
//!
//! - `save` then `load` round-trips id, name and status
//! - Missing file is `NotFound`; unreadable or corrupt file is fatal
//! - First run creates and persists a fresh identity
//! - Second run reuses the stored id
//! - Edits committed through the reducer land on disk
//! - Startup rejects an invalid roster

use std::fs;
use std::path::PathBuf;

use exochat::app::{App, StartupError};
use exochat::config::ClientConfig;
use exochat::input::Keystroke;
use exochat::reducer::{InputEvent, reduce};
use exochat::session::{Focus, Session};
use exochat::store::{IdentityStore, JsonFileStore, StoreError, bootstrap_identity};
use exochat_model::{Identity, Peer, UserId};
use uuid::Uuid;

/// Unique scratch directory under the system temp dir, removed on drop.
struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("exochat-test-{}", Uuid::now_v7()));
        Self(dir)
    }

    fn identity_path(&self) -> PathBuf {
        self.0.join("exochat").join("id.json")
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

// =============================================================================
// JsonFileStore
// =============================================================================

#[test]
fn test_save_then_load_round_trips() {
    let scratch = ScratchDir::new();
    let store = JsonFileStore::new(scratch.identity_path());
    let me = Identity::new(UserId::new("c0ffee"), "ann", "at lunch");

    store.save(&me).expect("save succeeds");
    let loaded = store.load().expect("load succeeds");

    assert_eq!(loaded, me);
}

#[test]
fn test_save_creates_app_directory_and_writes_three_fields() {
    let scratch = ScratchDir::new();
    let path = scratch.identity_path();
    let store = JsonFileStore::new(&path);

    store
        .save(&Identity::new(UserId::new("id-1"), "bo", ""))
        .expect("save succeeds");

    let raw = fs::read_to_string(&path).expect("file exists");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(
        value,
        serde_json::json!({ "id": "id-1", "name": "bo", "status": "" })
    );
    assert!(
        !path.with_extension("json.tmp").exists(),
        "temp file is renamed away"
    );
}

#[test]
fn test_save_overwrites_previous_identity() {
    let scratch = ScratchDir::new();
    let store = JsonFileStore::new(scratch.identity_path());

    store
        .save(&Identity::new(UserId::new("x"), "first", "a"))
        .expect("first save");
    store
        .save(&Identity::new(UserId::new("x"), "second", "b"))
        .expect("second save");

    let loaded = store.load().expect("load succeeds");
    assert_eq!(loaded.name, "second");
    assert_eq!(loaded.status, "b");
}

#[test]
fn test_missing_file_is_not_found() {
    let scratch = ScratchDir::new();
    let store = JsonFileStore::new(scratch.identity_path());

    let err = store.load().expect_err("nothing saved yet");

    assert!(err.is_not_found());
}

#[test]
fn test_corrupt_file_is_fatal() {
    let scratch = ScratchDir::new();
    let path = scratch.identity_path();
    fs::create_dir_all(path.parent().expect("has parent")).expect("mkdir");
    fs::write(&path, "{ not json").expect("write");

    let err = JsonFileStore::new(&path).load().expect_err("corrupt");

    assert!(matches!(err, StoreError::Malformed { .. }));
    assert!(!err.is_not_found());
}

#[test]
fn test_directory_in_place_of_file_is_io_error() {
    let scratch = ScratchDir::new();
    let path = scratch.identity_path();
    fs::create_dir_all(&path).expect("mkdir");

    let err = JsonFileStore::new(&path).load().expect_err("is a directory");

    assert!(matches!(err, StoreError::Io { .. }));
}

// =============================================================================
// Bootstrap
// =============================================================================

#[test]
fn test_first_run_persists_fresh_identity_and_second_run_reuses_it() {
    let scratch = ScratchDir::new();
    let store = JsonFileStore::new(scratch.identity_path());

    let first = bootstrap_identity(&store, "anon").expect("first run");
    assert_eq!(first.name, "anon");
    assert!(scratch.identity_path().exists());

    let second = bootstrap_identity(&store, "ignored").expect("second run");
    assert_eq!(second, first);
}

#[test]
fn test_bootstrap_fails_on_corrupt_identity() {
    let scratch = ScratchDir::new();
    let path = scratch.identity_path();
    fs::create_dir_all(path.parent().expect("has parent")).expect("mkdir");
    fs::write(&path, "[]").expect("write");

    let result = bootstrap_identity(&JsonFileStore::new(&path), "anon");

    assert!(matches!(result, Err(StoreError::Malformed { .. })));
    assert_eq!(fs::read_to_string(&path).expect("still there"), "[]");
}

#[test]
fn test_app_bootstrap_uses_configured_path_and_roster() {
    let scratch = ScratchDir::new();
    let config = ClientConfig {
        identity_path: Some(scratch.identity_path()),
        default_name: "newbie".to_string(),
        ..Default::default()
    };

    let app = App::bootstrap(&config).expect("startup succeeds");

    assert_eq!(app.session().identity().name, "newbie");
    assert_eq!(app.session().peers().len(), 2);
    assert_eq!(app.session().messages().len(), 2);
    assert_eq!(app.session().focus(), Focus::Composing);
    assert_eq!(app.store().path(), scratch.identity_path().as_path());
}

#[test]
fn test_app_bootstrap_rejects_duplicate_peers() {
    let scratch = ScratchDir::new();
    let config = ClientConfig {
        identity_path: Some(scratch.identity_path()),
        peers: vec![Peer::new("1", "bob", true), Peer::new("1", "bob2", false)],
        ..Default::default()
    };

    let result = App::bootstrap(&config);

    assert!(matches!(result, Err(StartupError::Session(_))));
}

// =============================================================================
// Reducer + file store
// =============================================================================

#[test]
fn test_committed_edits_survive_restart() {
    let scratch = ScratchDir::new();
    let store = JsonFileStore::new(scratch.identity_path());
    let config = ClientConfig::default();
    let identity = bootstrap_identity(&store, "anon").expect("first run");
    let id = identity.id.clone();
    let mut session = Session::new(config.session_config(identity)).expect("session");

    reduce(&mut session, InputEvent::Advance, &store);
    reduce(
        &mut session,
        InputEvent::TextEdit(Keystroke::DeleteToStart),
        &store,
    );
    for c in "kim".chars() {
        reduce(&mut session, InputEvent::TextEdit(Keystroke::Char(c)), &store);
    }
    reduce(&mut session, InputEvent::Advance, &store);
    for c in "brb".chars() {
        reduce(&mut session, InputEvent::TextEdit(Keystroke::Char(c)), &store);
    }
    reduce(&mut session, InputEvent::Submit, &store);

    let reloaded = bootstrap_identity(&store, "anon").expect("second run");
    assert_eq!(reloaded, Identity::new(id, "kim", "brb"));
}
