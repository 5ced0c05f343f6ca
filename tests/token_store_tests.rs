use std::sync::Arc;

use prompt_client::auth::{
    AuthState, FileTokenStore, Session, StoredAuth, TokenPair, TokenStore, TokenStoreConfig,
};
use prompt_client::config::ClientConfig;
use prompt_client::types::{ResourceId, User};
use tempfile::TempDir;

fn alice() -> User {
    User {
        id: ResourceId::Number(1),
        username: "alice".to_string(),
    }
}

#[test]
fn session_survives_restart() {
    let dir = TempDir::new().unwrap();
    let config = TokenStoreConfig::new(dir.path().to_path_buf());

    let first = Session::new(Arc::new(FileTokenStore::new(config.clone())));
    first
        .establish(StoredAuth::new(TokenPair::new("A1", "R1"), Some(alice())))
        .unwrap();
    drop(first);

    let second = Session::new(Arc::new(FileTokenStore::new(config)));
    assert_eq!(second.state(), AuthState::Authenticated);
    assert_eq!(second.tokens(), Some(TokenPair::new("A1", "R1")));
    assert_eq!(second.user(), Some(alice()));
}

#[test]
fn profiles_do_not_share_sessions() {
    let dir = TempDir::new().unwrap();
    let work = FileTokenStore::new(TokenStoreConfig::new(dir.path().to_path_buf()).with_profile("Work"));
    let home = FileTokenStore::new(TokenStoreConfig::new(dir.path().to_path_buf()));

    work.save(&StoredAuth::new(TokenPair::new("W1", "WR1"), None))
        .unwrap();

    assert!(home.load().unwrap().is_none());
    assert_eq!(work.load().unwrap().unwrap().tokens.access_token, "W1");
    assert!(work.path().ends_with("session.work.toml"));
}

#[test]
fn cleared_session_is_gone_after_restart() {
    let dir = TempDir::new().unwrap();
    let config = ClientConfig::builder()
        .token_dir(dir.path().to_path_buf())
        .build();

    let store = config.token_store();
    store
        .save(&StoredAuth::new(TokenPair::new("A1", "R1"), None))
        .unwrap();
    Session::new(store).clear();

    let reopened = Session::new(config.token_store());
    assert_eq!(reopened.state(), AuthState::Unauthenticated);
    assert!(reopened.tokens().is_none());
}

#[test]
fn corrupt_file_reads_as_logged_out() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(TokenStoreConfig::new(dir.path().to_path_buf()));
    std::fs::write(store.path(), "this is not toml = = =").unwrap();

    assert!(store.load().is_err());
    let session = Session::new(Arc::new(store));
    assert_eq!(session.state(), AuthState::Unauthenticated);
}
