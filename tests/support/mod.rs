#![allow(dead_code)]

use std::sync::Arc;

use prompt_client::api::ApiClient;
use prompt_client::auth::{AuthError, MemoryTokenStore, Session, StoredAuth, TokenPair, TokenStore};
use prompt_client::client::PromptClient;
use serde_json::{json, Value};
use wiremock::MockServer;

/// Client against `server` with an in-memory store, optionally pre-seeded.
pub fn client_with_store(server: &MockServer, store: Arc<MemoryTokenStore>) -> PromptClient {
    client_at(&server.uri(), store, reqwest::Client::new())
}

/// Client against any base URL, store, and HTTP client.
pub fn client_at(
    base_url: &str,
    store: Arc<dyn TokenStore>,
    http: reqwest::Client,
) -> PromptClient {
    let session = Arc::new(Session::new(store));
    PromptClient::from_api(ApiClient::with_http_client(http, base_url, session))
}

/// Nothing listens on the discard port in tests.
pub const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:9";

/// Reads as empty and rejects every write.
pub struct ReadOnlyStore;

impl TokenStore for ReadOnlyStore {
    fn load(&self) -> Result<Option<StoredAuth>, AuthError> {
        Ok(None)
    }

    fn save(&self, _auth: &StoredAuth) -> Result<(), AuthError> {
        Err(AuthError::Storage("read-only".to_string()))
    }

    fn clear(&self) -> Result<(), AuthError> {
        Ok(())
    }
}

pub fn logged_in_store(access: &str, refresh: &str) -> Arc<MemoryTokenStore> {
    Arc::new(MemoryTokenStore::with_auth(StoredAuth::new(
        TokenPair::new(access, refresh),
        None,
    )))
}

pub fn prompt_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": format!("Content of {title}"),
        "description": format!("About {title}"),
        "created_at": "2024-05-01T10:00:00Z"
    })
}

pub fn login_body(access: &str, refresh: &str) -> Value {
    json!({
        "access_token": access,
        "refresh_token": refresh,
        "user": {"id": 1, "username": "alice"}
    })
}
