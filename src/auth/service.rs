use std::sync::Arc;

use reqwest::StatusCode;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::session::{AuthState, Session};
use super::token::{StoredAuth, TokenPair};
use crate::api::ApiClient;
use crate::error::{ClientError, Result};
use crate::types::User;

/// Endpoint used to probe whether the stored access token is still accepted.
const PROBE_SEGMENTS: &[&str] = &["prompts"];

/// Outcome of [`AuthService::check_authentication`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuthStatus {
    Authenticated { user: Option<User> },
    Unauthenticated,
}

impl AuthStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

/// Login, logout, and authentication checks over one [`Session`].
///
/// All network outcomes come back as typed results; nothing here prints,
/// prompts, or panics.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use prompt_client::api::ApiClient;
/// use prompt_client::auth::{AuthService, MemoryTokenStore, Session};
///
/// # async fn example() -> prompt_client::error::Result<()> {
/// let session = Arc::new(Session::new(Arc::new(MemoryTokenStore::new())));
/// let api = ApiClient::with_http_client(reqwest::Client::new(), "http://localhost:3000", session);
/// let auth = AuthService::new(api);
/// let user = auth.login("alice", "pw1").await?;
/// println!("logged in as {:?}", user);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn session(&self) -> &Arc<Session> {
        self.api.session()
    }

    pub fn state(&self) -> AuthState {
        self.session().state()
    }

    /// Post credentials and store the issued pair and user.
    ///
    /// Fails with [`ClientError::Storage`] if the pair could not be stored.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<User>> {
        let response = match self.api.create_session(username, password).await {
            Ok(response) => response,
            Err(err) => {
                warn!(username, error = %err, "login failed");
                return Err(err);
            }
        };
        let tokens = TokenPair::new(response.access_token, response.refresh_token);
        self.session()
            .establish(StoredAuth::new(tokens, response.user.clone()))?;
        info!(username, "logged in");
        Ok(response.user)
    }

    /// Clear the local session, then close the remote one in the background.
    ///
    /// The local clear happens first and always; the remote call cannot undo
    /// it. The returned handle may be awaited or dropped.
    pub fn logout(&self) -> Option<JoinHandle<()>> {
        let access = self.session().access_token();
        self.session().clear();
        info!("logged out");
        access.map(|access| self.api.spawn_remote_logout(access))
    }

    /// Probe the API with the stored access token.
    ///
    /// No stored token means no request. A 401 runs a single refresh whose
    /// result decides the answer. Other failures report unauthenticated but
    /// leave the stored tokens alone.
    pub async fn check_authentication(&self) -> AuthStatus {
        let Some(access) = self.session().access_token() else {
            self.session().set_state(AuthState::Unauthenticated);
            return AuthStatus::Unauthenticated;
        };

        let probe = match self.api.endpoint(PROBE_SEGMENTS) {
            Ok(url) => {
                self.api
                    .send_get(&url, &[("limit", "1".to_string())], &access)
                    .await
            }
            Err(err) => Err(err),
        };
        match probe {
            Ok(response) if response.status().is_success() => {
                self.session().set_state(AuthState::Authenticated);
                AuthStatus::Authenticated {
                    user: self.session().user(),
                }
            }
            Ok(response) if response.status() == StatusCode::UNAUTHORIZED => {
                match self.api.refresh_after_rejection(&access).await {
                    Ok(_) => AuthStatus::Authenticated {
                        user: self.session().user(),
                    },
                    Err(err) => {
                        debug!(error = %err, "session could not be refreshed");
                        AuthStatus::Unauthenticated
                    }
                }
            }
            Ok(response) => {
                debug!(status = %response.status(), "auth probe failed");
                AuthStatus::Unauthenticated
            }
            Err(err) => {
                debug!(error = %err, "auth probe failed");
                AuthStatus::Unauthenticated
            }
        }
    }

    /// Run one refresh of the stored pair, regardless of any rejection.
    pub async fn refresh(&self) -> Result<()> {
        let access = self
            .session()
            .access_token()
            .ok_or(ClientError::NotLoggedIn)?;
        self.api.refresh_after_rejection(&access).await.map(|_| ())
    }
}
