//! HTTP client for the prompt API.
//!
//! Every authenticated call reads the access token from the [`Session`] at
//! send time. A 401 triggers at most one refresh for that call, and the
//! request is retried once with whatever token the refresh stored.

pub mod http;

use std::sync::Arc;

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::auth::Session;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::types::User;

/// Body returned by `POST /session`.
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken")]
    pub access_token: String,
    #[serde(alias = "refreshToken")]
    pub refresh_token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Body returned by `POST /session/refresh`.
#[derive(Clone, Deserialize)]
pub struct RefreshResponse {
    #[serde(alias = "jwt", alias = "accessToken")]
    pub access_token: String,
    #[serde(default, alias = "refreshToken")]
    pub refresh_token: Option<String>,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

impl std::fmt::Debug for RefreshResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshResponse")
            .field("access_token", &"<redacted>")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Thin API client bound to one session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Arc<Session>) -> Result<Self> {
        let http = http::build_client(config.timeout)?;
        Ok(Self::with_http_client(http, &config.base_url, session))
    }

    pub fn with_http_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        session: Arc<Session>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            session,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Base URL extended by `segments`, each percent-encoded as a single
    /// path segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|err| {
            ClientError::Configuration(format!("invalid base URL {:?}: {err}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::Configuration(format!("base URL {:?} cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `POST /session` with the user's credentials. Does not touch the session.
    ///
    /// Any rejection, 401 included, becomes [`ClientError::Api`] carrying the
    /// server's message or `"Login failed"`.
    pub async fn create_session(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let response = self
            .http
            .post(self.url("/session"))
            .headers(http::json_headers())
            .json(&LoginRequest { username, password })
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = http::error_message(&body).unwrap_or_else(|| "Login failed".to_string());
            return Err(ClientError::api(status.as_u16(), message));
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// `POST /session/refresh`. Does not touch the session.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<RefreshResponse> {
        let response = self
            .http
            .post(self.url("/session/refresh"))
            .headers(http::json_headers())
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;
        decode_json(response).await
    }

    /// `DELETE /session` for the given access token.
    pub async fn delete_session(&self, access_token: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.url("/session"))
            .headers(http::bearer_headers(access_token))
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(http::status_to_error(status, &body))
    }

    /// Fire-and-forget remote logout. Failures are only logged.
    pub fn spawn_remote_logout(&self, access_token: String) -> tokio::task::JoinHandle<()> {
        let api = self.clone();
        tokio::spawn(async move {
            match api.delete_session(&access_token).await {
                Ok(()) => debug!("remote session closed"),
                Err(err) => debug!(error = %err, "remote logout failed; local session already cleared"),
            }
        })
    }

    /// Authenticated GET decoded as JSON, with one refresh-then-retry on 401.
    ///
    /// `segments` are joined onto the base URL; each is escaped, so an id
    /// can never reach a different endpoint.
    pub async fn get_authorized<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        let access = self.session.access_token().ok_or(ClientError::NotLoggedIn)?;
        let url = self.endpoint(segments)?;
        let response = self.send_get(&url, query, &access).await?;
        let response = if response.status() == StatusCode::UNAUTHORIZED {
            debug!(path = url.path(), "access token rejected; refreshing");
            let fresh = self.refresh_after_rejection(&access).await?;
            self.send_get(&url, query, &fresh).await?
        } else {
            response
        };
        decode_json(response).await
    }

    pub(crate) async fn send_get(
        &self,
        url: &Url,
        query: &[(&str, String)],
        access_token: &str,
    ) -> Result<reqwest::Response> {
        let response = self
            .http
            .get(url.clone())
            .headers(http::bearer_headers(access_token))
            .query(query)
            .send()
            .await?;
        Ok(response)
    }

    /// Exchange the refresh token after `rejected` drew a 401.
    ///
    /// Runs under the session's refresh guard. If the stored access token no
    /// longer equals `rejected`, another task already refreshed and its token
    /// is returned without a second refresh call. On any refresh failure,
    /// including a rotated pair the store would not accept, the session is
    /// cleared.
    pub(crate) async fn refresh_after_rejection(&self, rejected: &str) -> Result<String> {
        let _guard = self.session.lock_refresh().await;

        let tokens = match self.session.tokens() {
            Some(tokens) if !tokens.refresh_token.is_empty() => tokens,
            _ => {
                warn!("no refresh token available; clearing session");
                self.session.clear();
                return Err(ClientError::NotLoggedIn);
            }
        };
        if tokens.access_token != rejected {
            debug!("access token already rotated by a concurrent refresh");
            return Ok(tokens.access_token);
        }

        let _refreshing = self.session.begin_refresh();
        let rotated = match self.refresh_session(&tokens.refresh_token).await {
            Ok(refreshed) => {
                let next = tokens.rotated(refreshed.access_token, refreshed.refresh_token);
                let access = next.access_token.clone();
                self.session
                    .replace_tokens(next)
                    .map(|()| access)
                    .map_err(ClientError::from)
            }
            Err(err) => Err(err),
        };
        match rotated {
            Ok(access) => {
                info!("access token refreshed");
                Ok(access)
            }
            Err(err) => {
                warn!(error = %err, "token refresh failed; clearing session");
                self.session.clear();
                Err(err)
            }
        }
    }
}

/// Decode a 2xx body as JSON or turn the status into an error.
async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(http::status_to_error(status, &body));
    }
    Ok(serde_json::from_str(&body)?)
}
