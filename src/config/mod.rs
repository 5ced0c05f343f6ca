//! Client configuration (layered: code > env > defaults).

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use bon::Builder;

use crate::auth::store::{FileTokenStore, TokenStore, TokenStoreConfig};
use crate::error::{ClientError, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_PROFILE: &str = "default";

const ENV_BASE_URL: &str = "PROMPT_API_BASE_URL";
const ENV_PROFILE: &str = "PROMPT_PROFILE";
const ENV_TOKEN_DIR: &str = "PROMPT_TOKEN_DIR";
const ENV_TIMEOUT_SECS: &str = "PROMPT_TIMEOUT_SECS";

/// Where the API lives and where the session is kept.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use prompt_client::config::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .base_url("https://prompts.example.com")
///     .timeout(Duration::from_secs(10))
///     .build();
/// assert_eq!(config.profile, "default");
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ClientConfig {
    #[builder(into, default = DEFAULT_BASE_URL.to_string())]
    pub base_url: String,
    /// Token file scope; one session per profile.
    #[builder(into, default = DEFAULT_PROFILE.to_string())]
    pub profile: String,
    /// Directory for token files. Defaults to `~/.prompt-client`.
    pub token_dir: Option<PathBuf>,
    /// Per-request timeout. Requests wait indefinitely when unset.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ClientConfig {
    /// Load from `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // a missing .env is fine
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset or blank values keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Self::default();
        if let Some(url) = get(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(profile) = get(ENV_PROFILE) {
            config.profile = profile;
        }
        if let Some(dir) = get(ENV_TOKEN_DIR) {
            config.token_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.parse().map_err(|_| {
                ClientError::Configuration(format!("{ENV_TIMEOUT_SECS} must be whole seconds, got {raw:?}"))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::Configuration(format!(
                "base URL must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        Ok(())
    }

    /// File-backed token store for this profile.
    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        let dir = self
            .token_dir
            .clone()
            .unwrap_or_else(TokenStoreConfig::default_dir);
        Arc::new(FileTokenStore::new(
            TokenStoreConfig::new(dir).with_profile(self.profile.clone()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.profile, DEFAULT_PROFILE);
        assert!(config.token_dir.is_none());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "https://prompts.example.com"),
            (ENV_PROFILE, "work"),
            (ENV_TOKEN_DIR, "/tmp/prompt-tokens"),
            (ENV_TIMEOUT_SECS, "15"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://prompts.example.com");
        assert_eq!(config.profile, "work");
        assert_eq!(config.token_dir, Some(PathBuf::from("/tmp/prompt-tokens")));
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = ClientConfig::from_lookup(lookup_from(&[(ENV_BASE_URL, "  ")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn bad_timeout_is_a_configuration_error() {
        let result = ClientConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "soon")]));
        assert!(matches!(result, Err(ClientError::Configuration(msg)) if msg.contains("soon")));
    }

    #[test]
    fn base_url_needs_a_scheme() {
        let result = ClientConfig::from_lookup(lookup_from(&[(ENV_BASE_URL, "localhost:3000")]));
        assert!(matches!(result, Err(ClientError::Configuration(_))));
    }
}
