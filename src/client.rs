//! One-stop wiring of config, session, and services.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::auth::{AuthService, Session, TokenStore};
use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::menu::{MenuSurface, MenuSync};
use crate::prompts::PromptService;

/// Everything a host needs, sharing a single [`Session`].
///
/// # Example
/// ```no_run
/// use prompt_client::client::PromptClient;
/// use prompt_client::config::ClientConfig;
///
/// # async fn example() -> prompt_client::error::Result<()> {
/// let client = PromptClient::new(ClientConfig::from_env()?)?;
/// client.auth().login("alice", "pw1").await?;
/// let prompts = client.prompts().list(Some(5)).await?;
/// println!("{} prompts", prompts.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PromptClient {
    api: ApiClient,
    auth: AuthService,
    prompts: PromptService,
}

impl PromptClient {
    /// Build with the config's file-backed token store.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let store = config.token_store();
        Self::with_store(config, store)
    }

    pub fn with_store(config: ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        config.validate()?;
        let session = Arc::new(Session::new(store));
        let api = ApiClient::new(&config, session)?;
        Ok(Self::from_api(api))
    }

    pub fn from_api(api: ApiClient) -> Self {
        Self {
            auth: AuthService::new(api.clone()),
            prompts: PromptService::new(api.clone()),
            api,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &Arc<Session> {
        self.api.session()
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn prompts(&self) -> &PromptService {
        &self.prompts
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.auth.clone(), self.prompts.clone())
    }

    pub fn menu_sync(&self, surface: Arc<dyn MenuSurface>) -> MenuSync {
        MenuSync::new(self.auth.clone(), self.prompts.clone(), surface)
    }
}
