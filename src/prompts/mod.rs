//! Read-only access to the prompt library.

use tracing::debug;

use crate::api::ApiClient;
use crate::error::{ClientError, Result};
use crate::types::{Prompt, PromptList, ResourceId};

/// Lists and fetches prompts with the session's bearer token.
#[derive(Debug, Clone)]
pub struct PromptService {
    api: ApiClient,
}

impl PromptService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /prompts`, optionally capped at `limit` entries.
    pub async fn list(&self, limit: Option<u32>) -> Result<Vec<Prompt>> {
        let query: Vec<(&str, String)> = limit
            .map(|limit| vec![("limit", limit.to_string())])
            .unwrap_or_default();
        let listing: PromptList = self.api.get_authorized(&["prompts"], &query).await?;
        let prompts = listing.into_vec();
        debug!(count = prompts.len(), "fetched prompts");
        Ok(prompts)
    }

    /// `GET /prompts/:id`. The id is sent as one escaped path segment.
    pub async fn get(&self, id: &ResourceId) -> Result<Prompt> {
        let id = id.to_string();
        if id.is_empty() || id == "." || id == ".." {
            return Err(ClientError::api(404, "Prompt not found"));
        }
        self.api.get_authorized(&["prompts", id.as_str()], &[]).await
    }
}
