use serde::{Deserialize, Serialize};

use super::ResourceId;

/// A reusable prompt snippet. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: ResourceId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

/// Prompt listing as returned by `GET /prompts`.
///
/// Older API revisions wrapped the array in `{ "prompts": [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PromptList {
    Bare(Vec<Prompt>),
    Wrapped { prompts: Vec<Prompt> },
}

impl PromptList {
    pub fn into_vec(self) -> Vec<Prompt> {
        match self {
            Self::Bare(prompts) | Self::Wrapped { prompts } => prompts,
        }
    }
}
