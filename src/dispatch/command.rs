use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::types::ResourceId;

/// Username/password pair carried by a `login` message.
#[derive(Clone, Deserialize, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A message from another surface (popup, content script, CLI).
///
/// Wire form is a JSON object tagged by `action`, e.g.
/// `{"action": "login", "credentials": {"username": "...", "password": "..."}}`.
#[derive(Debug, Clone, Deserialize, Serialize, Display, AsRefStr)]
#[serde(tag = "action", rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Command {
    CheckAuth,
    Login { credentials: Credentials },
    Logout,
    GetPrompts {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
    },
    GetPrompt { id: ResourceId },
    RefreshMenu,
}
