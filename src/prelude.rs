//! Convenience re-exports.

pub use crate::auth::{AuthService, AuthState, AuthStatus, Session, StoredAuth, TokenPair, TokenStore};
pub use crate::client::PromptClient;
pub use crate::config::ClientConfig;
pub use crate::dispatch::{Command, Dispatcher, Response};
pub use crate::error::{ClientError, Result};
pub use crate::types::{Prompt, ResourceId, User};
