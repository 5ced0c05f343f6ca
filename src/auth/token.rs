use serde::{Deserialize, Serialize};

use crate::types::User;

/// Access/refresh credential pair issued by the API.
///
/// Both halves travel together: a store either holds a full pair or nothing.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Replace the access token, keeping the refresh token unless a new one was issued.
    pub fn rotated(&self, access_token: String, refresh_token: Option<String>) -> Self {
        Self {
            access_token,
            refresh_token: refresh_token.unwrap_or_else(|| self.refresh_token.clone()),
        }
    }
}

// Tokens stay out of logs and panic messages.
impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// What a token store persists: the pair plus who it belongs to.
///
/// # Example
/// ```
/// use prompt_client::auth::{StoredAuth, TokenPair};
///
/// let stored = StoredAuth::new(TokenPair::new("A1", "R1"), None);
/// assert_eq!(stored.tokens.access_token, "A1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAuth {
    pub tokens: TokenPair,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl StoredAuth {
    pub fn new(tokens: TokenPair, user: Option<User>) -> Self {
        Self { tokens, user }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotated_keeps_refresh_token_when_none_issued() {
        let pair = TokenPair::new("A1", "R1");
        let next = pair.rotated("A2".to_string(), None);
        assert_eq!(next, TokenPair::new("A2", "R1"));
    }

    #[test]
    fn rotated_takes_new_refresh_token() {
        let pair = TokenPair::new("A1", "R1");
        let next = pair.rotated("A2".to_string(), Some("R2".to_string()));
        assert_eq!(next, TokenPair::new("A2", "R2"));
    }

    #[test]
    fn debug_output_hides_tokens() {
        let rendered = format!("{:?}", TokenPair::new("secret-a", "secret-r"));
        assert!(!rendered.contains("secret"));
    }
}
