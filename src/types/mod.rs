//! Value types returned by the prompt API.

mod prompt;

pub use prompt::{Prompt, PromptList};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier as sent by the API: a number or an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        match value.parse::<i64>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(value.to_string()),
        }
    }
}

/// Identity of the logged-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: ResourceId,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_accept_numbers_and_strings() {
        let n: ResourceId = serde_json::from_str("7").unwrap();
        let s: ResourceId = serde_json::from_str("\"3f2a\"").unwrap();
        assert_eq!(n, ResourceId::Number(7));
        assert_eq!(s, ResourceId::Text("3f2a".to_string()));
        assert_eq!(n.to_string(), "7");
    }

    #[test]
    fn numeric_strings_parse_as_numbers() {
        assert_eq!(ResourceId::from("42"), ResourceId::Number(42));
        assert_eq!(
            ResourceId::from("abc-1"),
            ResourceId::Text("abc-1".to_string())
        );
    }
}
