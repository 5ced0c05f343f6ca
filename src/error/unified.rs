//! Error classification and recovery hints.

use serde::{Deserialize, Serialize};

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Authentication,
    Network,
    Validation,
    NotFound,
    Server,
    Storage,
    Configuration,
    Serialization,
    Unknown,
}

/// Suggested recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    /// Log in again; the stored session is gone or rejected.
    Reauthenticate,
    /// Try the same request later.
    RetryLater,
    CheckInput,
    CheckConfiguration,
    ContactSupport,
}
