//! Session-aware client for a remote AI prompt library.
//!
//! Holds an access/refresh token pair, sends bearer-authenticated requests,
//! refreshes once when the API rejects a token, and exposes the whole thing
//! through a message-style [`dispatch::Dispatcher`].
//!
//! # Quick Start
//!
//! ```no_run
//! use prompt_client::prelude::*;
//!
//! # async fn example() -> prompt_client::error::Result<()> {
//! let client = PromptClient::new(ClientConfig::from_env()?)?;
//! let reply = client
//!     .dispatcher()
//!     .dispatch_value(serde_json::json!({"action": "checkAuth"}))
//!     .await;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod menu;
pub mod prelude;
pub mod prompts;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
