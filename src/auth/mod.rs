//! Session ownership, token storage, and the login/refresh flow.

pub mod error;
pub mod service;
pub mod session;
pub mod store;
pub mod token;

pub use error::AuthError;
pub use service::{AuthService, AuthStatus};
pub use session::{AuthState, Session};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreConfig};
pub use token::{StoredAuth, TokenPair};
