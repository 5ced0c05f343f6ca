use std::sync::{Arc, Mutex};

use serde::Serialize;
use strum::{Display, EnumString};
use tokio::sync::{Mutex as AsyncMutex, MutexGuard};
use tracing::{debug, warn};

use super::error::AuthError;
use super::store::TokenStore;
use super::token::{StoredAuth, TokenPair};
use crate::types::User;

/// Where the session stands right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
    Refreshing,
}

/// The one owner of the stored credentials.
///
/// Every component that needs a token reads it through the session, so a
/// request always goes out with whatever was stored last. Read failures
/// are logged and read as "no session"; write failures are returned.
pub struct Session {
    store: Arc<dyn TokenStore>,
    state: Mutex<AuthState>,
    refresh_guard: AsyncMutex<()>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let session = Self {
            store,
            state: Mutex::new(AuthState::Unauthenticated),
            refresh_guard: AsyncMutex::new(()),
        };
        if session.stored().is_some() {
            session.set_state(AuthState::Authenticated);
        }
        session
    }

    pub fn state(&self) -> AuthState {
        self.state
            .lock()
            .map(|state| *state)
            .unwrap_or(AuthState::Unauthenticated)
    }

    pub(crate) fn set_state(&self, next: AuthState) {
        if let Ok(mut state) = self.state.lock() {
            let previous = *state;
            if previous != next {
                debug!(from = %previous, to = %next, "auth state change");
                *state = next;
            }
        }
    }

    /// Current persisted session, if any.
    pub fn stored(&self) -> Option<StoredAuth> {
        match self.store.load() {
            Ok(auth) => auth,
            Err(err) => {
                warn!(error = %err, "failed to read token store; treating as logged out");
                None
            }
        }
    }

    pub fn tokens(&self) -> Option<TokenPair> {
        self.stored().map(|auth| auth.tokens)
    }

    pub fn access_token(&self) -> Option<String> {
        self.tokens().map(|pair| pair.access_token)
    }

    pub fn user(&self) -> Option<User> {
        self.stored().and_then(|auth| auth.user)
    }

    /// Persist a fresh session and mark it authenticated.
    ///
    /// The state only changes once the store accepted the write.
    pub fn establish(&self, auth: StoredAuth) -> Result<(), AuthError> {
        if let Err(err) = self.store.save(&auth) {
            warn!(error = %err, "failed to persist session");
            return Err(err);
        }
        self.set_state(AuthState::Authenticated);
        Ok(())
    }

    /// Swap in a rotated token pair, keeping the stored user.
    pub(crate) fn replace_tokens(&self, tokens: TokenPair) -> Result<(), AuthError> {
        let user = self.user();
        self.establish(StoredAuth::new(tokens, user))
    }

    /// Enter `Refreshing` until the returned marker drops.
    ///
    /// If the refresh is abandoned midway, dropping the marker settles the
    /// state from whatever the store holds.
    pub(crate) fn begin_refresh(&self) -> RefreshInFlight<'_> {
        self.set_state(AuthState::Refreshing);
        RefreshInFlight { session: self }
    }

    /// Drop both tokens. Always ends unauthenticated, even if the store fails.
    pub fn clear(&self) {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "failed to clear token store");
        }
        self.set_state(AuthState::Unauthenticated);
    }

    /// Held for the whole of a refresh so only one runs at a time.
    pub(crate) async fn lock_refresh(&self) -> MutexGuard<'_, ()> {
        self.refresh_guard.lock().await
    }
}

pub(crate) struct RefreshInFlight<'a> {
    session: &'a Session,
}

impl Drop for RefreshInFlight<'_> {
    fn drop(&mut self) {
        if self.session.state() == AuthState::Refreshing {
            let settled = if self.session.stored().is_some() {
                AuthState::Authenticated
            } else {
                AuthState::Unauthenticated
            };
            self.session.set_state(settled);
        }
    }
}
