//! Message-style command surface.
//!
//! Callers hand in a [`Command`] (or its JSON form) and always get a
//! [`Response`] back. Failures never cross this boundary as errors.

mod command;
mod response;

pub use command::{Command, Credentials};
pub use response::Response;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::auth::{AuthService, AuthStatus};
use crate::error::ClientError;
use crate::menu::MenuSync;
use crate::prompts::PromptService;
use crate::types::ResourceId;

const LOGIN_FAILED: &str = "Login failed";
const FETCH_FAILED: &str = "Failed to fetch prompts";
const NETWORK_ERROR: &str = "Network error";
const NOT_LOGGED_IN: &str = "Not logged in";

/// Routes commands to the auth flow and the prompt service.
#[derive(Clone)]
pub struct Dispatcher {
    auth: AuthService,
    prompts: PromptService,
    menu: Option<Arc<MenuSync>>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("auth", &self.auth)
            .field("menu", &self.menu.is_some())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(auth: AuthService, prompts: PromptService) -> Self {
        Self {
            auth,
            prompts,
            menu: None,
        }
    }

    /// Keep a menu in step with every successful prompt fetch.
    pub fn with_menu(mut self, menu: Arc<MenuSync>) -> Self {
        self.menu = Some(menu);
        self
    }

    /// Handle a raw JSON message. Anything unparseable is an unknown action.
    pub async fn dispatch_value(&self, message: serde_json::Value) -> serde_json::Value {
        let response = match serde_json::from_value::<Command>(message) {
            Ok(command) => self.dispatch(command).await,
            Err(err) => {
                debug!(error = %err, "rejected message");
                Response::unknown_action()
            }
        };
        serde_json::to_value(&response).unwrap_or_else(|err| {
            warn!(error = %err, "failed to encode response");
            serde_json::json!({ "success": false, "error": "Internal error" })
        })
    }

    pub async fn dispatch(&self, command: Command) -> Response {
        debug!(action = %command, "dispatching");
        match command {
            Command::CheckAuth => match self.auth.check_authentication().await {
                AuthStatus::Authenticated { user } => Response::auth(true, user),
                AuthStatus::Unauthenticated => Response::auth(false, None),
            },
            Command::Login { credentials } => {
                match self
                    .auth
                    .login(&credentials.username, &credentials.password)
                    .await
                {
                    Ok(user) => Response::ok().with_user(user),
                    Err(err) => Response::failed(login_error_message(&err)),
                }
            }
            Command::Logout => {
                let _remote = self.auth.logout();
                Response::ok()
            }
            Command::GetPrompts { limit } => match self.prompts.list(limit).await {
                Ok(prompts) => {
                    if let Some(menu) = &self.menu {
                        menu.show_prompts(prompts.clone()).await;
                    }
                    Response::ok().with_prompts(prompts)
                }
                Err(err) => Response::failed(fetch_error_message(&err)),
            },
            Command::GetPrompt { id } => self.get_prompt(&id).await,
            Command::RefreshMenu => match &self.menu {
                Some(menu) if menu.reload().await => Response::ok(),
                Some(_) => Response::failed(FETCH_FAILED),
                None => Response::failed("No menu attached"),
            },
        }
    }

    async fn get_prompt(&self, id: &ResourceId) -> Response {
        match self.prompts.get(id).await {
            Ok(prompt) => Response::ok().with_prompt(prompt),
            Err(ClientError::Api { status: 404, .. }) => Response::failed("Prompt not found"),
            Err(err) => Response::failed(fetch_error_message(&err)),
        }
    }
}

fn login_error_message(err: &ClientError) -> String {
    match err {
        ClientError::Network(_) => NETWORK_ERROR.to_string(),
        ClientError::Api { message, .. } => message.clone(),
        _ => LOGIN_FAILED.to_string(),
    }
}

fn fetch_error_message(err: &ClientError) -> String {
    match err {
        ClientError::Network(_) => NETWORK_ERROR,
        ClientError::NotLoggedIn => NOT_LOGGED_IN,
        _ => FETCH_FAILED,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_errors_surface_server_message() {
        let err = ClientError::api(400, "Invalid credentials");
        assert_eq!(login_error_message(&err), "Invalid credentials");
        assert_eq!(login_error_message(&ClientError::Unauthorized), LOGIN_FAILED);
    }

    #[test]
    fn fetch_errors_collapse_to_generic_message() {
        assert_eq!(fetch_error_message(&ClientError::Unauthorized), FETCH_FAILED);
        assert_eq!(fetch_error_message(&ClientError::api(500, "boom")), FETCH_FAILED);
        assert_eq!(fetch_error_message(&ClientError::NotLoggedIn), NOT_LOGGED_IN);
    }
}
