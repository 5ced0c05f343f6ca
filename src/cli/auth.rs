//! CLI auth command handlers for login, status, and logout.

use std::io::BufRead;

use crate::auth::AuthStatus;
use crate::client::PromptClient;

const PASSWORD_ENV: &str = "PROMPT_PASSWORD";
const REMOTE_LOGOUT_WAIT: std::time::Duration = std::time::Duration::from_secs(2);

/// Handle `prompt-client auth login <username>`.
pub async fn handle_login(
    client: &PromptClient,
    username: &str,
    password: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let password = match password.or_else(|| std::env::var(PASSWORD_ENV).ok()) {
        Some(password) => password,
        None => read_password_line()?,
    };
    let user = client.auth().login(username, &password).await?;
    match user {
        Some(user) => println!("Logged in as {} (id {})", user.username, user.id),
        None => println!("Logged in as {username}"),
    }
    Ok(())
}

/// Handle `prompt-client auth status`.
pub async fn handle_status(client: &PromptClient) -> Result<(), Box<dyn std::error::Error>> {
    match client.auth().check_authentication().await {
        AuthStatus::Authenticated { user: Some(user) } => {
            println!("Authenticated as {}", user.username)
        }
        AuthStatus::Authenticated { user: None } => println!("Authenticated"),
        AuthStatus::Unauthenticated => println!("Not logged in"),
    }
    Ok(())
}

/// Handle `prompt-client auth logout`.
pub async fn handle_logout(client: &PromptClient) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(remote) = client.auth().logout() {
        // Local tokens are gone already; don't hang on a slow server.
        let _ = tokio::time::timeout(REMOTE_LOGOUT_WAIT, remote).await;
    }
    println!("Logged out");
    Ok(())
}

fn read_password_line() -> Result<String, Box<dyn std::error::Error>> {
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err("no password given".into());
    }
    Ok(password)
}
