//! CLI entry point for prompt-client.

pub mod auth;
pub mod prompts;

use clap::{Parser, Subcommand};

use crate::config::ClientConfig;
use crate::error::Result;

/// Prompt library CLI
#[derive(Parser, Debug)]
#[command(name = "prompt-client", version, about = "Browse and fetch prompts from a prompt library")]
pub struct Cli {
    /// API base URL (overrides PROMPT_API_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Session profile (overrides PROMPT_PROFILE)
    #[arg(long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Session management
    Auth(AuthArgs),
    /// Prompt browsing
    Prompts(PromptsArgs),
    /// Send one JSON command message and print the reply
    Dispatch(DispatchArgs),
}

/// Arguments for the `auth` subcommand group.
#[derive(Parser, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommands,
}

/// Auth subcommands for login, status, and logout.
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Log in with a username and password
    Login(LoginArgs),
    /// Show authentication status
    Status,
    /// Log out and forget the stored tokens
    Logout,
}

/// Arguments for `prompt-client auth login`.
#[derive(Parser, Debug)]
pub struct LoginArgs {
    pub username: String,

    /// Password; falls back to PROMPT_PASSWORD, then stdin
    #[arg(long)]
    pub password: Option<String>,
}

/// Arguments for the `prompts` subcommand group.
#[derive(Parser, Debug)]
pub struct PromptsArgs {
    #[command(subcommand)]
    pub command: PromptsCommands,
}

#[derive(Subcommand, Debug)]
pub enum PromptsCommands {
    /// List prompts
    List {
        /// Maximum number of prompts to return
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Print one prompt's content
    Show { id: String },
}

/// Arguments for `prompt-client dispatch`.
#[derive(Parser, Debug)]
pub struct DispatchArgs {
    /// JSON message, or `-` to read it from stdin
    pub message: String,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Environment config with command-line overrides applied.
    pub fn config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::from_env()?;
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(profile) = &self.profile {
            config.profile = profile.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_auth_login_with_password() {
        let cli =
            Cli::try_parse_from(["prompt-client", "auth", "login", "alice", "--password", "pw1"])
                .unwrap();
        match cli.command {
            Commands::Auth(auth) => match auth.command {
                AuthCommands::Login(args) => {
                    assert_eq!(args.username, "alice");
                    assert_eq!(args.password.as_deref(), Some("pw1"));
                }
                other => panic!("expected Login, got {other:?}"),
            },
            other => panic!("expected Auth, got {other:?}"),
        }
    }

    #[test]
    fn parse_auth_status() {
        let cli = Cli::try_parse_from(["prompt-client", "auth", "status"]).unwrap();
        match cli.command {
            Commands::Auth(auth) => assert!(matches!(auth.command, AuthCommands::Status)),
            other => panic!("expected Auth, got {other:?}"),
        }
    }

    #[test]
    fn parse_prompts_list_with_limit_and_global_flags() {
        let cli = Cli::try_parse_from([
            "prompt-client",
            "prompts",
            "list",
            "-l",
            "5",
            "--base-url",
            "https://prompts.example.com",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("https://prompts.example.com"));
        match cli.command {
            Commands::Prompts(args) => {
                assert!(matches!(args.command, PromptsCommands::List { limit: Some(5) }))
            }
            other => panic!("expected Prompts, got {other:?}"),
        }
    }

    #[test]
    fn parse_dispatch_message() {
        let cli =
            Cli::try_parse_from(["prompt-client", "dispatch", r#"{"action":"checkAuth"}"#]).unwrap();
        match cli.command {
            Commands::Dispatch(args) => assert!(args.message.contains("checkAuth")),
            other => panic!("expected Dispatch, got {other:?}"),
        }
    }

    #[test]
    fn parse_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["prompt-client"]).is_err());
    }

    #[test]
    fn parse_login_missing_username_is_error() {
        assert!(Cli::try_parse_from(["prompt-client", "auth", "login"]).is_err());
    }
}
