//! prompt-client CLI binary entry point.

use prompt_client::cli::{AuthCommands, Cli, Commands, PromptsCommands};
use prompt_client::client::PromptClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let client = PromptClient::new(cli.config()?)?;
    match cli.command {
        Commands::Auth(auth_args) => match auth_args.command {
            AuthCommands::Login(args) => {
                prompt_client::cli::auth::handle_login(&client, &args.username, args.password).await
            }
            AuthCommands::Status => prompt_client::cli::auth::handle_status(&client).await,
            AuthCommands::Logout => prompt_client::cli::auth::handle_logout(&client).await,
        },
        Commands::Prompts(prompt_args) => match prompt_args.command {
            PromptsCommands::List { limit } => {
                prompt_client::cli::prompts::handle_list(&client, limit).await
            }
            PromptsCommands::Show { id } => {
                prompt_client::cli::prompts::handle_show(&client, &id).await
            }
        },
        Commands::Dispatch(args) => {
            prompt_client::cli::prompts::handle_dispatch(&client, &args.message).await
        }
    }
}
