//! CLI prompt and dispatch handlers.

use std::io::Read;

use crate::client::PromptClient;
use crate::types::ResourceId;

/// Handle `prompt-client prompts list`.
pub async fn handle_list(
    client: &PromptClient,
    limit: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let prompts = client.prompts().list(limit).await?;
    if prompts.is_empty() {
        println!("No prompts found");
        return Ok(());
    }
    for prompt in prompts {
        if prompt.description.is_empty() {
            println!("{:>6}  {}", prompt.id.to_string(), prompt.title);
        } else {
            println!("{:>6}  {} ({})", prompt.id.to_string(), prompt.title, prompt.description);
        }
    }
    Ok(())
}

/// Handle `prompt-client prompts show <id>`.
pub async fn handle_show(client: &PromptClient, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let prompt = client.prompts().get(&ResourceId::from(id)).await?;
    println!("# {}", prompt.title);
    if !prompt.description.is_empty() {
        println!("{}", prompt.description);
    }
    println!();
    println!("{}", prompt.content);
    Ok(())
}

/// Handle `prompt-client dispatch <json|->`.
pub async fn handle_dispatch(
    client: &PromptClient,
    message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = if message == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        message.to_string()
    };
    let message: serde_json::Value = serde_json::from_str(&raw)?;
    let reply = client.dispatcher().dispatch_value(message).await;
    println!("{}", serde_json::to_string_pretty(&reply)?);
    Ok(())
}
