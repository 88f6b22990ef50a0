use clap::Subcommand;

use crate::cli::client::ApiClient;
use crate::cli::utils::{output_error, output_reply};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Check server and database health from the /health endpoint")]
    Health,

    #[command(about = "Show server information from the API root endpoint")]
    Info,
}

pub async fn handle(cmd: ServerCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let path = match cmd {
        ServerCommands::Health => "/health",
        ServerCommands::Info => "/",
    };

    match client.get(path).await {
        Ok(reply) => output_reply(&output_format, &reply),
        Err(e) => {
            output_error(&output_format, &format!("{} is unreachable", client.base_url()))?;
            Err(e.into())
        }
    }
}
