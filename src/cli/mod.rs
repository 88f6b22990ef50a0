pub mod client;
pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use client::ApiClient;

#[derive(Parser)]
#[command(name = "thesis")]
#[command(about = "Thesis tracker CLI - Command-line client for the research plan API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output raw JSON envelopes")]
    pub json: bool,

    #[arg(long, global = true, help = "API base URL (defaults to $THESIS_API_URL or http://localhost:3000)")]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Research plan views")]
    Plans {
        #[command(subcommand)]
        cmd: commands::plans::PlansCommands,
    },

    #[command(about = "Record operations on any resource")]
    Data {
        #[command(subcommand)]
        cmd: commands::data::DataCommands,
    },

    #[command(about = "Server status")]
    Server {
        #[command(subcommand)]
        cmd: commands::server::ServerCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = ApiClient::new(config::resolve_base_url(cli.url.as_deref()))?;

    match cli.command {
        Commands::Plans { cmd } => commands::plans::handle(cmd, &client, output_format).await,
        Commands::Data { cmd } => commands::data::handle(cmd, &client, output_format).await,
        Commands::Server { cmd } => commands::server::handle(cmd, &client, output_format).await,
    }
}
