use clap::Subcommand;

use crate::cli::client::ApiClient;
use crate::cli::utils::{output_reply, read_stdin_json};
use crate::cli::OutputFormat;
use crate::resources;

#[derive(Subcommand)]
pub enum DataCommands {
    #[command(about = "List every record of a resource")]
    List {
        #[arg(help = "Resource name (users, research-plans, sections, ...)")]
        resource: String,
    },

    #[command(about = "Fetch one record by id")]
    Get {
        #[arg(help = "Resource name")]
        resource: String,
        #[arg(help = "Record ID")]
        id: i64,
    },

    #[command(about = "List the records that belong to a research plan")]
    ByPlan {
        #[arg(help = "Resource name")]
        resource: String,
        #[arg(help = "Research plan ID")]
        plan_id: i64,
    },

    #[command(about = "Create a record from a JSON object on stdin")]
    Create {
        #[arg(help = "Resource name")]
        resource: String,
    },

    #[command(about = "Replace a record with a JSON object on stdin")]
    Update {
        #[arg(help = "Resource name")]
        resource: String,
        #[arg(help = "Record ID to update")]
        id: i64,
    },

    #[command(about = "Delete a record")]
    Delete {
        #[arg(help = "Resource name")]
        resource: String,
        #[arg(help = "Record ID to delete")]
        id: i64,
    },
}

pub async fn handle(cmd: DataCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let reply = match cmd {
        DataCommands::List { resource } => {
            let path = collection_path(&resource)?;
            client.get(&path).await?
        }
        DataCommands::Get { resource, id } => {
            let path = collection_path(&resource)?;
            client.get(&format!("{}/{}", path, id)).await?
        }
        DataCommands::ByPlan { resource, plan_id } => {
            let spec = resolve(&resource)?;
            if !spec.plan_scoped {
                return Err(anyhow::anyhow!("'{}' records are not grouped by research plan", resource));
            }
            client.get(&format!("/api/{}/plan/{}", spec.path, plan_id)).await?
        }
        DataCommands::Create { resource } => {
            let path = collection_path(&resource)?;
            let body = read_stdin_json()?;
            client.post(&path, &body).await?
        }
        DataCommands::Update { resource, id } => {
            let path = collection_path(&resource)?;
            let body = read_stdin_json()?;
            client.put(&format!("{}/{}", path, id), &body).await?
        }
        DataCommands::Delete { resource, id } => {
            let path = collection_path(&resource)?;
            client.delete(&format!("{}/{}", path, id)).await?
        }
    };

    output_reply(&output_format, &reply)
}

fn resolve(resource: &str) -> anyhow::Result<&'static resources::ResourceSpec> {
    resources::find(resource).ok_or_else(|| {
        let known: Vec<&str> = resources::ALL.iter().map(|spec| spec.path).collect();
        anyhow::anyhow!("unknown resource '{}' (expected one of: {})", resource, known.join(", "))
    })
}

fn collection_path(resource: &str) -> anyhow::Result<String> {
    Ok(format!("/api/{}", resolve(resource)?.path))
}
