use clap::Subcommand;
use serde_json::Value;

use crate::cli::client::{ApiClient, ApiReply, ClientError};
use crate::cli::utils::output_reply;
use crate::cli::OutputFormat;
use crate::database::models::ResearchPlan;

pub const LOADING_MESSAGE: &str = "Cargando...";
pub const CONNECTION_ERROR: &str = "Error de conexión con el servidor";
pub const LOAD_ERROR: &str = "Error al cargar los planes de investigación";
pub const EMPTY_MESSAGE: &str = "No hay planes de investigación registrados.";
const HEADING: &str = "Planes de Investigación";

#[derive(Subcommand)]
pub enum PlansCommands {
    #[command(about = "List every research plan as a card")]
    List,
}

pub async fn handle(cmd: PlansCommands, client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        PlansCommands::List => list(client, output_format).await,
    }
}

async fn list(client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    if let OutputFormat::Json = output_format {
        let reply = client.get("/api/research-plans").await?;
        return output_reply(&output_format, &reply);
    }

    eprintln!("{}", PlanListView::Loading.render());
    let view = PlanListView::from_result(client.get("/api/research-plans").await);
    println!("{}", view.render());

    match view {
        PlanListView::Error(message) => Err(anyhow::anyhow!(message)),
        _ => Ok(()),
    }
}

/// The states the plan list moves through: loading until the request settles,
/// then an error notice, an empty notice or the cards.
#[derive(Debug, Clone)]
pub enum PlanListView {
    Loading,
    Error(&'static str),
    Empty,
    Plans(Vec<ResearchPlan>),
}

impl PlanListView {
    /// Transport failures and non-2xx answers are connection errors; a 2xx answer
    /// with `success: false` (or rows that don't decode) is a load error.
    pub fn from_result(result: Result<ApiReply, ClientError>) -> Self {
        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                tracing::debug!("fetching plans failed: {}", e);
                return PlanListView::Error(CONNECTION_ERROR);
            }
        };

        if !reply.is_http_success() {
            return PlanListView::Error(CONNECTION_ERROR);
        }
        if !reply.success() {
            return PlanListView::Error(LOAD_ERROR);
        }

        let rows = reply.data().cloned().unwrap_or(Value::Array(Vec::new()));
        match serde_json::from_value::<Vec<ResearchPlan>>(rows) {
            Ok(plans) if plans.is_empty() => PlanListView::Empty,
            Ok(plans) => PlanListView::Plans(plans),
            Err(e) => {
                tracing::debug!("unexpected plan rows: {}", e);
                PlanListView::Error(LOAD_ERROR)
            }
        }
    }

    pub fn render(&self) -> String {
        match self {
            PlanListView::Loading => LOADING_MESSAGE.to_string(),
            PlanListView::Error(message) => format!("✗ {}", message),
            PlanListView::Empty => format!("{}\n\n{}", HEADING, EMPTY_MESSAGE),
            PlanListView::Plans(plans) => {
                let cards: Vec<String> = plans.iter().map(render_card).collect();
                format!("{}\n\n{}", HEADING, cards.join("\n\n"))
            }
        }
    }
}

fn render_card(plan: &ResearchPlan) -> String {
    format!(
        "[{}] {}\n  Descripción: {}\n  Estado: {}\n  Progreso: {}%",
        plan.id,
        plan.title,
        plan.description.as_deref().unwrap_or(""),
        plan.status,
        plan.progress_display()
    )
}
