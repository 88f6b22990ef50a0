use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_thesis-tracker"));
        cmd.env("HOST", "127.0.0.1")
            .env("PORT", port.to_string())
            .env("DATABASE_AUTO_MIGRATE", "true")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // DATABASE_URL is inherited from the test environment
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become healthy on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// The shared server for end-to-end tests, or None when no database is configured.
pub async fn ensure_server() -> Result<Option<&'static TestServer>> {
    if std::env::var("DATABASE_URL").map(|v| v.is_empty()).unwrap_or(true) {
        eprintln!("DATABASE_URL is not set; skipping end-to-end test");
        return Ok(None);
    }

    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(20)).await?;
    Ok(Some(server))
}

/// Addresses that can't collide across runs
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@test.local", prefix, uuid::Uuid::new_v4())
}

pub fn created_id(body: &Value) -> Result<i64> {
    body.get("data")
        .and_then(|d| d.get("id"))
        .and_then(Value::as_i64)
        .with_context(|| format!("create response carries no id: {}", body))
}
