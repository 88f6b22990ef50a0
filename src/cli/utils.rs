use std::io::Read;

use serde_json::{json, Value};

use crate::cli::client::ApiReply;
use crate::cli::OutputFormat;

/// Print an API reply in the appropriate format. A failure envelope turns into an
/// error so the process exits non-zero.
pub fn output_reply(output_format: &OutputFormat, reply: &ApiReply) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reply.body)?);
        }
        OutputFormat::Text => {
            if reply.success() {
                if let Some(message) = reply.message() {
                    println!("✓ {}", message);
                }
                if let Some(data) = reply.data() {
                    println!("{}", render_data(data)?);
                }
            }
        }
    }

    if reply.success() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "{} (HTTP {})",
            reply.error().unwrap_or("request failed"),
            reply.status
        ))
    }
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "success": false,
                    "error": message
                }))?
            );
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Rows print one JSON object per line; anything else pretty-printed.
pub fn render_data(data: &Value) -> anyhow::Result<String> {
    match data {
        Value::Array(rows) => {
            let lines = rows
                .iter()
                .map(serde_json::to_string)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(lines.join("\n"))
        }
        other => Ok(serde_json::to_string_pretty(other)?),
    }
}

/// Read a JSON object body from stdin
pub fn read_stdin_json() -> anyhow::Result<Value> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    parse_body(&input)
}

pub fn parse_body(input: &str) -> anyhow::Result<Value> {
    let value: Value = serde_json::from_str(input.trim())
        .map_err(|e| anyhow::anyhow!("stdin is not valid JSON: {}", e))?;
    if !value.is_object() {
        return Err(anyhow::anyhow!("stdin must contain a JSON object"));
    }
    Ok(value)
}
