//! Health check command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::output::{self, CommandResult, OutputFormat};

/// Arguments for the health command.
#[derive(Args, Debug)]
pub struct HealthArgs {
    /// Show the full response body
    #[arg(short, long)]
    pub detailed: bool,

    /// Timeout in seconds
    #[arg(short, long, default_value = "5")]
    pub timeout: u64,

    /// Check specific endpoint (health, ready, live)
    #[arg(long, default_value = "health")]
    pub endpoint: String,
}

/// Health check response for output.
#[derive(Debug, Serialize)]
pub struct HealthOutput {
    pub status: String,
    pub endpoint: String,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Execute the health command.
pub async fn execute(args: HealthArgs, base_url: &str, json: bool) -> Result<()> {
    let format = OutputFormat::from_json_flag(json);

    let endpoint_path = match args.endpoint.as_str() {
        "health" => "/health",
        "ready" | "readiness" => "/ready",
        "live" | "liveness" => "/live",
        other => {
            let result: CommandResult<HealthOutput> =
                CommandResult::failure(format!("Unknown endpoint: {}", other));
            result.print(format)?;
            return Ok(());
        }
    };

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(args.timeout))
        .build()?;
    let url = format!("{}{}", base_url.trim_end_matches('/'), endpoint_path);

    if !json {
        let spinner = output::spinner(&format!("Checking {} endpoint...", args.endpoint));

        let start = std::time::Instant::now();
        let response = client.get(&url).send().await;
        let elapsed = start.elapsed();

        spinner.finish_and_clear();

        match response {
            Ok(resp) => {
                let status = resp.status();
                let body_text = resp.text().await.unwrap_or_default();
                // /health answers JSON; /ready and /live answer plain text.
                let body: serde_json::Value =
                    serde_json::from_str(&body_text).unwrap_or_default();

                if status.is_success() {
                    output::success("Gateway is healthy");
                    output::key_value("Endpoint", &args.endpoint);
                    output::key_value("Response Time", &format!("{}ms", elapsed.as_millis()));

                    if let Some(status_val) = body.get("status").and_then(|v| v.as_str()) {
                        output::key_value("Status", status_val);
                    }
                    if let Some(version) = body.get("version").and_then(|v| v.as_str()) {
                        output::key_value("Version", version);
                    }
                    if body.is_null() && !body_text.trim().is_empty() {
                        output::key_value("Response", body_text.trim());
                    }

                    if args.detailed && !body.is_null() {
                        output::section("Details");
                        println!("{}", serde_json::to_string_pretty(&body)?);
                    }
                } else {
                    output::error(&format!("Health check failed with status {}", status));
                    if !body_text.trim().is_empty() {
                        output::key_value("Reason", body_text.trim());
                    }
                }
            }
            Err(e) => {
                output::error(&format!("Failed to connect: {}", e));
            }
        }
    } else {
        let start = std::time::Instant::now();
        let response = client.get(&url).send().await;
        let elapsed = start.elapsed();

        match response {
            Ok(resp) => {
                let status = resp.status();
                let body_text = resp.text().await.unwrap_or_default();
                let body: serde_json::Value =
                    serde_json::from_str(&body_text).unwrap_or_default();

                let health_output = HealthOutput {
                    status: if status.is_success() {
                        "healthy".to_string()
                    } else {
                        "unhealthy".to_string()
                    },
                    endpoint: args.endpoint.clone(),
                    response_time_ms: elapsed.as_millis() as u64,
                    version: body
                        .get("version")
                        .and_then(|v| v.as_str())
                        .map(String::from),
                    body: args.detailed.then(|| body_text.trim().to_string()),
                };

                let result = CommandResult::success(health_output);
                result.print(format)?;
            }
            Err(e) => {
                let result: CommandResult<HealthOutput> =
                    CommandResult::failure(format!("Connection failed: {}", e));
                result.print(format)?;
            }
        }
    }

    Ok(())
}
