use std::io::Write;

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;

use crate::client::parse_response;
use crate::error::ClientError;
use crate::models::{CreateTicketResponse, HealthStatus, NewTicket, TicketStatus};
use crate::ticket_api::TicketApi;

/// What the demo run sends.
#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub ticket: NewTicket,
    pub comment: String,
    pub status: String,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            ticket: NewTicket::new("Rust Integration Test Ticket")
                .description("This ticket was created via the Rust integration client")
                .priority("high")
                .category("Integration")
                .with_metadata("source", "rust-client")
                .with_metadata("version", env!("CARGO_PKG_VERSION"))
                .with_metadata("run_id", Uuid::new_v4().to_string()),
            comment: "Hello from Rust! This comment was added via the integration API."
                .to_string(),
            status: TicketStatus::InProgress.to_string(),
        }
    }
}

/// Runs create → get → comment → update status, printing each response.
///
/// Stops at the first failure. Returns the id of the created ticket.
pub async fn run<W: Write>(
    api: &dyn TicketApi,
    out: &mut W,
    options: &DemoOptions,
) -> Result<String> {
    writeln!(out, "=== Creating ticket ===")?;
    let created = api.create_ticket(&options.ticket).await?;
    print_json(out, &created)?;

    let ticket_id = extract_ticket_id(created)?;
    info!(%ticket_id, "ticket created");

    writeln!(out, "\n=== Getting ticket {} ===", ticket_id)?;
    let ticket = api.get_ticket(&ticket_id).await?;
    print_json(out, &ticket)?;

    writeln!(out, "\n=== Adding comment to ticket {} ===", ticket_id)?;
    let comment = api.add_comment(&ticket_id, &options.comment, false).await?;
    print_json(out, &comment)?;

    writeln!(out, "\n=== Updating status of ticket {} ===", ticket_id)?;
    let status = api.update_status(&ticket_id, &options.status).await?;
    print_json(out, &status)?;

    writeln!(out, "\n=== Integration demo completed successfully ===")?;
    Ok(ticket_id)
}

fn extract_ticket_id(created: Value) -> Result<String, ClientError> {
    serde_json::from_value::<CreateTicketResponse>(created)
        .ok()
        .and_then(|response| response.ticket_id().map(str::to_string))
        .ok_or(ClientError::MissingTicketId)
}

fn print_json<W: Write>(out: &mut W, value: &Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render response")?;
    writeln!(out, "{}", rendered)?;
    Ok(())
}

/// Quick connectivity probe used by `--health`.
pub async fn health<W: Write>(api: &dyn TicketApi, out: &mut W) -> Result<()> {
    writeln!(out, "=== Health check ===")?;
    let health = api.health_check().await?;
    print_json(out, &health)?;

    // Any 2xx JSON counts as reachable; the typed view only feeds the log line.
    if let Ok(health) = parse_response::<HealthStatus>(health) {
        info!(status = %health.status, endpoints = health.endpoints.len(), "service reachable");
    }
    Ok(())
}
