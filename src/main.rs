use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use integration_client::cli::Cli;
use integration_client::config::{TOKEN_VAR, URL_VAR};
use integration_client::demo::{self, DemoOptions};
use integration_client::{ClientError, ConfigError, IntegrationClient};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // a) Logging, kept off stdout so it only carries responses
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    // b) CLI + configuration
    let cli = Cli::parse();
    let config = match cli.sources().resolve() {
        Ok(config) => config,
        Err(error @ ConfigError::Missing { .. }) => {
            eprintln!("Error: Please set {TOKEN_VAR} and {URL_VAR} environment variables");
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
        Err(error) => {
            eprintln!("Error: {:#}", anyhow::Error::from(error));
            return ExitCode::FAILURE;
        }
    };
    info!(base_url = config.base_url(), "using integration endpoint");

    // c) Client
    let client = match IntegrationClient::new(&config) {
        Ok(client) => client,
        Err(error) => {
            eprintln!("Error: {error}");
            return ExitCode::FAILURE;
        }
    };

    // d) Run
    let mut stdout = io::stdout().lock();
    let outcome = if cli.health {
        demo::health(&client, &mut stdout).await
    } else {
        demo::run(&client, &mut stdout, &DemoOptions::default())
            .await
            .map(|_| ())
    }
    .and_then(|()| stdout.flush().context("failed to flush stdout"));

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report(&error);
            ExitCode::FAILURE
        }
    }
}

fn report(error: &anyhow::Error) {
    error!(%error, "integration demo failed");
    match error.downcast_ref::<ClientError>() {
        Some(client_error @ ClientError::Http { body, .. }) => {
            eprintln!("HTTP Error: {client_error}");
            if let Some(api_error) = client_error.api_error() {
                let detail = api_error.details.or(api_error.message).unwrap_or_default();
                eprintln!("Service error: {} {}", api_error.error, detail);
            }
            eprintln!("Response: {body}");
        }
        Some(ClientError::MissingTicketId) => {
            eprintln!("Error: Could not extract ticket ID from response");
        }
        _ => eprintln!("Error: {error:#}"),
    }
}
