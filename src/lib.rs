//! Client for the ticket integration API.
//!
//! [`IntegrationClient`] wraps a base URL and bearer token and exposes the
//! service's operations through the [`TicketApi`] trait. Every call returns
//! the decoded JSON response, or a [`ClientError`] describing what failed.
//!
//! ```rust,no_run
//! use integration_client::{Config, IntegrationClient, NewTicket, TicketApi};
//!
//! # async fn example() -> Result<(), integration_client::ClientError> {
//! let client = IntegrationClient::new(&Config::new("https://example.com/functions/v1/integration-tickets", "token"))?;
//! let created = client.create_ticket(&NewTicket::new("Printer on fire").priority("high")).await?;
//! println!("{created}");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod demo;
pub mod error;
pub mod models;
pub mod ticket_api;

pub use client::{IntegrationClient, parse_response};
pub use config::Config;
pub use error::{ClientError, ConfigError};
pub use models::{NewTicket, TicketStatus};
pub use ticket_api::TicketApi;
