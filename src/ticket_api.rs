use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientError;
use crate::models::NewTicket;

/// Operations offered by the ticket integration API.
///
/// Every method is one round trip and returns the decoded JSON response
/// untouched.
#[async_trait]
pub trait TicketApi: Send + Sync {
    /// `POST /tickets`
    async fn create_ticket(&self, ticket: &NewTicket) -> Result<Value, ClientError>;

    /// `GET /tickets/{id}`
    async fn get_ticket(&self, ticket_id: &str) -> Result<Value, ClientError>;

    /// `POST /tickets/{id}/comments`
    async fn add_comment(
        &self,
        ticket_id: &str,
        content: &str,
        is_internal: bool,
    ) -> Result<Value, ClientError>;

    /// `PATCH /tickets/{id}/status`. The status is sent as given.
    async fn update_status(&self, ticket_id: &str, status: &str) -> Result<Value, ClientError>;

    /// `GET /`
    async fn health_check(&self) -> Result<Value, ClientError>;
}
