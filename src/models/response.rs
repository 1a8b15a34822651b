use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A ticket as returned by the service. Only `id` is guaranteed.
#[derive(Debug, Clone, Deserialize)]
pub struct Ticket {
    #[serde(deserialize_with = "id_to_string")]
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub metadata: Option<Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Response of `POST /tickets`.
///
/// Normally `{"ticket": {...}}`; the service falls back to `{"id": ...}` when
/// it cannot read the freshly created row back.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTicketResponse {
    pub ticket: Option<TicketRef>,
    #[serde(default, deserialize_with = "opt_id_to_string")]
    pub id: Option<String>,
}

/// Just enough of a ticket to chain follow-up calls.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketRef {
    #[serde(default, deserialize_with = "opt_id_to_string")]
    pub id: Option<String>,
}

impl CreateTicketResponse {
    pub fn ticket_id(&self) -> Option<&str> {
        self.ticket
            .as_ref()
            .and_then(|ticket| ticket.id.as_deref())
            .or(self.id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// Response of `GET /tickets/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketEnvelope {
    pub ticket: Ticket,
}

/// Response of `POST /tickets/{id}/comments`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentCreated {
    #[serde(deserialize_with = "id_to_string")]
    pub comment_id: String,
}

/// Response of `PATCH /tickets/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdate {
    pub success: bool,
    pub ticket: Option<Value>,
}

/// Response of `GET /`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub endpoints: Vec<String>,
}

/// Error document the service sends with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub details: Option<String>,
    pub message: Option<String>,
}

/// Ids arrive as strings from some deployments and as numbers from others.
fn id_to_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

fn opt_id_to_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}
