use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::ClientError;
use crate::models::NewTicket;
use crate::models::request::{NewComment, StatusChange};
use crate::ticket_api::TicketApi;

/// Authenticated client for the ticket integration API.
///
/// Holds one pooled `reqwest::Client` carrying the bearer token and JSON
/// content type as default headers. Calls are independent of each other.
#[derive(Debug, Clone)]
pub struct IntegrationClient {
    http: Client,
    base_url: String,
}

impl IntegrationClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token()))
            .map_err(ClientError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ClientError::Builder)?;

        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for `path`, which must start with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends one request and decodes the JSON reply.
    ///
    /// 4xx/5xx responses become [`ClientError::Http`] with the raw body;
    /// anything that is not valid JSON becomes [`ClientError::Decode`].
    #[tracing::instrument(skip(self, body))]
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, ClientError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.url(path);
        debug!("Integration Request URL: {}", url);

        let mut builder = self.http.request(method, &url);
        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(ClientError::Encode)?;
            debug!("Integration Request: {}", String::from_utf8_lossy(&payload));
            builder = builder.body(payload);
        }

        let response = builder.send().await.map_err(|source| {
            debug!(%source, "request to {} failed", url);
            ClientError::Transport {
                url: url.clone(),
                source,
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        if status.is_client_error() || status.is_server_error() {
            debug!(%status, "error status from integration API: {}", text);
            return Err(ClientError::Http {
                status,
                url,
                body: text,
            });
        }

        info!(%status, "Integration Response from {}", url);
        decode_body(&text)
    }

    async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.request::<()>(Method::GET, path, None).await
    }
}

#[async_trait]
impl TicketApi for IntegrationClient {
    async fn create_ticket(&self, ticket: &NewTicket) -> Result<Value, ClientError> {
        self.request(Method::POST, "/tickets", Some(ticket)).await
    }

    async fn get_ticket(&self, ticket_id: &str) -> Result<Value, ClientError> {
        self.get(&format!("/tickets/{}", ticket_id)).await
    }

    async fn add_comment(
        &self,
        ticket_id: &str,
        content: &str,
        is_internal: bool,
    ) -> Result<Value, ClientError> {
        let payload = NewComment {
            content,
            is_internal,
        };
        self.request(
            Method::POST,
            &format!("/tickets/{}/comments", ticket_id),
            Some(&payload),
        )
        .await
    }

    async fn update_status(&self, ticket_id: &str, status: &str) -> Result<Value, ClientError> {
        let payload = StatusChange { status };
        self.request(
            Method::PATCH,
            &format!("/tickets/{}/status", ticket_id),
            Some(&payload),
        )
        .await
    }

    async fn health_check(&self) -> Result<Value, ClientError> {
        self.get("/").await
    }
}

fn decode_body(text: &str) -> Result<Value, ClientError> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    let value = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| decode_error(e.to_string(), text))?;
    deserializer
        .end()
        .map_err(|e| decode_error(e.to_string(), text))?;
    Ok(value)
}

fn decode_error(message: String, body: &str) -> ClientError {
    debug!("Failed to parse integration response: {}", message);
    ClientError::Decode {
        message,
        body: body.to_string(),
    }
}

/// Decodes a response returned by [`TicketApi`] into one of the typed views
/// in [`crate::models`], naming the JSON path of any mismatch.
pub fn parse_response<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    let body = value.to_string();
    serde_path_to_error::deserialize(value).map_err(|e| decode_error(e.to_string(), &body))
}
