use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::models::ApiErrorBody;

/// Errors raised while resolving the client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required settings were not provided anywhere.
    #[error("missing required configuration: please set {}", .vars.join(" and "))]
    Missing { vars: Vec<&'static str> },

    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors returned by the integration API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The bearer token cannot be used as an HTTP header value.
    #[error("token is not a valid header value")]
    InvalidToken(#[source] reqwest::header::InvalidHeaderValue),

    #[error("failed to build HTTP client")]
    Builder(#[source] reqwest::Error),

    /// The request never produced a response (connect, TLS, I/O ...).
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a 4xx or 5xx status.
    #[error("{status} from {url}")]
    Http {
        status: StatusCode,
        url: String,
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("failed to decode response: {message}")]
    Decode { message: String, body: String },

    #[error("failed to encode request body")]
    Encode(#[source] serde_json::Error),

    /// Ticket creation succeeded but its response carried no ticket id.
    #[error("could not extract ticket id from response")]
    MissingTicketId,
}

impl ClientError {
    /// HTTP status of the failed response, if the error came from one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response text for HTTP and decode failures.
    pub fn body(&self) -> Option<&str> {
        match self {
            ClientError::Http { body, .. } | ClientError::Decode { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The service's structured error document, when the body holds one.
    pub fn api_error(&self) -> Option<ApiErrorBody> {
        match self {
            ClientError::Http { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_lists_every_variable() {
        let error = ConfigError::Missing {
            vars: vec!["INTEGRATION_TOKEN", "INTEGRATION_URL"],
        };
        assert_eq!(
            error.to_string(),
            "missing required configuration: please set INTEGRATION_TOKEN and INTEGRATION_URL"
        );
    }

    #[test]
    fn http_error_exposes_status_and_body() {
        let error = ClientError::Http {
            status: StatusCode::NOT_FOUND,
            url: "https://api.example.com/tickets/T9".to_string(),
            body: r#"{"error":"not_found"}"#.to_string(),
        };

        assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(error.body(), Some(r#"{"error":"not_found"}"#));
        assert_eq!(error.api_error().unwrap().error, "not_found");
        assert_eq!(
            error.to_string(),
            "404 Not Found from https://api.example.com/tickets/T9"
        );
    }

    #[test]
    fn api_error_ignores_non_json_bodies() {
        let error = ClientError::Http {
            status: StatusCode::BAD_GATEWAY,
            url: "https://api.example.com/".to_string(),
            body: "<html>bad gateway</html>".to_string(),
        };
        assert!(error.api_error().is_none());
        assert!(ClientError::MissingTicketId.status().is_none());
    }
}
