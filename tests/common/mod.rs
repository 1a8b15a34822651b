//! In-process stand-in for the ticket integration service.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::IntoResponse,
};
use serde_json::{Value, json};

/// One request as the mock server saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

type Responder = dyn Fn(&Recorded) -> (StatusCode, String) + Send + Sync;

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    responder: Arc<Responder>,
}

pub struct MockServer {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockServer {
    /// Starts a server on an ephemeral port that answers every request with
    /// `responder`.
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&Recorded) -> (StatusCode, String) + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            requests: requests.clone(),
            responder: Arc::new(responder),
        };

        let app = Router::new().fallback(handle).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, requests }
    }

    /// A server that plays the happy path of the ticket service for ticket `T1`.
    pub async fn ticket_service() -> Self {
        Self::start(|req| {
            let body = match (req.method.as_str(), req.path.as_str()) {
                ("POST", "/tickets") => json!({"ticket": {"id": "T1", "request": req.json()}}),
                ("GET", "/tickets/T1") => json!({"ticket": {"id": "T1", "status": "open"}}),
                ("POST", "/tickets/T1/comments") => json!({"comment_id": "C1", "echo": req.json()}),
                ("PATCH", "/tickets/T1/status") => json!({"success": true, "echo": req.json()}),
                ("GET", "/") => json!({
                    "status": "ok",
                    "endpoints": [
                        "POST /tickets",
                        "GET /tickets/:id",
                        "POST /tickets/:id/comments",
                        "PATCH /tickets/:id/status"
                    ]
                }),
                _ => return (StatusCode::NOT_FOUND, json!({"error": "not_found"}).to_string()),
            };
            (StatusCode::OK, body.to_string())
        })
        .await
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let recorded = Recorded {
        method,
        path: uri.path().to_string(),
        headers,
        body,
    };
    let (status, body) = (state.responder)(&recorded);
    state.requests.lock().unwrap().push(recorded);
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}
