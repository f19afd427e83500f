//! Scripted transport for tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use super::client::ApiClient;
use super::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use crate::config::{ClientConfig, API_PREFIX, CONNECTIVITY_TIMEOUT, DEFAULT_SERVER};
use crate::token::make_token;

#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, TransportError>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, outcome: Result<HttpResponse, TransportError>) {
        self.responses.lock().unwrap().push_back(outcome);
    }

    pub fn respond(&self, status: u16, body: Value) {
        self.respond_text(status, &body.to_string());
    }

    pub fn respond_text(&self, status: u16, body: &str) {
        self.push(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn fail_network(&self) {
        self.push(Err(TransportError::Network("connection refused".to_string())));
    }

    pub fn fail_timeout(&self) {
        self.push(Err(TransportError::Timeout));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".to_string())))
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig {
        server: DEFAULT_SERVER.to_string(),
        api_prefix: API_PREFIX.to_string(),
        connectivity_timeout: CONNECTIVITY_TIMEOUT,
    }
}

/// Token valid until 2100.
pub fn valid_token() -> String {
    make_token(&json!({"sub": "1", "exp": 4_102_444_800i64, "role": "customer"}))
}

pub fn expired_token() -> String {
    make_token(&json!({"sub": "1", "exp": 1_000_000_000i64}))
}

/// Client signed in with a long-lived token, wired to a fresh mock.
pub fn test_client() -> (ApiClient, MockTransport) {
    let mock = MockTransport::new();
    let client = ApiClient::new(&test_config(), Arc::new(mock.clone()));
    client.set_token(Some(valid_token()));
    (client, mock)
}
