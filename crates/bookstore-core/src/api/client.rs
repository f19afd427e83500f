//! API Client
//!
//! Builds requests against `<server>/api`, attaches the bearer token and
//! turns every kind of failure into an `ApiError`.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::Utc;
use log::{debug, warn};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

use super::envelope::{check_envelope, error_code, error_message};
use super::error::{ApiError, ApiResult, ErrorCode};
use super::transport::{HttpRequest, Method, ReqwestTransport, Transport, TransportError};
use crate::config::ClientConfig;
use crate::token;

/// RFC 3986 unreserved characters stay as they are.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Whether a call needs the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auth {
    /// Fail with `NO_TOKEN` / `TOKEN_EXPIRED` without touching the network.
    Required,
    /// Send the token when a valid one is held.
    Optional,
    None,
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    base_url: Arc<RwLock<String>>,
    token: Arc<RwLock<Option<String>>>,
    connectivity_timeout: Duration,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url())
            .field("has_token", &self.token().is_some())
            .finish()
    }
}

pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, QUERY).to_string()
}

fn encode_query(query: &[(&str, String)]) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{}={}", encode_segment(k), encode_segment(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn join_url(base: &str, path: &str, query: &[(&str, String)]) -> String {
    let mut url = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    if !query.is_empty() {
        url.push('?');
        url.push_str(&encode_query(query));
    }
    url
}

impl ApiClient {
    pub fn new(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: Arc::new(RwLock::new(config.api_base())),
            token: Arc::new(RwLock::new(None)),
            connectivity_timeout: config.connectivity_timeout,
        }
    }

    pub fn with_reqwest(config: &ClientConfig) -> Self {
        Self::new(config, Arc::new(ReqwestTransport::new()))
    }

    pub fn base_url(&self) -> String {
        match self.base_url.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Point the client at another server (settings page override).
    pub fn set_base_url(&self, config: &ClientConfig) {
        let next = config.api_base();
        debug!("API base set to {}", next);
        match self.base_url.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    pub fn token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_token(&self, token: Option<String>) {
        let token = token.filter(|t| !t.trim().is_empty());
        match self.token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    /// Bound for the settings page's reachability check.
    pub fn connectivity_timeout(&self) -> Duration {
        self.connectivity_timeout
    }

    fn bearer(&self, auth: Auth) -> ApiResult<Option<String>> {
        let held = self.token();
        let now = Utc::now();
        match (auth, held) {
            (Auth::None, _) => Ok(None),
            (Auth::Required, None) => Err(ApiError::no_token()),
            (Auth::Required, Some(t)) if token::is_expired(&t, now) => Err(ApiError::token_expired()),
            (Auth::Optional, Some(t)) if token::is_expired(&t, now) => Ok(None),
            (_, held) => Ok(held),
        }
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
        auth: Auth,
        timeout: Option<Duration>,
    ) -> ApiResult<Value> {
        let bearer = self.bearer(auth).map_err(|e| {
            warn!("{} {} not sent: {}", method, path, e.code);
            e
        })?;

        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = bearer {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        let url = join_url(&self.base_url(), path, query);
        debug!("{} {}", method, url);

        let request = HttpRequest {
            method,
            url,
            headers,
            body,
            timeout,
        };

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(TransportError::Timeout) => {
                warn!("{} {} timed out", method, path);
                return Err(ApiError::new(ErrorCode::Timeout, "The server took too long to respond"));
            }
            Err(TransportError::Network(e)) => {
                warn!("{} {} failed: {}", method, path, e);
                return Err(ApiError::new(
                    ErrorCode::NetworkError,
                    "Could not reach the server. Check your connection and server address",
                ));
            }
        };

        let parsed: Result<Value, serde_json::Error> = if response.body.trim().is_empty() {
            Ok(Value::Null)
        } else {
            serde_json::from_str(&response.body)
        };

        if !response.is_success() {
            let body = parsed.unwrap_or_else(|_| Value::String(response.body.clone()));
            let code = error_code(&body).unwrap_or_else(|| ErrorCode::from_status(response.status));
            let message = error_message(&body)
                .unwrap_or_else(|| format!("Request failed with status {}", response.status));
            warn!("{} {} -> {} {}", method, path, response.status, code);
            return Err(ApiError::new(code, message).with_status(response.status));
        }

        let body = parsed.map_err(|e| {
            warn!("{} {} returned invalid JSON: {}", method, path, e);
            ApiError::parse(e).with_status(response.status)
        })?;
        check_envelope(&body).map_err(|e| {
            warn!("{} {} reported failure: {}", method, path, e.message);
            e.with_status(response.status)
        })?;
        Ok(body)
    }

    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Value> {
        self.execute(Method::Get, path, query, None, Auth::Required, None).await
    }

    /// GET that works signed out and still sends a valid token if held.
    pub async fn get_public(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Value> {
        self.execute(Method::Get, path, query, None, Auth::Optional, None).await
    }

    /// Unauthenticated GET bounded by `timeout` where the transport supports it.
    pub async fn probe(&self, path: &str, timeout: Duration) -> ApiResult<Value> {
        self.execute(Method::Get, path, &[], None, Auth::None, Some(timeout)).await
    }

    pub async fn post(&self, path: &str, body: Value) -> ApiResult<Value> {
        self.execute(Method::Post, path, &[], Some(body), Auth::Required, None).await
    }

    /// POST without a token (login, register, password reset).
    pub async fn post_public(&self, path: &str, body: Value) -> ApiResult<Value> {
        self.execute(Method::Post, path, &[], Some(body), Auth::None, None).await
    }

    pub async fn put(&self, path: &str, body: Value) -> ApiResult<Value> {
        self.execute(Method::Put, path, &[], Some(body), Auth::Required, None).await
    }

    pub async fn patch(&self, path: &str, body: Value) -> ApiResult<Value> {
        self.execute(Method::Patch, path, &[], Some(body), Auth::Required, None).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<Value> {
        self.execute(Method::Delete, path, &[], None, Auth::Required, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{expired_token, test_client, test_config, MockTransport};
    use serde_json::json;

    #[test]
    fn test_join_url_and_query() {
        let url = join_url(
            "http://localhost:8000/api/",
            "/books",
            &[("search", "war & peace".to_string()), ("page", "2".to_string())],
        );
        assert_eq!(url, "http://localhost:8000/api/books?search=war%20%26%20peace&page=2");
        assert_eq!(encode_segment("a/b"), "a%2Fb");
    }

    #[tokio::test]
    async fn test_bearer_header_attached() {
        let (client, mock) = test_client();
        mock.respond(200, json!({"ok": true}));
        client.get("/auth/me", &[]).await.unwrap();

        let sent = mock.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Get);
        assert_eq!(sent[0].url, "http://localhost:8000/api/auth/me");
        assert!(sent[0].header("authorization").unwrap().starts_with("Bearer "));
        assert!(sent[0].header("content-type").is_none());
    }

    #[tokio::test]
    async fn test_missing_token_fails_without_request() {
        let mock = MockTransport::new();
        let client = ApiClient::new(&test_config(), Arc::new(mock.clone()));
        let err = client.get("/orders/my", &[]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NoToken);
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_expired_token_fails_without_request() {
        let (client, mock) = test_client();
        client.set_token(Some(expired_token()));
        let err = client.post("/orders", json!({})).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenExpired);
        assert!(mock.requests().is_empty());

        // Optional auth drops the stale token instead of failing
        mock.respond(200, json!([]));
        client.get_public("/ads/active", &[]).await.unwrap();
        assert!(mock.requests()[0].header("authorization").is_none());
    }

    #[tokio::test]
    async fn test_http_errors_are_normalized() {
        let (client, mock) = test_client();
        mock.respond(404, json!({"message": "Book not found"}));
        let err = client.get("/books/9", &[]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Book not found");
        assert_eq!(err.status, Some(404));

        mock.respond(409, json!({"error": "Already borrowed", "error_code": "VALIDATION"}));
        let err = client.post("/borrows", json!({})).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);

        mock.respond_text(502, "<html>Bad gateway</html>");
        let err = client.get("/books", &[]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ServerError);

        mock.respond_text(418, "");
        let err = client.get("/books", &[]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FetchFailed);
        assert_eq!(err.message, "Request failed with status 418");
    }

    #[tokio::test]
    async fn test_transport_and_parse_failures() {
        let (client, mock) = test_client();
        mock.fail_network();
        assert_eq!(client.get("/books", &[]).await.unwrap_err().code, ErrorCode::NetworkError);

        mock.fail_timeout();
        assert_eq!(client.get("/books", &[]).await.unwrap_err().code, ErrorCode::Timeout);

        mock.respond_text(200, "not json");
        assert_eq!(client.get("/books", &[]).await.unwrap_err().code, ErrorCode::ParseError);

        mock.respond_text(204, "");
        assert_eq!(client.delete("/books/1").await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_success_false_envelope() {
        let (client, mock) = test_client();
        mock.respond(200, json!({"success": false, "message": "Out of stock"}));
        let err = client.post("/orders", json!({"items": []})).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FetchFailed);
        assert_eq!(err.message, "Out of stock");
        assert_eq!(err.status, Some(200));
    }

    #[tokio::test]
    async fn test_base_url_override() {
        let (client, mock) = test_client();
        let config = test_config().with_override(Some("10.0.0.7:9000"));
        client.set_base_url(&config);
        mock.respond(200, json!({"status": "ok"}));
        client.probe("/health", Duration::from_secs(5)).await.unwrap();
        let sent = mock.requests();
        assert_eq!(sent[0].url, "http://10.0.0.7:9000/api/health");
        assert_eq!(sent[0].timeout, Some(Duration::from_secs(5)));
        assert!(sent[0].header("authorization").is_none());
    }
}
