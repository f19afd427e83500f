//! Client Configuration
//!
//! Compiled defaults, optionally overridden by the server address the user
//! saved on the settings page.

use std::time::Duration;

/// Server used when neither the build nor the user names one.
pub const DEFAULT_SERVER: &str = "http://localhost:8000";
pub const API_PREFIX: &str = "/api";
pub const CONNECTIVITY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Scheme, host and port, no trailing slash
    pub server: String,
    pub api_prefix: String,
    pub connectivity_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let server = option_env!("BOOKSTORE_API_URL")
            .and_then(normalize_server)
            .unwrap_or_else(|| DEFAULT_SERVER.to_string());
        Self {
            server,
            api_prefix: API_PREFIX.to_string(),
            connectivity_timeout: CONNECTIVITY_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Apply a saved server override. Invalid overrides are ignored.
    pub fn with_override(mut self, server_override: Option<&str>) -> Self {
        if let Some(server) = server_override.and_then(normalize_server) {
            self.server = server;
        }
        self
    }

    pub fn api_base(&self) -> String {
        api_base(&self.server, &self.api_prefix)
    }
}

pub fn api_base(server: &str, prefix: &str) -> String {
    format!("{}{}", server.trim_end_matches('/'), prefix)
}

/// Turn what a user types into the settings field into a server origin:
/// `192.168.1.5:8000` becomes `http://192.168.1.5:8000`, trailing slashes
/// and a trailing `/api` are dropped. Returns `None` when there is no host
/// or the input contains whitespace.
pub fn normalize_server(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return None;
    }

    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let mut server = with_scheme.trim_end_matches('/').to_string();
    if let Some(stripped) = server.strip_suffix(API_PREFIX) {
        server = stripped.trim_end_matches('/').to_string();
    }

    let host = server.split("://").nth(1).unwrap_or("");
    if host.is_empty() {
        return None;
    }
    Some(server)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_server() {
        assert_eq!(normalize_server("192.168.1.5:8000").as_deref(), Some("http://192.168.1.5:8000"));
        assert_eq!(
            normalize_server(" https://books.example.com/ ").as_deref(),
            Some("https://books.example.com")
        );
        assert_eq!(
            normalize_server("http://10.0.0.2:8000/api/").as_deref(),
            Some("http://10.0.0.2:8000")
        );
        assert_eq!(normalize_server(""), None);
        assert_eq!(normalize_server("bad host"), None);
        assert_eq!(normalize_server("http://"), None);
    }

    #[test]
    fn test_override_applies_only_when_valid() {
        let base = ClientConfig {
            server: DEFAULT_SERVER.to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(base.clone().with_override(Some("10.0.0.9")).api_base(), "http://10.0.0.9/api");
        assert_eq!(base.clone().with_override(Some("  ")).server, DEFAULT_SERVER);
        assert_eq!(base.with_override(None).api_base(), "http://localhost:8000/api");
    }
}
