//! Build-time client configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend base URL and request deadlines are baked in at compile time
//! through `option_env!` so static WASM deployments need no runtime lookup.
//! Values are public; nothing secret belongs here.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_VERIFY_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 20_000;

/// Endpoint and timeout settings shared by every backend call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST backend, without a trailing slash.
    pub api_base_url: String,
    /// Deadline for `GET /auth/verify`.
    pub verify_timeout: Duration,
    /// Deadline for every other request.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            verify_timeout: Duration::from_millis(DEFAULT_VERIFY_TIMEOUT_MS),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

impl ClientConfig {
    /// Load config from build-time environment variables.
    ///
    /// - `PORTAL_API_BASE_URL`: default `http://localhost:5000/api`
    /// - `PORTAL_VERIFY_TIMEOUT_MS`: default 10000
    /// - `PORTAL_REQUEST_TIMEOUT_MS`: default 20000
    pub fn load() -> Self {
        Self::from_values(
            option_env!("PORTAL_API_BASE_URL"),
            option_env!("PORTAL_VERIFY_TIMEOUT_MS"),
            option_env!("PORTAL_REQUEST_TIMEOUT_MS"),
        )
    }

    fn from_values(base_url: Option<&str>, verify_ms: Option<&str>, request_ms: Option<&str>) -> Self {
        let api_base_url = normalize_value(base_url)
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_owned();
        Self {
            api_base_url,
            verify_timeout: Duration::from_millis(parse_millis(verify_ms, DEFAULT_VERIFY_TIMEOUT_MS)),
            request_timeout: Duration::from_millis(parse_millis(request_ms, DEFAULT_REQUEST_TIMEOUT_MS)),
        }
    }

    /// Join `path` onto the configured base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim().trim_start_matches('/'))
    }
}

fn normalize_value(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_millis(raw: Option<&str>, default: u64) -> u64 {
    normalize_value(raw)
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(default)
}
