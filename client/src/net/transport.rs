//! HTTP transport seam between the auth gateway and the network.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, each bounded by an
//! `AbortController` deadline.
//! Server-side (SSR): every request fails as a network error, since these
//! endpoints are only meaningful in the browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

/// One backend request, relative to the configured API base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), bearer: None, body: None, timeout: None }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    #[must_use]
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Status and raw body of a backend reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
}

impl ApiReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// The request never produced a reply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("{0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
}

/// Sends backend requests. Single-threaded: futures need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no HTTP reply was received.
    async fn send(&self, request: ApiRequest) -> Result<ApiReply, TransportError>;
}

/// `fetch`-backed transport for the browser.
#[derive(Clone, Debug)]
pub struct BrowserTransport {
    config: ClientConfig,
}

impl BrowserTransport {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn timeout_millis(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX)
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiReply, TransportError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;

            let url = self.config.url(&request.path);
            let controller = web_sys::AbortController::new()
                .map_err(|_| TransportError::Network("failed to initialize request timeout".to_owned()))?;
            let signal = controller.signal();
            let _deadline = request.timeout.map(|timeout| {
                let controller = controller.clone();
                gloo_timers::callback::Timeout::new(timeout_millis(timeout), move || controller.abort())
            });

            let mut builder = match request.method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Put => Request::put(&url),
            }
            .abort_signal(Some(&signal));
            if let Some(token) = &request.bearer {
                builder = builder.header("Authorization", &bearer_header(token));
            }
            let built = match &request.body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| TransportError::Network(format!("failed to build request: {e}")))?;

            let resp = built.send().await.map_err(|e| {
                if signal.aborted() {
                    TransportError::Timeout
                } else {
                    TransportError::Network(e.to_string())
                }
            })?;
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            Ok(ApiReply { status, body })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&self.config, request);
            Err(TransportError::Network("not available on server".to_owned()))
        }
    }
}
