//! HTTP transport seam.
//!
//! The executor never touches the network directly; it hands a fully-formed
//! [`ApiRequest`] to an [`HttpTransport`]. Production uses
//! [`ReqwestTransport`]; tests script responses through
//! [`ScriptedTransport`].

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use tokio::sync::Mutex;

use tabstash_auth::Credential;

use crate::error::{ClientError, Result};

pub use reqwest::Method;

/// Default timeout for task-service requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ─────────────────────────────────────────────────────────────────────────────
// Request / Response
// ─────────────────────────────────────────────────────────────────────────────

/// One authenticated request to the task service.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Bearer credential for the `Authorization` header.
    pub bearer: Credential,
    /// JSON body, when present.
    pub body: Option<String>,
}

/// A raw response: status plus unparsed body.
///
/// Body interpretation belongs to the caller; the executor only looks at the
/// status.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HttpTransport Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Issues a single HTTP request.
///
/// Implementations convert transport faults into [`ClientError::Transport`];
/// non-success statuses come back as ordinary [`ApiResponse`] values so the
/// executor can tell authorization failures apart from the rest.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Reqwest Transport
// ─────────────────────────────────────────────────────────────────────────────

/// Production transport backed by a pooled reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a transport with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .bearer_auth(request.bearer.as_str());

        if let Some(body) = &request.body {
            builder = builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ApiResponse { status, body })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scripted Transport (for tests)
// ─────────────────────────────────────────────────────────────────────────────

/// Transport that replays a scripted sequence of replies and records every
/// request it saw. Test-only collaborator for exercising the retry protocol
/// without a network.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

#[derive(Debug)]
enum Reply {
    Response(ApiResponse),
    Fault(String),
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body.
    pub async fn push_status(&self, status: u16, body: impl Into<String>) {
        self.replies
            .lock()
            .await
            .push_back(Reply::Response(ApiResponse {
                status,
                body: body.into(),
            }));
    }

    /// Queue a transport fault.
    pub async fn push_fault(&self, message: impl Into<String>) {
        self.replies
            .lock()
            .await
            .push_back(Reply::Fault(message.into()));
    }

    /// Every request sent so far, in order.
    pub async fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of HTTP attempts observed.
    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().await.push(request.clone());

        match self.replies.lock().await.pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Fault(message)) => Err(ClientError::Transport(message)),
            None => Err(ClientError::Transport(
                "scripted transport exhausted".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_transport_replays_in_order() {
        let transport = ScriptedTransport::new();
        transport.push_status(200, "first").await;
        transport.push_fault("boom").await;

        let request = ApiRequest {
            method: Method::GET,
            url: "https://api.test/x".to_string(),
            bearer: Credential::new("t"),
            body: None,
        };

        let first = transport.send(&request).await.unwrap();
        assert_eq!(first.status, 200);
        assert!(first.is_success());

        let second = transport.send(&request).await;
        assert!(matches!(second, Err(ClientError::Transport(_))));

        assert_eq!(transport.request_count().await, 2);
    }

    #[test]
    fn test_is_success_bounds() {
        let ok = ApiResponse {
            status: 204,
            body: String::new(),
        };
        assert!(ok.is_success());

        let redirect = ApiResponse {
            status: 301,
            body: String::new(),
        };
        assert!(!redirect.is_success());

        let unauthorized = ApiResponse {
            status: 401,
            body: String::new(),
        };
        assert!(!unauthorized.is_success());
    }
}
