//! Bounded credential-replacement retry around a single request.
//!
//! The protocol, in order:
//!
//! 1. Acquire a credential interactively. Acquisition failure returns
//!    immediately; no HTTP attempt is made and no retry is consumed.
//! 2. Send the request with the credential attached.
//! 3. On HTTP 401, while budget remains: invalidate the credential,
//!    acquire a fresh one, decrement the budget, and resend. A retry always
//!    runs with a strictly fresher credential than the one that failed.
//! 4. Any other non-2xx status, and any transport fault, is terminal.
//!
//! The budget counts credential replacements, not raw HTTP attempts; the two
//! coincide because only authorization failures trigger a resend.

use std::sync::Arc;

use tabstash_auth::SharedCredentialSource;

use crate::error::{ClientError, Result};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Method};

/// Default retry budget: one credential replacement, so at most two HTTP
/// attempts in total.
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Executes authenticated requests with 401-driven credential recovery.
pub struct RequestExecutor {
    credentials: SharedCredentialSource,
    transport: Arc<dyn HttpTransport>,
}

impl RequestExecutor {
    /// Create an executor over the given credential source and transport.
    pub fn new(credentials: SharedCredentialSource, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    /// Issue one request, replacing the credential on 401 up to `max_retries`
    /// times.
    ///
    /// On success the raw response comes back unparsed; body interpretation
    /// is the caller's responsibility.
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
        max_retries: u32,
    ) -> Result<ApiResponse> {
        let mut credential = self.credentials.acquire(true).await.inspect_err(|e| {
            tracing::error!(error = %e, "Could not acquire credential");
        })?;

        let mut retries_left = max_retries;

        loop {
            let request = ApiRequest {
                method: method.clone(),
                url: url.to_string(),
                bearer: credential.clone(),
                body: body.clone(),
            };

            let response = self.transport.send(&request).await.inspect_err(|e| {
                tracing::error!(url, error = %e, "Request failed before a response arrived");
            })?;

            if response.status == 401 {
                tracing::warn!(url, "Access token invalid or expired");

                if retries_left == 0 {
                    tracing::error!(url, "Retry budget exhausted; user must reauthenticate");
                    return Err(ClientError::Unauthorized);
                }

                self.credentials.invalidate(&credential).await;
                credential = self.credentials.acquire(true).await.inspect_err(|e| {
                    tracing::error!(error = %e, "Could not replace rejected credential");
                })?;

                retries_left -= 1;
                continue;
            }

            if !response.is_success() {
                tracing::error!(url, status = response.status, "Request rejected");
                return Err(ClientError::Status {
                    status: response.status,
                    body: response.body,
                });
            }

            return Ok(response);
        }
    }
}
