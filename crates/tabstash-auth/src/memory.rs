//! In-memory credential source for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};

use tokio::sync::Mutex;

use crate::credential::{Credential, CredentialSource};
use crate::error::{AcquisitionError, Result};

/// Scriptable in-memory credential source.
///
/// Behaves like the platform cache: an acquired credential stays cached until
/// invalidated, and interactive acquisition issues the next scripted token.
/// Counters record how often the executor touched the source.
#[derive(Debug, Default)]
pub struct MemoryCredentialSource {
    issuable: Mutex<VecDeque<String>>,
    cached: Mutex<Option<Credential>>,
    acquire_calls: AtomicU32,
    invalidate_calls: AtomicU32,
}

impl MemoryCredentialSource {
    /// Create a source with nothing cached and nothing to issue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source that can issue the given tokens, in order.
    pub fn with_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            issuable: Mutex::new(tokens.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Number of `acquire` calls observed.
    pub fn acquire_count(&self) -> u32 {
        self.acquire_calls.load(Ordering::SeqCst)
    }

    /// Number of `invalidate` calls observed.
    pub fn invalidate_count(&self) -> u32 {
        self.invalidate_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CredentialSource for MemoryCredentialSource {
    async fn acquire(&self, interactive: bool) -> Result<Credential> {
        self.acquire_calls.fetch_add(1, Ordering::SeqCst);

        let mut cached = self.cached.lock().await;
        if let Some(credential) = cached.as_ref() {
            return Ok(credential.clone());
        }

        if !interactive {
            return Err(AcquisitionError::NotCached(
                "Nothing cached and interactive acquisition disabled".to_string(),
            ));
        }

        match self.issuable.lock().await.pop_front() {
            Some(token) => {
                let credential = Credential::new(token);
                *cached = Some(credential.clone());
                Ok(credential)
            }
            None => Err(AcquisitionError::Denied(
                "Identity service has no credential to issue".to_string(),
            )),
        }
    }

    async fn invalidate(&self, credential: &Credential) {
        self.invalidate_calls.fetch_add(1, Ordering::SeqCst);

        if credential.is_empty() {
            return;
        }

        let mut cached = self.cached.lock().await;
        if cached.as_ref() == Some(credential) {
            *cached = None;
        }
    }
}
