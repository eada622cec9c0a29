//! The opaque bearer credential and the source trait behind it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

// ─────────────────────────────────────────────────────────────────────────────
// Credential
// ─────────────────────────────────────────────────────────────────────────────

/// An opaque bearer token.
///
/// The value is only ever compared and forwarded; `Debug` keeps it out of
/// logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building an `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this credential carries no token at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credential([{} bytes redacted])", self.0.len())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CredentialSource Trait
// ─────────────────────────────────────────────────────────────────────────────

/// A source of bearer credentials backed by a platform credential cache.
///
/// The source holds no retry logic of its own; it is pass-through to the
/// platform plus error normalization.
#[async_trait]
pub trait CredentialSource: Send + Sync + std::fmt::Debug {
    /// Acquire a credential.
    ///
    /// With `interactive = false` only an already-cached credential may be
    /// returned; the call fails fast when none is cached. With
    /// `interactive = true` the source may go out to the identity provider
    /// (which may involve user consent) to mint a fresh one.
    async fn acquire(&self, interactive: bool) -> Result<Credential>;

    /// Forget a credential so a later [`acquire`](Self::acquire) cannot
    /// return the same, presumed-expired value.
    ///
    /// Invalidation is best-effort: an empty credential is a no-op, and
    /// implementations log and swallow their own failures rather than abort
    /// the caller's retry flow.
    async fn invalidate(&self, credential: &Credential);
}

/// Shared credential source for use across async contexts.
pub type SharedCredentialSource = Arc<dyn CredentialSource>;
