//! Bearer credential acquisition and invalidation for tabstash.
//!
//! The rest of the workspace never talks to an identity provider directly; it
//! goes through the [`CredentialSource`] trait, which models the platform
//! credential cache: acquire a token (optionally allowed to mint a fresh one),
//! and invalidate a token so the next acquisition cannot return it again.
//!
//! # Components
//!
//! - [`credential`] — the opaque [`Credential`] value and the
//!   [`CredentialSource`] trait
//! - [`file`] — file-backed production source with HTTP token refresh
//! - [`memory`] — in-memory scriptable source for tests

pub mod credential;
pub mod error;
pub mod file;
pub mod memory;

pub use credential::{Credential, CredentialSource, SharedCredentialSource};
pub use error::{AcquisitionError, Result};
pub use file::{DEFAULT_TOKEN_URL, FileCredentialSource, StoredCredentials};
pub use memory::MemoryCredentialSource;
