//! Authenticated task-list client for tabstash.
//!
//! Everything the workspace sends to the remote task service goes through the
//! [`RequestExecutor`]: it attaches the current bearer credential, and on an
//! authorization failure invalidates it, re-acquires a fresh one, and retries
//! within a bounded budget. [`TasksClient`] composes the executor with the
//! task-list resource to provide the two task operations (list, insert).
//!
//! # Components
//!
//! - [`transport`] — the [`HttpTransport`] seam plus reqwest-backed and
//!   scripted implementations
//! - [`executor`] — bounded credential-replacement retry around one request
//! - [`tasks`] — list/insert against the task-list resource

pub mod error;
pub mod executor;
pub mod tasks;
pub mod transport;

pub use error::{ClientError, Result};
pub use executor::{DEFAULT_MAX_RETRIES, RequestExecutor};
pub use tasks::{TasksClient, TasksConfig};
pub use transport::{
    ApiRequest, ApiResponse, HttpTransport, Method, ReqwestTransport, ScriptedTransport,
};
