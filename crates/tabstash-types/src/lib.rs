//! Shared domain types for tabstash.
//!
//! # Components
//!
//! - [`task`] — the remote task-list record and helpers for building one
//! - [`tabs`] — lightweight tab references and selection-to-task composition
//! - [`time`] — due-date helpers

pub mod tabs;
pub mod task;
pub mod time;

pub use tabs::{TabRef, unwrap_suspended_url};
pub use task::Task;
pub use time::{next_day_at_midnight, next_day_at_midnight_from};
