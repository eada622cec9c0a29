//! Task operations against the remote task-list resource.
//!
//! `list_tasks` and `insert_task` keep the popup-era contract: callers get a
//! value or they don't, and the reason a call failed lives in the logs. The
//! fallible internals retain the full error taxonomy.

use serde::Deserialize;

use tabstash_types::Task;

use crate::error::Result;
use crate::executor::{DEFAULT_MAX_RETRIES, RequestExecutor};
use crate::transport::Method;

/// Default service base URL.
pub const DEFAULT_BASE_URL: &str = "https://tasks.googleapis.com";

/// Environment variable naming the task list to file into.
pub const LIST_ID_ENV: &str = "TABSTASH_LIST_ID";

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for the task operations.
#[derive(Debug, Clone)]
pub struct TasksConfig {
    /// Service base URL.
    pub base_url: String,

    /// Identifier of the task list all operations target.
    pub list_id: String,

    /// Retry budget handed to the executor for each operation.
    pub max_retries: u32,
}

impl TasksConfig {
    /// Create a config targeting the given list with defaults.
    pub fn new(list_id: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            list_id: list_id.into(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a config from the environment.
    pub fn from_env() -> Result<Self> {
        let list_id = std::env::var(LIST_ID_ENV).map_err(|_| {
            crate::error::ClientError::Config(format!(
                "{} environment variable not set",
                LIST_ID_ENV
            ))
        })?;
        Ok(Self::new(list_id))
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the retry budget.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tasks Client
// ─────────────────────────────────────────────────────────────────────────────

/// The service's list response envelope.
#[derive(Debug, Deserialize)]
struct TaskPage {
    items: Option<Vec<Task>>,
}

/// Client for the two task operations: list and insert.
pub struct TasksClient {
    executor: RequestExecutor,
    config: TasksConfig,
}

impl TasksClient {
    /// Create a client over an executor and configuration.
    pub fn new(executor: RequestExecutor, config: TasksConfig) -> Self {
        Self { executor, config }
    }

    /// The tasks collection URL for the configured list.
    fn tasks_url(&self) -> String {
        format!(
            "{}/tasks/v1/lists/{}/tasks",
            self.config.base_url, self.config.list_id
        )
    }

    /// Fetch the tasks in the configured list.
    ///
    /// Returns an empty vec both when the list is empty and when the fetch
    /// failed; the distinction is carried in the logs only.
    pub async fn list_tasks(&self) -> Vec<Task> {
        match self.fetch_tasks().await {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::error!(error = %e, "Could not fetch tasks");
                Vec::new()
            }
        }
    }

    /// File a task into the configured list.
    ///
    /// Returns the created task, now carrying a server-assigned id, or `None`
    /// on any failure (reason in the logs).
    pub async fn insert_task(&self, task: &Task) -> Option<Task> {
        match self.create_task(task).await {
            Ok(created) => {
                tracing::info!(id = ?created.id, title = %created.title, "Task created");
                Some(created)
            }
            Err(e) => {
                tracing::error!(error = %e, title = %task.title, "Could not create task");
                None
            }
        }
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>> {
        let response = self
            .executor
            .execute(Method::GET, &self.tasks_url(), None, self.config.max_retries)
            .await?;

        let page: TaskPage = serde_json::from_str(&response.body)?;
        Ok(page.items.unwrap_or_default())
    }

    async fn create_task(&self, task: &Task) -> Result<Task> {
        let body = serde_json::to_string(task)?;
        let response = self
            .executor
            .execute(
                Method::POST,
                &self.tasks_url(),
                Some(body),
                self.config.max_retries,
            )
            .await?;

        Ok(serde_json::from_str(&response.body)?)
    }
}
