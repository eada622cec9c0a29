//! CLI command implementations.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use tabstash_auth::FileCredentialSource;
use tabstash_client::{ReqwestTransport, RequestExecutor, TasksClient, TasksConfig};

pub mod add;
pub mod list;
pub mod login;
pub mod logout;

/// Shared context for command execution.
pub struct Context {
    pub verbose: bool,
    pub json: bool,
    /// Directory holding credentials and logs.
    pub data_dir: PathBuf,
}

impl Context {
    pub fn new(verbose: bool, json: bool) -> Result<Self> {
        let data_dir = dirs::data_dir()
            .context("Could not determine the platform data directory")?
            .join("tabstash");

        Ok(Self {
            verbose,
            json,
            data_dir,
        })
    }

    /// The credential source for this installation.
    pub fn credential_source(&self) -> FileCredentialSource {
        FileCredentialSource::new(&self.data_dir)
    }

    /// Build a tasks client from stored credentials and the environment.
    pub fn tasks_client(&self) -> Result<TasksClient> {
        let config = TasksConfig::from_env()?;
        let transport = ReqwestTransport::new()?;
        let executor =
            RequestExecutor::new(Arc::new(self.credential_source()), Arc::new(transport));
        Ok(TasksClient::new(executor, config))
    }
}
