//! File-backed credential source with HTTP token refresh.
//!
//! Models the platform credential cache on disk: a JSON file holds the
//! current access token alongside the refresh token and token endpoint needed
//! to mint a replacement. Invalidation clears the access token; the next
//! interactive acquisition refreshes it over HTTP.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::credential::{Credential, CredentialSource};
use crate::error::{AcquisitionError, Result};

/// Default credential file name within the tabstash data directory.
pub const CREDENTIAL_FILE: &str = "credentials.json";

/// Default token endpoint (Google OAuth 2.0).
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

// ─────────────────────────────────────────────────────────────────────────────
// Stored Credentials
// ─────────────────────────────────────────────────────────────────────────────

/// The on-disk credential record.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoredCredentials {
    /// Current access token. Empty after invalidation.
    #[serde(default)]
    pub access_token: String,
    /// Long-lived refresh token used to mint replacement access tokens.
    #[serde(default)]
    pub refresh_token: String,
    /// OAuth token endpoint.
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// OAuth client id registered for this installation.
    #[serde(default)]
    pub client_id: String,
    /// Client secret, when the registration requires one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

impl std::fmt::Debug for StoredCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredCredentials")
            .field("access_token", &"[redacted]")
            .field("refresh_token", &"[redacted]")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .finish()
    }
}

/// Token endpoint response for a refresh grant.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// FileCredentialSource
// ─────────────────────────────────────────────────────────────────────────────

/// File-based credential source for production use.
pub struct FileCredentialSource {
    credential_path: PathBuf,
    cached: RwLock<Option<StoredCredentials>>,
}

impl FileCredentialSource {
    /// Create a source storing credentials under the given data directory.
    pub fn new(data_dir: &Path) -> Self {
        Self::with_path(data_dir.join(CREDENTIAL_FILE))
    }

    /// Create a source with an explicit credential file path.
    pub fn with_path(credential_path: PathBuf) -> Self {
        Self {
            credential_path,
            cached: RwLock::new(None),
        }
    }

    /// The credential file path.
    pub fn credential_path(&self) -> &Path {
        &self.credential_path
    }

    /// Whether a credential file exists.
    pub fn has_credentials(&self) -> bool {
        self.credential_path.exists()
    }

    /// Persist a credential record, replacing any existing one.
    pub async fn store(&self, credentials: StoredCredentials) -> Result<()> {
        self.save(&credentials)?;
        let mut cache = self.cached.write().await;
        *cache = Some(credentials);
        tracing::info!(path = %self.credential_path.display(), "Credentials saved");
        Ok(())
    }

    /// Delete the stored credential record.
    pub async fn delete(&self) -> Result<()> {
        if self.credential_path.exists() {
            std::fs::remove_file(&self.credential_path).map_err(|e| {
                AcquisitionError::Storage(format!("Failed to delete credential file: {}", e))
            })?;
        }
        let mut cache = self.cached.write().await;
        *cache = None;
        Ok(())
    }

    /// Load the stored record, consulting the in-memory cache first.
    async fn load(&self) -> Result<Option<StoredCredentials>> {
        {
            let cache = self.cached.read().await;
            if cache.is_some() {
                return Ok(cache.clone());
            }
        }

        if !self.credential_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.credential_path).map_err(|e| {
            AcquisitionError::Storage(format!("Failed to read credential file: {}", e))
        })?;

        let credentials: StoredCredentials = serde_json::from_str(&content).map_err(|e| {
            AcquisitionError::Serialization(format!("Failed to parse credential file: {}", e))
        })?;

        let mut cache = self.cached.write().await;
        *cache = Some(credentials.clone());

        Ok(Some(credentials))
    }

    fn save(&self, credentials: &StoredCredentials) -> Result<()> {
        if let Some(parent) = self.credential_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AcquisitionError::Storage(format!("Failed to create credential directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(credentials)?;
        std::fs::write(&self.credential_path, json).map_err(|e| {
            AcquisitionError::Storage(format!("Failed to write credential file: {}", e))
        })
    }

    /// Mint a fresh access token through the refresh grant.
    async fn refresh(&self, stored: &StoredCredentials) -> Result<String> {
        if stored.refresh_token.is_empty() {
            return Err(AcquisitionError::Denied(
                "No refresh token on file; run `tabstash login` again".to_string(),
            ));
        }

        let mut form = vec![
            ("grant_type", "refresh_token"),
            ("client_id", stored.client_id.as_str()),
            ("refresh_token", stored.refresh_token.as_str()),
        ];
        if let Some(secret) = stored.client_secret.as_deref() {
            form.push(("client_secret", secret));
        }

        let client = reqwest::Client::new();
        let response = client
            .post(&stored.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| AcquisitionError::Network(format!("Token refresh failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AcquisitionError::Denied(format!(
                "Token endpoint returned {}: {}",
                status, body
            )));
        }

        let refreshed: RefreshResponse = response.json().await.map_err(|e| {
            AcquisitionError::Serialization(format!("Failed to parse refresh response: {}", e))
        })?;

        if refreshed.access_token.is_empty() {
            return Err(AcquisitionError::Denied(
                "Token endpoint returned an empty access token".to_string(),
            ));
        }

        Ok(refreshed.access_token)
    }
}

impl std::fmt::Debug for FileCredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileCredentialSource")
            .field("credential_path", &self.credential_path)
            .finish()
    }
}

#[async_trait::async_trait]
impl CredentialSource for FileCredentialSource {
    async fn acquire(&self, interactive: bool) -> Result<Credential> {
        let stored = self.load().await?.ok_or_else(|| {
            AcquisitionError::NotCached(
                "No stored credentials; run `tabstash login` first".to_string(),
            )
        })?;

        if !stored.access_token.is_empty() {
            return Ok(Credential::new(stored.access_token));
        }

        if !interactive {
            return Err(AcquisitionError::NotCached(
                "Access token invalidated and non-interactive acquisition may not refresh"
                    .to_string(),
            ));
        }

        tracing::info!("Access token missing, refreshing");
        let access_token = self.refresh(&stored).await?;

        let mut updated = stored;
        updated.access_token = access_token.clone();
        self.save(&updated)?;
        let mut cache = self.cached.write().await;
        *cache = Some(updated);

        tracing::info!("Access token refreshed");
        Ok(Credential::new(access_token))
    }

    async fn invalidate(&self, credential: &Credential) {
        if credential.is_empty() {
            return;
        }

        let stored = match self.load().await {
            Ok(Some(stored)) => stored,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(error = %e, "Could not load credentials during invalidation");
                return;
            }
        };

        // Only forget the token that actually failed; a concurrent refresh
        // may already have replaced it.
        if stored.access_token != credential.as_str() {
            return;
        }

        let mut updated = stored;
        updated.access_token = String::new();
        if let Err(e) = self.save(&updated) {
            tracing::warn!(error = %e, "Could not persist credential invalidation");
        }
        let mut cache = self.cached.write().await;
        *cache = Some(updated);
        tracing::debug!("Access token invalidated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn stored(access: &str) -> StoredCredentials {
        StoredCredentials {
            access_token: access.to_string(),
            refresh_token: "refresh".to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            client_id: "client".to_string(),
            client_secret: None,
        }
    }

    #[tokio::test]
    async fn test_acquire_without_file_fails() {
        let temp = tempdir().unwrap();
        let source = FileCredentialSource::new(temp.path());
        assert!(!source.has_credentials());

        let result = source.acquire(true).await;
        assert!(matches!(result, Err(AcquisitionError::NotCached(_))));
    }

    #[tokio::test]
    async fn test_store_then_acquire_round_trip() {
        let temp = tempdir().unwrap();
        let source = FileCredentialSource::new(temp.path());

        source.store(stored("token-1")).await.unwrap();
        assert!(source.has_credentials());

        let credential = source.acquire(false).await.unwrap();
        assert_eq!(credential.as_str(), "token-1");

        // A fresh source reading the same file sees the same token.
        let reopened = FileCredentialSource::new(temp.path());
        let credential = reopened.acquire(false).await.unwrap();
        assert_eq!(credential.as_str(), "token-1");
    }

    #[tokio::test]
    async fn test_invalidate_clears_matching_token_only() {
        let temp = tempdir().unwrap();
        let source = FileCredentialSource::new(temp.path());
        source.store(stored("token-1")).await.unwrap();

        // A stale credential from an earlier acquisition is ignored.
        source.invalidate(&Credential::new("other-token")).await;
        let credential = source.acquire(false).await.unwrap();
        assert_eq!(credential.as_str(), "token-1");

        // The matching credential is forgotten, on disk too.
        source.invalidate(&Credential::new("token-1")).await;
        let result = source.acquire(false).await;
        assert!(matches!(result, Err(AcquisitionError::NotCached(_))));

        let reopened = FileCredentialSource::new(temp.path());
        let result = reopened.acquire(false).await;
        assert!(matches!(result, Err(AcquisitionError::NotCached(_))));
    }

    #[tokio::test]
    async fn test_invalidate_empty_credential_is_noop() {
        let temp = tempdir().unwrap();
        let source = FileCredentialSource::new(temp.path());
        source.store(stored("token-1")).await.unwrap();

        source.invalidate(&Credential::new("")).await;
        let credential = source.acquire(false).await.unwrap();
        assert_eq!(credential.as_str(), "token-1");
    }

    #[tokio::test]
    async fn test_interactive_acquire_refreshes_over_http() {
        use wiremock::matchers::{body_string_contains, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "fresh-token",
                "expires_in": 3599,
                "token_type": "Bearer",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let temp = tempdir().unwrap();
        let source = FileCredentialSource::new(temp.path());
        let mut credentials = stored("");
        credentials.token_url = format!("{}/token", server.uri());
        source.store(credentials).await.unwrap();

        // Non-interactive acquisition may not go out to the token endpoint.
        let result = source.acquire(false).await;
        assert!(matches!(result, Err(AcquisitionError::NotCached(_))));

        let credential = source.acquire(true).await.unwrap();
        assert_eq!(credential.as_str(), "fresh-token");

        // The refreshed token was persisted: a fresh source sees it without
        // another round-trip.
        let reopened = FileCredentialSource::new(temp.path());
        let credential = reopened.acquire(false).await.unwrap();
        assert_eq!(credential.as_str(), "fresh-token");
    }

    #[tokio::test]
    async fn test_refresh_rejected_by_token_endpoint_is_denied() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
            .mount(&server)
            .await;

        let temp = tempdir().unwrap();
        let source = FileCredentialSource::new(temp.path());
        let mut credentials = stored("");
        credentials.token_url = format!("{}/token", server.uri());
        source.store(credentials).await.unwrap();

        let result = source.acquire(true).await;
        match result {
            Err(AcquisitionError::Denied(message)) => {
                assert!(message.contains("invalid_grant"));
            }
            other => panic!("expected denial, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refresh_without_refresh_token_is_denied() {
        let temp = tempdir().unwrap();
        let source = FileCredentialSource::new(temp.path());
        let mut credentials = stored("");
        credentials.refresh_token = String::new();
        source.store(credentials).await.unwrap();

        let result = source.acquire(true).await;
        assert!(matches!(result, Err(AcquisitionError::Denied(_))));
    }

    #[tokio::test]
    async fn test_delete_forgets_credentials() {
        let temp = tempdir().unwrap();
        let source = FileCredentialSource::new(temp.path());
        source.store(stored("token-1")).await.unwrap();

        source.delete().await.unwrap();
        assert!(!source.has_credentials());
        let result = source.acquire(false).await;
        assert!(matches!(result, Err(AcquisitionError::NotCached(_))));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let mut credentials = stored("secret-access");
        credentials.refresh_token = "secret-refresh".to_string();
        let rendered = format!("{:?}", credentials);
        assert!(!rendered.contains("secret-access"));
        assert!(!rendered.contains("secret-refresh"));
    }
}
