use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::http::{map_reqwest_error, map_status_error, node_url};
use crate::config::ResolvedFirebase;
use crate::protocol::validate_base_url;
use crate::transport::traits::{NotificationStoreRead, NotificationStoreWrite};
use crate::{PushkitError, Result};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Firebase Realtime Database store over the REST API.
///
/// Every node is addressed as `<database_url>/<path>.json`. Values are sent
/// and received as JSON; a missing node reads back as `null`.
#[derive(Clone)]
pub struct FirebaseStore {
    database_url: String,
    auth_token: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl FirebaseStore {
    /// Create a store for `database_url` with the default timeout and no auth.
    pub fn new(database_url: &str) -> Result<Self> {
        Self::build(database_url, None, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a store from resolved configuration.
    pub fn from_config(config: &ResolvedFirebase) -> Result<Self> {
        Self::build(
            &config.database_url,
            config.auth_token.clone(),
            config.timeout_secs,
        )
    }

    fn build(database_url: &str, auth_token: Option<String>, timeout_secs: u64) -> Result<Self> {
        let database_url = validate_base_url(database_url)?.to_string();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PushkitError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            database_url,
            auth_token,
            timeout_secs,
            client,
        })
    }

    /// Set the auth token appended to every request.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Database root this store talks to.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    fn url(&self, path: &str) -> Result<String> {
        node_url(&self.database_url, path, self.auth_token.as_deref())
    }

    async fn check(&self, path: &str, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(map_status_error(status.as_u16(), path, &body))
    }
}

#[async_trait]
impl NotificationStoreRead for FirebaseStore {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        let response = self
            .client
            .get(self.url(path)?)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, &self.database_url, self.timeout_secs))?;

        let response = self.check(path, response).await?;
        let value: Value = response.json().await.map_err(|e| {
            PushkitError::Serialization(format!("Failed to parse Firebase response: {}", e))
        })?;

        Ok(if value.is_null() { None } else { Some(value) })
    }
}

#[async_trait]
impl NotificationStoreWrite for FirebaseStore {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, value)))]
    async fn put(&self, path: &str, value: &Value) -> Result<()> {
        let response = self
            .client
            .put(self.url(path)?)
            .json(value)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, &self.database_url, self.timeout_secs))?;

        self.check(path, response).await?;
        Ok(())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    async fn delete(&self, path: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(path)?)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, &self.database_url, self.timeout_secs))?;

        self.check(path, response).await?;
        Ok(())
    }
}
