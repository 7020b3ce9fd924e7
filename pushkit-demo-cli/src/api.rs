//! HTTP client for the Pushkit notification API.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use pushkit_lib::config::ClientConfig;
use pushkit_lib::StoredNotification;
use reqwest::{Client, Response, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;

/// Route prefix of every endpoint.
pub const API_PREFIX: &str = "api/notification";

/// Default server address.
pub const DEFAULT_API_URL: &str = "http://localhost:5100";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub listen_url: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebasePathResponse {
    pub path: String,
    pub hashed_user_id: String,
    pub original_user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiStatus {
    pub message: String,
    pub timestamp: String,
    pub version: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendResponse {
    notification_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendBody<'a> {
    user_id: &'a str,
    title: &'a str,
    body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a HashMap<String, String>>,
}

/// Client for one backend instance.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
}

impl ApiClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(&format!("{trimmed}/"))
            .with_context(|| format!("invalid API URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            bail!("invalid API URL: {base_url}");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.join(API_PREFIX)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("invalid API URL: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Register a user and receive the listen URL.
    pub async fn register(&self, user_id: &str) -> Result<RegisterResponse> {
        let url = self.endpoint(&["register"])?;
        let response = self
            .client
            .post(url)
            .json(&json!({ "userId": user_id }))
            .send()
            .await
            .context("register request failed")?;
        parse(response).await
    }

    pub async fn send_random(&self, user_id: &str) -> Result<()> {
        let url = self.endpoint(&["send-random"])?;
        let response = self
            .client
            .post(url)
            .json(&json!({ "userId": user_id }))
            .send()
            .await
            .context("send-random request failed")?;
        check(response).await.map(|_| ())
    }

    /// Send a custom notification and return its id.
    pub async fn send(
        &self,
        user_id: &str,
        title: &str,
        body: &str,
        data: Option<&HashMap<String, String>>,
    ) -> Result<String> {
        let url = self.endpoint(&["send"])?;
        let response = self
            .client
            .post(url)
            .json(&SendBody {
                user_id,
                title,
                body,
                data,
            })
            .send()
            .await
            .context("send request failed")?;
        let sent: SendResponse = parse(response).await?;
        Ok(sent.notification_id)
    }

    pub async fn firebase_path(&self, user_id: &str) -> Result<FirebasePathResponse> {
        let url = self.endpoint(&["firebase-path"])?;
        let response = self
            .client
            .post(url)
            .json(&json!({ "userId": user_id }))
            .send()
            .await
            .context("firebase-path request failed")?;
        parse(response).await
    }

    /// Stored notifications for a user, newest first.
    pub async fn notifications(&self, user_id: &str) -> Result<Vec<StoredNotification>> {
        let url = self.endpoint(&["user", user_id])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("notifications request failed")?;
        parse(response).await
    }

    pub async fn status(&self) -> Result<ApiStatus> {
        let url = self.endpoint(&["test"])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("status request failed")?;
        parse(response).await
    }

    pub async fn firebase_config(&self) -> Result<ClientConfig> {
        let url = self.endpoint(&["firebase-config"])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("firebase-config request failed")?;
        parse(response).await
    }
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or(text);

    if message.trim().is_empty() {
        bail!("server returned {status}");
    }
    bail!("server returned {status}: {message}")
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
    check(response)
        .await?
        .json()
        .await
        .context("unexpected response body")
}
