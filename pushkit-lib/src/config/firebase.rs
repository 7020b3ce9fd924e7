//! Firebase Realtime Database settings.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::protocol::validate_base_url;
use crate::{PushkitError, Result};

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "asia-southeast1";

/// Region whose databases live under `firebaseio.com`.
pub const LEGACY_REGION: &str = "us-central1";

/// Host label suffix Firebase appends to the default database of a project.
const DEFAULT_DATABASE_SUFFIX: &str = "-default-rtdb";

/// Configuration for the Firebase Realtime Database adapter.
///
/// Nothing here is required: the database URL is resolved from the explicit
/// `database_url`, then the service account, then the environment. See
/// [`DatabaseUrlResolver`](super::DatabaseUrlResolver).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirebaseConfig {
    /// Database root URL (e.g., "https://my-app-default-rtdb.firebaseio.com").
    #[serde(default)]
    pub database_url: Option<String>,

    /// Path to a service account JSON key file.
    #[serde(default)]
    pub service_account_path: Option<String>,

    /// Database region, used when deriving the URL from a project id.
    #[serde(default = "default_region")]
    pub region: String,

    /// Database secret or ID token appended as `?auth=`.
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl FirebaseConfig {
    /// Create a configuration with defaults and no URL source.
    pub fn new() -> Self {
        Self {
            database_url: None,
            service_account_path: None,
            region: default_region(),
            auth_token: None,
            timeout_secs: default_timeout(),
        }
    }

    /// Set the database URL explicitly.
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the service account key file.
    pub fn with_service_account_path(mut self, path: impl Into<String>) -> Self {
        self.service_account_path = Some(path.into());
        self
    }

    /// Set the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the auth token.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Database URL of a project's default database.
///
/// `us-central1` databases use `firebaseio.com`; every other region uses
/// `<region>.firebasedatabase.app`. The result keeps a trailing `/`.
///
/// # Example
///
/// ```
/// use pushkit_lib::config::build_database_url;
///
/// assert_eq!(
///     build_database_url("demo", "us-central1"),
///     "https://demo-default-rtdb.firebaseio.com/"
/// );
/// ```
pub fn build_database_url(project_id: &str, region: &str) -> String {
    if region == LEGACY_REGION {
        format!("https://{}{}.firebaseio.com/", project_id, DEFAULT_DATABASE_SUFFIX)
    } else {
        format!(
            "https://{}{}.{}.firebasedatabase.app/",
            project_id, DEFAULT_DATABASE_SUFFIX, region
        )
    }
}

/// Recover the project id from a database URL.
///
/// Takes the first label of the host and drops the `-default-rtdb` suffix.
pub fn project_id_from_database_url(database_url: &str) -> Result<String> {
    let parsed = Url::parse(database_url)
        .map_err(|err| PushkitError::invalid_argument("database_url", err.to_string()))?;

    let label = parsed
        .host_str()
        .and_then(|host| host.split('.').next())
        .filter(|label| !label.is_empty())
        .ok_or_else(|| {
            PushkitError::invalid_argument("database_url", format!("'{}' has no host", database_url))
        })?;

    Ok(label
        .strip_suffix(DEFAULT_DATABASE_SUFFIX)
        .unwrap_or(label)
        .to_string())
}

/// The settings clients need to reach the database.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub project_id: String,
    /// Database root without a trailing slash.
    #[serde(rename = "databaseURL")]
    pub database_url: String,
}

impl ClientConfig {
    /// Build from a resolved database URL, stripping one trailing `/`.
    pub fn new(project_id: impl Into<String>, database_url: &str) -> Result<Self> {
        Ok(Self {
            project_id: project_id.into(),
            database_url: validate_base_url(database_url)?.to_string(),
        })
    }
}
