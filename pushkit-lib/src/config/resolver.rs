//! Ordered database URL resolution.
//!
//! Providers are consulted in order and the first one that yields a URL wins:
//!
//! 1. The explicitly configured `database_url`
//! 2. The project id of the service account, combined with the region
//! 3. The `FIREBASE_DATABASE_URL` environment variable
//!
//! Nothing is cached; callers resolve once and keep the result.

use serde::{Deserialize, Serialize};

use super::firebase::{build_database_url, project_id_from_database_url, ClientConfig, FirebaseConfig};
use super::service_account::{ServiceAccount, DEFAULT_SERVICE_ACCOUNT_FILE};
use crate::protocol::validate_base_url;
use crate::{PushkitError, Result};

/// Environment variable consulted last.
pub const DATABASE_URL_ENV: &str = "FIREBASE_DATABASE_URL";

/// Where a resolved URL came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlSource {
    Explicit,
    ServiceAccount,
    Environment,
}

impl std::fmt::Display for UrlSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Explicit => "explicit configuration",
            Self::ServiceAccount => "service account",
            Self::Environment => "environment",
        };
        f.write_str(name)
    }
}

/// One way of finding the database URL.
pub trait DatabaseUrlProvider: Send + Sync {
    /// Which source this provider represents.
    fn source(&self) -> UrlSource;

    /// The URL, or `None` if this source has nothing to offer.
    fn database_url(&self) -> Option<String>;
}

/// A URL set directly in configuration.
pub struct ExplicitUrl(pub Option<String>);

impl DatabaseUrlProvider for ExplicitUrl {
    fn source(&self) -> UrlSource {
        UrlSource::Explicit
    }

    fn database_url(&self) -> Option<String> {
        non_blank(self.0.clone())
    }
}

/// A URL derived from a service account's project id.
pub struct ServiceAccountUrl {
    account: Option<ServiceAccount>,
    region: String,
}

impl ServiceAccountUrl {
    /// Use an already loaded account.
    pub fn new(account: Option<ServiceAccount>, region: impl Into<String>) -> Self {
        Self {
            account,
            region: region.into(),
        }
    }

    /// Load the account from `path`. An unreadable file yields no URL.
    pub fn load(path: &str, region: impl Into<String>) -> Self {
        Self::new(load_service_account(path), region)
    }
}

impl DatabaseUrlProvider for ServiceAccountUrl {
    fn source(&self) -> UrlSource {
        UrlSource::ServiceAccount
    }

    fn database_url(&self) -> Option<String> {
        self.account
            .as_ref()
            .map(|account| build_database_url(&account.project_id, &self.region))
    }
}

/// A URL read from an environment variable.
pub struct EnvironmentUrl {
    var: String,
}

impl EnvironmentUrl {
    /// Read from a specific variable.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvironmentUrl {
    fn default() -> Self {
        Self::new(DATABASE_URL_ENV)
    }
}

impl DatabaseUrlProvider for EnvironmentUrl {
    fn source(&self) -> UrlSource {
        UrlSource::Environment
    }

    fn database_url(&self) -> Option<String> {
        non_blank(std::env::var(&self.var).ok())
    }
}

/// A URL picked by [`DatabaseUrlResolver`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedUrl {
    /// Database root without a trailing slash.
    pub database_url: String,
    pub source: UrlSource,
}

/// Walks providers in order until one yields a URL.
#[derive(Default)]
pub struct DatabaseUrlResolver {
    providers: Vec<Box<dyn DatabaseUrlProvider>>,
}

impl DatabaseUrlResolver {
    /// Create a resolver with no providers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a provider. Earlier providers take priority.
    pub fn with_provider(mut self, provider: impl DatabaseUrlProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if no providers are registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Return the first URL any provider offers.
    ///
    /// # Errors
    ///
    /// - `Configuration` if no provider yields a URL
    /// - `Configuration` if the winning URL is not an absolute URL
    pub fn resolve(&self) -> Result<ResolvedUrl> {
        for provider in &self.providers {
            let Some(url) = provider.database_url() else {
                continue;
            };

            let source = provider.source();
            let database_url = validate_base_url(&url)
                .map_err(|err| {
                    PushkitError::Configuration(format!(
                        "database URL from {} is invalid: {}",
                        source, err
                    ))
                })?
                .to_string();

            #[cfg(feature = "tracing")]
            tracing::info!(%source, %database_url, "resolved Firebase database URL");

            return Ok(ResolvedUrl {
                database_url,
                source,
            });
        }

        Err(PushkitError::Configuration(format!(
            "Firebase database URL not configured: set database_url, provide a service \
             account key with a project_id, or set {}",
            DATABASE_URL_ENV
        )))
    }
}

/// Fully resolved Firebase settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedFirebase {
    /// Database root without a trailing slash.
    pub database_url: String,
    pub project_id: String,
    pub source: UrlSource,
    pub auth_token: Option<String>,
    pub timeout_secs: u64,
}

impl ResolvedFirebase {
    /// What clients need to connect.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            project_id: self.project_id.clone(),
            database_url: self.database_url.clone(),
        }
    }
}

impl FirebaseConfig {
    /// Resolve the database URL and project id.
    ///
    /// The service account key is read from `service_account_path`, or from
    /// `firebase-service-account.json` when unset. The project id comes from
    /// the key if present, otherwise from the database URL host.
    pub fn resolve(&self) -> Result<ResolvedFirebase> {
        let key_path = self
            .service_account_path
            .as_deref()
            .unwrap_or(DEFAULT_SERVICE_ACCOUNT_FILE);
        let account = load_service_account(key_path);

        let resolved = DatabaseUrlResolver::new()
            .with_provider(ExplicitUrl(self.database_url.clone()))
            .with_provider(ServiceAccountUrl::new(account.clone(), self.region.clone()))
            .with_provider(EnvironmentUrl::default())
            .resolve()?;

        let project_id = match account {
            Some(account) => account.project_id,
            None => project_id_from_database_url(&resolved.database_url)?,
        };

        Ok(ResolvedFirebase {
            database_url: resolved.database_url,
            project_id,
            source: resolved.source,
            auth_token: non_blank(self.auth_token.clone()),
            timeout_secs: self.timeout_secs,
        })
    }
}

fn load_service_account(path: &str) -> Option<ServiceAccount> {
    match ServiceAccount::from_file(path) {
        Ok(account) => {
            #[cfg(feature = "tracing")]
            tracing::info!(project_id = %account.project_id, "loaded Firebase service account");
            Some(account)
        }
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(path, error = %_err, "Firebase service account unavailable");
            None
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
