use std::{env, fmt::Display, str::FromStr};

use anyhow::{anyhow, Result};
use pushkit_lib::config::{FirebaseConfig, DEFAULT_REGION, DEFAULT_SERVICE_ACCOUNT_FILE};
use tracing::{info, warn};

pub const PORT_ENV: &str = "PUSHKIT_PORT";
pub const DATABASE_URL_ENV: &str = "PUSHKIT_DATABASE_URL";
pub const SERVICE_ACCOUNT_ENV: &str = "PUSHKIT_SERVICE_ACCOUNT";
pub const REGION_ENV: &str = "PUSHKIT_REGION";
pub const AUTH_TOKEN_ENV: &str = "PUSHKIT_AUTH_TOKEN";
pub const MOCK_STORE_ENV: &str = "PUSHKIT_MOCK_STORE";

pub const DEFAULT_PORT: &str = "5100";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub service_account_path: String,
    pub region: String,
    pub auth_token: Option<String>,
    /// Keep notifications in process memory instead of Firebase.
    pub mock_store: bool,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. `load` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: try_load(&lookup, PORT_ENV, DEFAULT_PORT)?,
            database_url: optional(&lookup, DATABASE_URL_ENV),
            service_account_path: try_load(&lookup, SERVICE_ACCOUNT_ENV, DEFAULT_SERVICE_ACCOUNT_FILE)?,
            region: try_load(&lookup, REGION_ENV, DEFAULT_REGION)?,
            auth_token: optional(&lookup, AUTH_TOKEN_ENV),
            mock_store: flag(&lookup, MOCK_STORE_ENV)?,
        })
    }

    /// Firebase settings for the library resolver.
    pub fn firebase(&self) -> FirebaseConfig {
        let mut config = FirebaseConfig::new()
            .with_service_account_path(self.service_account_path.clone())
            .with_region(self.region.clone());

        if let Some(url) = &self.database_url {
            config = config.with_database_url(url.clone());
        }
        if let Some(token) = &self.auth_token {
            config = config.with_auth_token(token.clone());
        }

        config
    }
}

fn var<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.trim().is_empty())
}

fn try_load<F, T>(lookup: &F, key: &str, default: &str) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    var(lookup, key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .trim()
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            anyhow!("environment misconfigured: {key}: {e}")
        })
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = var(lookup, key).map(|v| v.trim().to_string());
    if value.is_none() {
        info!("{key} not set");
    }
    value
}

fn flag<F>(lookup: &F, key: &str) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match var(lookup, key).map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("0") | Some("false") | Some("no") | Some("off") => Ok(false),
        Some("1") | Some("true") | Some("yes") | Some("on") => Ok(true),
        Some(other) => {
            warn!("Invalid {key} value: {other}");
            Err(anyhow!("environment misconfigured: {key}: expected a boolean, got {other}"))
        }
    }
}
