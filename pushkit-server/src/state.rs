use std::sync::Arc;

use anyhow::{Context, Result};
use pushkit_lib::config::ClientConfig;
use pushkit_lib::transport::{FirebaseStore, MemoryStore, NotificationStore};
use tracing::{info, warn};

use super::config::ServerConfig;

/// Database root advertised in mock mode when nothing else resolves.
pub const MOCK_DATABASE_URL: &str = "http://localhost:9000";

/// Project id advertised alongside [`MOCK_DATABASE_URL`].
pub const MOCK_PROJECT_ID: &str = "pushkit-demo";

pub struct AppState {
    pub config: ServerConfig,
    pub store: Arc<dyn NotificationStore>,
    /// What `/firebase-config` returns and what listen URLs are built on.
    pub firebase: ClientConfig,
}

impl AppState {
    /// Resolve Firebase settings once and open the store.
    pub fn new(config: ServerConfig) -> Result<Arc<Self>> {
        let resolved = config.firebase().resolve();

        if config.mock_store {
            let firebase = match resolved {
                Ok(resolved) => resolved.client_config(),
                Err(err) => {
                    warn!("Firebase settings unresolved ({err}), advertising {MOCK_DATABASE_URL}");
                    ClientConfig::new(MOCK_PROJECT_ID, MOCK_DATABASE_URL)?
                }
            };
            info!("Using in-memory notification store");
            return Ok(Self::with_store(config, Arc::new(MemoryStore::new()), firebase));
        }

        let resolved = resolved.context("resolving Firebase database URL")?;
        info!(
            source = %resolved.source,
            project_id = %resolved.project_id,
            "Using Firebase database {}",
            resolved.database_url
        );

        let store = FirebaseStore::from_config(&resolved).context("creating Firebase client")?;
        let firebase = resolved.client_config();

        Ok(Self::with_store(config, Arc::new(store), firebase))
    }

    /// Assemble state around an existing store.
    pub fn with_store(
        config: ServerConfig,
        store: Arc<dyn NotificationStore>,
        firebase: ClientConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            store,
            firebase,
        })
    }
}
