//! Firebase configuration and database URL resolution.

mod firebase;
mod resolver;
mod service_account;

pub use firebase::{
    build_database_url, project_id_from_database_url, ClientConfig, FirebaseConfig,
    DEFAULT_REGION, LEGACY_REGION,
};
pub use resolver::{
    DatabaseUrlProvider, DatabaseUrlResolver, EnvironmentUrl, ExplicitUrl, ResolvedFirebase,
    ResolvedUrl, ServiceAccountUrl, UrlSource, DATABASE_URL_ENV,
};
pub use service_account::{ServiceAccount, DEFAULT_SERVICE_ACCOUNT_FILE};
