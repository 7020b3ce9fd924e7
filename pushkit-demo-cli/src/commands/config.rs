//! Config command - show the Firebase settings the server advertises

use anyhow::Result;

use crate::api::ApiClient;
use crate::ui;

pub async fn run(api: &ApiClient, json: bool, _verbose: bool) -> Result<()> {
    let config = api.firebase_config().await?;

    if json {
        ui::json(&serde_json::to_value(&config)?);
        return Ok(());
    }

    ui::header("Firebase Configuration");
    ui::key_value("Project ID", &config.project_id);
    ui::key_value("Database URL", &config.database_url);

    Ok(())
}
