//! Status command - check that the server answers

use anyhow::Result;

use crate::api::ApiClient;
use crate::ui;

pub async fn run(api: &ApiClient, _verbose: bool) -> Result<()> {
    ui::header("API Status");
    ui::key_value("Server", api.base_url());

    let spinner = ui::spinner("Contacting server...");
    let result = api.status().await;
    spinner.finish_and_clear();

    match result {
        Ok(status) => {
            ui::success(&status.message);
            ui::key_value("Version", &status.version);
            ui::key_value("Server time", &status.timestamp);
            Ok(())
        }
        Err(e) => {
            ui::error("Server unreachable");
            Err(e)
        }
    }
}
