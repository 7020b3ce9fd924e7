//! Send-random command - ask the server for a random notification

use anyhow::Result;

use crate::api::ApiClient;
use crate::ui;

pub async fn run(api: &ApiClient, user_id: &str, _verbose: bool) -> Result<()> {
    let spinner = ui::spinner("Sending random notification...");
    let result = api.send_random(user_id).await;
    spinner.finish_and_clear();

    result?;
    ui::success(&format!("Random notification sent to {}", user_id));
    ui::info("The content is only visible to listeners");

    Ok(())
}
