//! Inbox command - list stored notifications for a user

use anyhow::Result;

use crate::api::ApiClient;
use crate::ui;

pub async fn run(api: &ApiClient, user_id: &str, limit: Option<usize>, _verbose: bool) -> Result<()> {
    ui::header(&format!("Notifications for {}", user_id));

    let spinner = ui::spinner("Loading notifications...");
    let result = api.notifications(user_id).await;
    spinner.finish_and_clear();

    let notifications = result?;
    if notifications.is_empty() {
        ui::info("No notifications yet");
        return Ok(());
    }

    let shown = limit.unwrap_or(notifications.len()).min(notifications.len());
    ui::success(&format!("{} notification(s), newest first", notifications.len()));
    ui::separator();
    for notification in notifications.iter().take(shown) {
        ui::notification(notification);
    }
    if shown < notifications.len() {
        ui::separator();
        ui::info(&format!("{} older notification(s) not shown", notifications.len() - shown));
    }

    Ok(())
}
