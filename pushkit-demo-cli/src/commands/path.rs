//! Path command - show the storage path and listen URL for an identifier

use anyhow::Result;
use pushkit_lib::protocol::{build_listen_url, build_notification_path};

use crate::ui;

pub async fn run(identifier: &str, base_url: Option<&str>, _verbose: bool) -> Result<()> {
    ui::header("Notification Path");

    ui::key_value("Path", &build_notification_path(identifier)?);

    match base_url {
        Some(base) => ui::key_value("Listen URL", &build_listen_url(base, identifier)?),
        None => ui::info("Pass --base-url to build a listen URL"),
    }

    Ok(())
}
