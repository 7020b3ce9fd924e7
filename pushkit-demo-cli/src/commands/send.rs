//! Send command - send a custom notification

use std::collections::HashMap;

use anyhow::{bail, Result};

use crate::api::ApiClient;
use crate::ui;

/// Parse a `key=value` pair for `--data`.
pub fn parse_key_value(raw: &str) -> Result<(String, String)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("expected key=value, got '{}'", raw);
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("empty key in '{}'", raw);
    }
    Ok((key.to_string(), value.trim().to_string()))
}

#[tracing::instrument(skip(api, body, data))]
pub async fn run(
    api: &ApiClient,
    user_id: &str,
    title: &str,
    body: &str,
    data: Vec<(String, String)>,
    verbose: bool,
) -> Result<()> {
    let data: HashMap<String, String> = data.into_iter().collect();

    if verbose && !data.is_empty() {
        for (key, value) in &data {
            ui::key_value(key, value);
        }
    }

    let spinner = ui::spinner("Sending notification...");
    let result = api
        .send(user_id, title, body, (!data.is_empty()).then_some(&data))
        .await;
    spinner.finish_and_clear();

    let id = result?;
    ui::success(&format!("Notification sent to {}", user_id));
    ui::key_value("Notification ID", &id);

    Ok(())
}
