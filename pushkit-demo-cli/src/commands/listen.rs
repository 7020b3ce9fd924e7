//! Listen command - follow the newest notification on a listen URL

use anyhow::{Context, Result};
use futures::StreamExt;
use pushkit_lib::protocol::split_listen_url;
use pushkit_lib::realtime::FirebaseListener;
use pushkit_lib::PushkitError;

use crate::ui;

#[tracing::instrument(skip(auth_token))]
pub async fn run(
    listen_url: &str,
    auth_token: Option<&str>,
    count: Option<usize>,
    verbose: bool,
) -> Result<()> {
    let (database_url, path) = split_listen_url(listen_url)?;

    ui::header("Listening for Notifications");
    ui::key_value("Database", &database_url);
    ui::key_value("Path", &path);

    let mut listener = FirebaseListener::new()?;
    if let Some(token) = auth_token {
        listener = listener.with_auth_token(token);
    }

    let spinner = ui::spinner("Connecting...");
    let result = listener.notifications(listen_url).await;
    spinner.finish_and_clear();
    let mut notifications = result.context("failed to open realtime stream")?;

    ui::success("Connected, press Ctrl+C to stop");
    ui::separator();

    let mut received = 0usize;
    loop {
        tokio::select! {
            item = notifications.next() => match item {
                Some(Ok(notification)) => {
                    ui::notification(&notification);
                    received += 1;
                    if count.is_some_and(|limit| received >= limit) {
                        break;
                    }
                }
                Some(Err(PushkitError::StreamClosed(reason))) => {
                    ui::warning(&format!("Stream closed by server: {}", reason));
                    break;
                }
                Some(Err(e)) => return Err(e.into()),
                None => {
                    if verbose {
                        ui::info("Server ended the stream");
                    }
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                println!();
                ui::info("Stopped");
                break;
            }
        }
    }

    tracing::debug!(received, "listener finished");
    Ok(())
}
