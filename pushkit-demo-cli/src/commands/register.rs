//! Register command - register a user and print the listen URL

use anyhow::Result;

use crate::api::ApiClient;
use crate::ui;

#[tracing::instrument(skip(api))]
pub async fn run(api: &ApiClient, user_id: &str, verbose: bool) -> Result<()> {
    ui::header("Register User");

    let spinner = ui::spinner("Registering...");
    let result = api.register(user_id).await;
    spinner.finish_and_clear();

    let registered = result?;
    ui::success(&registered.message);
    ui::key_value("User ID", &registered.user_id);
    ui::key_value("Listen URL", &registered.listen_url);

    if verbose {
        tracing::debug!(listen_url = %registered.listen_url, "registered");
    }

    println!();
    ui::info(&format!(
        "Run 'pushkit-demo listen {}' to follow new notifications",
        registered.listen_url
    ));

    Ok(())
}
