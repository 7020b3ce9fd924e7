//! Hash command - derive the token for an identifier locally

use anyhow::Result;
use pushkit_lib::protocol::{hash_identifier, normalize_identifier, TOKEN_LENGTH};

use crate::ui;

#[tracing::instrument(skip(identifier))]
pub async fn run(identifier: &str, verbose: bool) -> Result<()> {
    ui::header("Identifier Token");

    let token = hash_identifier(identifier)?;
    ui::key_value("Token", token.as_str());

    if verbose {
        ui::key_value("Normalized", &normalize_identifier(identifier)?);
        ui::key_value("Length", &format!("{} hex chars ({} bits)", TOKEN_LENGTH, TOKEN_LENGTH * 4));
    }

    Ok(())
}
