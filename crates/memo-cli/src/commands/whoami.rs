//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use memo_core::Gateway;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs) -> Result<()> {
    let session = storage::load_session()
        .await
        .context("Failed to load session")?
        .context("No active session. Run 'memo login' first.")?;

    if let Some(username) = &session.username {
        output::field("Username", username);
    }
    output::field("Backend", session.gateway.backend().as_str());

    Ok(())
}
