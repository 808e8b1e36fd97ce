//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs) -> Result<()> {
    if storage::clear_session().context("Failed to clear session")? {
        output::success("Signed out");
    } else {
        eprintln!("{}", "No active session.".dimmed());
    }

    Ok(())
}
