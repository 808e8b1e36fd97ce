//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use memo_core::{BackendUrl, Credentials, Gateway};
use memo_file::FileGateway;
use memo_graphql::GraphqlGateway;

use crate::output;
use crate::session::CliGateway;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Backend base URL (https://..., or file:// for a local store)
    #[arg(long)]
    pub backend: String,

    /// Account username
    #[arg(long)]
    pub username: Option<String>,

    /// Account password
    #[arg(long)]
    pub password: Option<String>,
}

pub async fn run(args: LoginArgs) -> Result<()> {
    let backend = BackendUrl::new(&args.backend).context("Invalid backend URL")?;

    let (gateway, username) = if backend.is_local() {
        // File backends have no accounts; just record the backend.
        let gateway = FileGateway::from_backend(backend)?;
        (CliGateway::File(gateway), None)
    } else {
        let username = args
            .username
            .context("--username is required for network backends")?;
        let password = args
            .password
            .context("--password is required for network backends")?;

        eprintln!("{}", "Signing in...".dimmed());

        let credentials = Credentials::new(&username, password);
        let gateway = GraphqlGateway::sign_in(backend, credentials)
            .await
            .context("Failed to sign in")?;

        (CliGateway::Graphql(gateway), Some(username))
    };

    storage::save_session(&gateway, username.as_deref()).context("Failed to save session")?;

    output::success("Signed in successfully");
    println!();
    if let Some(username) = &username {
        output::field("Username", username);
    }
    output::field("Backend", gateway.backend().as_str());

    Ok(())
}
