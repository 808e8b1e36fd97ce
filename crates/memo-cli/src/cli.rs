//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{create, delete, list, login, logout, whoami};

/// Command-line client for the memo note service.
#[derive(Parser, Debug)]
#[command(name = "memo")]
#[command(author, version = env!("MEMO_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in to a backend and store the session
    Login(login::LoginArgs),

    /// Clear the stored session
    Logout(logout::LogoutArgs),

    /// Display the active session
    Whoami(whoami::WhoamiArgs),

    /// List notes
    List(list::ListArgs),

    /// Create a note
    Create(create::CreateArgs),

    /// Delete a note
    Delete(delete::DeleteArgs),
}
