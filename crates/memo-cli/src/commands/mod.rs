//! Subcommand implementations.

pub mod create;
pub mod delete;
pub mod list;
pub mod login;
pub mod logout;
pub mod whoami;
