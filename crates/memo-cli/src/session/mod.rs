//! Session persistence and gateway selection.

pub mod storage;
mod types;

pub use types::CliGateway;
