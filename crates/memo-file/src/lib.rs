//! memo-file - Filesystem-backed notes gateway.
//!
//! Stores notes as JSON files and attached objects as plain files under
//! a root directory, so the client works without any network backend.

mod gateway;
mod store;

pub use gateway::FileGateway;
pub use store::FileStore;
