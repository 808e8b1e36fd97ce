//! memo-core - Core types, gateway seam, and view-state store for the
//! memo note client.
//!
//! This crate defines the domain model (notes, drafts, display cards),
//! the [`Gateway`] trait behind which all remote persistence lives, and
//! [`NoteStore`], the single owner of client-side view state.

pub mod credentials;
pub mod error;
pub mod note;
pub mod store;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use note::{Draft, ListNotesOutput, Note, NoteCard};
pub use store::{NoteStore, Page, Refresh, Snapshot, page_count, page_slice};
pub use tokens::{AccessToken, RefreshToken};
pub use traits::Gateway;
pub use types::{BackendUrl, NoteId, ObjectKey};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
