//! Validated core types.
//!
//! These types enforce their invariants at construction time, so an
//! invalid id, key, or URL cannot flow further into the system.

mod backend_url;
mod note_id;
mod object_key;

pub use backend_url::BackendUrl;
pub use note_id::NoteId;
pub use object_key::ObjectKey;
