//! Remote data gateway trait.

use async_trait::async_trait;

use crate::Result;
use crate::note::{Draft, ListNotesOutput, Note};
use crate::types::{BackendUrl, NoteId, ObjectKey};

/// The remote data gateway: query/mutation access to the note
/// collection plus key-addressed object storage for binary assets.
///
/// This is the only seam through which the view-state store touches
/// persistence; everything behind it (wire format, auth, storage
/// engine) is the implementation's concern.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Returns the backend URL for this gateway.
    fn backend(&self) -> &BackendUrl;

    /// List all notes in backend order.
    async fn list_notes(&self) -> Result<ListNotesOutput>;

    /// Persist a draft; returns the stored note with its assigned id.
    async fn create_note(&self, draft: &Draft) -> Result<Note>;

    /// Delete a note by id.
    ///
    /// Implementations may treat a missing id as success or report a
    /// not-found protocol error; the store accepts either (deletion is
    /// idempotent from the caller's perspective).
    async fn delete_note(&self, id: &NoteId) -> Result<()>;

    /// Upload raw bytes under the given key, overwriting any existing
    /// object.
    async fn put_object(&self, key: &ObjectKey, bytes: Vec<u8>) -> Result<()>;

    /// Resolve a stored object key to a temporary, displayable URL.
    async fn get_object_url(&self, key: &ObjectKey) -> Result<String>;
}
