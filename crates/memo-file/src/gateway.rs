//! File-backed gateway implementation.

use std::path::Path;

use async_trait::async_trait;
use tracing::instrument;
use url::Url;

use memo_core::error::{Error, InvalidInputError};
use memo_core::{BackendUrl, Draft, Gateway, ListNotesOutput, Note, NoteId, ObjectKey, Result};

use crate::store::FileStore;

/// Filesystem-backed gateway implementation.
///
/// No authentication: the account is whoever can read the directory.
#[derive(Debug, Clone)]
pub struct FileGateway {
    store: FileStore,
    backend: BackendUrl,
}

impl FileGateway {
    /// Create a file-backed gateway rooted at the given directory.
    ///
    /// The directory does not have to exist yet; it is created on the
    /// first write.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = std::path::absolute(root.as_ref()).map_err(|e| {
            Error::InvalidInput(InvalidInputError::Other {
                message: format!("cannot resolve root directory: {}", e),
            })
        })?;

        let url = Url::from_file_path(&root).map_err(|_| {
            Error::InvalidInput(InvalidInputError::BackendUrl {
                value: root.display().to_string(),
                reason: "not a valid file path".to_string(),
            })
        })?;

        Ok(Self {
            store: FileStore::new(root),
            backend: BackendUrl::new(url.as_str())?,
        })
    }

    /// Create a file-backed gateway from a `file://` backend URL.
    pub fn from_backend(backend: BackendUrl) -> Result<Self> {
        let root = backend.to_file_path().ok_or_else(|| {
            Error::InvalidInput(InvalidInputError::BackendUrl {
                value: backend.to_string(),
                reason: "not a file:// URL".to_string(),
            })
        })?;

        Ok(Self {
            store: FileStore::new(root),
            backend,
        })
    }

    /// Access the underlying file store.
    pub fn store(&self) -> &FileStore {
        &self.store
    }
}

#[async_trait]
impl Gateway for FileGateway {
    fn backend(&self) -> &BackendUrl {
        &self.backend
    }

    #[instrument(skip(self))]
    async fn list_notes(&self) -> Result<ListNotesOutput> {
        self.store.list_notes()
    }

    #[instrument(skip(self, draft))]
    async fn create_note(&self, draft: &Draft) -> Result<Note> {
        self.store.create_note(draft)
    }

    #[instrument(skip(self))]
    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        self.store.delete_note(id)
    }

    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    async fn put_object(&self, key: &ObjectKey, bytes: Vec<u8>) -> Result<()> {
        self.store.put_object(key, &bytes)
    }

    #[instrument(skip(self))]
    async fn get_object_url(&self, key: &ObjectKey) -> Result<String> {
        self.store.object_url(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memo_core::NoteStore;
    use tempfile::TempDir;

    #[tokio::test]
    async fn store_drives_file_gateway_end_to_end() {
        let dir = TempDir::new().unwrap();
        let gateway = FileGateway::new(dir.path()).unwrap();
        let store = NoteStore::new(gateway);

        store.update_draft(|d| {
            d.name = "Trip".into();
            d.description = "pack list".into();
        });
        let card = store.submit().await.unwrap();
        assert_eq!(card.note.name, "Trip");

        store.refresh().await.unwrap();
        let snapshot = store.snapshot();
        assert_eq!(snapshot.cards.len(), 1);

        store.remove(&card.note.id).await.unwrap();
        assert!(store.snapshot().cards.is_empty());
    }

    #[tokio::test]
    async fn attach_file_resolves_local_url() {
        let dir = TempDir::new().unwrap();
        let gateway = FileGateway::new(dir.path()).unwrap();
        let store = NoteStore::new(gateway);

        store.update_draft(|d| {
            d.name = "Photo".into();
            d.description = "cat".into();
        });
        store.attach_file("cat.png", vec![0x89, 0x50]).await.unwrap();

        let card = store.submit().await.unwrap();
        let url = card.image_url.unwrap();
        assert!(url.starts_with("file://"));
        assert!(url.ends_with("/objects/cat.png"));
    }

    #[tokio::test]
    async fn from_backend_rejects_network_url() {
        let backend = BackendUrl::new("https://api.example.com").unwrap();
        assert!(FileGateway::from_backend(backend).is_err());
    }
}
