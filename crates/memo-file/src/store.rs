//! Filesystem storage for the file-backed gateway.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, instrument};
use url::Url;
use uuid::Uuid;

use memo_core::Result;
use memo_core::error::{Error, InvalidInputError, ProtocolError, TransportError};
use memo_core::{Draft, ListNotesOutput, Note, NoteId, ObjectKey};

fn map_io(err: std::io::Error) -> Error {
    Error::Transport(TransportError::Http {
        message: format!("IO error: {}", err),
    })
}

fn map_json(err: serde_json::Error) -> Error {
    Error::InvalidInput(InvalidInputError::Other {
        message: err.to_string(),
    })
}

/// Filesystem-backed storage for notes and attached objects.
///
/// Notes live at `{root}/notes/{id}.json`, objects at
/// `{root}/objects/{key}`. Writes go through a temp file and rename so
/// a crash never leaves a half-written note behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a new file store at the given root directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn notes_dir(&self) -> PathBuf {
        self.root.join("notes")
    }

    fn objects_dir(&self) -> PathBuf {
        self.root.join("objects")
    }

    fn note_path(&self, id: &NoteId) -> PathBuf {
        self.notes_dir().join(format!("{}.json", id))
    }

    /// Path for an object. Key segments were validated as relative and
    /// dot-free, so joining under the objects dir cannot escape it.
    pub(crate) fn object_path(&self, key: &ObjectKey) -> PathBuf {
        self.objects_dir().join(key.as_str())
    }

    /// Generate a note id that sorts by creation time.
    fn generate_note_id() -> Result<NoteId> {
        let micros = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_micros();
        let uuid_str = Uuid::new_v4().to_string().replace("-", "");
        NoteId::new(format!("{:x}-{}", micros, &uuid_str[..8]))
    }

    fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(map_io)?;
        }
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents).map_err(map_io)?;
        fs::rename(&temp_path, path).map_err(map_io)?;
        Ok(())
    }

    // ========================================================================
    // Note Operations
    // ========================================================================

    #[instrument(skip(self, draft))]
    pub fn create_note(&self, draft: &Draft) -> Result<Note> {
        draft.validate()?;

        let note = Note {
            id: Self::generate_note_id()?,
            name: draft.name.clone(),
            description: draft.description.clone(),
            image_key: draft.image_key.clone(),
            created_at: Some(Utc::now()),
        };

        let content = serde_json::to_string_pretty(&note).map_err(map_json)?;
        Self::write_atomic(&self.note_path(&note.id), content.as_bytes())?;

        debug!(id = %note.id, "Created note");

        Ok(note)
    }

    #[instrument(skip(self))]
    pub fn list_notes(&self) -> Result<ListNotesOutput> {
        let dir = self.notes_dir();

        let mut notes = Vec::new();

        if dir.exists() {
            let mut entries: Vec<_> = fs::read_dir(&dir)
                .map_err(map_io)?
                .filter_map(|e| e.ok())
                .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
                .collect();

            // Ids sort by creation time, so filename order is list order.
            entries.sort_by_key(|e| e.file_name());

            for entry in entries {
                let content = fs::read_to_string(entry.path()).map_err(map_io)?;
                if let Ok(note) = serde_json::from_str::<Note>(&content) {
                    notes.push(note);
                }
            }
        }

        // The whole directory fits in one page.
        Ok(ListNotesOutput {
            notes,
            cursor: None,
        })
    }

    #[instrument(skip(self))]
    pub fn delete_note(&self, id: &NoteId) -> Result<()> {
        let path = self.note_path(id);

        if path.exists() {
            fs::remove_file(&path).map_err(map_io)?;
            debug!(id = %id, "Deleted note");
        }

        Ok(())
    }

    // ========================================================================
    // Object Operations
    // ========================================================================

    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn put_object(&self, key: &ObjectKey, bytes: &[u8]) -> Result<()> {
        Self::write_atomic(&self.object_path(key), bytes)?;
        debug!(key = %key, "Stored object");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn object_url(&self, key: &ObjectKey) -> Result<String> {
        let path = self.object_path(key);

        if !path.exists() {
            return Err(Error::Protocol(ProtocolError::not_found(format!(
                "Object {} not found",
                key
            ))));
        }

        let url = Url::from_file_path(&path).map_err(|_| {
            Error::InvalidInput(InvalidInputError::Other {
                message: format!("object path {} is not absolute", path.display()),
            })
        })?;

        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn create_stamps_id_and_created_at() {
        let (_dir, store) = store();
        let note = store.create_note(&Draft::new("Groceries", "milk")).unwrap();

        assert!(!note.id.as_str().is_empty());
        assert!(note.created_at.is_some());
        assert!(store.root().join("notes").join(format!("{}.json", note.id)).exists());
    }

    #[test]
    fn create_rejects_empty_draft() {
        let (_dir, store) = store();
        let err = store.create_note(&Draft::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::Draft { .. })
        ));
    }

    #[test]
    fn list_returns_notes_in_creation_order() {
        let (_dir, store) = store();
        let a = store.create_note(&Draft::new("a", "1")).unwrap();
        let b = store.create_note(&Draft::new("b", "2")).unwrap();

        let listing = store.list_notes().unwrap();
        let ids: Vec<_> = listing.notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec![a.id.as_str(), b.id.as_str()]);
        assert!(listing.cursor.is_none());
    }

    #[test]
    fn list_on_fresh_root_is_empty() {
        let (_dir, store) = store();
        assert!(store.list_notes().unwrap().notes.is_empty());
    }

    #[test]
    fn delete_is_idempotent() {
        let (_dir, store) = store();
        let note = store.create_note(&Draft::new("a", "1")).unwrap();

        store.delete_note(&note.id).unwrap();
        store.delete_note(&note.id).unwrap();

        assert!(store.list_notes().unwrap().notes.is_empty());
    }

    #[test]
    fn object_round_trip() {
        let (_dir, store) = store();
        let key = ObjectKey::new("photos/cat.png").unwrap();

        store.put_object(&key, b"png bytes").unwrap();

        let url = store.object_url(&key).unwrap();
        assert!(url.starts_with("file://"));
        assert!(url.ends_with("/objects/photos/cat.png"));
    }

    #[test]
    fn missing_object_is_not_found() {
        let (_dir, store) = store();
        let key = ObjectKey::new("nope.png").unwrap();

        match store.object_url(&key).unwrap_err() {
            Error::Protocol(p) => assert!(p.is_not_found()),
            other => panic!("expected protocol error, got {other:?}"),
        }
    }
}
