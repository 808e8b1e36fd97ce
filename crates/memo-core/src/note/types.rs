//! Persisted note and display-card types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{NoteId, ObjectKey};

/// A persisted note record.
///
/// A `Note` only exists once the gateway has stored it and assigned its
/// id; the unsaved form state is a [`Draft`](crate::Draft).
///
/// The `image` field on the wire holds the storage key of the uploaded
/// asset. Resolving that key to a displayable URL is the view-state
/// store's job and the result lives on [`NoteCard`], never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Gateway-assigned identifier.
    pub id: NoteId,

    /// Note title.
    pub name: String,

    /// Note body text.
    pub description: String,

    /// Storage key of the attached image, if any.
    #[serde(rename = "image", default, skip_serializing_if = "Option::is_none")]
    pub image_key: Option<ObjectKey>,

    /// Creation timestamp, when the backend reports one.
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// The display form of a note: the record plus its resolved image URL.
///
/// `image_url` is a temporary, directly displayable URL produced from
/// `note.image_key`. Keeping the key and the URL in separate fields
/// removes any ambiguity about which one a caller is holding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteCard {
    /// The persisted record.
    #[serde(flatten)]
    pub note: Note,

    /// Resolved, time-limited URL for the attached image, if any.
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NoteCard {
    /// A card for a note without a resolved image.
    pub fn unresolved(note: Note) -> Self {
        Self {
            note,
            image_url: None,
        }
    }
}

/// Output from listing notes.
#[derive(Debug, Clone)]
pub struct ListNotesOutput {
    /// The notes in this page, in backend order.
    pub notes: Vec<Note>,

    /// Cursor for the next page, if more notes exist.
    pub cursor: Option<String>,
}
