//! The unsaved, in-progress form state.

use crate::error::{Error, InvalidInputError};
use crate::types::ObjectKey;

/// The mutable form-in-progress.
///
/// Same shape as a [`Note`](crate::Note) minus the id, which the
/// gateway assigns on creation. Overwritten field-by-field as the user
/// edits; reset to empty after a successful submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    /// Note title; required before submission.
    pub name: String,

    /// Note body text; required before submission.
    pub description: String,

    /// Storage key of an attached image, set by the upload flow.
    pub image_key: Option<ObjectKey>,
}

impl Draft {
    /// A draft with both text fields filled in.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image_key: None,
        }
    }

    /// Check the presence invariants required for submission.
    ///
    /// Both `name` and `description` must be non-empty. The first
    /// missing field is reported.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.is_empty() {
            return Err(InvalidInputError::Draft { field: "name" }.into());
        }
        if self.description.is_empty() {
            return Err(InvalidInputError::Draft { field: "description" }.into());
        }
        Ok(())
    }

    /// Reset to the empty initial value.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_fail_validation() {
        assert!(Draft::default().validate().is_err());
        assert!(Draft::new("", "body").validate().is_err());
        assert!(Draft::new("title", "").validate().is_err());
    }

    #[test]
    fn filled_draft_validates() {
        assert!(Draft::new("title", "body").validate().is_ok());
    }

    #[test]
    fn clear_resets_everything() {
        let mut draft = Draft::new("title", "body");
        draft.image_key = Some(ObjectKey::new("cover.png").unwrap());
        draft.clear();
        assert_eq!(draft, Draft::default());
    }
}
