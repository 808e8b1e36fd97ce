//! Note domain types.
//!
//! [`Note`] is the persisted record shape, [`NoteCard`] its display
//! form with a resolved image URL, and [`Draft`] the form-in-progress.

mod draft;
mod types;

pub use draft::Draft;
pub use types::{ListNotesOutput, Note, NoteCard};
