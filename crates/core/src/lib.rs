//! Core domain types, error taxonomy, and plain-text formatting
//! for speaker-notes extraction.

pub mod error;
pub mod format;
pub mod locate;
pub mod types;

pub use error::{Error, Result};
pub use format::NotesFormatter;
pub use locate::{is_notes_slide, NOTES_SLIDE_PREFIX, NOTES_SLIDE_SUFFIX};
pub use types::{NotesDocument, NotesEntry, Paragraph, TextRun};
