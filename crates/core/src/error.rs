//! Error types for speaker-notes extraction.
//!
//! Errors fall into two tiers. Fatal errors mean no useful output can be
//! produced and the run must stop. Recoverable errors are scoped to a single
//! notes entry; the entry is skipped and extraction carries on.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during speaker-notes extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// Command-line arguments were missing or invalid.
    #[error("{0}")]
    Argument(String),

    /// The input package could not be opened as a ZIP archive.
    #[error("Failed to open presentation '{}': {reason}", path.display())]
    ArchiveOpen { path: PathBuf, reason: String },

    /// The output text file could not be created.
    #[error("Failed to create output file '{}': {source}", path.display())]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to the output stream failed.
    #[error("Failed to write output: {0}")]
    OutputWrite(#[from] std::io::Error),

    /// A notes entry was found but its stream could not be opened.
    #[error("Failed to open entry '{entry}': {reason}")]
    EntryOpen { entry: String, reason: String },

    /// A notes entry held malformed XML.
    #[error("Failed to parse notes in '{entry}': {reason}")]
    NotesParse { entry: String, reason: String },
}

impl Error {
    /// Whether this error must abort the whole run.
    ///
    /// Per-entry failures return `false`: the caller logs them and moves on
    /// to the next notes entry.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::EntryOpen { .. } | Error::NotesParse { .. })
    }

    /// Name of the archive entry this error belongs to, if any.
    pub fn entry(&self) -> Option<&str> {
        match self {
            Error::EntryOpen { entry, .. } | Error::NotesParse { entry, .. } => {
                Some(entry.as_str())
            }
            _ => None,
        }
    }
}
