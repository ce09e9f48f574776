//! Plain-text notes output.
//!
//! Each notes entry becomes one block: a header naming the entry, one line
//! per non-empty paragraph, then a blank separator line.

use crate::error::Result;
use crate::types::{NotesDocument, NotesEntry};
use std::io::Write;

/// Label written before each entry's base file name.
pub const HEADER_LABEL: &str = "ノートスライド";

/// Formatter for the notes text file.
#[derive(Debug, Clone, Default)]
pub struct NotesFormatter;

impl NotesFormatter {
    /// Create a new formatter.
    pub fn new() -> Self {
        Self
    }

    /// Header line for an entry, without the trailing newline.
    pub fn header(&self, entry: &NotesEntry) -> String {
        format!("{} {}:", HEADER_LABEL, entry.base_name())
    }

    /// Format one entry's block.
    ///
    /// # Example output
    /// ```text
    /// ノートスライド notesSlide1.xml:
    /// Hello, world!
    ///
    /// ```
    pub fn format(&self, entry: &NotesEntry, document: &NotesDocument) -> String {
        let mut block = self.header(entry);
        block.push('\n');
        for line in document.lines() {
            block.push_str(&line);
            block.push('\n');
        }
        block.push('\n');
        block
    }

    /// Write one entry's block to `out`.
    pub fn write_block<W: Write>(
        &self,
        out: &mut W,
        entry: &NotesEntry,
        document: &NotesDocument,
    ) -> Result<()> {
        out.write_all(self.format(entry, document).as_bytes())?;
        Ok(())
    }
}
