//! PPTX (Office Open XML) backend for speaker-notes extraction.
//!
//! A .pptx file is a ZIP archive of XML parts. Notes slides live under
//! `ppt/notesSlides/`; this crate opens the archive, finds those parts, and
//! parses their text into [`notes_core::NotesDocument`]s.

pub mod archive;
pub mod extract;
pub mod parser;

pub use archive::NotesArchive;
pub use extract::{ExtractionReport, NotesExtractor, SkippedEntry};
pub use parser::NotesParser;
