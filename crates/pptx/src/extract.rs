//! The extraction pipeline: locate notes entries, parse them, write blocks.

use crate::archive::NotesArchive;
use crate::parser::NotesParser;
use notes_core::{NotesDocument, NotesEntry, NotesFormatter, Result};
use std::io::{BufReader, Read, Seek, Write};

/// A notes entry that was skipped after a recoverable failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Full entry name.
    pub name: String,

    /// Why the entry was skipped.
    pub reason: String,
}

/// Summary of one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Total entries in the archive.
    pub archive_entries: usize,

    /// Notes entries written to the output, in output order.
    pub written: Vec<String>,

    /// Notes entries skipped after a recoverable failure.
    pub skipped: Vec<SkippedEntry>,
}

impl ExtractionReport {
    /// Number of notes entries found in the archive.
    pub fn notes_entries(&self) -> usize {
        self.written.len() + self.skipped.len()
    }
}

/// Drives notes extraction from an archive into a text sink.
#[derive(Debug, Clone, Default)]
pub struct NotesExtractor {
    parser: NotesParser,
    formatter: NotesFormatter,
}

impl NotesExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract every notes entry of `archive` into `out`.
    ///
    /// Entries are processed in archive order. An entry that cannot be opened
    /// or parsed is logged and skipped; only output write failures abort.
    pub fn extract<R: Read + Seek, W: Write>(
        &self,
        archive: &mut NotesArchive<R>,
        out: &mut W,
    ) -> Result<ExtractionReport> {
        let mut report = ExtractionReport {
            archive_entries: archive.entry_names().len(),
            ..Default::default()
        };

        for entry in archive.notes_entries() {
            log::debug!("Parsing {}", entry.name);

            match self.read_entry(archive, &entry) {
                Ok(document) => {
                    self.formatter.write_block(out, &entry, &document)?;
                    report.written.push(entry.name);
                }
                Err(e) if !e.is_fatal() => {
                    let name = e.entry().unwrap_or(&entry.name).to_string();
                    log::warn!("Skipping {}: {}", name, e);
                    report.skipped.push(SkippedEntry {
                        name,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        log::info!(
            "Extracted notes from {} of {} notes entries ({} archive entries)",
            report.written.len(),
            report.notes_entries(),
            report.archive_entries
        );

        Ok(report)
    }

    /// Open and parse one entry; the entry stream is closed on return.
    fn read_entry<R: Read + Seek>(
        &self,
        archive: &mut NotesArchive<R>,
        entry: &NotesEntry,
    ) -> Result<NotesDocument> {
        let stream = archive.open_entry(entry)?;
        self.parser.parse(BufReader::new(stream), &entry.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::tests::{build_zip, build_zip_with};
    use notes_core::Error;
    use std::io::{self, Cursor};
    use zip::CompressionMethod;

    fn notes_xml(paragraphs: &[&[&str]]) -> String {
        let mut body = String::new();
        for runs in paragraphs {
            body.push_str("<a:p>");
            for run in *runs {
                body.push_str(&format!("<a:r><a:rPr lang=\"ja-JP\"/><a:t>{}</a:t></a:r>", run));
            }
            body.push_str("</a:p>");
        }
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:notes xmlns:a="a" xmlns:p="p"><p:cSld><p:spTree><p:sp><p:txBody><a:bodyPr/>{}</p:txBody></p:sp></p:spTree></p:cSld></p:notes>"#,
            body
        )
    }

    fn run(entries: &[(&str, &str)]) -> (String, ExtractionReport) {
        let mut archive = NotesArchive::from_reader(build_zip(entries)).unwrap();
        let mut out = Vec::new();
        let report = NotesExtractor::new().extract(&mut archive, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), report)
    }

    #[test]
    fn test_hello_world_block() {
        let xml = notes_xml(&[&["Hello, ", "world!"], &[]]);
        let (out, report) = run(&[("ppt/notesSlides/notesSlide1.xml", &xml)]);

        assert_eq!(out, "ノートスライド notesSlide1.xml:\nHello, world!\n\n");
        assert_eq!(report.written, vec!["ppt/notesSlides/notesSlide1.xml"]);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_no_notes_entries_writes_nothing() {
        let (out, report) = run(&[
            ("[Content_Types].xml", "<Types/>"),
            ("ppt/slides/slide1.xml", "<p:sld/>"),
        ]);

        assert_eq!(out, "");
        assert_eq!(report.archive_entries, 2);
        assert_eq!(report.notes_entries(), 0);
    }

    #[test]
    fn test_archive_order_is_kept() {
        let ten = notes_xml(&[&["ten"]]);
        let two = notes_xml(&[&["two"]]);
        let (out, _) = run(&[
            ("ppt/notesSlides/notesSlide10.xml", &ten),
            ("ppt/notesSlides/notesSlide2.xml", &two),
        ]);

        assert_eq!(
            out,
            "ノートスライド notesSlide10.xml:\nten\n\nノートスライド notesSlide2.xml:\ntwo\n\n"
        );
    }

    #[test]
    fn test_empty_document_writes_header_and_blank_line() {
        let xml = notes_xml(&[&[""], &[]]);
        let (out, _) = run(&[("ppt/notesSlides/notesSlide3.xml", &xml)]);

        assert_eq!(out, "ノートスライド notesSlide3.xml:\n\n");
    }

    #[test]
    fn test_malformed_entry_is_skipped() {
        let good = notes_xml(&[&["kept"]]);
        let (out, report) = run(&[
            ("ppt/notesSlides/notesSlide1.xml", "<p:notes><p:cSld></p:notes>"),
            ("ppt/notesSlides/notesSlide2.xml", &good),
        ]);

        assert_eq!(out, "ノートスライド notesSlide2.xml:\nkept\n\n");
        assert_eq!(report.written, vec!["ppt/notesSlides/notesSlide2.xml"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].name, "ppt/notesSlides/notesSlide1.xml");
        assert!(report.skipped[0].reason.contains("notesSlide1.xml"));
    }

    #[test]
    fn test_non_notes_entries_are_never_parsed() {
        let good = notes_xml(&[&["only"]]);
        let (out, report) = run(&[
            ("ppt/slides/slide1.xml", "<broken"),
            ("ppt/notesSlides/notesMaster1.xml", "<broken"),
            ("ppt/notesSlides/_rels/notesSlide1.xml.rels", "<broken"),
            ("ppt/notesSlides/notesSlide1.xml", &good),
        ]);

        assert_eq!(out, "ノートスライド notesSlide1.xml:\nonly\n\n");
        assert!(report.skipped.is_empty());
    }

    /// Mark the first stored entry's compression method as unsupported in
    /// both its local header and its central-directory record.
    fn with_unsupported_compression(mut bytes: Vec<u8>) -> Vec<u8> {
        const UNSUPPORTED_METHOD: [u8; 2] = 99u16.to_le_bytes();

        assert_eq!(&bytes[..4], b"PK\x03\x04");
        bytes[8..10].copy_from_slice(&UNSUPPORTED_METHOD);

        let central = bytes
            .windows(4)
            .position(|w| w == b"PK\x01\x02")
            .unwrap();
        bytes[central + 10..central + 12].copy_from_slice(&UNSUPPORTED_METHOD);
        bytes
    }

    #[test]
    fn test_unopenable_entry_is_skipped() {
        let good = notes_xml(&[&["still here"]]);
        let zip = build_zip_with(
            &[
                ("ppt/notesSlides/notesSlide1.xml", "<p:notes/>"),
                ("ppt/notesSlides/notesSlide2.xml", &good),
            ],
            CompressionMethod::Stored,
        );
        let bytes = with_unsupported_compression(zip.into_inner());

        let mut archive = NotesArchive::from_reader(Cursor::new(bytes)).unwrap();
        let mut out = Vec::new();
        let report = NotesExtractor::new().extract(&mut archive, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ノートスライド notesSlide2.xml:\nstill here\n\n"
        );
        assert_eq!(report.written, vec!["ppt/notesSlides/notesSlide2.xml"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].name, "ppt/notesSlides/notesSlide1.xml");
        assert!(report.skipped[0].reason.starts_with("Failed to open entry"));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_fatal() {
        let xml = notes_xml(&[&["text"]]);
        let zip = build_zip(&[("ppt/notesSlides/notesSlide1.xml", &xml)]);
        let mut archive = NotesArchive::from_reader(zip).unwrap();

        let err = NotesExtractor::new()
            .extract(&mut archive, &mut FailingWriter)
            .unwrap_err();
        assert!(matches!(err, Error::OutputWrite(_)));
        assert!(err.is_fatal());
    }
}
