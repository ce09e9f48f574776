//! Notes-slide XML parser.
//!
//! Decodes the whole `p:notes` part into a typed tree mirroring the PresentationML
//! schema, then reads paragraphs from every shape's text body in document
//! order. Namespace prefixes are ignored and only direct children count at
//! each level, so runs inside group shapes, fields (`a:fld`) and line breaks
//! (`a:br`) are not collected. Unknown elements and attributes are skipped.

use notes_core::{Error, NotesDocument, Paragraph, Result, TextRun};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

/// Element path from the document root down to a run's text node.
const RUN_TEXT_PATH: [&[u8]; 8] = [
    b"notes", b"cSld", b"spTree", b"sp", b"txBody", b"p", b"r", b"t",
];

/// Depth of each container on [`RUN_TEXT_PATH`].
mod depth {
    pub const SHAPE: usize = 4;
    pub const TEXT_BODY: usize = 5;
    pub const PARAGRAPH: usize = 6;
    pub const RUN: usize = 7;
    pub const TEXT: usize = 8;
}

/// Parser for notes-slide parts.
#[derive(Debug, Clone, Default)]
pub struct NotesParser;

impl NotesParser {
    /// Create a new notes parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse one notes-slide payload.
    ///
    /// `entry` names the archive entry and is carried in any error.
    pub fn parse<R: BufRead>(&self, reader: R, entry: &str) -> Result<NotesDocument> {
        let slide = self.decode(reader).map_err(|reason| Error::NotesParse {
            entry: entry.to_string(),
            reason,
        })?;
        Ok(slide.into_document())
    }

    fn decode<R: BufRead>(&self, source: R) -> std::result::Result<NotesSlide, String> {
        let mut reader = Reader::from_reader(source);
        reader.trim_text(false);
        reader.expand_empty_elements(true);

        let mut slide = NotesSlide::default();
        let mut stack: Vec<Vec<u8>> = Vec::new();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| at_position(&reader, e))?;

            // Text is decoded everywhere so malformed content fails even off the run path.
            match event {
                Event::Start(ref e) => {
                    validate_start(&reader, e).map_err(|err| at_position(&reader, err))?;
                    stack.push(local_name(e.name().as_ref()).to_vec());
                    if on_run_text_path(&stack) {
                        slide.open(stack.len());
                    }
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Text(ref e) => {
                    let text = e.unescape().map_err(|err| at_position(&reader, err))?;
                    if in_run_text(&stack) {
                        slide.push_text(&text);
                    }
                }
                Event::CData(ref e) => {
                    let text = reader
                        .decoder()
                        .decode(e)
                        .map_err(|err| at_position(&reader, err))?;
                    if in_run_text(&stack) {
                        slide.push_text(&text);
                    }
                }
                Event::Eof => {
                    if let Some(open) = stack.last() {
                        return Err(format!(
                            "unexpected end of document inside <{}>",
                            String::from_utf8_lossy(open)
                        ));
                    }
                    break;
                }
                _ => {}
            }
        }

        Ok(slide)
    }
}

/// Check that an element's name and attribute values are well formed.
fn validate_start<R>(reader: &Reader<R>, start: &BytesStart) -> quick_xml::Result<()> {
    reader.decoder().decode(start.name().as_ref())?;

    let mut attributes = start.attributes();
    attributes.with_checks(true);
    for attribute in attributes {
        attribute?.decode_and_unescape_value(reader)?;
    }
    Ok(())
}

fn at_position<R>(reader: &Reader<R>, err: quick_xml::Error) -> String {
    format!("at byte {}: {}", reader.buffer_position(), err)
}

/// Root of a notes-slide part (`p:notes`).
#[derive(Debug, Default)]
struct NotesSlide {
    /// `p:cSld/p:spTree`
    shape_tree: Vec<Shape>,
}

/// A shape (`p:sp`) that may hold a text body.
#[derive(Debug, Default)]
struct Shape {
    text_body: Option<TextBody>,
}

/// A text body (`p:txBody`).
#[derive(Debug, Default)]
struct TextBody {
    paragraphs: Vec<Paragraph>,
}

impl NotesSlide {
    /// Open the container that starts at `level` on the run-text path.
    fn open(&mut self, level: usize) {
        match level {
            depth::SHAPE => self.shape_tree.push(Shape::default()),
            depth::TEXT_BODY => {
                if let Some(shape) = self.shape_tree.last_mut() {
                    shape.text_body.get_or_insert_with(TextBody::default);
                }
            }
            depth::PARAGRAPH => {
                if let Some(body) = self.text_body_mut() {
                    body.paragraphs.push(Paragraph::new());
                }
            }
            depth::RUN => {
                if let Some(paragraph) = self.paragraph_mut() {
                    paragraph.add_run(TextRun::default());
                }
            }
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(run) = self.paragraph_mut().and_then(|p| p.runs.last_mut()) {
            run.text.push_str(text);
        }
    }

    fn text_body_mut(&mut self) -> Option<&mut TextBody> {
        self.shape_tree.last_mut()?.text_body.as_mut()
    }

    fn paragraph_mut(&mut self) -> Option<&mut Paragraph> {
        self.text_body_mut()?.paragraphs.last_mut()
    }

    fn into_document(self) -> NotesDocument {
        let mut document = NotesDocument::new();
        for body in self.shape_tree.into_iter().filter_map(|s| s.text_body) {
            for paragraph in body.paragraphs {
                document.add_paragraph(paragraph);
            }
        }
        document
    }
}

/// Whether the open elements form a prefix of [`RUN_TEXT_PATH`].
fn on_run_text_path(stack: &[Vec<u8>]) -> bool {
    stack.len() <= RUN_TEXT_PATH.len()
        && stack
            .iter()
            .zip(RUN_TEXT_PATH.iter())
            .all(|(open, expected)| open.as_slice() == *expected)
}

/// Whether the reader is directly inside a run's `a:t` element.
fn in_run_text(stack: &[Vec<u8>]) -> bool {
    stack.len() == depth::TEXT && on_run_text_path(stack)
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}
