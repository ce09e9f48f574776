//! Domain types for representing extracted speaker notes.

/// A notes-slide entry located inside a presentation package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesEntry {
    /// Position of the entry in the archive's central directory.
    pub index: usize,

    /// Full entry name, e.g. `ppt/notesSlides/notesSlide1.xml`.
    pub name: String,
}

impl NotesEntry {
    /// Create a new entry reference.
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }

    /// The entry's base file name (last `/`-separated component).
    pub fn base_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// The parsed content of one notes slide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesDocument {
    /// Paragraphs in document order, across all shapes.
    pub paragraphs: Vec<Paragraph>,
}

impl NotesDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a paragraph to the document.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Text lines for output: one per paragraph whose runs join to a
    /// non-empty string.
    pub fn lines(&self) -> Vec<String> {
        self.paragraphs
            .iter()
            .filter(|paragraph| !paragraph.is_blank())
            .map(Paragraph::text)
            .collect()
    }
}

/// A paragraph of notes text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    /// Text runs in document order.
    pub runs: Vec<TextRun>,
}

impl Paragraph {
    /// Create an empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph from run texts.
    pub fn from_runs<I, S>(runs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            runs: runs.into_iter().map(TextRun::new).collect(),
        }
    }

    /// Add a run to the paragraph.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Concatenate all runs with no separator.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Whether this paragraph produces no output line.
    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.text.is_empty())
    }
}

/// A fragment of literal text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRun {
    /// The run's text, kept verbatim.
    pub text: String,
}

impl TextRun {
    /// Create a new run.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
