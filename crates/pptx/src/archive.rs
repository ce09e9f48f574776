//! Random-access reading of the presentation package.

use notes_core::{is_notes_slide, Error, NotesEntry, Result};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::read::ZipFile;
use zip::ZipArchive;

/// An opened presentation package.
///
/// Entry names are read once, in central-directory order, when the archive
/// is opened. The underlying reader is released when this value is dropped.
pub struct NotesArchive<R> {
    archive: ZipArchive<R>,
    names: Vec<String>,
}

impl NotesArchive<BufReader<File>> {
    /// Open a package from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::ArchiveOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        log::debug!("Opened {}", path.display());

        Self::from_reader(BufReader::new(file)).map_err(|e| match e {
            Error::ArchiveOpen { reason, .. } => Error::ArchiveOpen {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })
    }
}

impl<R: Read + Seek> NotesArchive<R> {
    /// Open a package from any seekable reader.
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader).map_err(|e| Error::ArchiveOpen {
            path: Default::default(),
            reason: e.to_string(),
        })?;

        // Raw access reads the entry header only; nothing is decompressed.
        let mut names = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let file = archive.by_index_raw(index).map_err(|e| Error::ArchiveOpen {
                path: Default::default(),
                reason: format!("unreadable entry #{}: {}", index, e),
            })?;
            names.push(file.name().to_string());
        }
        log::debug!("Archive holds {} entries", names.len());

        Ok(Self { archive, names })
    }

    /// All entry names in archive order.
    pub fn entry_names(&self) -> &[String] {
        &self.names
    }

    /// Notes-slide entries in archive order.
    ///
    /// The order is the archive's own and is not sorted by slide number.
    pub fn notes_entries(&self) -> Vec<NotesEntry> {
        self.names
            .iter()
            .enumerate()
            .filter(|(_, name)| is_notes_slide(name))
            .map(|(index, name)| NotesEntry::new(index, name.as_str()))
            .collect()
    }

    /// Open a decompressing stream over one entry.
    pub fn open_entry(&mut self, entry: &NotesEntry) -> Result<ZipFile<'_>> {
        self.archive
            .by_index(entry.index)
            .map_err(|e| Error::EntryOpen {
                entry: entry.name.clone(),
                reason: e.to_string(),
            })
    }
}
