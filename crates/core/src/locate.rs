//! Notes-slide entry filtering.
//!
//! A package entry holds speaker notes iff its name starts with
//! [`NOTES_SLIDE_PREFIX`] and ends with [`NOTES_SLIDE_SUFFIX`]. The match is
//! exact and case-sensitive; path separators are not normalized.

/// Name prefix shared by every notes-slide part.
pub const NOTES_SLIDE_PREFIX: &str = "ppt/notesSlides/notesSlide";

/// Name suffix shared by every notes-slide part.
pub const NOTES_SLIDE_SUFFIX: &str = ".xml";

/// Check whether an archive entry name is a notes slide.
pub fn is_notes_slide(name: &str) -> bool {
    name.starts_with(NOTES_SLIDE_PREFIX) && name.ends_with(NOTES_SLIDE_SUFFIX)
}
