//! Section representation for tree-sitter parsed documents.
//!
//! A section is the stretch of a document that starts at a heading and runs to the next one.
//! Each carries a stable identifier, used to pair it with its sidebar link, and its offset in
//! the combined document the reader scrolls through.

use crate::environment::SectionAnchor;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Heading-delimited document region with its place in the rendered document.
pub struct Section {
    /// Identifier unique within the loaded document, derived from the title.
    pub id: String,
    /// Section heading text without markup symbols.
    pub title: String,
    /// Heading depth (1 for top-level).
    pub level: usize,
    /// Line of the heading within the combined document.
    pub offset: usize,
    /// Line of the heading within its source file (0-indexed).
    pub line_start: usize,
    /// Source file containing this section.
    pub file_path: String,
}

impl Section {
    #[must_use]
    /// The identifier and offset the navigation tracker caches.
    pub fn anchor(&self) -> SectionAnchor {
        SectionAnchor::new(
            self.id.clone(),
            i64::try_from(self.offset).unwrap_or(i64::MAX),
        )
    }
}
