//! The combined, scrollable document built from every loaded file.
//!
//! Files are laid end to end with a blank line between them. Section offsets are rebased onto
//! the combined line numbering, which is what the reader scrolls through and what the tracker
//! compares the scroll offset against.

use crate::formats::Format;
use crate::input;
use crate::section::Section;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

#[derive(Clone, Debug, Default)]
/// All loaded files as one sequence of lines with their sections.
pub struct Document {
    /// Files the document was loaded from, in load order.
    pub files: Vec<PathBuf>,
    /// Every line of the combined document.
    pub lines: Vec<String>,
    /// Sections in document order, offsets ascending.
    pub sections: Vec<Section>,
    headings: HashMap<usize, usize>,
}

impl Document {
    /// Reads and combines `files`, skipping any that cannot be read or parsed.
    pub fn load(files: &[PathBuf], format: &dyn Format) -> Self {
        let sources = files
            .iter()
            .filter_map(|path| match fs::read_to_string(path) {
                Ok(text) => Some((path.clone(), text)),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable document");
                    None
                }
            })
            .collect();
        Self::from_sources(sources, format)
    }

    /// Combines already-read sources, given as `(path, text)` pairs.
    pub fn from_sources(sources: Vec<(PathBuf, String)>, format: &dyn Format) -> Self {
        let mut doc = Self::default();

        for (path, text) in sources {
            let file_path = path.to_string_lossy().to_string();
            let sections = match input::parse_sections(&text, &file_path, format) {
                Ok(sections) => sections,
                Err(e) => {
                    warn!(path = %file_path, error = %e, "skipping unparsable document");
                    continue;
                }
            };

            if !doc.lines.is_empty() {
                doc.lines.push(String::new());
            }
            let base = doc.lines.len();
            doc.lines.extend(text.lines().map(str::to_string));
            doc.sections
                .extend(sections.into_iter().map(|section| Section {
                    offset: base + section.line_start,
                    ..section
                }));
            doc.files.push(path);
        }

        assign_unique_ids(&mut doc.sections);
        doc.headings = doc
            .sections
            .iter()
            .enumerate()
            .map(|(i, section)| (section.offset, i))
            .collect();
        doc
    }

    #[must_use]
    /// Number of lines in the combined document.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    /// Whether nothing was loaded.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    /// The section whose heading sits on `line`, if any.
    pub fn heading_at(&self, line: usize) -> Option<&Section> {
        self.headings.get(&line).map(|&i| &self.sections[i])
    }

    #[must_use]
    /// Looks a section up by identifier.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }
}

/// Suffixes repeated slugs with `-2`, `-3`, ... so every identifier is distinct.
fn assign_unique_ids(sections: &mut [Section]) {
    let mut taken: HashSet<String> = HashSet::new();
    for section in sections {
        let mut candidate = section.id.clone();
        let mut n = 1;
        while taken.contains(&candidate) {
            n += 1;
            candidate = format!("{}-{n}", section.id);
        }
        taken.insert(candidate.clone());
        section.id = candidate;
    }
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
