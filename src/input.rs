//! Discovers documents on disk and extracts their heading sections.
//!
//! Directories are walked recursively in sorted order so the sidebar is stable between runs.
//! Headings are found with the format's tree-sitter query rather than by scanning lines, so a
//! `#` inside a fenced code block is never mistaken for a section.

use crate::error::{NavError, Result};
use crate::formats::Format;
use crate::section::Section;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

/// Expands `paths` into the list of documents to read.
///
/// Files named explicitly are always kept. Directories contribute every file below them whose
/// extension is in `extensions`, skipping hidden entries. With no paths the current directory
/// is searched.
///
/// # Errors
///
/// Returns an error if a path does not exist or a directory cannot be read.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let roots = if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths
    };

    let mut documents = Vec::new();
    for root in roots {
        if root.is_dir() {
            walk(&root, extensions, &mut documents)?;
        } else if root.is_file() {
            documents.push(root);
        } else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", root.display()),
            ));
        }
    }
    Ok(documents)
}

fn walk(dir: &Path, extensions: &[String], out: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| !name.starts_with('.'))
        })
        .collect();
    entries.sort();

    for path in entries {
        if path.is_dir() {
            walk(&path, extensions, out)?;
        } else if has_extension(&path, extensions) {
            out.push(path);
        }
    }
    Ok(())
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
}

#[must_use]
/// Turns a heading title into an identifier: lowercase words joined by hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if (c.is_whitespace() || c == '-' || c == '_') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug.to_string()
    }
}

/// Extracts sections from in-memory source text.
///
/// Offsets are the heading's line in `source`; identifiers are plain slugs and are made unique
/// only once documents are combined.
///
/// # Errors
///
/// Returns an error if the grammar cannot be loaded, the query does not compile, or the parser
/// gives up on the source.
pub fn parse_sections(source: &str, file_path: &str, format: &dyn Format) -> Result<Vec<Section>> {
    let language = format.language();
    let mut parser = Parser::new();
    parser.set_language(&language)?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| NavError::Parse(file_path.to_string()))?;

    let query = Query::new(&language, format.section_query())?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());

    let mut sections = Vec::new();
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            let Ok(text) = node.utf8_text(source.as_bytes()) else {
                continue;
            };
            let title = format.heading_title(text);
            let line = node.start_position().row;
            sections.push(Section {
                id: slugify(&title),
                level: format.heading_level(text),
                title,
                offset: line,
                line_start: line,
                file_path: file_path.to_string(),
            });
        }
    }

    sections.sort_by_key(|s| s.line_start);
    Ok(sections)
}

/// Reads a file and extracts its sections.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn extract_sections(path: &Path, format: &dyn Format) -> Result<Vec<Section>> {
    let source = fs::read_to_string(path)?;
    parse_sections(&source, &path.to_string_lossy(), format)
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
