//! Format trait and implementations for different document types.
//!
//! This module defines the `Format` trait which abstracts over different
//! document formats by providing the tree-sitter grammar and heading query
//! specific to each format, plus how its headings read and render.

use ratatui::text::Line;

pub mod markdown;

/// Grammar, heading query and heading presentation for one document format.
pub trait Format {
    /// Tree-sitter grammar used to parse documents of this format.
    fn language(&self) -> tree_sitter::Language;
    /// Query whose captures are the section headings.
    fn section_query(&self) -> &str;
    /// Nesting depth of a captured heading, from its raw text.
    fn heading_level(&self, heading: &str) -> usize;
    /// Display title of a captured heading, without markup.
    fn heading_title(&self, heading: &str) -> String;
    /// Styled rendering of a heading for the sidebar and content pane.
    fn format_heading(&self, level: usize, title: &str) -> Line<'static>;
}
