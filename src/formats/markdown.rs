//! Markdown format implementation using tree-sitter-md.
//!
//! This module provides tree-sitter queries for parsing markdown documents
//! and extracting section structure from ATX-style headings (# syntax).

use crate::formats::Format;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Tree-sitter queries for ATX-style markdown headings (# syntax).
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn section_query(&self) -> &'static str {
        "(atx_heading) @heading"
    }

    fn heading_level(&self, heading: &str) -> usize {
        heading
            .trim_start()
            .chars()
            .take_while(|&c| c == '#')
            .count()
            .clamp(1, 6)
    }

    fn heading_title(&self, heading: &str) -> String {
        let body = heading.trim().trim_start_matches('#').trim();
        // A closing sequence ("## Title ##") only counts after whitespace, so "C#" survives.
        let unclosed = body.trim_end_matches('#');
        if unclosed.is_empty() || unclosed.ends_with(char::is_whitespace) {
            unclosed.trim().to_string()
        } else {
            body.to_string()
        }
    }

    fn format_heading(&self, level: usize, title: &str) -> Line<'static> {
        let color = match level {
            1 => Color::Magenta,
            2 => Color::Cyan,
            3 => Color::Green,
            _ => Color::Blue,
        };
        Line::from(vec![
            Span::styled(
                format!("{} ", "#".repeat(level)),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                title.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ])
    }
}
