//! Error types shared by document loading, configuration and the tracker environment.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Optional page elements the tracker touches but never requires.
pub enum Element {
    /// The scrollable sidebar holding the navigation links.
    SidebarContainer,
    /// The scroll-to-top affordance.
    ScrollTopButton,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SidebarContainer => f.write_str("sidebar container"),
            Self::ScrollTopButton => f.write_str("scroll-to-top button"),
        }
    }
}

#[derive(Error, Debug)]
/// Everything that can go wrong while loading or presenting a document.
pub enum NavError {
    /// Reading a document or config file failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A config file exists but could not be deserialised.
    #[error("invalid config {path}: {message}")]
    Config {
        /// Location of the rejected file.
        path: PathBuf,
        /// Deserialiser diagnostic.
        message: String,
    },

    /// The tree-sitter grammar could not be loaded into the parser.
    #[error(transparent)]
    Language(#[from] tree_sitter::LanguageError),

    /// A format's section query failed to compile.
    #[error(transparent)]
    Query(#[from] tree_sitter::QueryError),

    /// The parser produced no tree for a document.
    #[error("failed to parse {0}")]
    Parse(String),

    /// An optional page element is not present.
    #[error("{0} is not present")]
    MissingElement(Element),
}

/// Result type alias for navspy operations.
pub type Result<T> = std::result::Result<T, NavError>;
