//! Configuration to acknowledge reader preferences as well as set defaults.
//!
//! Specifically, we try to find a navspy.toml, and if present we load settings from there.
//! This provides the tracker's lookahead and scroll-to-top threshold, the rebuild delays,
//! sidebar width and file extension preferences. Distances are in terminal rows.

use crate::error::{NavError, Result};
use crate::schedule::RebuildScheduler;
use crate::tracker::TrackerOptions;
use facet::Facet;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

/// Config file looked for in the working directory.
pub const CONFIG_FILE: &str = "navspy.toml";

const DEFAULT_LOOKAHEAD: i64 = 2;
const DEFAULT_SCROLL_TOP_THRESHOLD: i64 = 20;
const DEFAULT_LOAD_DELAY_MS: u64 = 100;
const DEFAULT_NAVIGATION_DELAY_MS: u64 = 50;
const DEFAULT_SIDEBAR_WIDTH: u16 = 32;

#[derive(Facet, Clone, Debug, PartialEq)]
/// Reader preferences loaded from navspy.toml or falling back to defaults.
pub struct Config {
    #[facet(default = DEFAULT_LOOKAHEAD)]
    /// Rows of lookahead before a heading counts as reached.
    pub lookahead: i64,
    #[facet(default = DEFAULT_SCROLL_TOP_THRESHOLD)]
    /// Scroll offset beyond which the scroll-to-top tag appears.
    pub scroll_top_threshold: i64,
    #[facet(default = DEFAULT_LOAD_DELAY_MS)]
    /// Milliseconds to wait after loading content before rebuilding navigation.
    pub load_delay_ms: u64,
    #[facet(default = DEFAULT_NAVIGATION_DELAY_MS)]
    /// Milliseconds to wait after jumping to a section before rebuilding navigation.
    pub navigation_delay_ms: u64,
    #[facet(default = true)]
    /// Whether to offer the scroll-to-top tag at all.
    pub scroll_top_button: bool,
    #[facet(default = DEFAULT_SIDEBAR_WIDTH)]
    /// Width of the sidebar in columns.
    pub sidebar_width: u16,
    #[facet(default = vec!["md".to_string(), "markdown".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookahead: DEFAULT_LOOKAHEAD,
            scroll_top_threshold: DEFAULT_SCROLL_TOP_THRESHOLD,
            load_delay_ms: DEFAULT_LOAD_DELAY_MS,
            navigation_delay_ms: DEFAULT_NAVIGATION_DELAY_MS,
            scroll_top_button: true,
            sidebar_width: DEFAULT_SIDEBAR_WIDTH,
            file_extensions: vec!["md".to_string(), "markdown".to_string()],
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from navspy.toml if present.
    ///
    /// A missing navspy.toml means defaults; a missing file named explicitly is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let target = path.unwrap_or_else(|| Path::new(CONFIG_FILE));
        match fs::read_to_string(target) {
            Ok(contents) => Self::from_toml(&contents, target),
            Err(e) if e.kind() == io::ErrorKind::NotFound && path.is_none() => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parses configuration text; `origin` is only used in the error.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Config`] if the text is not valid configuration.
    pub fn from_toml(contents: &str, origin: &Path) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| NavError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    #[must_use]
    /// Selection and toggle settings for the navigation tracker.
    pub fn tracker_options(&self) -> TrackerOptions {
        TrackerOptions {
            bias: self.lookahead,
            scroll_top_threshold: self.scroll_top_threshold,
        }
    }

    #[must_use]
    /// An idle rebuild scheduler using the configured delays.
    pub fn scheduler(&self) -> RebuildScheduler {
        RebuildScheduler::new(
            Duration::from_millis(self.load_delay_ms),
            Duration::from_millis(self.navigation_delay_ms),
        )
    }
}
