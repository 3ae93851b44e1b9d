//! The core state bridging the loaded document, the sidebar and the navigation tracker.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the reader
//! scrolls and navigates. The page (document, sidebar and scroll positions) is what the
//! tracker observes and mutates through [`Environment`]; the tracker itself and the rebuild
//! scheduler sit beside it, so each handler can lend the page to the tracker while owning both.

use crate::config::Config;
use crate::document::Document;
use crate::environment::{Bounds, Environment, SectionAnchor};
use crate::error::{Element, NavError, Result};
use crate::formats::markdown::MarkdownFormat;
use crate::nav::{LinkRef, NavData, NavRow};
use crate::schedule::{RebuildScheduler, RebuildTrigger};
use crate::scroll::ScrollMetrics;
use crate::section::Section;
use crate::tracker::{NavTracker, ScrollUpdate};
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which pane receives navigation keys.
pub enum Focus {
    /// The table of contents.
    Sidebar,
    /// The document text.
    Content,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Determines how typed characters are interpreted.
pub enum Mode {
    /// Keys scroll and navigate.
    Browse,
    /// Keys edit the sidebar search query.
    Search,
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Everything the reader sees: the document, its sidebar, and where each is scrolled to.
pub struct Page {
    /// The combined document being read.
    pub document: Document,
    /// Sidebar groups and links.
    pub nav: NavData,
    /// Scroll position of the content pane.
    pub content: ScrollMetrics,
    /// First sidebar row on screen.
    pub sidebar_scroll: usize,
    /// Rows the sidebar shows, unknown until the first layout.
    sidebar_height: Option<usize>,
    /// Whether the scroll-to-top tag shows; `None` when the page has no such tag.
    pub scroll_top: Option<bool>,
    /// Section most recently jumped to.
    pub hash: Option<String>,
}

impl Page {
    #[must_use]
    /// Lays out a fresh page for `document`, scrolled to the top.
    pub fn new(document: Document, scroll_top_button: bool) -> Self {
        let nav = NavData::from_sections(&document.sections);
        Self {
            content: ScrollMetrics::new(document.len()),
            document,
            nav,
            sidebar_scroll: 0,
            sidebar_height: None,
            scroll_top: scroll_top_button.then_some(false),
            hash: None,
        }
    }

    /// Swaps in new content, keeping the scroll position where it still fits.
    pub fn replace_document(&mut self, document: Document) {
        self.nav = NavData::from_sections(&document.sections);
        self.content.update_content_height(document.len());
        if self
            .hash
            .as_deref()
            .is_some_and(|hash| document.section(hash).is_none())
        {
            self.hash = None;
        }
        self.document = document;
        self.clamp_sidebar_scroll();
    }

    #[must_use]
    /// Rows the sidebar shows, once laid out.
    pub fn sidebar_height(&self) -> Option<usize> {
        self.sidebar_height
    }

    /// Records the sidebar's height after layout.
    pub fn set_sidebar_height(&mut self, height: usize) {
        self.sidebar_height = Some(height);
        self.clamp_sidebar_scroll();
    }

    /// Scrolls the sidebar just enough for `row` to be on screen.
    pub fn reveal_row(&mut self, row: usize) {
        let Some(height) = self.sidebar_height.filter(|&h| h > 0) else {
            return;
        };
        if row < self.sidebar_scroll {
            self.sidebar_scroll = row;
        } else if row >= self.sidebar_scroll + height {
            self.sidebar_scroll = row + 1 - height;
        }
        self.clamp_sidebar_scroll();
    }

    fn clamp_sidebar_scroll(&mut self) {
        let rows = self.nav.rows().len();
        let height = self.sidebar_height.unwrap_or(rows);
        self.sidebar_scroll = self.sidebar_scroll.min(rows.saturating_sub(height));
    }
}

impl Environment for Page {
    type Link = LinkRef;

    fn sections(&self) -> Vec<SectionAnchor> {
        self.document.sections.iter().map(Section::anchor).collect()
    }

    fn link_for(&self, section_id: &str) -> Option<LinkRef> {
        self.nav.link(section_id)
    }

    fn scroll_offset(&self) -> i64 {
        to_i64(self.content.offset())
    }

    fn container_bounds(&self) -> Option<Bounds> {
        self.sidebar_height.map(|height| Bounds::new(0, to_i64(height)))
    }

    fn link_bounds(&self, link: &LinkRef) -> Option<Bounds> {
        let row = self.nav.row_of(*link)?;
        Some(Bounds::new(to_i64(row) - to_i64(self.sidebar_scroll), 1))
    }

    fn set_link_active(&mut self, link: &LinkRef, active: bool) {
        if let Some(item) = self.nav.item_mut(*link) {
            item.active = active;
        }
    }

    fn center_link(&mut self, link: &LinkRef) {
        let (Some(row), Some(height)) = (self.nav.row_of(*link), self.sidebar_height) else {
            return;
        };
        self.sidebar_scroll = row.saturating_sub(height / 2);
        self.clamp_sidebar_scroll();
    }

    fn set_scroll_top_visible(&mut self, visible: bool) -> Result<()> {
        let shown = self
            .scroll_top
            .as_mut()
            .ok_or(NavError::MissingElement(Element::ScrollTopButton))?;
        *shown = visible;
        Ok(())
    }
}

/// Reader session state: the page plus the tracker and scheduler that keep its sidebar honest.
pub struct AppState {
    /// Files the document is (re)loaded from.
    pub files: Vec<PathBuf>,
    /// What is on screen.
    pub page: Page,
    /// Highlights the sidebar link for the section being read.
    pub tracker: NavTracker<LinkRef>,
    /// Pending navigation cache rebuild.
    pub scheduler: RebuildScheduler,
    /// Pane receiving navigation keys.
    pub focus: Focus,
    /// Browse or search input.
    pub mode: Mode,
    /// Current sidebar search query.
    pub search: String,
    /// Selected row of the sidebar.
    pub sidebar_cursor: usize,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
}

impl AppState {
    #[must_use]
    /// Starts a session on `document` and schedules the initial navigation rebuild.
    pub fn new(files: Vec<PathBuf>, document: Document, cfg: &Config, now: Instant) -> Self {
        let mut scheduler = cfg.scheduler();
        scheduler.schedule(RebuildTrigger::Load, now);

        Self {
            files,
            page: Page::new(document, cfg.scroll_top_button),
            tracker: NavTracker::new(cfg.tracker_options()),
            scheduler,
            focus: Focus::Content,
            mode: Mode::Browse,
            search: String::new(),
            sidebar_cursor: 0,
            message: None,
        }
    }

    /// Runs the pending rebuild if it has fallen due, then re-derives the highlight as a
    /// programmatic scroll would. Returns whether a rebuild ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(trigger) = self.scheduler.take_due(now) else {
            return false;
        };
        debug!(?trigger, "rebuilding navigation");
        self.tracker.rebuild(&mut self.page);
        self.scrolled();
        true
    }

    /// Delivers a scroll event to the tracker.
    fn scrolled(&mut self) -> ScrollUpdate {
        self.tracker.on_scroll(&mut self.page)
    }

    /// Scrolls the content by `delta` lines.
    pub fn scroll_content(&mut self, delta: isize) -> ScrollUpdate {
        self.page.content.scroll_lines(delta);
        self.scrolled()
    }

    /// Scrolls the content by whole pages.
    pub fn scroll_pages(&mut self, delta: isize) -> ScrollUpdate {
        self.page.content.scroll_pages(delta);
        self.scrolled()
    }

    /// Returns to the top of the document.
    pub fn scroll_to_top(&mut self) -> ScrollUpdate {
        self.page.content.scroll_to_top();
        self.scrolled()
    }

    /// Jumps to the end of the document.
    pub fn scroll_to_bottom(&mut self) -> ScrollUpdate {
        self.page.content.scroll_to_bottom();
        self.scrolled()
    }

    /// Follows a link: scrolls the section's heading to the top and signals navigation.
    pub fn navigate_to(&mut self, id: &str, now: Instant) -> Option<ScrollUpdate> {
        let Some(offset) = self.page.document.section(id).map(|s| s.offset) else {
            self.message = Some(format!("No section {id}"));
            return None;
        };
        self.page.content.scroll_to(offset);
        self.page.hash = Some(id.to_string());
        self.scheduler.schedule(RebuildTrigger::Navigation, now);
        Some(self.scrolled())
    }

    #[must_use]
    /// The sidebar row under the cursor.
    pub fn cursor_row(&self) -> Option<NavRow> {
        self.page.nav.rows().get(self.sidebar_cursor).copied()
    }

    /// Moves the sidebar cursor by `delta` rows, keeping it on screen.
    pub fn move_cursor(&mut self, delta: isize) {
        let rows = self.page.nav.rows().len();
        if rows == 0 {
            self.sidebar_cursor = 0;
            return;
        }
        self.sidebar_cursor = self
            .sidebar_cursor
            .saturating_add_signed(delta)
            .min(rows - 1);
        self.page.reveal_row(self.sidebar_cursor);
    }

    /// Acts on the cursor row: a group header folds, a link navigates.
    pub fn activate_cursor(&mut self, now: Instant) {
        match self.cursor_row() {
            Some(NavRow::Group(group)) => {
                self.page.nav.toggle_group(group);
                self.move_cursor(0);
            }
            Some(NavRow::Item(link)) => {
                if let Some(id) = self.page.nav.item(link).map(|item| item.id.clone()) {
                    self.navigate_to(&id, now);
                }
            }
            None => {}
        }
    }

    /// Folds or unfolds the group the cursor is in, leaving the cursor on its header.
    pub fn toggle_group_at_cursor(&mut self) {
        let group = match self.cursor_row() {
            Some(NavRow::Group(group)) => group,
            Some(NavRow::Item(link)) => link.group,
            None => return,
        };
        self.page.nav.toggle_group(group);
        if let Some(row) = self
            .page
            .nav
            .rows()
            .iter()
            .position(|row| *row == NavRow::Group(group))
        {
            self.sidebar_cursor = row;
        }
        self.move_cursor(0);
    }

    /// Enters search mode on the sidebar.
    pub fn start_search(&mut self) {
        self.mode = Mode::Search;
        self.focus = Focus::Sidebar;
        self.message = None;
    }

    /// Appends to the search query and refilters.
    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
        self.apply_filter();
    }

    /// Erases the last query character and refilters.
    pub fn pop_search_char(&mut self) {
        self.search.pop();
        self.apply_filter();
    }

    /// Leaves search mode keeping the filter.
    pub fn finish_search(&mut self) {
        self.mode = Mode::Browse;
    }

    /// Leaves search mode and shows every link again.
    pub fn clear_search(&mut self) {
        self.search.clear();
        self.apply_filter();
        self.mode = Mode::Browse;
    }

    fn apply_filter(&mut self) {
        self.page.nav.filter(&self.search);
        self.sidebar_cursor = 0;
        self.page.sidebar_scroll = 0;
    }

    /// Re-reads every file and schedules a navigation rebuild for the new content.
    pub fn reload(&mut self, now: Instant) {
        let document = Document::load(&self.files, &MarkdownFormat);
        let count = document.sections.len();
        self.page.replace_document(document);
        self.page.nav.filter(&self.search);
        self.move_cursor(0);
        self.scheduler.schedule(RebuildTrigger::ContentChanged, now);
        self.message = Some(format!("Reloaded {count} sections"));
    }

    /// Records pane sizes after layout; a viewport change that moves the offset is a scroll.
    pub fn resize(&mut self, sidebar_height: usize, content_height: usize) {
        self.page.set_sidebar_height(sidebar_height);
        let before = self.page.content.offset();
        self.page.content.update_viewport_height(content_height);
        if self.page.content.offset() != before {
            self.scrolled();
        }
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
