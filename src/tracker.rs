//! Keeps one sidebar link highlighted in step with the scroll position.
//!
//! The tracker caches the sections of the page together with their links, and on each scroll
//! works out which section the reader is in: the last one whose top has been scrolled past,
//! nudged early by a fixed lookahead so the link lights up just before the heading reaches the
//! top. The cache is rebuilt wholesale whenever the page content changes.

use crate::environment::{Environment, SectionAnchor};
use std::collections::HashMap;
use tracing::debug;

/// Default lookahead added to the scroll offset before comparing against section offsets.
pub const DEFAULT_BIAS: i64 = 80;

/// Default offset beyond which the scroll-to-top affordance is shown.
pub const DEFAULT_SCROLL_TOP_THRESHOLD: i64 = 400;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Tunables for section selection and the scroll-to-top toggle.
pub struct TrackerOptions {
    /// Added to the scroll offset so a section activates slightly before it reaches the top.
    pub bias: i64,
    /// The scroll-to-top affordance shows once the offset strictly exceeds this.
    pub scroll_top_threshold: i64,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            bias: DEFAULT_BIAS,
            scroll_top_threshold: DEFAULT_SCROLL_TOP_THRESHOLD,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
/// Which link, if any, the tracker last marked active.
///
/// ```text
/// NoneActive <-> OneActive(id) <-> OneActive(other)
/// ```
///
/// Transitions happen only in [`NavTracker::on_scroll`]. A rebuild drops back to `NoneActive`
/// without touching the page; the next scroll re-derives the highlight.
pub enum ActiveLink {
    /// No link is highlighted.
    #[default]
    NoneActive,
    /// The link for this section identifier is highlighted.
    OneActive(String),
}

impl ActiveLink {
    #[must_use]
    /// The highlighted section identifier, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::NoneActive => None,
            Self::OneActive(id) => Some(id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Summary of what a single scroll tick changed.
pub struct ScrollUpdate {
    /// Section whose link is now active.
    pub active: Option<String>,
    /// Whether the sidebar had to be scrolled to reveal the active link.
    pub centered: bool,
    /// Whether the scroll-to-top affordance should be showing.
    pub scroll_top_visible: bool,
}

#[must_use]
/// Whether the scroll-to-top affordance belongs on screen at `offset`.
pub fn scroll_top_visible(offset: i64, threshold: i64) -> bool {
    offset > threshold
}

/// Section to link cache plus the active-link state machine.
pub struct NavTracker<L> {
    options: TrackerOptions,
    sections: Vec<SectionAnchor>,
    links: HashMap<String, L>,
    active: ActiveLink,
}

impl<L: Clone> NavTracker<L> {
    #[must_use]
    /// Creates an empty tracker; nothing highlights until the first [`Self::rebuild`].
    pub fn new(options: TrackerOptions) -> Self {
        Self {
            options,
            sections: Vec::new(),
            links: HashMap::new(),
            active: ActiveLink::NoneActive,
        }
    }

    #[must_use]
    /// Selection and toggle tunables in use.
    pub fn options(&self) -> TrackerOptions {
        self.options
    }

    #[must_use]
    /// Cached sections in document order.
    pub fn sections(&self) -> &[SectionAnchor] {
        &self.sections
    }

    #[must_use]
    /// Cached link for a section identifier.
    pub fn link(&self, section_id: &str) -> Option<&L> {
        self.links.get(section_id)
    }

    #[must_use]
    /// Identifiers of every section that has a link, sorted.
    pub fn tracked_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.links.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    /// Current state of the active-link state machine.
    pub fn active(&self) -> &ActiveLink {
        &self.active
    }

    /// Replaces the cache with the sections and links the environment currently shows.
    ///
    /// Sections are taken in the order the environment lists them, which must already be
    /// ascending by offset. Sections with no link stay in the cache so they still take part in
    /// selection, but can never be highlighted. The previously active link is cleared first,
    /// since the new cache may no longer know it.
    pub fn rebuild<E>(&mut self, env: &mut E)
    where
        E: Environment<Link = L>,
    {
        if let Some(link) = self.active.id().and_then(|id| self.links.get(id)) {
            env.set_link_active(link, false);
        }
        self.sections = env.sections();
        self.links = self
            .sections
            .iter()
            .filter_map(|section| env.link_for(&section.id).map(|l| (section.id.clone(), l)))
            .collect();
        self.active = ActiveLink::NoneActive;

        debug!(
            sections = self.sections.len(),
            links = self.links.len(),
            "rebuilt navigation cache"
        );
    }

    #[must_use]
    /// The section the reader is in at `scroll_offset`.
    ///
    /// Scans bottom-up and takes the first section whose offset is at most
    /// `scroll_offset + bias`, so of several sections sharing an offset the later one wins.
    pub fn select(&self, scroll_offset: i64) -> Option<&SectionAnchor> {
        let reach = scroll_offset.saturating_add(self.options.bias);
        self.sections
            .iter()
            .rev()
            .find(|section| section.offset <= reach)
    }

    /// Handles one scroll tick: re-derives the active link and toggles the scroll-to-top
    /// affordance.
    pub fn on_scroll<E>(&mut self, env: &mut E) -> ScrollUpdate
    where
        E: Environment<Link = L>,
    {
        let offset = env.scroll_offset();
        let centered = self.update_active(env, offset);
        let visible = self.toggle_scroll_top(env, offset);

        ScrollUpdate {
            active: self.active.id().map(str::to_string),
            centered,
            scroll_top_visible: visible,
        }
    }

    /// Clears every known link, then highlights the link of the selected section and brings
    /// it into the sidebar's view. Returns whether the sidebar was scrolled.
    fn update_active<E>(&mut self, env: &mut E, offset: i64) -> bool
    where
        E: Environment<Link = L>,
    {
        let current = self.select(offset).map(|section| section.id.clone());

        for link in self.links.values() {
            env.set_link_active(link, false);
        }

        let Some((id, link)) =
            current.and_then(|id| self.links.get(&id).cloned().map(|link| (id, link)))
        else {
            self.active = ActiveLink::NoneActive;
            return false;
        };

        env.set_link_active(&link, true);
        self.active = ActiveLink::OneActive(id);

        let Some(container) = env.container_bounds() else {
            debug!("no sidebar container, skipping reveal");
            return false;
        };
        match env.link_bounds(&link) {
            Some(bounds) if !container.contains(&bounds) => {
                env.center_link(&link);
                true
            }
            _ => false,
        }
    }

    fn toggle_scroll_top<E>(&self, env: &mut E, offset: i64) -> bool
    where
        E: Environment<Link = L>,
    {
        let visible = scroll_top_visible(offset, self.options.scroll_top_threshold);
        if let Err(e) = env.set_scroll_top_visible(visible) {
            debug!("{e}, skipping scroll-to-top toggle");
        }
        visible
    }
}

#[cfg(test)]
#[path = "tests/tracker.rs"]
mod tests;
