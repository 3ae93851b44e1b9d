//! The capability interface between the navigation tracker and whatever renders the page.
//!
//! The tracker never reaches into a rendering engine directly. It asks its environment for
//! the sections currently laid out, the link belonging to each, the scroll offset and a
//! little geometry, and it hands back link highlighting and sidebar scrolling. A terminal
//! page implements this in [`crate::app_state::Page`]; tests substitute a fake.

use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
/// A section as the tracker caches it: its identifier and where it starts.
pub struct SectionAnchor {
    /// Unique identifier shared with the section's navigation link.
    pub id: String,
    /// Distance from the top of the document to the top of the section.
    pub offset: i64,
}

impl SectionAnchor {
    #[must_use]
    /// Pairs an identifier with its document offset.
    pub fn new(id: impl Into<String>, offset: i64) -> Self {
        Self {
            id: id.into(),
            offset,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Vertical extent of an element in screen coordinates, `top` inclusive and `bottom` exclusive.
pub struct Bounds {
    /// First row covered.
    pub top: i64,
    /// Row just past the element.
    pub bottom: i64,
}

impl Bounds {
    #[must_use]
    /// Builds bounds from a top edge and a height.
    pub fn new(top: i64, height: i64) -> Self {
        Self {
            top,
            bottom: top + height,
        }
    }

    #[must_use]
    /// Whether `inner` lies entirely within these bounds.
    pub fn contains(&self, inner: &Bounds) -> bool {
        inner.top >= self.top && inner.bottom <= self.bottom
    }
}

/// What the tracker needs from the page it tracks.
///
/// Queries take `&self`; only link highlighting, sidebar scrolling and the scroll-to-top
/// affordance mutate the page. Absent optional elements are reported as `None` or as
/// [`crate::error::NavError::MissingElement`] and the tracker degrades around them.
pub trait Environment {
    /// Handle to a navigation link, cached by the tracker between rebuilds.
    type Link: Clone;

    /// Every rendered section in document order.
    fn sections(&self) -> Vec<SectionAnchor>;

    /// The navigation link targeting `section_id`, if the sidebar has one.
    fn link_for(&self, section_id: &str) -> Option<Self::Link>;

    /// Current vertical scroll offset of the document.
    fn scroll_offset(&self) -> i64;

    /// Visible region of the sidebar container, or `None` if there is no container.
    fn container_bounds(&self) -> Option<Bounds>;

    /// On-screen extent of a link, or `None` if the link is not laid out.
    fn link_bounds(&self, link: &Self::Link) -> Option<Bounds>;

    /// Marks or unmarks a link as the active one.
    fn set_link_active(&mut self, link: &Self::Link, active: bool);

    /// Scrolls the sidebar container so that `link` sits at its vertical centre.
    fn center_link(&mut self, link: &Self::Link);

    /// Shows or hides the scroll-to-top affordance.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::NavError::MissingElement`] when the page has no such affordance.
    fn set_scroll_top_visible(&mut self, visible: bool) -> Result<()>;
}
