//! Vertical scroll bookkeeping for the content pane.
//!
//! Tracks content height, viewport height and the current offset, keeping the offset within
//! the range where the viewport stays filled.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Offset and extents of a vertically scrollable pane, in lines.
pub struct ScrollMetrics {
    offset: usize,
    content_height: usize,
    viewport_height: usize,
}

impl ScrollMetrics {
    #[must_use]
    /// Metrics for content of the given height, scrolled to the top.
    pub fn new(content_height: usize) -> Self {
        Self {
            content_height,
            ..Self::default()
        }
    }

    #[must_use]
    /// Current offset of the first visible line.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    /// Number of content lines.
    pub const fn content_height(&self) -> usize {
        self.content_height
    }

    #[must_use]
    /// Number of lines the viewport shows.
    pub const fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    #[must_use]
    /// Largest offset that still fills the viewport.
    pub fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Updates viewport height and clamps current offset.
    pub fn update_viewport_height(&mut self, viewport_height: usize) {
        self.viewport_height = viewport_height;
        self.clamp_offset();
    }

    /// Updates content height and clamps current offset.
    pub fn update_content_height(&mut self, content_height: usize) {
        self.content_height = content_height;
        self.clamp_offset();
    }

    /// Jumps to `offset`, clamped to the valid range.
    pub fn scroll_to(&mut self, offset: usize) {
        self.offset = offset;
        self.clamp_offset();
    }

    /// Scrolls by relative line count (`+` down, `-` up).
    pub fn scroll_lines(&mut self, delta: isize) {
        self.scroll_to(self.offset.saturating_add_signed(delta));
    }

    /// Scrolls by whole viewports.
    pub fn scroll_pages(&mut self, delta_pages: isize) {
        let page = isize::try_from(self.viewport_height.max(1)).unwrap_or(isize::MAX);
        self.scroll_lines(page.saturating_mul(delta_pages));
    }

    /// Moves scroll position to the first row.
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    /// Moves scroll position to the last visible window.
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}

#[cfg(test)]
mod tests {
    use super::ScrollMetrics;

    #[test]
    fn test_scrolling_clamps_to_bounds() {
        let mut metrics = ScrollMetrics::new(20);
        metrics.update_viewport_height(5);

        metrics.scroll_lines(3);
        assert_eq!(metrics.offset(), 3);

        metrics.scroll_lines(-10);
        assert_eq!(metrics.offset(), 0);

        metrics.scroll_to_bottom();
        assert_eq!(metrics.offset(), 15);

        metrics.scroll_to(99);
        assert_eq!(metrics.offset(), 15);
    }

    #[test]
    fn test_page_scrolling_uses_viewport_height() {
        let mut metrics = ScrollMetrics::new(40);
        metrics.update_viewport_height(4);

        metrics.scroll_pages(1);
        assert_eq!(metrics.offset(), 4);

        metrics.scroll_pages(2);
        assert_eq!(metrics.offset(), 12);

        metrics.scroll_pages(-1);
        assert_eq!(metrics.offset(), 8);
    }

    #[test]
    fn test_shrinking_content_pulls_offset_back() {
        let mut metrics = ScrollMetrics::new(100);
        metrics.update_viewport_height(10);
        metrics.scroll_to(80);

        metrics.update_content_height(50);
        assert_eq!(metrics.offset(), 40);
    }
}
