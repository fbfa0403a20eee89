//! Windowed rendering of the result list.
//!
//! [`ViewportVirtualizer`] decides which rows of a possibly long result list
//! are worth rendering. Only rows intersecting the viewport, plus `overscan`
//! rows on either side, are materialised into the view model; their count is
//! bounded by the viewport size regardless of how many results exist.
//!
//! All measurements share one abstract unit. The plugin uses terminal rows
//! (`item_height = 1`); the arithmetic is identical for pixels.
//!
//! # Coordinates
//!
//! ```text
//! 0                 padding_start                              total_content_height
//! |<-- padding -->|<-- item 0 -->|<-- item 1 -->| ... |<-- padding_end -->|
//!                        ^ scroll_offset .. scroll_offset + viewport_height ^
//! ```

use std::ops::Range;

/// Scroll position, geometry and visible range of the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportVirtualizer {
    scroll_offset: u32,
    item_height: u32,
    overscan: u32,
    viewport_height: u32,
    padding_start: u32,
    padding_end: u32,
    total_items: usize,
    visible: Range<usize>,
}

impl Default for ViewportVirtualizer {
    fn default() -> Self {
        Self {
            scroll_offset: 0,
            item_height: 1,
            overscan: 3,
            viewport_height: 10,
            padding_start: 0,
            padding_end: 0,
            total_items: 0,
            visible: 0..0,
        }
    }
}

impl ViewportVirtualizer {
    /// Creates a virtualizer with the given geometry and no items.
    #[must_use]
    pub fn new(
        item_height: u32,
        overscan: u32,
        padding_start: u32,
        padding_end: u32,
        viewport_height: u32,
    ) -> Self {
        let mut viewport = Self::default();
        viewport.configure(item_height, overscan, padding_start, padding_end, viewport_height);
        viewport
    }

    /// Replaces the geometry and recomputes the visible range.
    ///
    /// `item_height` is constant per list and must be non-zero; zero is treated
    /// as one.
    pub fn configure(
        &mut self,
        item_height: u32,
        overscan: u32,
        padding_start: u32,
        padding_end: u32,
        viewport_height: u32,
    ) {
        self.item_height = item_height.max(1);
        self.overscan = overscan;
        self.padding_start = padding_start;
        self.padding_end = padding_end;
        self.viewport_height = viewport_height;
        self.recompute(self.scroll_offset, self.total_items);
    }

    /// Changes only the viewport height (host pane resized).
    pub fn set_viewport_height(&mut self, viewport_height: u32) {
        if self.viewport_height == viewport_height {
            return;
        }
        self.viewport_height = viewport_height;
        self.recompute(self.scroll_offset, self.total_items);
    }

    /// Recomputes the visible range for a scroll position and item count.
    ///
    /// ```text
    /// start = max(0, floor((scroll - padding_start) / item_height) - overscan)
    /// end   = min(total, ceil((scroll - padding_start + viewport) / item_height) + overscan)
    /// ```
    ///
    /// The result always satisfies `0 <= start <= end <= total_items`.
    ///
    /// # Examples
    ///
    /// ```
    /// use zlaunchpad::app::ViewportVirtualizer;
    ///
    /// let mut viewport = ViewportVirtualizer::new(44, 5, 0, 0, 400);
    /// assert_eq!(viewport.recompute(0, 50), 0..15);
    /// ```
    pub fn recompute(&mut self, scroll_offset: u32, total_items: usize) -> Range<usize> {
        self.scroll_offset = scroll_offset;
        self.total_items = total_items;

        let height = i64::from(self.item_height);
        let overscan = i64::from(self.overscan);
        let relative = i64::from(scroll_offset) - i64::from(self.padding_start);
        let total = i64::try_from(total_items).unwrap_or(i64::MAX);

        let first_visible = relative.div_euclid(height);
        let past_last_visible = ceil_div(relative + i64::from(self.viewport_height), height);

        let start = (first_visible - overscan).clamp(0, total);
        let end = (past_last_visible + overscan).clamp(start, total);

        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let visible = (start as usize)..(end as usize);
        self.visible = visible.clone();
        visible
    }

    /// Rows that should currently exist in the view model.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        self.visible.clone()
    }

    /// Height of the whole list including both paddings.
    #[must_use]
    pub fn total_content_height(&self) -> u32 {
        let items = u32::try_from(self.total_items).unwrap_or(u32::MAX);
        items
            .saturating_mul(self.item_height)
            .saturating_add(self.padding_start)
            .saturating_add(self.padding_end)
    }

    /// Largest scroll offset that still fills the viewport.
    #[must_use]
    pub fn max_scroll(&self) -> u32 {
        self.total_content_height().saturating_sub(self.viewport_height)
    }

    /// Offset of the top edge of `index` in content coordinates.
    #[must_use]
    pub fn item_offset(&self, index: usize) -> u32 {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.padding_start
            .saturating_add(index.saturating_mul(self.item_height))
    }

    /// Scrolls the minimal distance that brings item `index` fully into view.
    ///
    /// If the item already lies within `[scroll, scroll + viewport)`, the
    /// scroll offset is left unchanged, so keyboard navigation moves the
    /// highlight without snapping the list to the centre. Indices past the end
    /// are ignored.
    pub fn scroll_to_index(&mut self, index: usize) {
        if index >= self.total_items {
            return;
        }

        let top = self.item_offset(index);
        let bottom = top.saturating_add(self.item_height);
        let view_end = self.scroll_offset.saturating_add(self.viewport_height);

        let next = if top >= self.scroll_offset && bottom <= view_end {
            return;
        } else if top < self.scroll_offset || self.viewport_height < self.item_height {
            top
        } else {
            bottom - self.viewport_height
        };

        tracing::trace!(index, from = self.scroll_offset, to = next, "scrolling to index");
        self.recompute(next, self.total_items);
    }

    /// Scrolls by `delta` units (mouse wheel), clamped to the content.
    pub fn scroll_by(&mut self, delta: i64) {
        let max = i64::from(self.max_scroll());
        let next = (i64::from(self.scroll_offset) + delta).clamp(0, max);
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        self.recompute(next as u32, self.total_items);
    }

    /// Clamps the scroll offset after the item count shrank.
    pub fn clamp_scroll(&mut self) {
        let clamped = self.scroll_offset.min(self.max_scroll());
        self.recompute(clamped, self.total_items);
    }

    /// Maps a viewport-relative coordinate to the row under it.
    #[must_use]
    pub fn index_at(&self, y: u32) -> Option<usize> {
        if y >= self.viewport_height {
            return None;
        }
        let content_y = self.scroll_offset.saturating_add(y);
        let relative = content_y.checked_sub(self.padding_start)?;
        let index = usize::try_from(relative / self.item_height).ok()?;
        (index < self.total_items).then_some(index)
    }

    #[must_use]
    pub const fn scroll_offset(&self) -> u32 {
        self.scroll_offset
    }

    #[must_use]
    pub const fn item_height(&self) -> u32 {
        self.item_height
    }

    #[must_use]
    pub const fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }
}

const fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator.div_euclid(denominator);
    if numerator.rem_euclid(denominator) == 0 {
        quotient
    } else {
        quotient + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fully_visible(viewport: &ViewportVirtualizer, index: usize) -> bool {
        let top = viewport.item_offset(index);
        let bottom = top + viewport.item_height();
        top >= viewport.scroll_offset()
            && bottom <= viewport.scroll_offset() + viewport.viewport_height()
    }

    #[test]
    fn visible_range_at_top_includes_trailing_overscan() {
        let mut viewport = ViewportVirtualizer::new(44, 5, 0, 0, 400);
        // ceil(400 / 44) = 10 rows touch the viewport, plus 5 overscan.
        assert_eq!(viewport.recompute(0, 50), 0..15);
    }

    #[test]
    fn visible_range_in_the_middle_has_overscan_on_both_sides() {
        let mut viewport = ViewportVirtualizer::new(10, 2, 0, 0, 50);
        assert_eq!(viewport.recompute(100, 100), 8..17);
    }

    #[test]
    fn visible_range_is_clamped_to_item_count() {
        let mut viewport = ViewportVirtualizer::new(10, 5, 0, 0, 100);
        assert_eq!(viewport.recompute(0, 3), 0..3);
        assert_eq!(viewport.recompute(0, 0), 0..0);
        assert_eq!(viewport.recompute(10_000, 3), 3..3);
    }

    #[test]
    fn padding_shifts_the_first_row() {
        let mut viewport = ViewportVirtualizer::new(10, 0, 25, 0, 20);
        // Scroll 0..20 only shows padding.
        assert_eq!(viewport.recompute(0, 10), 0..0);
        assert_eq!(viewport.recompute(30, 10), 0..3);
    }

    #[test]
    fn rendered_rows_stay_bounded_for_huge_lists() {
        let mut viewport = ViewportVirtualizer::new(1, 3, 0, 0, 15);
        for scroll in [0, 500, 99_000] {
            let range = viewport.recompute(scroll, 100_000);
            assert!(range.len() <= 15 + 2 * 3 + 1, "{range:?}");
        }
    }

    #[test]
    fn total_content_height_includes_paddings() {
        let mut viewport = ViewportVirtualizer::new(44, 0, 8, 12, 400);
        viewport.recompute(0, 10);
        assert_eq!(viewport.total_content_height(), 460);
    }

    #[test]
    fn scroll_to_visible_item_leaves_offset_unchanged() {
        let mut viewport = ViewportVirtualizer::new(10, 0, 0, 0, 50);
        viewport.recompute(20, 20);
        viewport.scroll_to_index(3);
        assert_eq!(viewport.scroll_offset(), 20);
    }

    #[test]
    fn scroll_to_item_below_scrolls_minimally_down() {
        let mut viewport = ViewportVirtualizer::new(10, 0, 0, 0, 50);
        viewport.recompute(0, 20);
        viewport.scroll_to_index(7);
        assert_eq!(viewport.scroll_offset(), 30);
        assert!(fully_visible(&viewport, 7));
    }

    #[test]
    fn scroll_to_item_above_scrolls_minimally_up() {
        let mut viewport = ViewportVirtualizer::new(10, 0, 0, 0, 50);
        viewport.recompute(100, 20);
        viewport.scroll_to_index(4);
        assert_eq!(viewport.scroll_offset(), 40);
    }

    #[test]
    fn scroll_to_partially_visible_item_reveals_it_fully() {
        let mut viewport = ViewportVirtualizer::new(44, 5, 0, 0, 400);
        viewport.recompute(0, 50);
        viewport.scroll_to_index(9);
        assert_eq!(viewport.scroll_offset(), 40);
        for index in 0..50 {
            viewport.scroll_to_index(index);
            assert!(fully_visible(&viewport, index), "index {index}");
        }
    }

    #[test]
    fn wheel_scrolling_is_clamped() {
        let mut viewport = ViewportVirtualizer::new(1, 0, 0, 0, 10);
        viewport.recompute(0, 25);
        viewport.scroll_by(-5);
        assert_eq!(viewport.scroll_offset(), 0);
        viewport.scroll_by(100);
        assert_eq!(viewport.scroll_offset(), 15);
    }

    #[test]
    fn clamp_after_shrink_keeps_viewport_filled() {
        let mut viewport = ViewportVirtualizer::new(1, 0, 0, 0, 10);
        viewport.recompute(40, 50);
        viewport.recompute(40, 12);
        viewport.clamp_scroll();
        assert_eq!(viewport.scroll_offset(), 2);
    }

    #[test]
    fn index_at_maps_rows_under_the_pointer() {
        let mut viewport = ViewportVirtualizer::new(2, 0, 1, 0, 10);
        viewport.recompute(4, 10);
        assert_eq!(viewport.index_at(0), Some(1));
        assert_eq!(viewport.index_at(3), Some(3));
        assert_eq!(viewport.index_at(10), None);

        viewport.recompute(0, 10);
        assert_eq!(viewport.index_at(0), None);
    }
}
