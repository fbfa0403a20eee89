//! Host window height negotiation.
//!
//! The launcher pane grows with the number of results and shrinks back to the
//! bare search bar when there are none. Every resize is a call across the host
//! boundary, so [`ResizeNegotiator`] remembers the last height it asked for and
//! stays silent while the desired height does not change. A failed request is
//! not repeated: the window keeps its prior size until a different height is
//! wanted.

use crate::domain::FailureKind;

/// Geometry used to derive the desired host height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeGeometry {
    /// Height of the search bar and surrounding chrome, always present.
    pub search_bar_height: u32,
    /// Height of one result row.
    pub item_height: u32,
    /// Extra space added below the result list when it is shown.
    pub base_padding: u32,
    /// Upper bound for the result area.
    pub max_height: u32,
}

impl Default for ResizeGeometry {
    fn default() -> Self {
        Self {
            search_bar_height: 5,
            item_height: 1,
            base_padding: 3,
            max_height: 20,
        }
    }
}

/// Derives the desired host height and de-duplicates resize requests.
#[derive(Debug, Clone, Default)]
pub struct ResizeNegotiator {
    geometry: ResizeGeometry,
    last_requested_height: Option<u32>,
}

impl ResizeNegotiator {
    #[must_use]
    pub const fn new(geometry: ResizeGeometry) -> Self {
        Self {
            geometry,
            last_requested_height: None,
        }
    }

    /// Height the host window should have for `results_count` results.
    ///
    /// ```text
    /// search_bar_height + (count > 0 ? clamp(count * item_height + base_padding, 0, max_height) : 0)
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use zlaunchpad::app::resize::{ResizeGeometry, ResizeNegotiator};
    ///
    /// let negotiator = ResizeNegotiator::new(ResizeGeometry::default());
    /// assert_eq!(negotiator.desired_height(0), 5);
    /// assert_eq!(negotiator.desired_height(4), 12);
    /// assert_eq!(negotiator.desired_height(500), 25);
    /// ```
    #[must_use]
    pub fn desired_height(&self, results_count: usize) -> u32 {
        let geometry = &self.geometry;
        if results_count == 0 {
            return geometry.search_bar_height;
        }

        let count = u32::try_from(results_count).unwrap_or(u32::MAX);
        let content = count
            .saturating_mul(geometry.item_height)
            .saturating_add(geometry.base_padding)
            .min(geometry.max_height);

        geometry.search_bar_height.saturating_add(content)
    }

    /// Returns `Some(height)` if a resize request must be sent.
    ///
    /// Consecutive calls with the same height emit at most one request.
    pub fn request_if_changed(&mut self, height: u32) -> Option<u32> {
        if self.last_requested_height == Some(height) {
            return None;
        }

        tracing::debug!(
            from = ?self.last_requested_height,
            to = height,
            "requesting host resize"
        );
        self.last_requested_height = Some(height);
        Some(height)
    }

    /// Records that the host could not apply `height`.
    ///
    /// Logged only. `height` stays the last requested height, so the same
    /// height is not asked for again.
    pub fn on_request_failed(&self, height: u32, message: &str) {
        tracing::warn!(
            kind = FailureKind::Resize.label(),
            height,
            current = ?self.last_requested_height,
            error = %message,
            "host resize failed"
        );
    }

    #[must_use]
    pub const fn last_requested_height(&self) -> Option<u32> {
        self.last_requested_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn negotiator() -> ResizeNegotiator {
        ResizeNegotiator::new(ResizeGeometry {
            search_bar_height: 60,
            item_height: 44,
            base_padding: 16,
            max_height: 400,
        })
    }

    #[test]
    fn desired_height_without_results_is_only_the_search_bar() {
        assert_eq!(negotiator().desired_height(0), 60);
    }

    #[test]
    fn desired_height_grows_with_results_until_clamped() {
        let negotiator = negotiator();
        assert_eq!(negotiator.desired_height(1), 60 + 44 + 16);
        assert_eq!(negotiator.desired_height(5), 60 + 5 * 44 + 16);
        assert_eq!(negotiator.desired_height(50), 60 + 400);
    }

    #[test]
    fn identical_heights_emit_a_single_request() {
        let mut negotiator = negotiator();
        assert_eq!(negotiator.request_if_changed(120), Some(120));
        assert_eq!(negotiator.request_if_changed(120), None);
        assert_eq!(negotiator.request_if_changed(120), None);
        assert_eq!(negotiator.request_if_changed(60), Some(60));
        assert_eq!(negotiator.request_if_changed(120), Some(120));
    }

    #[test]
    fn failed_height_is_not_requested_again() {
        let mut negotiator = negotiator();
        assert_eq!(negotiator.request_if_changed(60), Some(60));
        assert_eq!(negotiator.request_if_changed(200), Some(200));

        negotiator.on_request_failed(200, "pane is not floating");
        assert_eq!(negotiator.last_requested_height(), Some(200));
        assert_eq!(negotiator.request_if_changed(200), None);
        assert_eq!(negotiator.request_if_changed(200), None);
        assert_eq!(negotiator.request_if_changed(60), Some(60));
    }
}
