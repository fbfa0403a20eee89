//! Highlighted-result tracking.
//!
//! [`SelectionModel`] holds the index of the highlighted entry within the
//! current result set, or `None` when the result set is empty. It never owns
//! the results: every operation takes the result slice it must stay valid
//! against, and [`SelectionModel::on_results_changed`] must be called with each
//! new result set before anything reads the selection again.

use crate::domain::AppEntry;

/// Index of the highlighted result, reconciled against each result set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    selected: Option<usize>,
    /// Path of the selected entry, used to follow it across result sets.
    selected_path: Option<String>,
}

impl SelectionModel {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selected: None,
            selected_path: None,
        }
    }

    /// Currently selected index, `None` iff the last result set was empty.
    #[must_use]
    pub const fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Reconciles the selection with a freshly computed result set.
    ///
    /// If the previously selected entry (by path) is still present, the
    /// selection follows it to its new index. Otherwise the first result is
    /// selected, or nothing if `results` is empty.
    pub fn on_results_changed(&mut self, results: &[AppEntry]) {
        let followed = self
            .selected_path
            .as_deref()
            .and_then(|path| results.iter().position(|entry| entry.path == path));

        let next = followed.or(if results.is_empty() { None } else { Some(0) });

        tracing::trace!(
            previous = ?self.selected,
            next = ?next,
            followed = followed.is_some(),
            "selection reconciled"
        );

        self.set(next, results);
    }

    /// Moves the selection down by one, wrapping from last to first.
    ///
    /// No-op on an empty result set.
    pub fn move_down(&mut self, results: &[AppEntry]) {
        if results.is_empty() {
            return;
        }
        let next = self.selected.map_or(0, |idx| (idx + 1) % results.len());
        self.set(Some(next), results);
    }

    /// Moves the selection up by one, wrapping from first to last.
    ///
    /// No-op on an empty result set.
    pub fn move_up(&mut self, results: &[AppEntry]) {
        if results.is_empty() {
            return;
        }
        let len = results.len();
        let next = self.selected.map_or(0, |idx| (idx + len - 1) % len);
        self.set(Some(next), results);
    }

    /// Selects `index` directly (pointer activation).
    ///
    /// Returns `false` and leaves the selection untouched if `index` is out of
    /// range.
    pub fn select(&mut self, index: usize, results: &[AppEntry]) -> bool {
        if index >= results.len() {
            return false;
        }
        self.set(Some(index), results);
        true
    }

    /// Returns the selected entry, if any.
    #[must_use]
    pub fn current<'a>(&self, results: &'a [AppEntry]) -> Option<&'a AppEntry> {
        self.selected.and_then(|idx| results.get(idx))
    }

    fn set(&mut self, index: Option<usize>, results: &[AppEntry]) {
        self.selected = index;
        self.selected_path = index.and_then(|idx| results.get(idx)).map(|entry| entry.path.clone());
    }
}
