//! Application entry and index types.
//!
//! An [`AppEntry`] is one installed application as reported by the index
//! provider. Its `path` is the identity: two entries with the same path are the
//! same application. The [`AppIndex`] is the ordered, read-only collection of
//! entries loaded once per session and shared by reference afterwards.

use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;

/// One installed application.
///
/// Immutable once loaded. Crosses the worker boundary as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppEntry {
    /// Display name.
    pub name: String,
    /// Unique identity; also the argument handed to the launch command.
    pub path: String,
    /// Opaque icon reference (theme icon name or absolute path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_ref: Option<String>,
    /// Optional one-line description, searched alongside the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AppEntry {
    /// Creates an entry with no icon and no description.
    ///
    /// # Examples
    ///
    /// ```
    /// use zlaunchpad::domain::AppEntry;
    ///
    /// let entry = AppEntry::new("Firefox", "/usr/share/applications/firefox.desktop");
    /// assert_eq!(entry.name, "Firefox");
    /// assert!(entry.icon_ref.is_none());
    /// ```
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            icon_ref: None,
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Ordered, read-only sequence of application entries.
///
/// Cloning is cheap (reference counted), so the same index can be held by the
/// session state and handed to searches without copying entries. There is no
/// mutating API: a new load produces a new index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppIndex {
    entries: Arc<[AppEntry]>,
}

impl AppIndex {
    /// Builds an index, keeping the first occurrence of every path.
    #[must_use]
    pub fn new(entries: Vec<AppEntry>) -> Self {
        let mut seen = std::collections::HashSet::with_capacity(entries.len());
        let unique: Vec<AppEntry> = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.path.clone()))
            .collect();
        Self {
            entries: unique.into(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[AppEntry] {
        &self.entries
    }
}

impl Deref for AppIndex {
    type Target = [AppEntry];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl From<Vec<AppEntry>> for AppIndex {
    fn from(entries: Vec<AppEntry>) -> Self {
        Self::new(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_keeps_first_entry_per_path() {
        let index = AppIndex::new(vec![
            AppEntry::new("Chrome", "/apps/chrome.desktop"),
            AppEntry::new("Chromium", "/apps/chrome.desktop"),
            AppEntry::new("Firefox", "/apps/firefox.desktop"),
        ]);

        assert_eq!(index.len(), 2);
        assert_eq!(index[0].name, "Chrome");
        assert_eq!(index[1].name, "Firefox");
    }

    #[test]
    fn clones_share_entries() {
        let index = AppIndex::new(vec![AppEntry::new("Chrome", "/apps/chrome.desktop")]);
        let clone = index.clone();
        assert!(std::ptr::eq(index.entries().as_ptr(), clone.entries().as_ptr()));
    }

    #[test]
    fn entry_json_omits_missing_optionals() {
        let entry = AppEntry::new("Calculator", "/apps/calc.desktop");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"name":"Calculator","path":"/apps/calc.desktop"}"#);

        let back: AppEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
