//! Query-to-result filtering over the application index.
//!
//! [`search`] is the pure, synchronous filter. [`SearchProvider`] is the seam
//! for an asynchronous variant: the background worker owns a
//! [`LocalSearchProvider`] and answers tagged search requests with it, while
//! the plugin thread decides which answers are still current.

use crate::domain::error::Result;
use crate::domain::{AppEntry, AppIndex};
use super::matching::contains_case_insensitive;

/// Filters `index` by `query`.
///
/// # Rules
///
/// 1. A query that is empty after trimming yields an empty result, never the
///    full index.
/// 2. Otherwise every entry whose name or description contains the query as a
///    case-insensitive substring is returned, in original index order.
///
/// The query itself is matched untrimmed, so `"studio "` only matches text
/// with a space after `studio`.
///
/// # Examples
///
/// ```
/// use zlaunchpad::domain::AppEntry;
/// use zlaunchpad::search::search;
///
/// let index = vec![
///     AppEntry::new("Chrome", "/apps/chrome"),
///     AppEntry::new("Firefox", "/apps/firefox"),
///     AppEntry::new("Calculator", "/apps/calculator"),
/// ];
/// let results = search(&index, "fire");
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].name, "Firefox");
/// ```
#[must_use]
pub fn search(index: &[AppEntry], query: &str) -> Vec<AppEntry> {
    let _span = tracing::debug_span!("search",
        index_len = index.len(),
        query_len = query.len()
    ).entered();

    if query.trim().is_empty() {
        return Vec::new();
    }

    let results: Vec<AppEntry> = index
        .iter()
        .filter(|entry| matches(entry, query))
        .cloned()
        .collect();

    tracing::debug!(result_count = results.len(), "search completed");
    results
}

/// Returns `true` if `entry` matches a non-blank `query`.
#[must_use]
pub fn matches(entry: &AppEntry, query: &str) -> bool {
    contains_case_insensitive(&entry.name, query)
        || entry
            .description
            .as_deref()
            .is_some_and(|description| contains_case_insensitive(description, query))
}

/// A provider that answers search requests, possibly on another thread.
///
/// Implementations must return results in index order and apply the same
/// matching rules as [`search`].
pub trait SearchProvider: Send {
    /// Returns the entries matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot answer (for example, its index
    /// is not available yet).
    fn search_applications(&self, query: &str) -> Result<Vec<AppEntry>>;
}

/// [`SearchProvider`] backed by an in-memory index.
#[derive(Debug, Clone, Default)]
pub struct LocalSearchProvider {
    index: AppIndex,
}

impl LocalSearchProvider {
    #[must_use]
    pub const fn new(index: AppIndex) -> Self {
        Self { index }
    }

    #[must_use]
    pub const fn index(&self) -> &AppIndex {
        &self.index
    }
}

impl SearchProvider for LocalSearchProvider {
    fn search_applications(&self, query: &str) -> Result<Vec<AppEntry>> {
        Ok(search(&self.index, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> Vec<AppEntry> {
        vec![
            AppEntry::new("Chrome", "/apps/chrome").with_description("Web Browser"),
            AppEntry::new("Firefox", "/apps/firefox").with_description("Browse the Web"),
            AppEntry::new("Calculator", "/apps/calculator"),
            AppEntry::new("Terminal", "/apps/terminal").with_description("Command line"),
        ]
    }

    fn names(results: &[AppEntry]) -> Vec<&str> {
        results.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn blank_queries_return_nothing() {
        let index = index();
        for query in ["", " ", "\t", "   \n"] {
            assert!(search(&index, query).is_empty(), "query {query:?}");
        }
    }

    #[test]
    fn matches_name_case_insensitively() {
        assert_eq!(names(&search(&index(), "FIRE")), vec!["Firefox"]);
    }

    #[test]
    fn matches_description_and_keeps_index_order() {
        assert_eq!(names(&search(&index(), "web")), vec!["Chrome", "Firefox"]);
    }

    #[test]
    fn soundness_and_completeness_over_all_substrings() {
        let index = index();
        for query in ["c", "o", "line", "x", "zzz", "brow", "Ca"] {
            let results = search(&index, query);
            for entry in &index {
                let expected = entry.name.to_lowercase().contains(&query.to_lowercase())
                    || entry
                        .description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&query.to_lowercase()));
                assert_eq!(results.contains(entry), expected, "{query:?} vs {}", entry.name);
            }
        }
    }

    #[test]
    fn local_provider_uses_the_same_rules() {
        let provider = LocalSearchProvider::new(AppIndex::new(index()));
        let results = provider.search_applications("term").unwrap();
        assert_eq!(names(&results), vec!["Terminal"]);
        assert!(provider.search_applications("  ").unwrap().is_empty());
    }
}
