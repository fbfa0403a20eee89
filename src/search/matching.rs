//! Case-insensitive substring matching on character indices.
//!
//! Both strings are case-folded one character at a time, and every folded
//! character remembers the index of the source character it came from. A match
//! can therefore be reported as a character range of the original text, which
//! is what the highlighter needs.

/// Finds the first case-insensitive occurrence of `needle` in `haystack`.
///
/// Returns the `(start, end)` character range (exclusive end) in `haystack`,
/// or `None` if there is no occurrence. An empty needle matches at `(0, 0)`.
///
/// # Examples
///
/// ```
/// use zlaunchpad::search::find_case_insensitive;
///
/// assert_eq!(find_case_insensitive("Firefox", "FOX"), Some((4, 7)));
/// assert_eq!(find_case_insensitive("Chrome", "fire"), None);
/// ```
#[must_use]
pub fn find_case_insensitive(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    let folded_needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    if folded_needle.is_empty() {
        return Some((0, 0));
    }

    let folded_haystack: Vec<(char, usize)> = haystack
        .chars()
        .enumerate()
        .flat_map(|(idx, c)| c.to_lowercase().map(move |lower| (lower, idx)))
        .collect();

    if folded_haystack.len() < folded_needle.len() {
        return None;
    }

    let start = folded_haystack
        .windows(folded_needle.len())
        .position(|window| window.iter().map(|(c, _)| c).eq(folded_needle.iter()))?;

    let first = folded_haystack[start].1;
    let last = folded_haystack[start + folded_needle.len() - 1].1;
    Some((first, last + 1))
}

/// Returns `true` if `haystack` contains `needle` case-insensitively.
#[must_use]
pub fn contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    find_case_insensitive(haystack, needle).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_range_in_original_char_indices() {
        assert_eq!(find_case_insensitive("Visual Studio Code", "studio"), Some((7, 13)));
        assert_eq!(find_case_insensitive("Calculator", "c"), Some((0, 1)));
    }

    #[test]
    fn reports_first_occurrence() {
        assert_eq!(find_case_insensitive("banana", "an"), Some((1, 3)));
    }

    #[test]
    fn handles_non_ascii_text() {
        assert_eq!(find_case_insensitive("Über Manager", "über"), Some((0, 4)));
        assert_eq!(find_case_insensitive("Ärger", "RGER"), Some((1, 5)));
    }

    #[test]
    fn needle_longer_than_haystack_never_matches() {
        assert_eq!(find_case_insensitive("vi", "vim"), None);
    }

    #[test]
    fn whitespace_is_significant() {
        assert!(contains_case_insensitive("Visual Studio", "l s"));
        assert!(!contains_case_insensitive("VisualStudio", "l s"));
    }
}
