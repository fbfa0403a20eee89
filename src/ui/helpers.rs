//! Shared rendering utilities.
//!
//! Widths are counted in characters, and highlight ranges are character
//! ranges, matching what the search matcher reports.

use crate::ui::theme::Theme;

/// Moves the cursor to `row`, `col` (both 1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Cuts `text` to at most `width` characters, ending in `…` when shortened.
///
/// ```
/// use zlaunchpad::ui::helpers::truncate;
///
/// assert_eq!(truncate("Calculator", 6), "Calcu…");
/// assert_eq!(truncate("Calculator", 20), "Calculator");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Styles the `ranges` of `text` as matches.
///
/// `base` is the escape sequence for the surrounding text; it is re-applied
/// after every highlighted segment so selection colors survive. Ranges past
/// the end of `text` are clipped.
#[must_use]
pub fn highlighted(text: &str, ranges: &[(usize, usize)], theme: &Theme, base: &str) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + ranges.len() * 48);
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(pos, chars.len());
        let end = end.clamp(start, chars.len());

        out.extend(&chars[pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(base);
        pos = end;
    }

    out.extend(&chars[pos..]);
    out
}

/// Highlight ranges of `text` that survive truncation to `width`.
#[must_use]
pub fn clip_ranges(ranges: &[(usize, usize)], text: &str, width: usize) -> Vec<(usize, usize)> {
    let visible = if text.chars().count() <= width {
        width
    } else {
        width.saturating_sub(1)
    };
    ranges
        .iter()
        .filter(|(start, _)| *start < visible)
        .map(|&(start, end)| (start, end.min(visible)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_reapplies_the_base_style() {
        let theme = Theme::default();
        let out = highlighted("Firefox", &[(4, 7)], &theme, "<base>");
        assert!(out.starts_with("Fire\u{1b}["));
        assert!(out.ends_with(&format!("fox{}<base>", Theme::reset())));
    }

    #[test]
    fn highlight_handles_multibyte_text() {
        let theme = Theme::default();
        let out = highlighted("Café Bar", &[(3, 4)], &theme, "");
        assert!(out.starts_with("Caf\u{1b}["));
        assert!(out.contains("é\u{1b}[0m Bar"));
    }

    #[test]
    fn ranges_are_clipped_to_the_visible_part() {
        assert_eq!(clip_ranges(&[(2, 8)], "Calculator", 6), vec![(2, 5)]);
        assert_eq!(clip_ranges(&[(7, 9)], "Calculator", 6), vec![]);
        assert_eq!(clip_ranges(&[(0, 4)], "Calc", 4), vec![(0, 4)]);
    }

    #[test]
    fn truncate_to_zero_is_empty() {
        assert_eq!(truncate("abc", 0), "");
        assert_eq!(truncate("abc", 3), "abc");
    }
}
