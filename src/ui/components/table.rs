//! Result list renderer.
//!
//! Items arrive with their offset from the top of the list area; overscan
//! items may start above it or end below it. [`placements`] decides which of
//! their lines land on screen, so the list never draws outside its area.

use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const ICON_MARKER: &str = "● ";
const NO_ICON_MARKER: &str = "  ";
/// Indent of every row: one space, then the two-column marker.
const GUTTER: usize = 3;
const DETAIL_GAP: usize = 2;

/// One on-screen line of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Row within the list area (0-based).
    pub row: usize,
    /// Position of the item in the slice passed to [`placements`].
    pub item: usize,
    /// Line within the item (0-based, `< item_height`).
    pub line: usize,
}

/// Screen lines for `items`, clipped to `list_height` rows.
#[must_use]
pub fn placements(items: &[DisplayItem], list_height: usize, item_height: usize) -> Vec<Placement> {
    let height = i64::try_from(list_height).unwrap_or(i64::MAX);
    let mut out = Vec::new();

    for (item, display) in items.iter().enumerate() {
        for line in 0..item_height.max(1) {
            let row = display.top + i64::try_from(line).unwrap_or(i64::MAX);
            if (0..height).contains(&row) {
                #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
                out.push(Placement {
                    row: row as usize,
                    item,
                    line,
                });
            }
        }
    }
    out
}

/// Renders `items` into the list area starting at terminal row `top_row`.
pub fn render_list(
    top_row: usize,
    items: &[DisplayItem],
    list_height: usize,
    item_height: usize,
    theme: &Theme,
    cols: usize,
) {
    for placement in placements(items, list_height, item_height) {
        let item = &items[placement.item];
        position_cursor(top_row + placement.row, 1);
        if placement.line == 0 {
            render_title_line(item, item_height > 1, theme, cols);
        } else if placement.line == 1 {
            render_detail_line(item, theme, cols);
        } else {
            render_blank_line(item, theme, cols);
        }
    }
}

fn base_style(item: &DisplayItem, theme: &Theme, fg: &str) -> String {
    if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(fg)
    }
}

/// Marker, name and, for single-line items, the detail text after it.
fn render_title_line(item: &DisplayItem, detail_below: bool, theme: &Theme, cols: usize) {
    let base = base_style(item, theme, &theme.colors.text_normal);
    let width = cols.saturating_sub(GUTTER);

    print!("{base} ");
    if item.icon.is_some() {
        if !item.is_selected {
            print!("{}", Theme::fg(&theme.colors.icon_fg));
        }
        print!("{ICON_MARKER}{base}");
    } else {
        print!("{NO_ICON_MARKER}");
    }

    let name = helpers::truncate(&item.name, width);
    let name_ranges = helpers::clip_ranges(&item.highlight_ranges, &item.name, width);
    print!("{}", helpers::highlighted(&name, &name_ranges, theme, &base));
    let mut used = GUTTER + name.chars().count();

    let detail_width = cols.saturating_sub(used + DETAIL_GAP);
    if !detail_below && detail_width > 0 && !item.detail.is_empty() {
        let detail_base = base_style(item, theme, &theme.colors.text_dim);
        let detail = helpers::truncate(&item.detail, detail_width);
        let ranges = helpers::clip_ranges(&item.detail_highlight_ranges, &item.detail, detail_width);
        print!("{}{detail_base}", " ".repeat(DETAIL_GAP));
        print!("{}", helpers::highlighted(&detail, &ranges, theme, &detail_base));
        used += DETAIL_GAP + detail.chars().count();
    }

    print!("{}{}", " ".repeat(cols.saturating_sub(used)), Theme::reset());
}

fn render_detail_line(item: &DisplayItem, theme: &Theme, cols: usize) {
    let base = base_style(item, theme, &theme.colors.text_dim);
    let width = cols.saturating_sub(GUTTER);
    let detail = helpers::truncate(&item.detail, width);
    let ranges = helpers::clip_ranges(&item.detail_highlight_ranges, &item.detail, width);

    print!("{base}{}", " ".repeat(GUTTER));
    print!("{}", helpers::highlighted(&detail, &ranges, theme, &base));
    let used = GUTTER + detail.chars().count();
    print!("{}{}", " ".repeat(cols.saturating_sub(used)), Theme::reset());
}

fn render_blank_line(item: &DisplayItem, theme: &Theme, cols: usize) {
    let base = base_style(item, theme, &theme.colors.text_normal);
    print!("{base}{}{}", " ".repeat(cols), Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(index: usize, top: i64) -> DisplayItem {
        DisplayItem {
            index,
            name: format!("App {index}"),
            detail: String::new(),
            is_selected: false,
            top,
            highlight_ranges: vec![],
            detail_highlight_ranges: vec![],
            icon: None,
        }
    }

    #[test]
    fn overscan_rows_are_clipped() {
        let items: Vec<DisplayItem> = (0..6).map(|i| item(i, i64::try_from(i).unwrap() - 2)).collect();
        let rows: Vec<usize> = placements(&items, 3, 1).iter().map(|p| p.row).collect();
        assert_eq!(rows, vec![0, 1, 2]);
        assert_eq!(placements(&items, 3, 1)[0].item, 2);
    }

    #[test]
    fn tall_items_cover_consecutive_rows() {
        let items = vec![item(4, -1), item(5, 1), item(6, 3)];
        let placed = placements(&items, 4, 2);
        assert_eq!(
            placed,
            vec![
                Placement { row: 0, item: 0, line: 1 },
                Placement { row: 1, item: 1, line: 0 },
                Placement { row: 2, item: 1, line: 1 },
                Placement { row: 3, item: 2, line: 0 },
            ]
        );
    }
}
