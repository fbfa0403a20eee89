//! UI component renderers.
//!
//! - [`search`]: prompt and query line
//! - [`table`]: windowed result list
//! - [`footer`]: status line
//!
//! [`render_launcher`] composes them into the fixed layout described in
//! [`crate::ui::viewmodel::layout`].

mod footer;
mod search;
pub mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{layout, UIViewModel};

use footer::render_status;
use search::render_search_line;
use table::render_list;

fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset());
    row + 1
}

/// Renders the whole launcher into a pane of `rows` x `cols`.
///
/// Terminal rows are 1-indexed; layout rows are 0-indexed.
pub fn render_launcher(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    if rows == 0 {
        return;
    }

    let next = render_search_line(1, &vm.search_bar, theme, cols);
    if rows < layout::CHROME_ROWS {
        return;
    }
    render_border(next, &theme.colors.border, cols);

    let list_height = vm.list_height.min(layout::list_rows(rows));
    render_list(
        layout::LIST_TOP + 1,
        &vm.display_items,
        list_height,
        vm.item_height,
        theme,
        cols,
    );

    render_status(rows, &vm.status, theme, cols);
}
