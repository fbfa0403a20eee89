//! Status line renderer.

use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusLine;

/// Renders the status text on `row`, in the notice color for failures.
pub fn render_status(row: usize, status: &StatusLine, theme: &Theme, cols: usize) -> usize {
    let color = if status.is_notice {
        &theme.colors.notice_fg
    } else {
        &theme.colors.status_fg
    };
    let text = helpers::truncate(&status.text, cols.saturating_sub(2));

    position_cursor(row, 1);
    print!("{} {text}", Theme::fg(color));
    print!("{}{}", " ".repeat(cols.saturating_sub(text.chars().count() + 1)), Theme::reset());
    row + 1
}
