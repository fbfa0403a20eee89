//! Search line renderer.

use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

const PROMPT: &str = " ❯ ";
const CURSOR: &str = "▏";

/// Renders the prompt and query (or placeholder) on `row`.
///
/// While input is disabled the prompt is dimmed and no cursor is drawn.
pub fn render_search_line(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let prompt_len = PROMPT.chars().count();
    let width = cols.saturating_sub(prompt_len + 1);

    position_cursor(row, 1);
    if search.enabled {
        print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.prompt_fg));
    } else {
        print!("{}", Theme::fg(&theme.colors.placeholder_fg));
    }
    print!("{PROMPT}{}", Theme::reset());

    let used = if search.query.is_empty() {
        let placeholder = helpers::truncate(&search.placeholder, width);
        if search.enabled {
            print!("{}{CURSOR}", Theme::fg(&theme.colors.prompt_fg));
        }
        print!("{}{placeholder}", Theme::fg(&theme.colors.placeholder_fg));
        placeholder.chars().count() + usize::from(search.enabled)
    } else {
        // Keep the end of a long query visible, where the user is typing.
        let visible: String = {
            let chars: Vec<char> = search.query.chars().collect();
            chars[chars.len().saturating_sub(width)..].iter().collect()
        };
        print!("{}{visible}", Theme::fg(&theme.colors.text_normal));
        print!("{}{CURSOR}", Theme::fg(&theme.colors.prompt_fg));
        visible.chars().count() + 1
    };

    print!("{}{}", " ".repeat(cols.saturating_sub(prompt_len + used)), Theme::reset());
    row + 1
}
