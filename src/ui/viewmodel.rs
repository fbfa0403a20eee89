//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel` and consumed by
//! the renderer. They carry no behaviour, only display-ready data: the rows of
//! the visible window with their positions, highlight ranges and icons, and the
//! text of the search line and status line.

/// Fixed rows of the launcher layout.
///
/// ```text
/// row 0            ❯ query
/// row 1            ────────────────
/// rows 2..rows-1   result list (viewport)
/// row rows-1       status line
/// ```
///
/// With no results the host pane shrinks to the three chrome rows.
pub mod layout {
    /// First terminal row of the result list.
    pub const LIST_TOP: usize = 2;
    /// Rows used by everything except the result list.
    pub const CHROME_ROWS: usize = 3;

    /// Height of the result list for a pane with `rows` content rows.
    #[must_use]
    pub const fn list_rows(rows: usize) -> usize {
        rows.saturating_sub(CHROME_ROWS)
    }
}

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub search_bar: SearchBarInfo,

    /// Rows of the visible window plus overscan, in result order.
    pub display_items: Vec<DisplayItem>,

    /// Height of the list area in rows.
    pub list_height: usize,

    /// Rows occupied by each item.
    pub item_height: usize,

    pub status: StatusLine,
}

/// One rendered result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Position in the full result set.
    pub index: usize,

    pub name: String,

    /// Secondary text: the description, or the entry path if there is none.
    pub detail: String,

    pub is_selected: bool,

    /// Offset of the item's first row from the top of the list area.
    ///
    /// Negative or past the list height for overscan rows, which the renderer
    /// clips.
    pub top: i64,

    /// Character ranges of `name` to highlight, `(start, end)` exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,

    /// Character ranges of `detail` to highlight.
    pub detail_highlight_ranges: Vec<(usize, usize)>,

    /// Resolved icon URI, if any.
    pub icon: Option<String>,
}

/// Search input state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// Shown in place of an empty query.
    pub placeholder: String,
    /// `false` while the index is loading or unavailable.
    pub enabled: bool,
}

/// Bottom line: a failure notice, the session phase or the result count with
/// key hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_notice: bool,
}
