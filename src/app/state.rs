//! Session state and view model computation.
//!
//! [`AppState`] owns one instance of every session component and is the only
//! place where they are combined. The event handler calls the methods here;
//! each of them leaves the components mutually consistent:
//!
//! - the selection always points into the current result set (or is `None`),
//! - the viewport knows the current item count,
//! - a search response is only applied if its token is still current.
//!
//! # Result updates
//!
//! Every result change goes through one path, in this order:
//!
//! ```text
//! results ──▶ SelectionModel::on_results_changed
//!         ──▶ ViewportVirtualizer::recompute + scroll_to_index(selected)
//!         ──▶ ResizeNegotiator (via negotiate_size, once per event)
//! ```

use super::actions::Action;
use super::launch::{LaunchCoordinator, LaunchId, LaunchOutcome};
use super::modes::{IndexStatus, SessionPhase};
use super::notice::Notice;
use super::query::{QueryChange, QueryController, SearchToken};
use super::resize::ResizeNegotiator;
use super::selection::SelectionModel;
use super::viewport::ViewportVirtualizer;
use crate::discovery::IconResolver;
use crate::domain::{AppEntry, AppIndex, FailureKind};
use crate::infrastructure::display_path;
use crate::search::{find_case_insensitive, LocalSearchProvider, SearchProvider};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{layout, DisplayItem, SearchBarInfo, StatusLine, UIViewModel};
use crate::worker::WorkerMessage;
use crate::Config;
use std::str::FromStr;

const PLACEHOLDER: &str = "Search for apps...";

/// Where searches run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Synchronously on the plugin thread.
    #[default]
    Local,
    /// On the background worker, answered asynchronously and tagged by token.
    Worker,
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "worker" => Ok(Self::Worker),
            other => Err(format!("unknown search mode '{other}'")),
        }
    }
}

/// Central session state.
#[derive(Debug)]
pub struct AppState {
    /// Synchronous search over the loaded index.
    pub provider: LocalSearchProvider,
    pub index_status: IndexStatus,
    pub search_mode: SearchMode,

    pub query: QueryController,

    /// Current result set, in index order.
    pub results: Vec<AppEntry>,

    /// Query that produced `results`. Differs from the live query while a
    /// worker search is outstanding; highlights are computed against this one.
    pub results_query: String,

    pub selection: SelectionModel,
    pub viewport: ViewportVirtualizer,
    pub resize: ResizeNegotiator,
    pub launcher: LaunchCoordinator,

    /// Most recent failure, cleared by the next query change.
    pub notice: Option<Notice>,

    /// Applications directories handed to the index provider.
    pub app_dirs: Vec<String>,

    pub theme: Theme,
}

impl AppState {
    /// Creates a session in the `Loading` phase.
    #[must_use]
    pub fn new(config: &Config, theme: Theme) -> Self {
        let mut viewport = ViewportVirtualizer::default();
        viewport.configure(config.item_height, config.overscan, 0, 0, 0);

        Self {
            provider: LocalSearchProvider::default(),
            index_status: IndexStatus::Loading,
            search_mode: config.search_mode,
            query: QueryController::new(),
            results: Vec::new(),
            results_query: String::new(),
            selection: SelectionModel::new(),
            viewport,
            resize: ResizeNegotiator::new(config.resize_geometry()),
            launcher: LaunchCoordinator::new(),
            notice: None,
            app_dirs: config.app_dirs.clone(),
            theme,
        }
    }

    #[must_use]
    pub fn index(&self) -> &AppIndex {
        self.provider.index()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        let results = if self.query.in_flight().is_some() {
            None
        } else {
            Some(self.results.len())
        };
        SessionPhase::derive(self.index_status, self.query.query(), results)
    }

    /// Message asking the worker to build the index.
    #[must_use]
    pub fn load_request(&self) -> WorkerMessage {
        WorkerMessage::load_applications(self.app_dirs.clone())
    }

    /// Installs the loaded index and enables input.
    pub fn index_loaded(&mut self, apps: Vec<AppEntry>) {
        let index = AppIndex::new(apps);
        tracing::info!(app_count = index.len(), "application index loaded");

        self.provider = LocalSearchProvider::new(index);
        self.index_status = IndexStatus::Ready;
        self.query.set_enabled(true);
        self.apply_results(Vec::new(), String::new());
    }

    /// Enters `Unavailable`: empty index, input disabled, notice raised.
    pub fn index_failed(&mut self, message: &str) {
        tracing::warn!(error = %message, "application index unavailable");

        self.provider = LocalSearchProvider::default();
        self.index_status = IndexStatus::Failed;
        self.query.set_enabled(false);
        self.apply_results(Vec::new(), String::new());
        self.notice = Some(Notice::new(FailureKind::IndexLoad, message));
    }

    /// Reacts to a query edit.
    ///
    /// Blank queries and local searches resolve immediately. In worker mode
    /// the search is posted and watched; the previous results stay on screen
    /// until the answer for the newest token arrives.
    ///
    /// Returns `true` if anything visible changed.
    pub fn on_query_change(&mut self, change: QueryChange, actions: &mut Vec<Action>) -> bool {
        let QueryChange::Search { query, token } = change else {
            return false;
        };

        self.notice = None;

        if query.trim().is_empty() || self.search_mode == SearchMode::Local {
            self.query.settle();
            match self.provider.search_applications(&query) {
                Ok(results) => self.apply_results(results, query),
                Err(e) => self.raise(FailureKind::Search, e.to_string()),
            }
            return true;
        }

        tracing::debug!(token = %token, query = %query, "posting search to worker");
        self.query.mark_in_flight(token);
        actions.push(Action::PostToWorker(WorkerMessage::search_applications(query, token)));
        actions.push(Action::WatchSearch(token));
        true
    }

    /// Applies worker results tagged `token` if they are still current.
    pub fn search_results(&mut self, token: SearchToken, results: Vec<AppEntry>) -> bool {
        if !self.query.accept(token) {
            return false;
        }
        let query = self.query.query().to_string();
        self.apply_results(results, query);
        true
    }

    /// Surfaces a failed search; previous results stay.
    pub fn search_failed(&mut self, token: SearchToken, message: &str) -> bool {
        if !self.query.accept(token) {
            return false;
        }
        self.raise(FailureKind::Search, message);
        true
    }

    /// Gives up on `token` after its deadline. Its late answer will be dropped.
    pub fn search_timed_out(&mut self, token: SearchToken) -> bool {
        if !self.query.abandon(token) {
            return false;
        }
        let message = format!("search for \"{}\"", self.query.query());
        self.raise(FailureKind::Timeout, message);
        true
    }

    fn apply_results(&mut self, results: Vec<AppEntry>, query: String) {
        let _span = tracing::debug_span!("apply_results",
            result_count = results.len(),
            query_len = query.len()
        ).entered();

        self.results = results;
        self.results_query = query;
        self.selection.on_results_changed(&self.results);
        self.viewport.recompute(0, self.results.len());
        if let Some(selected) = self.selection.selected_index() {
            self.viewport.scroll_to_index(selected);
        }
    }

    fn raise(&mut self, kind: FailureKind, message: impl Into<String>) {
        let notice = Notice::new(kind, message);
        tracing::debug!(kind = ?notice.kind, message = %notice.message, "notice raised");
        self.notice = Some(notice);
    }

    pub fn move_selection_down(&mut self) {
        self.selection.move_down(&self.results);
        self.scroll_to_selection();
    }

    pub fn move_selection_up(&mut self) {
        self.selection.move_up(&self.results);
        self.scroll_to_selection();
    }

    fn scroll_to_selection(&mut self) {
        if let Some(selected) = self.selection.selected_index() {
            self.viewport.scroll_to_index(selected);
        }
    }

    /// Launches the selected entry.
    ///
    /// `None` if nothing is selected or another launch is still pending.
    pub fn launch_selected(&mut self) -> Option<Action> {
        let entry = self.selection.current(&self.results)?.clone();
        let request = self.launcher.launch(&entry)?;
        Some(Action::Launch {
            id: request.id,
            path: request.path,
        })
    }

    /// Selects row `index`, then launches it.
    pub fn activate_row(&mut self, index: usize) -> Option<Action> {
        if !self.selection.select(index, &self.results) {
            return None;
        }
        self.scroll_to_selection();
        self.launch_selected()
    }

    /// Result index under terminal row `line`, if any.
    #[must_use]
    pub fn row_at_line(&self, line: usize) -> Option<usize> {
        let y = line.checked_sub(layout::LIST_TOP)?;
        self.viewport.index_at(u32::try_from(y).ok()?)
    }

    /// Applies the outcome of launch `id`.
    ///
    /// Success clears the query (back to `Idle`); failure leaves query and
    /// selection untouched and raises a notice.
    pub fn launch_completed(
        &mut self,
        id: LaunchId,
        result: Result<(), String>,
        actions: &mut Vec<Action>,
    ) -> bool {
        match self.launcher.complete(id, result) {
            LaunchOutcome::Ignored => false,
            LaunchOutcome::Succeeded(request) => {
                tracing::info!(name = %request.name, "application launched");
                let change = self.query.clear();
                self.on_query_change(change, actions);
                self.notice = None;
                true
            }
            LaunchOutcome::Failed { request, message } => {
                self.raise(FailureKind::Launch, format!("{}: {message}", request.name));
                true
            }
        }
    }

    pub fn launch_timed_out(&mut self, id: LaunchId) -> bool {
        let Some(request) = self.launcher.time_out(id) else {
            return false;
        };
        self.raise(FailureKind::Timeout, format!("launching {}", request.name));
        true
    }

    /// Escape: clears a non-empty query, otherwise hides the launcher.
    pub fn escape(&mut self, actions: &mut Vec<Action>) -> bool {
        if self.query.query().is_empty() {
            actions.push(Action::CloseFocus);
            return false;
        }
        let change = self.query.clear();
        self.on_query_change(change, actions)
    }

    /// Adapts the viewport to a pane with `rows` content rows.
    pub fn set_pane_rows(&mut self, rows: usize) -> bool {
        let list_rows = u32::try_from(layout::list_rows(rows)).unwrap_or(u32::MAX);
        if list_rows == self.viewport.viewport_height() {
            return false;
        }
        self.viewport.set_viewport_height(list_rows);
        self.viewport.clamp_scroll();
        self.scroll_to_selection();
        true
    }

    /// Resize request for the current result count, if the height changed.
    pub fn negotiate_size(&mut self) -> Option<Action> {
        let desired = self.resize.desired_height(self.results.len());
        self.resize
            .request_if_changed(desired)
            .map(|height| Action::RequestResize { height })
    }

    /// Computes the view model for the current state.
    ///
    /// Only the rows in the viewport's visible range (window plus overscan)
    /// are materialised.
    #[must_use]
    pub fn compute_viewmodel(&self, icons: &dyn IconResolver) -> UIViewModel {
        let phase = self.phase();
        let highlight_query = self.results_query.as_str();
        let selected = self.selection.selected_index();
        let scroll = i64::from(self.viewport.scroll_offset());

        let display_items = self
            .viewport
            .visible_range()
            .filter_map(|index| self.results.get(index).map(|entry| (index, entry)))
            .map(|(index, entry)| {
                let detail = entry
                    .description
                    .clone()
                    .unwrap_or_else(|| display_path(&entry.path));

                DisplayItem {
                    index,
                    name: entry.name.clone(),
                    is_selected: selected == Some(index),
                    top: i64::from(self.viewport.item_offset(index)) - scroll,
                    highlight_ranges: highlight(&entry.name, highlight_query),
                    detail_highlight_ranges: highlight(&detail, highlight_query),
                    icon: entry.icon_ref.as_deref().and_then(|icon| icons.resolve(icon)),
                    detail,
                }
            })
            .collect();

        UIViewModel {
            search_bar: SearchBarInfo {
                query: self.query.query().to_string(),
                placeholder: PLACEHOLDER.to_string(),
                enabled: phase.accepts_input(),
            },
            display_items,
            list_height: usize::try_from(self.viewport.viewport_height()).unwrap_or(usize::MAX),
            item_height: usize::try_from(self.viewport.item_height()).unwrap_or(1),
            status: self.compute_status(phase),
        }
    }

    fn compute_status(&self, phase: SessionPhase) -> StatusLine {
        if let Some(notice) = &self.notice {
            return StatusLine {
                text: notice.text(),
                is_notice: true,
            };
        }

        let text = if let Some(pending) = self.launcher.pending() {
            format!("Launching {}...", pending.name)
        } else {
            match phase {
                SessionPhase::Loading => "Loading applications...".to_string(),
                SessionPhase::Unavailable => "Applications unavailable".to_string(),
                SessionPhase::Idle => format!("{} applications  Esc: close", self.index().len()),
                SessionPhase::Typing => "Searching...".to_string(),
                SessionPhase::NoResults => "No results found  Esc: clear".to_string(),
                SessionPhase::ResultsReady => format!(
                    "{} of {}  Up/Down: select  Enter: launch  Esc: clear",
                    self.selection.selected_index().map_or(0, |i| i + 1),
                    self.results.len()
                ),
            }
        };

        StatusLine {
            text,
            is_notice: false,
        }
    }
}

/// Character ranges of the first case-insensitive occurrence of `query`.
///
/// `query` is used exactly as it was matched, surrounding whitespace included.
fn highlight(text: &str, query: &str) -> Vec<(usize, usize)> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    find_case_insensitive(text, query).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::NoIcons;

    fn apps() -> Vec<AppEntry> {
        vec![
            AppEntry::new("Chrome", "/host/apps/chrome.desktop").with_description("Web Browser"),
            AppEntry::new("Firefox", "/host/apps/firefox.desktop").with_description("Browse the Web"),
            AppEntry::new("Calculator", "/host/apps/calculator.desktop"),
        ]
    }

    fn ready(mode: SearchMode) -> AppState {
        let config = Config {
            search_mode: mode,
            ..Config::default()
        };
        let mut state = AppState::new(&config, Theme::default());
        state.set_pane_rows(13);
        state.index_loaded(apps());
        state
    }

    fn type_query(state: &mut AppState, text: &str) -> Vec<Action> {
        let mut actions = vec![];
        let change = state.query.set_query(text);
        state.on_query_change(change, &mut actions);
        actions
    }

    #[test]
    fn new_session_is_loading_and_ignores_input() {
        let mut state = AppState::new(&Config::default(), Theme::default());
        assert_eq!(state.phase(), SessionPhase::Loading);
        assert_eq!(state.query.set_query("fi"), QueryChange::Ignored);
        assert_eq!(state.query.query(), "");
    }

    #[test]
    fn local_search_applies_immediately_and_selects_first() {
        let mut state = ready(SearchMode::Local);
        let actions = type_query(&mut state, "fire");
        assert!(actions.is_empty());
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.selection.selected_index(), Some(0));
        assert_eq!(state.phase(), SessionPhase::ResultsReady);
    }

    #[test]
    fn worker_search_posts_and_keeps_previous_results() {
        let mut state = ready(SearchMode::Worker);
        let actions = type_query(&mut state, "c");
        assert_eq!(actions.len(), 2);
        assert!(matches!(actions[1], Action::WatchSearch(SearchToken(1))));
        assert_eq!(state.phase(), SessionPhase::Typing);
        assert!(state.results.is_empty());

        assert!(state.search_results(SearchToken(1), apps()));
        assert_eq!(state.results.len(), 3);
        assert_eq!(state.results_query, "c");
    }

    #[test]
    fn highlights_follow_the_query_that_produced_the_results() {
        let mut state = ready(SearchMode::Local);
        type_query(&mut state, "WEB");
        let vm = state.compute_viewmodel(&NoIcons);
        assert_eq!(vm.display_items.len(), 2);
        assert!(vm.display_items[0].highlight_ranges.is_empty());
        assert_eq!(vm.display_items[0].detail_highlight_ranges, vec![(0, 3)]);
        assert_eq!(vm.display_items[1].detail_highlight_ranges, vec![(11, 14)]);
    }

    #[test]
    fn leading_whitespace_is_highlighted_where_it_matched() {
        let mut state = ready(SearchMode::Local);
        state.index_loaded(vec![AppEntry::new("Vscode Code", "/host/apps/code.desktop")]);
        type_query(&mut state, " code");
        assert_eq!(state.results.len(), 1);

        let vm = state.compute_viewmodel(&NoIcons);
        assert_eq!(vm.display_items[0].highlight_ranges, vec![(6, 11)]);
    }

    #[test]
    fn entries_without_description_show_their_path() {
        let mut state = ready(SearchMode::Local);
        type_query(&mut state, "calc");
        let vm = state.compute_viewmodel(&NoIcons);
        assert_eq!(vm.display_items[0].detail, "~/apps/calculator.desktop");
    }

    #[test]
    fn escape_clears_then_closes() {
        let mut state = ready(SearchMode::Local);
        type_query(&mut state, "fire");

        let mut actions = vec![];
        assert!(state.escape(&mut actions));
        assert!(actions.is_empty());
        assert_eq!(state.phase(), SessionPhase::Idle);

        assert!(!state.escape(&mut actions));
        assert_eq!(actions, vec![Action::CloseFocus]);
    }

    #[test]
    fn failed_index_load_disables_input() {
        let mut state = AppState::new(&Config::default(), Theme::default());
        state.index_failed("no applications directory");
        assert_eq!(state.phase(), SessionPhase::Unavailable);
        assert_eq!(state.notice.as_ref().map(|n| n.kind), Some(FailureKind::IndexLoad));

        let vm = state.compute_viewmodel(&NoIcons);
        assert!(!vm.search_bar.enabled);
        assert!(vm.status.is_notice);
    }

    #[test]
    fn pane_rows_set_the_viewport_height() {
        let mut state = ready(SearchMode::Local);
        assert_eq!(state.viewport.viewport_height(), 10);
        assert!(state.set_pane_rows(5));
        assert_eq!(state.viewport.viewport_height(), 2);
        assert!(!state.set_pane_rows(5));
    }

    #[test]
    fn click_maps_lines_below_the_chrome_to_rows() {
        let mut state = ready(SearchMode::Local);
        type_query(&mut state, "r");
        assert_eq!(state.results.len(), 3);
        assert_eq!(state.row_at_line(0), None);
        assert_eq!(state.row_at_line(layout::LIST_TOP), Some(0));
        assert_eq!(state.row_at_line(layout::LIST_TOP + 2), Some(2));
        assert_eq!(state.row_at_line(layout::LIST_TOP + 3), None);
    }

    #[test]
    fn search_mode_parses_case_insensitively() {
        assert_eq!("Worker".parse::<SearchMode>(), Ok(SearchMode::Worker));
        assert!("remote".parse::<SearchMode>().is_err());
    }
}
