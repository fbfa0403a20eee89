//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point from the plugin runtime. It
//! translates input, host callbacks and worker responses into `AppState`
//! method calls and collects the resulting side effects as [`Action`]s.
//!
//! # Event Types
//!
//! - **Keyboard**: `KeyDown`, `KeyUp`, `Enter`, `Escape`, `Char`, `Backspace`
//! - **Pointer**: `ActivateRow`, `ClickAt`, `Scroll`
//! - **Host**: `Start`, `PaneResized`, `LaunchCompleted`, `ResizeFailed`
//! - **Deadlines**: `SearchTimedOut`, `LaunchTimedOut`
//! - **Worker**: `WorkerResponse` with typed message variants
//!
//! After every event the handler asks the resize negotiator whether the host
//! pane needs a new height, so a resize request always trails the result
//! change that caused it.
//!
//! # Example
//!
//! ```
//! use zlaunchpad::app::{handle_event, AppState, Event};
//! use zlaunchpad::ui::Theme;
//! use zlaunchpad::Config;
//!
//! let mut state = AppState::new(&Config::default(), Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Start)?;
//! assert!(!actions.is_empty());
//! # Ok::<(), zlaunchpad::domain::LaunchpadError>(())
//! ```

use crate::app::launch::LaunchId;
use crate::app::query::SearchToken;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::worker::WorkerResponse;

/// Events triggered by user input, host callbacks or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Permissions granted: start loading the application index.
    Start,

    /// Moves the selection down one row (wraps to the top).
    KeyDown,
    /// Moves the selection up one row (wraps to the bottom).
    KeyUp,
    /// Launches the selected entry.
    Enter,
    /// Clears the query, or hides the launcher if the query is empty.
    Escape,
    /// Appends a character to the query.
    Char(char),
    /// Removes the last character of the query.
    Backspace,

    /// Selects result `index` and launches it.
    ActivateRow(usize),
    /// Left click at terminal row `line` of the plugin pane.
    ClickAt { line: usize },
    /// Mouse wheel, positive scrolls towards the end of the list.
    Scroll(i64),

    /// The plugin pane now has `rows` content rows.
    PaneResized { rows: usize },

    /// The launch command for `id` finished.
    LaunchCompleted { id: LaunchId, result: std::result::Result<(), String> },

    /// The host could not apply a requested height.
    ResizeFailed { height: u32, message: String },

    /// The deadline for search `token` passed.
    SearchTimedOut(SearchToken),
    /// The deadline for launch `id` passed.
    LaunchTimedOut(LaunchId),

    /// Wraps a response from the background worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates state and returns `(should_render, actions)`.
///
/// Actions are returned in execution order. Keyboard and pointer events are
/// ignored while the index is loading or unavailable, except `Escape`.
///
/// # Errors
///
/// Failures at external call sites are turned into notices, so the current
/// event set never produces an error; the `Result` is kept for the runtime
/// contract.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let mut actions = vec![];
    let accepts_input = state.phase().accepts_input();

    let should_render = match event {
        Event::Start => {
            tracing::debug!(dirs = ?state.app_dirs, "requesting application index");
            actions.push(Action::PostToWorker(state.load_request()));
            true
        }
        Event::KeyDown | Event::KeyUp | Event::Enter | Event::ActivateRow(_) | Event::ClickAt { .. }
            if !accepts_input =>
        {
            false
        }
        Event::KeyDown => {
            state.move_selection_down();
            true
        }
        Event::KeyUp => {
            state.move_selection_up();
            true
        }
        Event::Enter => match state.launch_selected() {
            Some(action) => {
                actions.push(action);
                true
            }
            None => {
                tracing::debug!("nothing to launch");
                false
            }
        },
        Event::Escape => state.escape(&mut actions),
        Event::Char(c) => {
            let change = state.query.push(*c);
            state.on_query_change(change, &mut actions)
        }
        Event::Backspace => {
            let change = state.query.pop();
            state.on_query_change(change, &mut actions)
        }
        Event::ActivateRow(index) => activate(state, *index, &mut actions),
        Event::ClickAt { line } => match state.row_at_line(*line) {
            Some(index) => activate(state, index, &mut actions),
            None => false,
        },
        Event::Scroll(delta) => {
            let before = state.viewport.scroll_offset();
            state.viewport.scroll_by(*delta);
            before != state.viewport.scroll_offset()
        }
        Event::PaneResized { rows } => state.set_pane_rows(*rows),
        Event::LaunchCompleted { id, result } => {
            state.launch_completed(*id, result.clone(), &mut actions)
        }
        Event::ResizeFailed { height, message } => {
            state.resize.on_request_failed(*height, message);
            false
        }
        Event::SearchTimedOut(token) => state.search_timed_out(*token),
        Event::LaunchTimedOut(id) => state.launch_timed_out(*id),
        Event::WorkerResponse(response) => match response {
            WorkerResponse::ApplicationsLoaded { apps } => {
                state.index_loaded(apps.clone());
                true
            }
            WorkerResponse::IndexLoadFailed { message } => {
                state.index_failed(message);
                true
            }
            WorkerResponse::SearchResults { token, results } => {
                state.search_results(*token, results.clone())
            }
            WorkerResponse::SearchFailed { token, message } => state.search_failed(*token, message),
        },
    };

    if let Some(resize) = state.negotiate_size() {
        actions.push(resize);
    }

    Ok((should_render, actions))
}

fn activate(state: &mut AppState, index: usize, actions: &mut Vec<Action>) -> bool {
    match state.activate_row(index) {
        Some(action) => {
            actions.push(action);
            true
        }
        None => {
            tracing::debug!(index, "row activation ignored");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::modes::SessionPhase;
    use crate::domain::AppEntry;
    use crate::ui::theme::Theme;
    use crate::Config;

    fn loaded() -> AppState {
        let mut state = AppState::new(&Config::default(), Theme::default());
        handle_event(&mut state, &Event::PaneResized { rows: 13 }).unwrap();
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::ApplicationsLoaded {
                apps: vec![
                    AppEntry::new("Chrome", "/host/apps/chrome.desktop"),
                    AppEntry::new("Firefox", "/host/apps/firefox.desktop"),
                ],
            }),
        )
        .unwrap();
        state
    }

    fn launch_of(actions: &[Action]) -> Option<LaunchId> {
        actions.iter().find_map(|action| match action {
            Action::Launch { id, .. } => Some(*id),
            _ => None,
        })
    }

    #[test]
    fn start_posts_the_load_request_and_sizes_the_pane() {
        let mut state = AppState::new(&Config::default(), Theme::default());
        let (_, actions) = handle_event(&mut state, &Event::Start).unwrap();
        assert!(matches!(actions[0], Action::PostToWorker(_)));
        assert_eq!(actions[1], Action::RequestResize { height: 5 });
    }

    #[test]
    fn input_is_ignored_while_loading() {
        let mut state = AppState::new(&Config::default(), Theme::default());
        let (render, actions) = handle_event(&mut state, &Event::Char('f')).unwrap();
        assert!(!render);
        assert_eq!(state.query.query(), "");
        assert!(actions.iter().all(|a| matches!(a, Action::RequestResize { .. })));
        let (render, _) = handle_event(&mut state, &Event::Enter).unwrap();
        assert!(!render);
    }

    #[test]
    fn typing_resizes_once_per_height_change() {
        let mut state = loaded();
        let (_, actions) = handle_event(&mut state, &Event::Char('f')).unwrap();
        assert_eq!(actions, vec![Action::RequestResize { height: 9 }]);

        let (_, actions) = handle_event(&mut state, &Event::Char('i')).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn enter_launches_and_success_returns_to_idle() {
        let mut state = loaded();
        handle_event(&mut state, &Event::Char('f')).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Enter).unwrap();
        let id = launch_of(&actions).unwrap();

        // Second confirm while pending is ignored.
        let (_, actions) = handle_event(&mut state, &Event::Enter).unwrap();
        assert!(launch_of(&actions).is_none());

        handle_event(&mut state, &Event::LaunchCompleted { id, result: Ok(()) }).unwrap();
        assert_eq!(state.phase(), SessionPhase::Idle);
        assert_eq!(state.selection.selected_index(), None);
    }

    #[test]
    fn launch_failure_keeps_query_and_selection() {
        let mut state = loaded();
        handle_event(&mut state, &Event::Char('r')).unwrap();
        handle_event(&mut state, &Event::KeyDown).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Enter).unwrap();
        let id = launch_of(&actions).unwrap();

        let failed = Event::LaunchCompleted {
            id,
            result: Err("exit status 1".into()),
        };
        handle_event(&mut state, &failed).unwrap();
        assert_eq!(state.query.query(), "r");
        assert_eq!(state.selection.selected_index(), Some(1));
        assert!(state.notice.is_some());
    }

    #[test]
    fn click_selects_and_launches_the_row() {
        let mut state = loaded();
        handle_event(&mut state, &Event::Char('r')).unwrap();
        let line = crate::ui::viewmodel::layout::LIST_TOP + 1;
        let (_, actions) = handle_event(&mut state, &Event::ClickAt { line }).unwrap();
        assert!(matches!(&actions[0], Action::Launch { path, .. } if path.ends_with("firefox.desktop")));
        assert_eq!(state.selection.selected_index(), Some(1));
    }

    #[test]
    fn failed_resize_is_not_repeated_for_the_same_height() {
        let mut state = loaded();
        let (_, actions) = handle_event(&mut state, &Event::Char('r')).unwrap();
        assert_eq!(actions, vec![Action::RequestResize { height: 10 }]);

        let failed = Event::ResizeFailed {
            height: 10,
            message: "launcher pane is not floating".into(),
        };
        let (render, actions) = handle_event(&mut state, &failed).unwrap();
        assert!(!render);
        assert!(actions.is_empty());

        for event in [Event::KeyDown, Event::KeyDown, Event::Scroll(1)] {
            let (_, actions) = handle_event(&mut state, &event).unwrap();
            assert!(actions.is_empty());
        }

        let (_, actions) = handle_event(&mut state, &Event::Char('e')).unwrap();
        assert_eq!(actions, vec![Action::RequestResize { height: 9 }]);
    }
}
