//! Side effects produced by the event handler.
//!
//! The handler never talks to Zellij itself. It returns a `Vec<Action>` and
//! the plugin shim executes them in order after the state update finished, so
//! every host call observes a consistent session.

use crate::app::launch::LaunchId;
use crate::app::query::SearchToken;
use crate::worker::WorkerMessage;

/// Commands for the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the launcher pane.
    CloseFocus,

    /// Posts a message to the background worker.
    PostToWorker(WorkerMessage),

    /// Arms the deadline for search `token`.
    ///
    /// The runtime answers with `Event::SearchTimedOut` once it expires,
    /// whether or not the search completed.
    WatchSearch(SearchToken),

    /// Starts the application at `path`; completion is reported with `id`.
    Launch {
        id: LaunchId,
        path: String,
    },

    /// Resizes the launcher pane to `height` rows. Fire-and-forget.
    RequestResize {
        height: u32,
    },
}
