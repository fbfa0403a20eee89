//! Application layer: the launcher session.
//!
//! This module sits between the plugin runtime (main.rs) and the search,
//! discovery and worker layers. It owns every piece of per-session state and
//! decides what the runtime should do next.
//!
//! # Architecture
//!
//! ```text
//! Input / Host / Worker → Event → handle_event → AppState → Actions → Runtime
//!                                       ↑                         ↓
//!                                       └──── responses, timers ──┘
//! ```
//!
//! # Modules
//!
//! - [`selection`]: highlighted row, preserved across result changes
//! - [`viewport`]: windowed rendering of long result lists
//! - [`resize`]: host pane height negotiation
//! - [`query`]: query text and search tokens for stale-response filtering
//! - [`launch`]: launch requests and their outcomes
//! - [`notice`]: user-visible failure notices
//! - [`modes`]: session phase state machine
//! - [`actions`]: side effects for the runtime
//! - [`handler`]: event processing
//! - [`state`]: session state and view model computation

pub mod actions;
pub mod handler;
pub mod launch;
pub mod modes;
pub mod notice;
pub mod query;
pub mod resize;
pub mod selection;
pub mod state;
pub mod viewport;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use launch::{LaunchCoordinator, LaunchId};
pub use modes::{IndexStatus, SessionPhase};
pub use query::{QueryController, SearchToken};
pub use resize::{ResizeGeometry, ResizeNegotiator};
pub use selection::SelectionModel;
pub use state::{AppState, SearchMode};
pub use viewport::ViewportVirtualizer;
