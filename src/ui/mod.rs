//! Terminal user interface.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready data and the fixed layout
//! - [`renderer`]: rendering entry point
//! - [`components`]: search line, result list, status line
//! - [`helpers`]: truncation and match highlighting
//! - [`theme`]: color themes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{DisplayItem, SearchBarInfo, StatusLine, UIViewModel};
