//! Top-level rendering entry point.
//!
//! ```text
//! AppState ──compute_viewmodel──▶ UIViewModel ──components──▶ ANSI on stdout
//! ```

use crate::app::AppState;
use crate::discovery::IconResolver;
use crate::ui::components;

/// Renders the launcher for a pane of `rows` x `cols`.
///
/// Output is written with `print!`, as Zellij expects from a plugin's
/// `render`. The screen is not cleared; every line is padded to `cols`.
pub fn render(state: &AppState, icons: &dyn IconResolver, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols).entered();

    let viewmodel = state.compute_viewmodel(icons);
    components::render_launcher(&viewmodel, &state.theme, rows, cols);
}
