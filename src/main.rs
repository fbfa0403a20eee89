//! Zellij plugin wrapper and entry point.
//!
//! This is the thin integration layer between the `zlaunchpad` library and
//! the Zellij plugin system. It translates host events into library events,
//! hands them to [`handle_event`] and executes the returned actions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← session state, rendering
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │ LauncherWorker   │   │  ← desktop entry scanning
//! │  │ (worker thread)  │   │  ← worker-mode searches
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: once granted, the worker is asked to load the index
//! 3. **Update**: map Zellij events, delegate to the library, run actions
//! 4. **Render**: report pane height changes, then draw
//!
//! # Event Mapping
//!
//! - `Key(Down)` / `Ctrl+n` → `Event::KeyDown`
//! - `Key(Up)` / `Ctrl+p` → `Event::KeyUp`
//! - `Key(Enter)` → `Event::Enter`
//! - `Key(Esc)` → `Event::Escape`
//! - `Mouse(ScrollUp/ScrollDown)` → `Event::Scroll`
//! - `Mouse(LeftClick)` → `Event::ClickAt`
//! - `RunCommandResult` tagged with a launch id → `Event::LaunchCompleted`
//! - `Timer` → `Event::SearchTimedOut` / `Event::LaunchTimedOut`
//!
//! # Deadlines
//!
//! Zellij timers carry no payload, so deadlines are kept in a FIFO queue. All
//! of them use the same duration and therefore fire in the order they were
//! armed.

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_arch = "wasm32")]
mod plugin {
    use std::collections::{BTreeMap, VecDeque};
    use zellij_tile::prelude::*;
    use zellij_tile::shim::post_message_to;

    use zlaunchpad::app::{LaunchId, SearchToken};
    use zlaunchpad::discovery::{CachedIconResolver, FileIconResolver};
    use zlaunchpad::infrastructure::launch_command;
    use zlaunchpad::worker::{WorkerMessage, WorkerResponse};
    use zlaunchpad::{handle_event, Action, Config, Event};

    const LAUNCH_ID_KEY: &str = "launch_id";

    /// An armed timer and what its expiry means.
    #[derive(Debug, Clone, Copy)]
    enum Deadline {
        Search(SearchToken),
        Launch(LaunchId),
    }

    /// Plugin state wrapper.
    ///
    /// Wraps the library's `AppState` with Zellij-specific concerns: worker
    /// messaging, timers and the pane geometry last seen.
    pub struct State {
        app: zlaunchpad::AppState,

        /// Worker thread identifier for IPC messaging.
        worker_name: String,

        request_timeout_secs: f64,

        /// Armed timers, oldest first.
        deadlines: VecDeque<Deadline>,

        /// Whether the launcher pane floats; `None` until the first pane update.
        pane_floating: Option<bool>,

        /// Content rows at the last render.
        rows: usize,

        icons: CachedIconResolver<FileIconResolver>,
    }

    impl Default for State {
        fn default() -> Self {
            let config = Config::default();
            Self {
                app: zlaunchpad::initialize(&config),
                worker_name: "zlaunchpad".to_string(),
                request_timeout_secs: config.request_timeout_secs,
                deadlines: VecDeque::new(),
                pane_floating: None,
                rows: 0,
                icons: CachedIconResolver::new(FileIconResolver::default()),
            }
        }
    }

    impl ZellijPlugin for State {
        /// Parses configuration, requests permissions and subscribes to events.
        ///
        /// Loading the index waits for the permission grant.
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            zlaunchpad::observability::init_tracing(&config);

            let span = tracing::debug_span!("plugin_load");
            let _guard = span.entered();

            tracing::debug!(config = ?config, "parsed configuration");
            self.app = zlaunchpad::initialize(&config);
            self.request_timeout_secs = config.request_timeout_secs;

            request_permission(&[
                PermissionType::ReadApplicationState,
                PermissionType::ChangeApplicationState,
                PermissionType::RunCommands,
                PermissionType::FullHdAccess,
            ]);

            subscribe(&[
                EventType::Key,
                EventType::Mouse,
                EventType::CustomMessage,
                EventType::RunCommandResult,
                EventType::PermissionRequestResult,
                EventType::Timer,
                EventType::PaneUpdate,
            ]);

            tracing::debug!("plugin load complete - waiting for permissions");
        }

        fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
            let event_name = Self::get_event_name(&event);
            let span_name = format!("plugin_update::{event_name}");
            let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
            let _guard = span.entered();

            let our_event = match event {
                zellij_tile::prelude::Event::Key(ref key) => match Self::map_key_event(key) {
                    Some(event) => event,
                    None => return false,
                },
                zellij_tile::prelude::Event::Mouse(mouse) => match Self::map_mouse_event(mouse) {
                    Some(event) => event,
                    None => return false,
                },
                zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                    match self.map_custom_message_event(&message, &payload) {
                        Some(event) => event,
                        None => return false,
                    }
                }
                zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, context) => {
                    match Self::map_command_result_event(exit_code, &stderr, &context) {
                        Some(event) => event,
                        None => return false,
                    }
                }
                zellij_tile::prelude::Event::Timer(_elapsed) => match self.deadlines.pop_front() {
                    Some(Deadline::Search(token)) => Event::SearchTimedOut(token),
                    Some(Deadline::Launch(id)) => Event::LaunchTimedOut(id),
                    None => return false,
                },
                zellij_tile::prelude::Event::PaneUpdate(manifest) => {
                    self.track_own_pane(&manifest);
                    return false;
                }
                zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                    PermissionStatus::Granted => {
                        tracing::debug!("permissions granted - loading applications");
                        Event::Start
                    }
                    PermissionStatus::Denied => {
                        tracing::warn!("permissions denied - applications cannot be loaded");
                        return false;
                    }
                },
                _ => return false,
            };

            self.dispatch(&our_event)
        }

        /// Reports a changed pane height to the session, then draws.
        fn render(&mut self, rows: usize, cols: usize) {
            if rows != self.rows {
                self.rows = rows;
                self.dispatch(&Event::PaneResized { rows });
            }
            zlaunchpad::ui::render(&self.app, &self.icons, rows, cols);
        }
    }

    impl State {
        /// Runs `event` through the library and executes the resulting actions.
        fn dispatch(&mut self, event: &Event) -> bool {
            match handle_event(&mut self.app, event) {
                Ok((should_render, actions)) => {
                    tracing::debug!(
                        action_count = actions.len(),
                        should_render = should_render,
                        "event handled successfully"
                    );
                    for action in actions {
                        self.execute_action(&action);
                    }
                    should_render
                }
                Err(e) => {
                    tracing::debug!(error = %e, "error handling event");
                    false
                }
            }
        }

        /// Gets a string name for a Zellij event for logging purposes.
        fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
            match event {
                zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
                zellij_tile::prelude::Event::Mouse(mouse) => format!("Mouse({mouse:?})"),
                zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
                zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
                zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
                zellij_tile::prelude::Event::PaneUpdate(..) => "PaneUpdate".to_string(),
                zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                    "PermissionRequestResult".to_string()
                }
                _ => "Other".to_string(),
            }
        }

        /// Maps keyboard events to application events.
        ///
        /// Every printable character goes to the query, so navigation uses
        /// the arrow keys or `Ctrl+n` / `Ctrl+p`.
        fn map_key_event(key: &KeyWithModifier) -> Option<Event> {
            tracing::debug!(bare_key = ?key.bare_key, "key event");

            if key.has_modifiers(&[KeyModifier::Ctrl]) {
                return match key.bare_key {
                    BareKey::Char('n') => Some(Event::KeyDown),
                    BareKey::Char('p') => Some(Event::KeyUp),
                    _ => None,
                };
            }

            Some(match key.bare_key {
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Enter => Event::Enter,
                BareKey::Esc => Event::Escape,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) if !key.has_modifiers(&[KeyModifier::Alt]) => Event::Char(c),
                _ => return None,
            })
        }

        fn map_mouse_event(mouse: Mouse) -> Option<Event> {
            match mouse {
                Mouse::ScrollUp(lines) => Some(Event::Scroll(-i64::try_from(lines).unwrap_or(1))),
                Mouse::ScrollDown(lines) => Some(Event::Scroll(i64::try_from(lines).unwrap_or(1))),
                Mouse::LeftClick(line, _col) => usize::try_from(line).ok().map(|line| Event::ClickAt { line }),
                _ => None,
            }
        }

        /// Maps custom message events to application events.
        fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
            tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

            if message != self.worker_name {
                tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
                return None;
            }

            match serde_json::from_str::<WorkerResponse>(payload) {
                Ok(response) => Some(Event::WorkerResponse(response)),
                Err(e) => {
                    tracing::debug!(error = %e, "failed to deserialize worker response");
                    None
                }
            }
        }

        /// Maps a finished launch command to its completion event.
        fn map_command_result_event(
            exit_code: Option<i32>,
            stderr: &[u8],
            context: &BTreeMap<String, String>,
        ) -> Option<Event> {
            tracing::debug!(exit_code = ?exit_code, "run command result event");

            let id = context.get(LAUNCH_ID_KEY)?.parse::<LaunchId>().ok()?;
            let result = if exit_code == Some(0) {
                Ok(())
            } else {
                let stderr = String::from_utf8_lossy(stderr).trim().to_string();
                Err(if !stderr.is_empty() {
                    stderr
                } else if let Some(code) = exit_code {
                    format!("exit status {code}")
                } else {
                    "terminated by signal".to_string()
                })
            };
            Some(Event::LaunchCompleted { id, result })
        }

        /// Remembers whether this plugin's pane is floating.
        fn track_own_pane(&mut self, manifest: &PaneManifest) {
            let plugin_id = get_plugin_ids().plugin_id;
            let own = manifest
                .panes
                .values()
                .flatten()
                .find(|pane| pane.is_plugin && pane.id == plugin_id);
            if let Some(pane) = own {
                self.pane_floating = Some(pane.is_floating);
            }
        }

        fn arm(&mut self, deadline: Deadline) {
            self.deadlines.push_back(deadline);
            set_timeout(self.request_timeout_secs);
        }

        /// Posts a message to the worker thread.
        fn post_worker_message(&self, message: &WorkerMessage) {
            match serde_json::to_string(&message) {
                Ok(payload) => {
                    tracing::debug!(payload_len = payload.len(), "posting message to worker");
                    post_message_to(PluginMessage {
                        worker_name: Some(self.worker_name.clone()),
                        name: self.worker_name.clone(),
                        payload,
                    });
                }
                Err(e) => {
                    tracing::debug!(error = %e, "failed to serialize worker message");
                }
            }
        }

        fn launch(&mut self, id: LaunchId, path: &str) {
            let command = match launch_command(path) {
                Ok(command) => command,
                Err(e) => {
                    self.dispatch(&Event::LaunchCompleted {
                        id,
                        result: Err(e.to_string()),
                    });
                    return;
                }
            };

            tracing::debug!(command = ?command, "running launch command");
            let args: Vec<&str> = command.iter().map(String::as_str).collect();
            let context = BTreeMap::from([(LAUNCH_ID_KEY.to_string(), id.to_string())]);
            run_command(&args, context);
            self.arm(Deadline::Launch(id));
        }

        /// A tiled pane cannot be resized; the host call is skipped and the
        /// failure reported once for this height.
        fn resize(&mut self, height: u32) {
            if self.pane_floating == Some(false) {
                self.dispatch(&Event::ResizeFailed {
                    height,
                    message: "launcher pane is not floating".to_string(),
                });
                return;
            }

            let pane = PaneId::Plugin(get_plugin_ids().plugin_id);
            let coordinates = FloatingPaneCoordinates::default().with_height_fixed(height as usize);
            change_floating_panes_coordinates(vec![(pane, coordinates)]);
        }

        /// Translates library actions to Zellij API calls.
        #[tracing::instrument(level = "debug", skip(self))]
        fn execute_action(&mut self, action: &Action) {
            match action {
                Action::CloseFocus => hide_self(),
                Action::PostToWorker(ref message) => self.post_worker_message(message),
                Action::WatchSearch(token) => self.arm(Deadline::Search(*token)),
                Action::Launch { id, ref path } => self.launch(*id, path),
                Action::RequestResize { height } => self.resize(*height),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
use {plugin::State, zellij_tile::prelude::*, zlaunchpad::worker::LauncherWorker};

#[cfg(target_arch = "wasm32")]
register_plugin!(State);
#[cfg(target_arch = "wasm32")]
register_worker!(LauncherWorker, zlaunchpad_worker, ZLAUNCHPAD_WORKER);

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("zlaunchpad is a Zellij plugin; build it for wasm32-wasip1 and load it from a layout");
}
