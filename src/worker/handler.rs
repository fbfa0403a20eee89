//! Background worker: index loading and asynchronous search.
//!
//! The worker owns its own copy of the application index. It is built by the
//! first `LoadApplications` message; searches that arrive before that are
//! answered with `SearchFailed`.

use crate::discovery::{DesktopEntryProvider, IndexProvider};
use crate::domain::error::{LaunchpadError, Result};
use crate::domain::{AppEntry, AppIndex};
use crate::search::{LocalSearchProvider, SearchProvider};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};

/// Worker state, created by Zellij on the worker thread.
#[derive(Serialize, Deserialize, Default)]
pub struct LauncherWorker {
    #[serde(skip)]
    search: Option<LocalSearchProvider>,
}

impl LauncherWorker {
    fn handle_load(&mut self, provider: &dyn IndexProvider) -> WorkerResponse {
        match provider.load_installed_apps() {
            Ok(apps) => {
                let index = AppIndex::new(apps);
                tracing::debug!(app_count = index.len(), "worker index ready");
                let apps: Vec<AppEntry> = index.to_vec();
                self.search = Some(LocalSearchProvider::new(index));
                WorkerResponse::ApplicationsLoaded { apps }
            }
            Err(e) => {
                tracing::warn!(error = %e, "application index load failed");
                self.search = Some(LocalSearchProvider::default());
                WorkerResponse::IndexLoadFailed {
                    message: e.to_string(),
                }
            }
        }
    }

    fn search(&self, query: &str) -> Result<Vec<AppEntry>> {
        self.search
            .as_ref()
            .ok_or_else(|| LaunchpadError::Search("application index not loaded".to_string()))?
            .search_applications(query)
    }

    /// Attaches the parent trace context carried by `message`.
    ///
    /// The returned guard must be held while the message is processed.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::current().with_remote_span_context(span_context).attach())
    }

    /// Processes one message, loading desktop entries from the filesystem.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        self.handle_message_with(message, |dirs| Box::new(DesktopEntryProvider::new(dirs)))
    }

    /// Processes one message with a caller-chosen index provider.
    pub fn handle_message_with<F>(&mut self, message: WorkerMessage, make_provider: F) -> WorkerResponse
    where
        F: FnOnce(&[String]) -> Box<dyn IndexProvider>,
    {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::LoadApplications { dirs, .. } => {
                let provider = make_provider(&dirs);
                self.handle_load(provider.as_ref())
            }
            WorkerMessage::SearchApplications { query, token, .. } => match self.search(&query) {
                Ok(results) => WorkerResponse::SearchResults { token, results },
                Err(e) => {
                    tracing::debug!(token = %token, error = %e, "worker search failed");
                    WorkerResponse::SearchFailed {
                        token,
                        message: e.to_string(),
                    }
                }
            },
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod zellij {
    use super::LauncherWorker;
    use crate::worker::{WorkerMessage, WorkerResponse};
    use std::sync::atomic::{AtomicBool, Ordering};
    use zellij_tile::prelude::{PluginMessage, ZellijWorker};
    use zellij_tile::shim::post_message_to_plugin;

    static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

    fn reply(name: String, response: &WorkerResponse) {
        match serde_json::to_string(response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::debug!(error = %e, "failed to serialize worker response"),
        }
    }

    impl ZellijWorker<'_> for LauncherWorker {
        fn on_message(&mut self, message: String, payload: String) {
            if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
                crate::observability::init_tracing(&crate::Config::default());
            }

            let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!(error = %e, "failed to deserialize worker message");
                    return;
                }
            };

            let response = self.handle_message(worker_message);
            reply(message, &response);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::query::SearchToken;

    struct Fixed(Result<Vec<AppEntry>>);

    impl IndexProvider for Fixed {
        fn load_installed_apps(&self) -> Result<Vec<AppEntry>> {
            match &self.0 {
                Ok(apps) => Ok(apps.clone()),
                Err(e) => Err(LaunchpadError::IndexLoad(e.to_string())),
            }
        }
    }

    fn load(worker: &mut LauncherWorker, apps: Result<Vec<AppEntry>>) -> WorkerResponse {
        worker.handle_message_with(WorkerMessage::load_applications(vec![]), move |_| {
            Box::new(Fixed(apps))
        })
    }

    fn search(query: &str, token: u64) -> WorkerMessage {
        WorkerMessage::search_applications(query.to_string(), SearchToken(token))
    }

    #[test]
    fn search_before_load_fails_with_its_token() {
        let mut worker = LauncherWorker::default();
        let response = worker.handle_message(search("fire", 4));
        assert!(matches!(response, WorkerResponse::SearchFailed { token: SearchToken(4), .. }));
    }

    #[test]
    fn loaded_worker_answers_tagged_searches() {
        let mut worker = LauncherWorker::default();
        let response = load(
            &mut worker,
            Ok(vec![
                AppEntry::new("Chrome", "/a/chrome.desktop"),
                AppEntry::new("Firefox", "/a/firefox.desktop"),
            ]),
        );
        assert!(matches!(response, WorkerResponse::ApplicationsLoaded { ref apps } if apps.len() == 2));

        match worker.handle_message(search("FIRE", 9)) {
            WorkerResponse::SearchResults { token, results } => {
                assert_eq!(token, SearchToken(9));
                assert_eq!(results.len(), 1);
                assert_eq!(results[0].name, "Firefox");
            }
            other => panic!("unexpected response {other:?}"),
        }
    }

    #[test]
    fn failed_load_reports_and_leaves_an_empty_index() {
        let mut worker = LauncherWorker::default();
        let response = load(&mut worker, Err(LaunchpadError::IndexLoad("no dirs".into())));
        assert!(matches!(response, WorkerResponse::IndexLoadFailed { ref message } if message.contains("no dirs")));

        let response = worker.handle_message(search("x", 1));
        assert_eq!(
            response,
            WorkerResponse::SearchResults {
                token: SearchToken(1),
                results: vec![]
            }
        );
    }

    #[test]
    fn load_from_desktop_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("calc.desktop"),
            "[Desktop Entry]\nName=Calculator\nExec=calc\n",
        )
        .unwrap();

        let mut worker = LauncherWorker::default();
        let message = WorkerMessage::load_applications(vec![dir.path().to_string_lossy().into_owned()]);
        match worker.handle_message(message) {
            WorkerResponse::ApplicationsLoaded { apps } => assert_eq!(apps[0].name, "Calculator"),
            other => panic!("unexpected response {other:?}"),
        }
    }
}
