//! Launch bookkeeping.
//!
//! [`LaunchCoordinator`] turns a confirmed entry into a launch request and
//! matches the eventual completion back to it. Only one launch may be
//! outstanding; confirming again while it runs does nothing.

use crate::domain::AppEntry;
use std::fmt;

/// Identifier of one launch request, echoed back by its completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LaunchId(pub u64);

impl fmt::Display for LaunchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for LaunchId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// A launch that was handed to the launch service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub id: LaunchId,
    pub path: String,
    pub name: String,
}

/// What a completion means for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The completion does not belong to the outstanding launch.
    Ignored,
    /// The application started.
    Succeeded(LaunchRequest),
    /// The application did not start.
    Failed { request: LaunchRequest, message: String },
}

#[derive(Debug, Clone, Default)]
pub struct LaunchCoordinator {
    pending: Option<LaunchRequest>,
    next_id: u64,
}

impl LaunchCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn pending(&self) -> Option<&LaunchRequest> {
        self.pending.as_ref()
    }

    /// Starts launching `entry`.
    ///
    /// Returns `None` if another launch is still outstanding.
    pub fn launch(&mut self, entry: &AppEntry) -> Option<LaunchRequest> {
        if let Some(pending) = &self.pending {
            tracing::debug!(pending = %pending.path, requested = %entry.path, "launch already in flight");
            return None;
        }

        self.next_id += 1;
        let request = LaunchRequest {
            id: LaunchId(self.next_id),
            path: entry.path.clone(),
            name: entry.name.clone(),
        };

        tracing::info!(id = %request.id, name = %request.name, path = %request.path, "launching application");
        self.pending = Some(request.clone());
        Some(request)
    }

    /// Resolves the outstanding launch with the service's result.
    pub fn complete(&mut self, id: LaunchId, result: Result<(), String>) -> LaunchOutcome {
        let Some(request) = self.take_pending(id) else {
            tracing::debug!(id = %id, "ignoring completion for unknown launch");
            return LaunchOutcome::Ignored;
        };

        match result {
            Ok(()) => {
                tracing::info!(id = %id, path = %request.path, "launch succeeded");
                LaunchOutcome::Succeeded(request)
            }
            Err(message) => {
                tracing::warn!(id = %id, path = %request.path, error = %message, "launch failed");
                LaunchOutcome::Failed { request, message }
            }
        }
    }

    /// Gives up on launch `id` after its deadline passed.
    ///
    /// Returns the abandoned request, or `None` if it had already completed.
    pub fn time_out(&mut self, id: LaunchId) -> Option<LaunchRequest> {
        let request = self.take_pending(id)?;
        tracing::warn!(id = %id, path = %request.path, "launch timed out");
        Some(request)
    }

    fn take_pending(&mut self, id: LaunchId) -> Option<LaunchRequest> {
        if self.pending.as_ref().is_some_and(|pending| pending.id == id) {
            self.pending.take()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> AppEntry {
        AppEntry::new("Firefox", "/usr/share/applications/firefox.desktop")
    }

    #[test]
    fn launch_mints_increasing_ids() {
        let mut coordinator = LaunchCoordinator::new();
        let first = coordinator.launch(&entry()).unwrap();
        coordinator.complete(first.id, Ok(()));
        let second = coordinator.launch(&entry()).unwrap();
        assert!(second.id > first.id);
        assert_eq!(second.path, "/usr/share/applications/firefox.desktop");
    }

    #[test]
    fn second_launch_while_pending_is_ignored() {
        let mut coordinator = LaunchCoordinator::new();
        assert!(coordinator.launch(&entry()).is_some());
        assert!(coordinator.launch(&entry()).is_none());
    }

    #[test]
    fn failure_reports_message_and_frees_the_slot() {
        let mut coordinator = LaunchCoordinator::new();
        let request = coordinator.launch(&entry()).unwrap();
        let outcome = coordinator.complete(request.id, Err("permission denied".into()));
        assert_eq!(
            outcome,
            LaunchOutcome::Failed {
                request,
                message: "permission denied".into()
            }
        );
        assert!(coordinator.pending().is_none());
    }

    #[test]
    fn unknown_and_late_completions_are_ignored() {
        let mut coordinator = LaunchCoordinator::new();
        let request = coordinator.launch(&entry()).unwrap();
        assert_eq!(coordinator.complete(LaunchId(99), Ok(())), LaunchOutcome::Ignored);

        assert!(coordinator.time_out(request.id).is_some());
        assert_eq!(coordinator.complete(request.id, Ok(())), LaunchOutcome::Ignored);
        assert!(coordinator.time_out(request.id).is_none());
    }

    #[test]
    fn launch_id_round_trips_through_text() {
        let id: LaunchId = "42".parse().unwrap();
        assert_eq!(id, LaunchId(42));
        assert_eq!(id.to_string(), "42");
    }
}
