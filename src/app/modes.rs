//! Session phase state machine.
//!
//! ```text
//!   Loading ──index loaded──▶ Idle ◀──Escape / launch success──┐
//!      │                       │                               │
//!      │ load failed           │ query non-empty               │
//!      ▼                       ▼                               │
//!  Unavailable              Typing ──results──▶ ResultsReady ──┤
//!                                   └─────────▶ NoResults ─────┘
//! ```
//!
//! The phase is derived, never stored independently of the data it describes:
//! [`SessionPhase::derive`] computes it from the index status, the query and
//! the current result count.

/// Whether the application index is usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStatus {
    /// Initial load still running.
    Loading,
    /// Loaded; searches are enabled.
    Ready,
    /// The provider failed; searches stay disabled for this session.
    Failed,
}

/// Session-level state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the application index; input disabled.
    Loading,
    /// The index could not be loaded; input disabled.
    Unavailable,
    /// Empty query.
    Idle,
    /// Query entered, results not yet known.
    Typing,
    /// At least one result.
    ResultsReady,
    /// The query matched nothing.
    NoResults,
}

impl SessionPhase {
    /// Computes the phase.
    ///
    /// `results` is `None` while the search for a non-blank query has not
    /// answered yet. A whitespace-only query counts as no query.
    #[must_use]
    pub fn derive(index: IndexStatus, query: &str, results: Option<usize>) -> Self {
        match index {
            IndexStatus::Loading => Self::Loading,
            IndexStatus::Failed => Self::Unavailable,
            IndexStatus::Ready if query.trim().is_empty() => Self::Idle,
            IndexStatus::Ready => match results {
                None => Self::Typing,
                Some(0) => Self::NoResults,
                Some(_) => Self::ResultsReady,
            },
        }
    }

    /// Input is accepted only once the index is ready.
    #[must_use]
    pub const fn accepts_input(self) -> bool {
        !matches!(self, Self::Loading | Self::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_and_failure_override_everything() {
        assert_eq!(SessionPhase::derive(IndexStatus::Loading, "x", Some(3)), SessionPhase::Loading);
        assert_eq!(SessionPhase::derive(IndexStatus::Failed, "", None), SessionPhase::Unavailable);
        assert!(!SessionPhase::Unavailable.accepts_input());
    }

    #[test]
    fn ready_phases_follow_query_and_results() {
        let ready = IndexStatus::Ready;
        assert_eq!(SessionPhase::derive(ready, "", Some(0)), SessionPhase::Idle);
        assert_eq!(SessionPhase::derive(ready, "fi", None), SessionPhase::Typing);
        assert_eq!(SessionPhase::derive(ready, "fi", Some(0)), SessionPhase::NoResults);
        assert_eq!(SessionPhase::derive(ready, "fi", Some(2)), SessionPhase::ResultsReady);
    }

    #[test]
    fn whitespace_only_query_is_idle() {
        let ready = IndexStatus::Ready;
        assert_eq!(SessionPhase::derive(ready, "   ", Some(0)), SessionPhase::Idle);
        assert_eq!(SessionPhase::derive(ready, " \t", None), SessionPhase::Idle);
    }
}
