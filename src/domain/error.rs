//! Error types for the launcher.
//!
//! [`LaunchpadError`] is the crate-wide error enum and [`Result`] its alias.
//! [`FailureKind`] classifies the recoverable failures of external calls;
//! those never unwind the session, they become user-visible notices.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for launcher operations.
#[derive(Debug, Error)]
pub enum LaunchpadError {
    /// Enumerating installed applications failed.
    #[error("Index load error: {0}")]
    IndexLoad(String),

    /// A search call errored.
    #[error("Search error: {0}")]
    Search(String),

    /// The launch command could not be built or did not start.
    #[error("Launch error: {0}")]
    Launch(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Automatically converts from `std::io::Error`.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// Classification of recoverable failures at external call sites.
///
/// Every kind is handled locally: none of them is fatal to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// The application index provider failed; search stays disabled.
    IndexLoad,
    /// A search call errored; the previous result set is retained.
    Search,
    /// A launch failed; query and selection stay unchanged.
    Launch,
    /// The host rejected a resize; logged only.
    Resize,
    /// A search or launch call exceeded its deadline.
    Timeout,
}

impl FailureKind {
    /// Short label used in the status line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::IndexLoad => "index load failed",
            Self::Search => "search failed",
            Self::Launch => "launch failed",
            Self::Resize => "resize failed",
            Self::Timeout => "timed out",
        }
    }
}

/// A specialized `Result` type for launcher operations.
pub type Result<T> = std::result::Result<T, LaunchpadError>;
