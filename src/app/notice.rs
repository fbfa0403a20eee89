//! Non-blocking, user-visible failure notices.

use crate::domain::FailureKind;
use chrono::{DateTime, Utc};

/// A failure surfaced in the status line until the next query change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: FailureKind,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            raised_at: Utc::now(),
        }
    }

    /// Status line text, e.g. `launch failed: Firefox: permission denied (14:02:11)`.
    #[must_use]
    pub fn text(&self) -> String {
        format!(
            "{}: {} ({})",
            self.kind.label(),
            self.message,
            self.raised_at.format("%H:%M:%S")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_names_kind_and_message() {
        let notice = Notice::new(FailureKind::Launch, "permission denied");
        let text = notice.text();
        assert!(text.starts_with("launch failed: permission denied ("), "{text}");
    }

    #[test]
    fn timeout_reads_as_a_sentence() {
        let notice = Notice::new(FailureKind::Timeout, "search for \"fi\"");
        assert!(notice.text().starts_with("timed out: search for \"fi\" ("));
    }
}
