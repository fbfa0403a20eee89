//! Query text ownership and asynchronous search sequencing.
//!
//! Every query change mints a new [`SearchToken`]. When searches run in the
//! background worker several of them may be in flight at once, and their
//! answers may arrive in any order. There is no way to abort a search that was
//! already posted; instead [`QueryController::accept`] only admits the answer
//! tagged with the most recent token that is still outstanding, and everything
//! else is dropped on arrival.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonically increasing tag attached to each search request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SearchToken(pub u64);

impl fmt::Display for SearchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of a query change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryChange {
    /// Input is disabled (index not loaded, or failed to load).
    Ignored,
    /// The text did not change; no search is needed.
    Unchanged,
    /// A search for `query` tagged `token` must be issued.
    Search { query: String, token: SearchToken },
}

/// Owns the query text and the token sequence.
#[derive(Debug, Clone, Default)]
pub struct QueryController {
    query: String,
    latest_token: SearchToken,
    in_flight: Option<SearchToken>,
    enabled: bool,
}

impl QueryController {
    /// Creates a controller with input disabled until the index is loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn latest_token(&self) -> SearchToken {
        self.latest_token
    }

    /// Token of the outstanding asynchronous search, if any.
    #[must_use]
    pub const fn in_flight(&self) -> Option<SearchToken> {
        self.in_flight
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables input. Disabling also clears the query.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.query.clear();
            self.in_flight = None;
        }
    }

    /// Replaces the query text and mints a token for the search it requires.
    ///
    /// While input is disabled this is a no-op and the query stays empty.
    pub fn set_query(&mut self, text: &str) -> QueryChange {
        if !self.enabled {
            tracing::debug!("query change ignored while input is disabled");
            return QueryChange::Ignored;
        }
        if self.query == text {
            return QueryChange::Unchanged;
        }

        self.query = text.to_string();
        self.latest_token = SearchToken(self.latest_token.0 + 1);

        tracing::trace!(token = %self.latest_token, query = %self.query, "query changed");

        QueryChange::Search {
            query: self.query.clone(),
            token: self.latest_token,
        }
    }

    /// Equivalent to `set_query("")`.
    pub fn clear(&mut self) -> QueryChange {
        self.set_query("")
    }

    /// Appends a character to the query.
    pub fn push(&mut self, c: char) -> QueryChange {
        let mut text = self.query.clone();
        text.push(c);
        self.set_query(&text)
    }

    /// Removes the last character of the query.
    pub fn pop(&mut self) -> QueryChange {
        let mut text = self.query.clone();
        if text.pop().is_none() {
            return QueryChange::Unchanged;
        }
        self.set_query(&text)
    }

    /// Marks `token` as posted to an asynchronous provider.
    ///
    /// Any earlier outstanding search is superseded.
    pub fn mark_in_flight(&mut self, token: SearchToken) {
        if let Some(previous) = self.in_flight.replace(token) {
            if previous != token {
                tracing::debug!(superseded = %previous, token = %token, "search superseded");
            }
        }
    }

    /// Resolves the outstanding search without a response (synchronous path).
    pub fn settle(&mut self) {
        self.in_flight = None;
    }

    /// Decides whether the response tagged `token` may be applied.
    ///
    /// Returns `true` only for the latest token while it is still in flight;
    /// accepting it settles the request. Stale, duplicate and abandoned
    /// responses return `false`.
    pub fn accept(&mut self, token: SearchToken) -> bool {
        if token == self.latest_token && self.in_flight == Some(token) {
            self.in_flight = None;
            return true;
        }

        tracing::debug!(
            token = %token,
            latest = %self.latest_token,
            in_flight = ?self.in_flight,
            "discarding stale search response"
        );
        false
    }

    /// Abandons `token` after its deadline passed.
    ///
    /// Returns `true` if the token was the one still outstanding, in which
    /// case its late response will be ignored.
    pub fn abandon(&mut self, token: SearchToken) -> bool {
        if self.in_flight == Some(token) {
            self.in_flight = None;
            return true;
        }
        false
    }
}
