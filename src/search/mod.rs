//! Search engine: query filtering and match ranges.
//!
//! - `engine`: the pure filter and the [`SearchProvider`] seam
//! - `matching`: case-insensitive substring matching on character indices

pub mod engine;
pub mod matching;

pub use engine::{matches, search, LocalSearchProvider, SearchProvider};
pub use matching::{contains_case_insensitive, find_case_insensitive};
