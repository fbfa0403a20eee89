//! Domain layer for the launcher.
//!
//! Core types independent of Zellij APIs and infrastructure concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types, failure kinds and result aliases
//! - [`app_entry`]: Application entry and read-only index
//!
//! # Examples
//!
//! ```
//! use zlaunchpad::domain::{AppEntry, AppIndex};
//!
//! let index = AppIndex::new(vec![
//!     AppEntry::new("Firefox", "/usr/share/applications/firefox.desktop"),
//! ]);
//! assert_eq!(index.len(), 1);
//! ```

pub mod app_entry;
pub mod error;

pub use app_entry::{AppEntry, AppIndex};
pub use error::{FailureKind, LaunchpadError, Result};
