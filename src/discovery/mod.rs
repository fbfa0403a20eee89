//! Installed application discovery and icon lookup.
//!
//! - `desktop`: freedesktop `.desktop` scanning, the default [`IndexProvider`]
//! - `icons`: [`IconResolver`] implementations
//!
//! Both run against the plugin sandbox filesystem, where the host home
//! directory is mounted at `/host`.

pub mod desktop;
pub mod icons;

pub use desktop::{parse_desktop_file, DesktopEntry, DesktopEntryProvider};
pub use icons::{CachedIconResolver, FileIconResolver, IconResolver, NoIcons};

use crate::domain::error::Result;
use crate::domain::AppEntry;

/// Enumerates installed applications. Called once per session.
pub trait IndexProvider {
    /// Returns the installed applications in display order.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::IndexLoad`](crate::domain::LaunchpadError::IndexLoad)
    /// if no application source could be read.
    fn load_installed_apps(&self) -> Result<Vec<AppEntry>>;
}
