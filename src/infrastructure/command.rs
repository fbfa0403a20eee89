//! Launch command construction.
//!
//! Desktop entries are started through `gio launch`, which honours `Exec`,
//! `Terminal` and `Path` the same way a desktop environment does. Any other
//! path is treated as an executable and started in its own session with
//! `setsid -f`, so the command returns as soon as the process is forked.

use super::paths::to_command_path;
use crate::domain::error::{LaunchpadError, Result};

/// Builds the host command line that starts the application at `path`.
///
/// # Errors
///
/// Returns [`LaunchpadError::Launch`] for an empty path.
///
/// # Examples
///
/// ```
/// use zlaunchpad::infrastructure::launch_command;
///
/// assert_eq!(
///     launch_command("/usr/share/applications/firefox.desktop").unwrap(),
///     vec!["gio", "launch", "/usr/share/applications/firefox.desktop"],
/// );
/// assert_eq!(launch_command("/host/bin/tool").unwrap(), vec!["setsid", "-f", "bin/tool"]);
/// ```
pub fn launch_command(path: &str) -> Result<Vec<String>> {
    let path = path.trim();
    if path.is_empty() {
        return Err(LaunchpadError::Launch("empty application path".to_string()));
    }

    let host_path = to_command_path(path);
    if path.ends_with(".desktop") {
        Ok(vec!["gio".to_string(), "launch".to_string(), host_path])
    } else {
        Ok(vec!["setsid".to_string(), "-f".to_string(), host_path])
    }
}
