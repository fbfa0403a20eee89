//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host folder Zellij was started from (normally the
//! user's home directory) is mounted at `/host`. Paths read from configuration
//! use `~`, paths read from the filesystem carry the `/host` prefix, and
//! commands run through `run_command` execute on the host with that folder as
//! their working directory.

use std::path::PathBuf;

const HOST_MOUNT: &str = "/host";

/// Directory for the launcher's own files (trace output).
///
/// ```
/// use zlaunchpad::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/zlaunchpad"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_MOUNT).join(".local/share/zellij/zlaunchpad")
}

/// Maps `~` to the sandbox mount.
///
/// ```
/// use zlaunchpad::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/.local/share/applications"), "/host/.local/share/applications");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/usr/share/applications"), "/usr/share/applications");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', HOST_MOUNT, 1)
    } else if path == "~" {
        HOST_MOUNT.to_string()
    } else {
        path.to_string()
    }
}

/// Rewrites a sandbox path so a host command can open it.
///
/// Paths below `/host` become relative to the command's working directory;
/// everything else is passed through.
///
/// ```
/// use zlaunchpad::infrastructure::to_command_path;
///
/// assert_eq!(to_command_path("/host/.local/share/applications/x.desktop"), ".local/share/applications/x.desktop");
/// assert_eq!(to_command_path("/host"), ".");
/// assert_eq!(to_command_path("/usr/share/applications/x.desktop"), "/usr/share/applications/x.desktop");
/// assert_eq!(to_command_path("/hostname/x"), "/hostname/x");
/// ```
#[must_use]
pub fn to_command_path(path: &str) -> String {
    match path.strip_prefix(HOST_MOUNT) {
        Some("" | "/") => ".".to_string(),
        Some(rest) if rest.starts_with('/') => rest.trim_start_matches('/').to_string(),
        _ => path.to_string(),
    }
}

/// Replaces the sandbox mount with `~` for display.
///
/// ```
/// use zlaunchpad::infrastructure::display_path;
///
/// assert_eq!(display_path("/host/.local/share/applications/x.desktop"), "~/.local/share/applications/x.desktop");
/// assert_eq!(display_path("/usr/share/applications"), "/usr/share/applications");
/// ```
#[must_use]
pub fn display_path(path: &str) -> String {
    match path.strip_prefix(HOST_MOUNT) {
        Some("") => "~".to_string(),
        Some(rest) if rest.starts_with('/') => format!("~{rest}"),
        _ => path.to_string(),
    }
}
