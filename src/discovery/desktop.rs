//! freedesktop `.desktop` entry scanning.
//!
//! Only the `[Desktop Entry]` group is read, and only the keys the launcher
//! needs. Localised keys (`Name[de]=`) are ignored. Entries that ask not to be
//! shown (`NoDisplay=true`, `Hidden=true`) or that are not applications are
//! skipped.

use super::IndexProvider;
use crate::domain::error::{LaunchpadError, Result};
use crate::domain::AppEntry;
use crate::infrastructure::paths::expand_tilde;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Subdirectories below an applications directory that are still scanned
/// (e.g. `applications/kde4/`).
const MAX_SCAN_DEPTH: usize = 3;

/// Fields of interest from one desktop file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopEntry {
    pub name: String,
    pub exec: String,
    pub icon: Option<String>,
    pub comment: Option<String>,
    pub no_display: bool,
    pub hidden: bool,
    pub entry_type: Option<String>,
}

impl DesktopEntry {
    /// Whether this entry should appear in the launcher.
    #[must_use]
    pub fn is_launchable(&self) -> bool {
        !self.no_display
            && !self.hidden
            && self.entry_type.as_deref().map_or(true, |kind| kind == "Application")
    }

    /// Converts to an index entry identified by `path`.
    #[must_use]
    pub fn into_app_entry(self, path: &Path) -> AppEntry {
        AppEntry {
            name: self.name,
            path: path.to_string_lossy().into_owned(),
            icon_ref: self.icon,
            description: self.comment,
        }
    }
}

/// Parses the `[Desktop Entry]` group of a desktop file.
///
/// Returns `None` if `Name` or `Exec` is missing. The first occurrence of a
/// key wins.
///
/// # Examples
///
/// ```
/// use zlaunchpad::discovery::desktop::parse_desktop_file;
///
/// let entry = parse_desktop_file(
///     "[Desktop Entry]\nType=Application\nName=Firefox\nExec=firefox %u\nIcon=firefox\n",
/// )
/// .unwrap();
/// assert_eq!(entry.name, "Firefox");
/// assert_eq!(entry.exec, "firefox");
/// assert_eq!(entry.icon.as_deref(), Some("firefox"));
/// ```
#[must_use]
pub fn parse_desktop_file(content: &str) -> Option<DesktopEntry> {
    let mut name = None;
    let mut exec = None;
    let mut entry = DesktopEntry::default();
    let mut in_desktop_entry = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') {
            in_desktop_entry = trimmed == "[Desktop Entry]";
            continue;
        }
        if !in_desktop_entry || trimmed.starts_with('#') {
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            continue;
        };
        let value = value.trim();

        match key.trim() {
            "Name" if name.is_none() => name = Some(value.to_string()),
            "Exec" if exec.is_none() => exec = Some(strip_field_codes(value)),
            "Icon" if entry.icon.is_none() && !value.is_empty() => {
                entry.icon = Some(value.to_string());
            }
            "Comment" if entry.comment.is_none() && !value.is_empty() => {
                entry.comment = Some(value.to_string());
            }
            "NoDisplay" => entry.no_display = value.eq_ignore_ascii_case("true"),
            "Hidden" => entry.hidden = value.eq_ignore_ascii_case("true"),
            "Type" if entry.entry_type.is_none() => entry.entry_type = Some(value.to_string()),
            _ => {}
        }
    }

    entry.name = name.filter(|n| !n.is_empty())?;
    entry.exec = exec.filter(|e| !e.is_empty())?;
    Some(entry)
}

/// Removes `%f`, `%U` and the other field codes from an `Exec` value.
fn strip_field_codes(exec: &str) -> String {
    exec.split_whitespace()
        .filter(|token| !(token.len() == 2 && token.starts_with('%')))
        .collect::<Vec<_>>()
        .join(" ")
}

/// [`IndexProvider`] that scans applications directories for desktop files.
#[derive(Debug, Clone)]
pub struct DesktopEntryProvider {
    dirs: Vec<PathBuf>,
}

impl DesktopEntryProvider {
    /// Creates a provider over `dirs`; `~` is mapped into the sandbox.
    pub fn new<I, S>(dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            dirs: dirs
                .into_iter()
                .map(|dir| PathBuf::from(expand_tilde(dir.as_ref())))
                .collect(),
        }
    }

    fn scan_dir(dir: &Path, apps: &mut Vec<AppEntry>) -> usize {
        let mut skipped = 0;

        for entry in WalkDir::new(dir)
            .follow_links(true)
            .max_depth(MAX_SCAN_DEPTH)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
        {
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().map_or(true, |ext| ext != "desktop")
            {
                continue;
            }

            let parsed = fs::read_to_string(path)
                .ok()
                .and_then(|content| parse_desktop_file(&content));

            match parsed {
                Some(desktop) if desktop.is_launchable() => apps.push(desktop.into_app_entry(path)),
                _ => skipped += 1,
            }
        }

        skipped
    }
}

impl IndexProvider for DesktopEntryProvider {
    fn load_installed_apps(&self) -> Result<Vec<AppEntry>> {
        let _span = tracing::debug_span!("load_installed_apps", dir_count = self.dirs.len()).entered();

        let mut apps = Vec::new();
        let mut readable = 0;

        for dir in &self.dirs {
            if !dir.is_dir() {
                tracing::debug!(dir = %dir.display(), "applications directory missing");
                continue;
            }
            readable += 1;
            let skipped = Self::scan_dir(dir, &mut apps);
            tracing::debug!(dir = %dir.display(), skipped, "scanned applications directory");
        }

        if readable == 0 {
            let dirs: Vec<String> = self.dirs.iter().map(|d| d.display().to_string()).collect();
            return Err(LaunchpadError::IndexLoad(format!(
                "no applications directory found in [{}]",
                dirs.join(", ")
            )));
        }

        apps.sort_by_cached_key(|app| app.name.to_lowercase());
        tracing::info!(app_count = apps.len(), "application index loaded");
        Ok(apps)
    }
}
