//! Icon reference resolution.
//!
//! An [`AppEntry`](crate::domain::AppEntry) carries an opaque `icon_ref`: either
//! an absolute file path or an icon theme name such as `firefox`. Resolution
//! turns it into a displayable `file://` URI. Lookups hit the filesystem, so the
//! view model only resolves icons for rows it actually renders, through a
//! [`CachedIconResolver`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const ICON_THEMES: [&str; 3] = ["hicolor", "Adwaita", "breeze"];
const ICON_SIZES: [&str; 7] = ["scalable", "256x256", "128x128", "64x64", "48x48", "32x32", "16x16"];
const ICON_EXTENSIONS: [&str; 3] = ["svg", "png", "xpm"];

/// Turns an icon reference into a displayable resource URI.
pub trait IconResolver {
    /// Returns a `file://` URI, or `None` if the icon cannot be found.
    fn resolve(&self, icon_ref: &str) -> Option<String>;
}

/// Resolver that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIcons;

impl IconResolver for NoIcons {
    fn resolve(&self, _icon_ref: &str) -> Option<String> {
        None
    }
}

/// Filesystem lookup through icon theme directories and pixmaps.
#[derive(Debug, Clone)]
pub struct FileIconResolver {
    /// Directories containing icon themes (`<root>/<theme>/<size>/apps/`).
    theme_roots: Vec<PathBuf>,
    /// Flat directories searched last (`/usr/share/pixmaps`).
    pixmap_dirs: Vec<PathBuf>,
}

impl Default for FileIconResolver {
    fn default() -> Self {
        Self {
            theme_roots: vec![
                PathBuf::from("/host/.local/share/icons"),
                PathBuf::from("/usr/share/icons"),
                PathBuf::from("/var/lib/flatpak/exports/share/icons"),
            ],
            pixmap_dirs: vec![PathBuf::from("/usr/share/pixmaps")],
        }
    }
}

impl FileIconResolver {
    #[must_use]
    pub const fn new(theme_roots: Vec<PathBuf>, pixmap_dirs: Vec<PathBuf>) -> Self {
        Self {
            theme_roots,
            pixmap_dirs,
        }
    }

    fn find_themed(&self, name: &str) -> Option<PathBuf> {
        self.theme_roots.iter().find_map(|root| {
            ICON_THEMES.iter().find_map(|theme| {
                ICON_SIZES.iter().find_map(|size| {
                    let dir = root.join(theme).join(size).join("apps");
                    find_with_extension(&dir, name)
                })
            })
        })
    }

    fn find_pixmap(&self, name: &str) -> Option<PathBuf> {
        self.pixmap_dirs
            .iter()
            .find_map(|dir| find_with_extension(dir, name))
    }
}

fn find_with_extension(dir: &Path, name: &str) -> Option<PathBuf> {
    ICON_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{name}.{ext}")))
        .find(|candidate| candidate.is_file())
}

fn to_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}

impl IconResolver for FileIconResolver {
    fn resolve(&self, icon_ref: &str) -> Option<String> {
        if icon_ref.is_empty() {
            return None;
        }

        let direct = Path::new(icon_ref);
        if direct.is_absolute() {
            return direct.is_file().then(|| to_uri(direct));
        }

        self.find_themed(icon_ref)
            .or_else(|| self.find_pixmap(icon_ref))
            .map(|path| to_uri(&path))
    }
}

/// Memoising wrapper; misses are cached too.
#[derive(Debug, Default)]
pub struct CachedIconResolver<R> {
    inner: R,
    cache: Mutex<HashMap<String, Option<String>>>,
}

impl<R: IconResolver> CachedIconResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of memoised references.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.lock().map_or(0, |cache| cache.len())
    }
}

impl<R: IconResolver> IconResolver for CachedIconResolver<R> {
    fn resolve(&self, icon_ref: &str) -> Option<String> {
        if let Ok(cache) = self.cache.lock() {
            if let Some(hit) = cache.get(icon_ref) {
                return hit.clone();
            }
        }

        let resolved = self.inner.resolve(icon_ref);
        tracing::trace!(icon_ref, found = resolved.is_some(), "icon resolved");

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(icon_ref.to_string(), resolved.clone());
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs;

    struct Counting<'a>(&'a Cell<usize>);

    impl IconResolver for Counting<'_> {
        fn resolve(&self, icon_ref: &str) -> Option<String> {
            self.0.set(self.0.get() + 1);
            (icon_ref == "known").then(|| "file:///known.png".to_string())
        }
    }

    #[test]
    fn resolves_theme_icons_before_pixmaps() {
        let root = tempfile::tempdir().unwrap();
        let apps = root.path().join("icons/hicolor/48x48/apps");
        fs::create_dir_all(&apps).unwrap();
        fs::write(apps.join("firefox.png"), b"png").unwrap();
        let pixmaps = root.path().join("pixmaps");
        fs::create_dir_all(&pixmaps).unwrap();
        fs::write(pixmaps.join("firefox.xpm"), b"xpm").unwrap();
        fs::write(pixmaps.join("legacy.xpm"), b"xpm").unwrap();

        let resolver = FileIconResolver::new(vec![root.path().join("icons")], vec![pixmaps]);

        let firefox = resolver.resolve("firefox").unwrap();
        assert!(firefox.starts_with("file://"));
        assert!(firefox.ends_with("hicolor/48x48/apps/firefox.png"));
        assert!(resolver.resolve("legacy").unwrap().ends_with("legacy.xpm"));
        assert!(resolver.resolve("missing").is_none());
    }

    #[test]
    fn absolute_references_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let icon = dir.path().join("app.svg");
        fs::write(&icon, b"<svg/>").unwrap();

        let resolver = FileIconResolver::new(vec![], vec![]);
        assert_eq!(
            resolver.resolve(&icon.to_string_lossy()),
            Some(format!("file://{}", icon.display()))
        );
        assert!(resolver.resolve(&dir.path().join("gone.svg").to_string_lossy()).is_none());
    }

    #[test]
    fn cache_memoises_hits_and_misses() {
        let calls = Cell::new(0);
        let resolver = CachedIconResolver::new(Counting(&calls));

        assert!(resolver.resolve("known").is_some());
        assert!(resolver.resolve("known").is_some());
        assert!(resolver.resolve("unknown").is_none());
        assert!(resolver.resolve("unknown").is_none());

        assert_eq!(calls.get(), 2);
        assert_eq!(resolver.cached_len(), 2);
    }
}
