//! Color themes and ANSI escape sequence generation.
//!
//! Built-in themes are compiled in from `themes/*.toml`; custom themes use the
//! same format and are loaded from a file:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! prompt_fg = "#cba6f7"
//! text_normal = "#cdd6f4"
//! text_dim = "#a6adc8"
//! placeholder_fg = "#6c7086"
//! border = "#45475a"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#cba6f7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! icon_fg = "#89b4fa"
//! status_fg = "#6c7086"
//! notice_fg = "#f38ba8"
//! ```

use crate::domain::error::{LaunchpadError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

const BUILT_IN: &[(&str, &str)] = &[
    ("catppuccin-mocha", include_str!("../../themes/catppuccin-mocha.toml")),
    ("catppuccin-latte", include_str!("../../themes/catppuccin-latte.toml")),
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`#rrggbb`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Search prompt glyph.
    pub prompt_fg: String,
    pub text_normal: String,
    /// Secondary text (descriptions, paths).
    pub text_dim: String,
    pub placeholder_fg: String,
    /// Separator below the search line.
    pub border: String,

    pub selection_fg: String,
    pub selection_bg: String,

    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// Marker shown for entries with a resolved icon.
    pub icon_fg: String,

    pub status_fg: String,
    /// Status line while a failure notice is shown.
    pub notice_fg: String,
}

impl Theme {
    /// Names accepted by [`Theme::from_name`].
    pub fn built_in_names() -> impl Iterator<Item = &'static str> {
        BUILT_IN.iter().map(|(name, _)| *name)
    }

    /// Loads a built-in theme.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::Theme`] for unknown names.
    ///
    /// ```
    /// use zlaunchpad::ui::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte")?;
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("nope").is_err());
    /// # Ok::<(), zlaunchpad::LaunchpadError>(())
    /// ```
    pub fn from_name(name: &str) -> Result<Self> {
        let (_, source) = BUILT_IN
            .iter()
            .find(|(built_in, _)| *built_in == name)
            .ok_or_else(|| LaunchpadError::Theme(format!("unknown theme '{name}'")))?;
        Self::parse(source)
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    fn parse(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| LaunchpadError::Theme(format!("invalid theme: {e}")))
    }

    /// Grey-scale palette, used only if the default theme cannot be parsed.
    fn monochrome() -> Self {
        let c = |hex: &str| hex.to_string();
        Self {
            name: "monochrome".to_string(),
            colors: ThemeColors {
                prompt_fg: c("#ffffff"),
                text_normal: c("#d0d0d0"),
                text_dim: c("#909090"),
                placeholder_fg: c("#707070"),
                border: c("#505050"),
                selection_fg: c("#000000"),
                selection_bg: c("#d0d0d0"),
                match_highlight_fg: c("#000000"),
                match_highlight_bg: c("#ffffff"),
                icon_fg: c("#d0d0d0"),
                status_fg: c("#707070"),
                notice_fg: c("#ffffff"),
            },
        }
    }

    /// `#rrggbb` to RGB; malformed colors render as white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for `hex`.
    ///
    /// ```
    /// use zlaunchpad::ui::Theme;
    ///
    /// assert_eq!(Theme::fg("#1e1e2e"), "\u{1b}[38;2;30;30;46m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|_| Self::monochrome())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_built_in_theme_parses() {
        for name in Theme::built_in_names() {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert_eq!(Theme::default().name, DEFAULT_THEME);
    }

    #[test]
    fn loads_theme_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let mut theme = Theme::default();
        theme.name = "custom".to_string();
        fs::write(&path, toml::to_string(&theme).unwrap()).unwrap();

        assert_eq!(Theme::from_file(&path).unwrap(), theme);

        fs::write(&path, "name = \"broken\"").unwrap();
        assert!(matches!(Theme::from_file(&path), Err(LaunchpadError::Theme(_))));
        assert!(matches!(Theme::from_file(dir.path().join("missing.toml")), Err(LaunchpadError::Io(_))));
    }

    #[test]
    fn malformed_hex_renders_white() {
        assert_eq!(Theme::fg("#abc"), "\u{1b}[38;2;255;255;255m");
        assert_eq!(Theme::bg("#000000"), "\u{1b}[48;2;0;0;0m");
    }
}
