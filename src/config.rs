//! Configuration file support
//!
//! Loads settings from ~/.synpane.toml (or %USERPROFILE%\.synpane.toml on
//! Windows). A missing file means defaults; a malformed one is an error.
//!
//! Example:
//! ```toml
//! theme = "/home/me/.config/synpane/dusk.toml"
//! log-file = "/tmp/synpane.log"
//!
//! [view]
//! line-numbers = true
//! line-number-offset = 0
//! highlight-when-mouse-over = true
//! highlighted-background = "#303040"
//! scroll-lines = 3
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, ViewerError};
use crate::pane::SyntaxPane;
use crate::style::Color;

/// Configuration settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Theme file; the built-in theme when absent
    pub theme: Option<PathBuf>,
    /// Where to write the log; logging is off when absent
    pub log_file: Option<PathBuf>,
    pub view: ViewConfig,
}

/// `[view]` table
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ViewConfig {
    /// Whether to show line numbers
    pub line_numbers: bool,
    /// Added to logical line numbers for display
    pub line_number_offset: usize,
    /// Band the line under the mouse
    pub highlight_when_mouse_over: bool,
    /// Overrides the theme's highlighted background
    pub highlighted_background: Option<Color>,
    /// Lines moved per wheel notch
    pub scroll_lines: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            line_numbers: true,
            line_number_offset: 0,
            highlight_when_mouse_over: true,
            highlighted_background: None,
            scroll_lines: 3,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".synpane.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".synpane.toml"))
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`; defaults if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(err.into()),
        };
        let config = Self::parse(&contents).map_err(|source| ViewerError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "config_loaded");
        Ok(config)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(contents)?;
        config.view.scroll_lines = config.view.scroll_lines.clamp(1, 100);
        Ok(config)
    }

    /// Push the view settings into a pane
    pub fn apply_to(&self, pane: &mut SyntaxPane) {
        pane.set_line_number_offset(self.view.line_number_offset);
        pane.set_highlight_when_mouse_over(self.view.highlight_when_mouse_over);
        if let Some(color) = self.view.highlighted_background {
            pane.set_highlighted_background(color);
        }
    }
}
