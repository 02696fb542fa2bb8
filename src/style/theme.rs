//! Theme files
//!
//! Themes are TOML documents:
//!
//! ```toml
//! name = "dusk"
//! background = "default"
//! highlighted-background = "#303030"
//!
//! [font]
//! family = "monospace"
//! size = 12
//!
//! [plain]
//! fg = "white"
//!
//! [styles.keyword]
//! fg = "magenta"
//! bold = true
//! ```
//!
//! Category names are free-form; they only need to match what the lexer
//! emits.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::color::Color;
use super::font::Font;
use super::table::{Style, StyleTable};
use crate::error::{ThemeError, ThemeResult};

/// On-disk shape of a theme
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ThemeFile {
    #[serde(default = "ThemeFile::default_name")]
    name: String,
    #[serde(default)]
    font: Font,
    #[serde(default)]
    background: Color,
    #[serde(default = "ThemeFile::default_highlighted_background")]
    highlighted_background: Color,
    #[serde(default)]
    plain: Style,
    #[serde(default)]
    styles: BTreeMap<String, Style>,
}

impl ThemeFile {
    fn default_name() -> String {
        "unnamed".to_string()
    }

    const fn default_highlighted_background() -> Color {
        Color::Black
    }

    fn into_table(self) -> StyleTable {
        self.styles
            .into_iter()
            .fold(
                StyleTable::builder(self.name)
                    .font(self.font)
                    .background(self.background)
                    .highlighted_background(self.highlighted_background)
                    .plain(self.plain),
                |builder, (category, style)| builder.category(category, style),
            )
            .build()
    }
}

/// Theme loader
pub struct Theme;

impl Theme {
    /// Parse a theme from TOML text
    pub fn from_toml_str(contents: &str) -> ThemeResult<StyleTable> {
        let file: ThemeFile = toml::from_str(contents)?;
        let table = file.into_table();
        debug!(theme = table.name(), categories = table.categories().count(), "theme_parsed");
        Ok(table)
    }

    /// Read and parse a theme file
    pub fn load(path: &Path) -> ThemeResult<StyleTable> {
        let contents = fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}
