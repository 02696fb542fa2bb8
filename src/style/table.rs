//! Style attributes and the category -> style table
//!
//! A `StyleTable` is what a theme boils down to: a plain style for
//! unclassified text plus one style per lexical category.

use std::collections::HashMap;

use serde::Deserialize;

use super::color::Color;
use super::font::Font;

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color, `None` leaves the surface background
    pub bg: Option<Color>,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Immutable mapping from category name to style.
///
/// Swapping themes means building a new table; nothing mutates one in
/// place. Share it as `Arc<StyleTable>`.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable {
    name: String,
    font: Font,
    background: Color,
    highlighted_background: Color,
    plain: Style,
    categories: HashMap<String, Style>,
}

impl StyleTable {
    pub fn builder(name: impl Into<String>) -> StyleTableBuilder {
        StyleTableBuilder {
            table: StyleTable {
                name: name.into(),
                font: Font::default(),
                background: Color::Default,
                highlighted_background: Color::Black,
                plain: Style::default(),
                categories: HashMap::new(),
            },
        }
    }

    /// Built-in theme for the ANSI palette
    pub fn default_theme() -> Self {
        Self::builder("default")
            .highlighted_background(Color::BrightBlack)
            .plain(Style::fg(Color::White))
            .category("comment", Style::fg(Color::BrightBlack).with_italic())
            .category("string", Style::fg(Color::Green))
            .category("char", Style::fg(Color::Green))
            .category("number", Style::fg(Color::Cyan))
            .category("keyword", Style::fg(Color::Magenta).with_bold())
            .category("type", Style::fg(Color::Yellow))
            .category("function", Style::fg(Color::Blue))
            .category("operator", Style::fg(Color::BrightWhite))
            .category("macro", Style::fg(Color::BrightCyan))
            .category("constant", Style::fg(Color::BrightRed))
            .category("attribute", Style::fg(Color::BrightBlue))
            .category("lifetime", Style::fg(Color::BrightMagenta))
            .category("escape", Style::fg(Color::BrightYellow).with_underline())
            .build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn highlighted_background(&self) -> Color {
        self.highlighted_background
    }

    /// Style for text no category claims
    pub fn plain(&self) -> Style {
        self.plain
    }

    /// Style for a category, falling back to the plain style
    pub fn style(&self, category: &str) -> Style {
        self.categories.get(category).copied().unwrap_or(self.plain)
    }

    /// Whether the table has an explicit entry for `category`
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &Style)> {
        self.categories.iter().map(|(name, style)| (name.as_str(), style))
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::default_theme()
    }
}

/// Assembles a `StyleTable`; the table is frozen by `build`.
#[derive(Debug, Clone)]
pub struct StyleTableBuilder {
    table: StyleTable,
}

impl StyleTableBuilder {
    pub fn font(mut self, font: Font) -> Self {
        self.table.font = font;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.table.background = color;
        self
    }

    pub fn highlighted_background(mut self, color: Color) -> Self {
        self.table.highlighted_background = color;
        self
    }

    pub fn plain(mut self, style: Style) -> Self {
        self.table.plain = style;
        self
    }

    pub fn category(mut self, name: impl Into<String>, style: Style) -> Self {
        self.table.categories.insert(name.into(), style);
        self
    }

    pub fn build(self) -> StyleTable {
        self.table
    }
}
