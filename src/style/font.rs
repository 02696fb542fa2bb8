//! Font description carried by a theme

use serde::Deserialize;

/// A font request. Surfaces that cannot switch fonts (terminals) only look
/// at the bold and italic bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct Font {
    pub family: String,
    pub size: u16,
    pub bold: bool,
    pub italic: bool,
}

impl Font {
    pub fn new(family: impl Into<String>, size: u16) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            italic: false,
        }
    }

    /// Derive a font with exactly the given bold and italic bits
    pub fn with_variant(&self, bold: bool, italic: bool) -> Self {
        font_variant(self, bold, italic)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("monospace", 12)
    }
}

/// Return `base` with its bold and italic bits set to `bold` and `italic`.
///
/// Family and size are preserved. The result does not depend on the style
/// bits `base` already had.
pub fn font_variant(base: &Font, bold: bool, italic: bool) -> Font {
    Font {
        bold,
        italic,
        ..base.clone()
    }
}
