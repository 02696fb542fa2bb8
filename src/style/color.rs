//! Colors for text styles and highlight bands
//!
//! The 16 ANSI names render the same on every terminal palette; `Rgb` is
//! used by themes that want exact colors.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ThemeError;

/// A foreground, background or fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Color {
    /// Whatever the surface uses when nothing is set
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb(u8, u8, u8),
}

const NAMED: [(&str, Color); 17] = [
    ("default", Color::Default),
    ("black", Color::Black),
    ("red", Color::Red),
    ("green", Color::Green),
    ("yellow", Color::Yellow),
    ("blue", Color::Blue),
    ("magenta", Color::Magenta),
    ("cyan", Color::Cyan),
    ("white", Color::White),
    ("bright-black", Color::BrightBlack),
    ("bright-red", Color::BrightRed),
    ("bright-green", Color::BrightGreen),
    ("bright-yellow", Color::BrightYellow),
    ("bright-blue", Color::BrightBlue),
    ("bright-magenta", Color::BrightMagenta),
    ("bright-cyan", Color::BrightCyan),
    ("bright-white", Color::BrightWhite),
];

impl Color {
    /// Name used in theme files, `None` for RGB colors
    pub fn name(&self) -> Option<&'static str> {
        NAMED
            .iter()
            .find(|(_, color)| color == self)
            .map(|(name, _)| *name)
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl FromStr for Color {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return Self::parse_hex(hex).ok_or_else(|| ThemeError::InvalidColor(s.to_string()));
        }

        // Accept bright_black / BrightBlack / bright-black alike
        let key = trimmed.to_lowercase().replace('_', "-");
        let key = match key.strip_prefix("bright") {
            Some(rest) if !rest.starts_with('-') && !rest.is_empty() => format!("bright-{rest}"),
            _ => key,
        };

        NAMED
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, color)| *color)
            .ok_or_else(|| ThemeError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ThemeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            named => f.write_str(named.name().unwrap_or("default")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named() {
        assert_eq!("red".parse::<Color>().unwrap(), Color::Red);
        assert_eq!("Bright_Black".parse::<Color>().unwrap(), Color::BrightBlack);
        assert_eq!("brightblue".parse::<Color>().unwrap(), Color::BrightBlue);
        assert_eq!("bright-white".parse::<Color>().unwrap(), Color::BrightWhite);
        assert_eq!(" default ".parse::<Color>().unwrap(), Color::Default);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!("#ff8000".parse::<Color>().unwrap(), Color::Rgb(255, 128, 0));
        assert!("#ff80".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!("mauve".parse::<Color>(), Err(ThemeError::InvalidColor(_))));
        assert!("".parse::<Color>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::Rgb(1, 2, 255).to_string(), "#0102ff");
        assert_eq!(Color::BrightCyan.to_string(), "bright-cyan");
    }
}
