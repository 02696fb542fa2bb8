//! Visual styles
//!
//! This module provides the styling vocabulary shared by the model, the
//! overlay and the surfaces:
//! - Colors and fonts
//! - Per-category style tables (themes)
//! - Theme file loading

mod color;
mod font;
mod table;
mod theme;

pub use color::Color;
pub use font::{font_variant, Font};
pub use table::{Style, StyleTable, StyleTableBuilder};
pub use theme::Theme;
