//! synpane - a read-only syntax highlighting text pane
//!
//! A host feeds the pane text, a theme and the category spans a lexer
//! produced. The pane keeps one style per character, bands highlighted
//! lines and the line under the mouse, and numbers lines from an offset.
//! Drawing and hit-testing go through the `PaintSurface` and `HitTest`
//! traits; the `terminal`, `display` and `viewer` modules implement them on
//! top of crossterm for the `synpane` binary.

pub mod config;
pub mod display;
pub mod document;
pub mod error;
pub mod lexer;
pub mod overlay;
pub mod pane;
pub mod spans;
pub mod style;
pub mod surface;
pub mod terminal;
pub mod tracker;
pub mod viewer;

pub use document::{StyleOutcome, StyledRun, StyledTextModel};
pub use error::{StyleError, ThemeError, ViewerError};
pub use overlay::{Band, HighlightedLines, LineHighlightOverlay};
pub use pane::SyntaxPane;
pub use spans::{Span, SpanIndex};
pub use style::{Color, Font, Style, StyleTable, Theme};
pub use surface::{HitTest, PaintSurface, Point, Rect, RecordingSurface};
pub use tracker::{TrackOutcome, ViewportMouseTracker};
