//! Drawing and hit-testing capabilities the pane needs from a toolkit
//!
//! Coordinates are in surface units (pixels for graphical toolkits, cells
//! for terminals) measured from the top of the document, so scrolling moves
//! the viewport bounds rather than the content.

use crate::style::Color;

/// A point in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, half-open on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }
}

/// Where the highlight overlay draws.
///
/// Fills issued through this trait land beneath the text glyphs and above
/// the plain background.
pub trait PaintSurface {
    /// Fill a rectangle with a flat color
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Height of one text line
    fn line_height(&self) -> i32;

    /// Currently visible part of the document
    fn viewport_bounds(&self) -> Rect;
}

/// Mapping between surface positions and character offsets
pub trait HitTest {
    /// Character offset under a point, `None` if the point hits no text
    fn offset_at(&self, point: Point) -> Option<usize>;

    /// Rendered bounds of the character at `offset`
    fn char_bounds(&self, offset: usize) -> Option<Rect>;
}

/// A surface that only records what was filled.
///
/// Useful for headless rendering and for checking overlay output.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurface {
    pub viewport: Rect,
    pub line_height: i32,
    pub fills: Vec<(Rect, Color)>,
}

impl RecordingSurface {
    pub fn new(viewport: Rect, line_height: i32) -> Self {
        Self {
            viewport,
            line_height,
            fills: Vec::new(),
        }
    }
}

impl PaintSurface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fills.push((rect, color));
    }

    fn line_height(&self) -> i32 {
        self.line_height
    }

    fn viewport_bounds(&self) -> Rect {
        self.viewport
    }
}
