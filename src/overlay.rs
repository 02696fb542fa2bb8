//! Highlighted-line overlay
//!
//! Marks whole lines with a flat background band: a list of highlighted
//! lines plus the line under the mouse pointer. The bands are painted each
//! frame beneath the text.
//!
//! Line numbers here are displayed numbers, i.e. 1-based logical line plus
//! the line-number offset.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::style::Color;
use crate::surface::{PaintSurface, Rect};

/// Shared list of highlighted line numbers.
///
/// Clones share the same list, so a background thread can mark lines while
/// the UI thread paints. Every read-modify-write and the whole paint pass
/// run under one lock; painting never sees a half-replaced list.
/// Duplicates are kept and order is irrelevant to painting.
#[derive(Debug, Clone, Default)]
pub struct HighlightedLines {
    inner: Arc<Mutex<Vec<usize>>>,
}

impl HighlightedLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current list
    pub fn snapshot(&self) -> Vec<usize> {
        self.inner.lock().clone()
    }

    /// Replace the whole list
    pub fn replace(&self, lines: impl IntoIterator<Item = usize>) {
        let mut guard = self.inner.lock();
        guard.clear();
        guard.extend(lines);
    }

    /// Append one line, no deduplication
    pub fn push(&self, line: usize) {
        self.inner.lock().push(line);
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Run `f` over the list while holding the lock
    pub fn with_lines<R>(&self, f: impl FnOnce(&[usize]) -> R) -> R {
        let guard = self.inner.lock();
        f(&guard)
    }
}

/// One band to fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// Displayed line number the band belongs to
    pub line: usize,
    /// Top of the band in document coordinates
    pub y: i32,
    pub height: i32,
    /// Band comes from the mouse-over effect
    pub hover: bool,
}

/// Highlighted lines, the hovered line and how to paint them
#[derive(Debug, Clone)]
pub struct LineHighlightOverlay {
    lines: HighlightedLines,
    hovered: Option<usize>,
    line_number_offset: usize,
    highlight_color: Color,
    hover_enabled: bool,
}

impl LineHighlightOverlay {
    pub fn new() -> Self {
        Self {
            lines: HighlightedLines::new(),
            hovered: None,
            line_number_offset: 0,
            highlight_color: Color::Black,
            hover_enabled: true,
        }
    }

    /// Handle to the highlighted-line list
    pub fn lines(&self) -> &HighlightedLines {
        &self.lines
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Set the hovered line, returning whether it changed
    pub fn set_hovered(&mut self, line: Option<usize>) -> bool {
        if self.hovered == line {
            return false;
        }
        trace!(from = ?self.hovered, to = ?line, "hover_changed");
        self.hovered = line;
        true
    }

    pub fn line_number_offset(&self) -> usize {
        self.line_number_offset
    }

    /// Raise the line-number offset. Lower values are ignored: the offset
    /// never decreases.
    pub fn set_line_number_offset(&mut self, offset: usize) {
        self.line_number_offset = self.line_number_offset.max(offset);
    }

    pub fn highlight_color(&self) -> Color {
        self.highlight_color
    }

    pub fn set_highlight_color(&mut self, color: Color) {
        self.highlight_color = color;
    }

    pub fn hover_enabled(&self) -> bool {
        self.hover_enabled
    }

    /// Turn the mouse-over effect on or off; turning it off forgets the
    /// hovered line
    pub fn set_hover_enabled(&mut self, enabled: bool) {
        self.hover_enabled = enabled;
        if !enabled {
            self.hovered = None;
        }
    }

    /// Bands intersecting `[visible_top, visible_bottom)`.
    ///
    /// Lines past `total_lines + offset` are skipped. Work is proportional to
    /// the number of highlighted lines, not to the document length. The
    /// hovered line gets its own band even when it is also highlighted.
    pub fn bands(
        &self,
        visible_top: i32,
        visible_bottom: i32,
        line_height: i32,
        total_lines: usize,
    ) -> Vec<Band> {
        if line_height <= 0 {
            return Vec::new();
        }
        let last_line = total_lines.saturating_add(self.line_number_offset);
        let band_top = |line: usize| -> Option<i32> {
            if line > last_line {
                return None;
            }
            // i128 holds any usize difference without wrapping
            let index = line as i128 - self.line_number_offset as i128 - 1;
            let y = (i128::from(line_height) * index).clamp(0, i128::from(i32::MAX)) as i32;
            let visible = y < visible_bottom && y.saturating_add(line_height) > visible_top;
            visible.then_some(y)
        };

        let mut bands: Vec<Band> = self.lines.with_lines(|lines| {
            lines
                .iter()
                .filter_map(|&line| {
                    band_top(line).map(|y| Band {
                        line,
                        y,
                        height: line_height,
                        hover: false,
                    })
                })
                .collect()
        });

        if self.hover_enabled {
            if let Some(line) = self.hovered {
                if let Some(y) = band_top(line) {
                    bands.push(Band {
                        line,
                        y,
                        height: line_height,
                        hover: true,
                    });
                }
            }
        }
        bands
    }

    /// Fill the visible bands across the full viewport width
    pub fn paint(&self, surface: &mut dyn PaintSurface, total_lines: usize) {
        let bounds = surface.viewport_bounds();
        let line_height = surface.line_height();
        for band in self.bands(bounds.y, bounds.bottom(), line_height, total_lines) {
            surface.fill_rect(
                Rect::new(bounds.x, band.y, bounds.width, band.height),
                self.highlight_color,
            );
        }
    }
}

impl Default for LineHighlightOverlay {
    fn default() -> Self {
        Self::new()
    }
}
