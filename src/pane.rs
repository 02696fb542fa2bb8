//! The syntax highlighter pane - what a host application talks to
//!
//! Bundles the styled text, the highlight overlay and the mouse tracker,
//! and keeps a repaint flag the host polls after each call.

use std::sync::Arc;

use tracing::debug;

use crate::document::{StyleOutcome, StyledTextModel};
use crate::overlay::{HighlightedLines, LineHighlightOverlay};
use crate::spans::SpanIndex;
use crate::style::{Color, StyleTable};
use crate::surface::{HitTest, PaintSurface, Point};
use crate::tracker::ViewportMouseTracker;

/// Read-only syntax highlighted text pane
#[derive(Debug)]
pub struct SyntaxPane {
    model: StyledTextModel,
    overlay: LineHighlightOverlay,
    tracker: ViewportMouseTracker,
    needs_repaint: bool,
}

impl SyntaxPane {
    pub fn new() -> Self {
        Self {
            model: StyledTextModel::new(),
            overlay: LineHighlightOverlay::new(),
            tracker: ViewportMouseTracker::new(),
            needs_repaint: true,
        }
    }

    /// Replace the text. Styling must be set again afterwards, so set the
    /// theme and other settings first.
    pub fn set_content(&mut self, text: &str) {
        self.model.set_content(text);
        self.request_repaint();
    }

    /// Apply lexer output to the current text
    pub fn set_style(&mut self, index: SpanIndex) -> StyleOutcome {
        let outcome = self.model.apply_style(index);
        if outcome != StyleOutcome::Deferred {
            self.request_repaint();
        }
        outcome
    }

    pub fn theme(&self) -> Option<&Arc<StyleTable>> {
        self.model.theme()
    }

    /// Switch themes. The text is restyled from the held spans without
    /// re-lexing, and the highlight color follows the theme.
    pub fn set_theme(&mut self, theme: Arc<StyleTable>) {
        debug!(theme = theme.name(), "theme_set");
        self.overlay.set_highlight_color(theme.highlighted_background());
        self.model.set_theme(theme);
        self.request_repaint();
    }

    pub fn line_number_offset(&self) -> usize {
        self.overlay.line_number_offset()
    }

    /// Offset added to logical line numbers for display. It can only grow.
    pub fn set_line_number_offset(&mut self, offset: usize) {
        self.overlay.set_line_number_offset(offset);
        self.request_repaint();
    }

    pub fn highlighted_background(&self) -> Color {
        self.overlay.highlight_color()
    }

    pub fn set_highlighted_background(&mut self, color: Color) {
        self.overlay.set_highlight_color(color);
        self.request_repaint();
    }

    pub fn is_highlight_when_mouse_over(&self) -> bool {
        self.overlay.hover_enabled()
    }

    pub fn set_highlight_when_mouse_over(&mut self, enabled: bool) {
        self.overlay.set_hover_enabled(enabled);
        self.request_repaint();
    }

    /// Copy of the highlighted line numbers
    pub fn highlighted_line_list(&self) -> Vec<usize> {
        self.overlay.lines().snapshot()
    }

    /// Replace all highlighted lines
    pub fn set_highlighted_line_list(&mut self, lines: impl IntoIterator<Item = usize>) {
        self.overlay.lines().replace(lines);
        self.request_repaint();
    }

    /// Highlight one more line; duplicates are not filtered
    pub fn add_highlighted_line(&mut self, line: usize) {
        self.overlay.lines().push(line);
        self.request_repaint();
    }

    /// Shared handle for marking lines from another thread. Changes made
    /// through it show on the next paint; the host schedules that paint.
    pub fn highlighted_lines_handle(&self) -> HighlightedLines {
        self.overlay.lines().clone()
    }

    pub fn hovered_line(&self) -> Option<usize> {
        self.overlay.hovered()
    }

    /// Pointer moved over the pane; returns the hovered displayed line
    pub fn on_pointer_move(&mut self, point: Point, hit: &dyn HitTest) -> Option<usize> {
        let outcome = self
            .tracker
            .on_pointer_move(point, &self.model, hit, &mut self.overlay);
        if outcome.changed {
            self.request_repaint();
        }
        outcome.line
    }

    /// Displayed line under `point`, leaving the hover state alone.
    ///
    /// Together with `hover_line` this serves hit-testers that read the
    /// pane's own model and so cannot be held across `on_pointer_move`.
    pub fn line_at(&self, point: Point, hit: &dyn HitTest) -> Option<usize> {
        self.tracker
            .pointer_to_line(point, &self.model, hit, self.overlay.line_number_offset())
    }

    /// Make `line` the hovered line, as a pointer move onto it would.
    /// Returns the hovered line afterwards.
    pub fn hover_line(&mut self, line: Option<usize>) -> Option<usize> {
        if !self.overlay.hover_enabled() {
            return self.overlay.hovered();
        }
        if self.overlay.set_hovered(line) {
            self.request_repaint();
        }
        line
    }

    /// Pointer left the pane
    pub fn on_pointer_exit(&mut self) {
        if self.tracker.on_pointer_exit(&mut self.overlay) {
            self.request_repaint();
        }
    }

    /// Paint the highlight bands; call before drawing the text
    pub fn paint_highlights(&self, surface: &mut dyn PaintSurface) {
        self.overlay.paint(surface, self.model.line_count());
    }

    pub fn model(&self) -> &StyledTextModel {
        &self.model
    }

    pub fn overlay(&self) -> &LineHighlightOverlay {
        &self.overlay
    }

    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Read and clear the repaint flag
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.needs_repaint)
    }

    /// Mark that the pane must be painted again
    pub fn request_repaint(&mut self) {
        self.needs_repaint = true;
    }
}

impl Default for SyntaxPane {
    fn default() -> Self {
        Self::new()
    }
}
