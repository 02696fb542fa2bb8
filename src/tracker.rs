//! Pointer position -> hovered line

use crate::document::StyledTextModel;
use crate::overlay::LineHighlightOverlay;
use crate::surface::{HitTest, Point};

/// Result of a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackOutcome {
    /// Displayed line under the pointer
    pub line: Option<usize>,
    /// The hovered line changed and the pane needs a repaint
    pub changed: bool,
}

/// Turns pointer motion into the overlay's hovered line
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewportMouseTracker;

impl ViewportMouseTracker {
    pub fn new() -> Self {
        Self
    }

    /// Displayed line number under `point`, `None` when the pointer is over
    /// no text.
    ///
    /// Hit-testing below the document usually snaps to the last character,
    /// so on the last line the pointer must also lie inside that line's band.
    pub fn pointer_to_line(
        &self,
        point: Point,
        model: &StyledTextModel,
        hit: &dyn HitTest,
        line_number_offset: usize,
    ) -> Option<usize> {
        let offset = hit.offset_at(point)?;
        let line = model.line_of_offset(offset);

        if line + 1 == model.line_count() {
            if let Some(bounds) = hit.char_bounds(offset) {
                if point.y >= bounds.bottom() {
                    return None;
                }
            }
        }

        // Displayed numbers past usize::MAX do not exist
        (line + 1).checked_add(line_number_offset)
    }

    /// Update the hovered line for a pointer move.
    ///
    /// Moves within the same line report `changed: false` so hosts can skip
    /// the repaint.
    pub fn on_pointer_move(
        &self,
        point: Point,
        model: &StyledTextModel,
        hit: &dyn HitTest,
        overlay: &mut LineHighlightOverlay,
    ) -> TrackOutcome {
        if !overlay.hover_enabled() {
            return TrackOutcome {
                line: overlay.hovered(),
                changed: false,
            };
        }
        let line = self.pointer_to_line(point, model, hit, overlay.line_number_offset());
        let changed = overlay.set_hovered(line);
        TrackOutcome { line, changed }
    }

    /// Pointer left the viewport. Returns whether a repaint is requested.
    pub fn on_pointer_exit(&self, overlay: &mut LineHighlightOverlay) -> bool {
        if !overlay.hover_enabled() {
            return false;
        }
        overlay.set_hovered(None);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Rect;

    /// Fixed-pitch grid: every char is 1 wide and `LINE_HEIGHT` tall
    const LINE_HEIGHT: i32 = 10;

    struct Grid<'a> {
        model: &'a StyledTextModel,
    }

    impl HitTest for Grid<'_> {
        fn offset_at(&self, point: Point) -> Option<usize> {
            if point.x < 0 || point.y < 0 {
                return None;
            }
            let line = (point.y / LINE_HEIGHT) as usize;
            let line = line.min(self.model.line_count() - 1);
            self.model.offset_at_column(line, point.x as usize)
        }

        fn char_bounds(&self, offset: usize) -> Option<Rect> {
            let line = self.model.line_of_offset(offset) as i32;
            Some(Rect::new(0, line * LINE_HEIGHT, 1, LINE_HEIGHT))
        }
    }

    fn three_lines() -> StyledTextModel {
        let mut model = StyledTextModel::new();
        model.set_content("ab\ncd\nef");
        model
    }

    #[test]
    fn test_pointer_to_line() {
        let model = three_lines();
        let grid = Grid { model: &model };
        let tracker = ViewportMouseTracker::new();
        assert_eq!(tracker.pointer_to_line(Point::new(1, 0), &model, &grid, 0), Some(1));
        assert_eq!(tracker.pointer_to_line(Point::new(0, 15), &model, &grid, 0), Some(2));
        assert_eq!(tracker.pointer_to_line(Point::new(0, 25), &model, &grid, 0), Some(3));
        assert_eq!(tracker.pointer_to_line(Point::new(0, 15), &model, &grid, 9), Some(11));
        assert_eq!(tracker.pointer_to_line(Point::new(-1, 5), &model, &grid, 0), None);
    }

    #[test]
    fn test_below_last_line_is_no_line() {
        let model = three_lines();
        let grid = Grid { model: &model };
        let tracker = ViewportMouseTracker::new();
        assert_eq!(tracker.pointer_to_line(Point::new(0, 30), &model, &grid, 0), None);
        assert_eq!(tracker.pointer_to_line(Point::new(0, 95), &model, &grid, 4), None);
    }

    #[test]
    fn test_huge_offset_is_no_line() {
        let model = three_lines();
        let grid = Grid { model: &model };
        let tracker = ViewportMouseTracker::new();
        let near_max = usize::MAX - 3;
        let line_at = |y, offset| tracker.pointer_to_line(Point::new(0, y), &model, &grid, offset);
        assert_eq!(line_at(0, usize::MAX), None);
        assert_eq!(line_at(25, near_max), Some(usize::MAX));
        assert_eq!(line_at(15, near_max), Some(usize::MAX - 1));
    }

    #[test]
    fn test_move_reports_change_once() {
        let model = three_lines();
        let grid = Grid { model: &model };
        let tracker = ViewportMouseTracker::new();
        let mut overlay = LineHighlightOverlay::new();

        let first = tracker.on_pointer_move(Point::new(0, 12), &model, &grid, &mut overlay);
        assert_eq!(first, TrackOutcome { line: Some(2), changed: true });
        let jitter = tracker.on_pointer_move(Point::new(1, 18), &model, &grid, &mut overlay);
        assert_eq!(jitter, TrackOutcome { line: Some(2), changed: false });
        assert_eq!(overlay.hovered(), Some(2));

        let below = tracker.on_pointer_move(Point::new(0, 40), &model, &grid, &mut overlay);
        assert_eq!(below, TrackOutcome { line: None, changed: true });
    }

    #[test]
    fn test_hover_disabled_ignores_moves() {
        let model = three_lines();
        let grid = Grid { model: &model };
        let tracker = ViewportMouseTracker::new();
        let mut overlay = LineHighlightOverlay::new();
        overlay.set_hover_enabled(false);

        let outcome = tracker.on_pointer_move(Point::new(0, 5), &model, &grid, &mut overlay);
        assert!(!outcome.changed);
        assert_eq!(overlay.hovered(), None);
        assert!(!tracker.on_pointer_exit(&mut overlay));
    }

    #[test]
    fn test_exit_clears_hover() {
        let model = three_lines();
        let grid = Grid { model: &model };
        let tracker = ViewportMouseTracker::new();
        let mut overlay = LineHighlightOverlay::new();
        tracker.on_pointer_move(Point::new(0, 5), &model, &grid, &mut overlay);
        assert!(tracker.on_pointer_exit(&mut overlay));
        assert_eq!(overlay.hovered(), None);
    }
}
