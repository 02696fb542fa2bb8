//! Display rendering

use unicode_width::UnicodeWidthChar;

use crate::document::StyledTextModel;
use crate::error::Result;
use crate::pane::SyntaxPane;
use crate::style::{Color, Style};
use crate::surface::{HitTest, PaintSurface, Point, Rect};
use crate::terminal::Terminal;

/// One frame of text rows seen as a paint surface.
///
/// Document coordinates are cells: x is the display column inside the text
/// area (gutter excluded), y is the 0-based document line. Line height is 1.
pub struct TerminalFrame<'a> {
    model: &'a StyledTextModel,
    top_line: usize,
    rows: usize,
    text_cols: usize,
    /// Background fill per visible row
    fills: Vec<Option<Color>>,
}

impl<'a> TerminalFrame<'a> {
    pub fn new(model: &'a StyledTextModel, top_line: usize, rows: usize, text_cols: usize) -> Self {
        Self {
            model,
            top_line,
            rows,
            text_cols,
            fills: vec![None; rows],
        }
    }

    pub fn top_line(&self) -> usize {
        self.top_line
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Fill color recorded for a visible row
    pub fn row_fill(&self, row: usize) -> Option<Color> {
        self.fills.get(row).copied().flatten()
    }
}

impl PaintSurface for TerminalFrame<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.width <= 0 || rect.height <= 0 {
            return;
        }
        let top = self.top_line as i64;
        let first = i64::from(rect.y).max(top);
        let last = i64::from(rect.bottom()).min(top + self.rows as i64);
        for y in first..last {
            self.fills[(y - top) as usize] = Some(color);
        }
    }

    fn line_height(&self) -> i32 {
        1
    }

    fn viewport_bounds(&self) -> Rect {
        Rect::new(
            0,
            clamp_i32(self.top_line),
            clamp_i32(self.text_cols),
            clamp_i32(self.rows),
        )
    }
}

impl HitTest for TerminalFrame<'_> {
    /// Points below the document snap to the last line, as graphical
    /// toolkits do
    fn offset_at(&self, point: Point) -> Option<usize> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let last_line = self.model.line_count().saturating_sub(1);
        let line = (point.y as usize).min(last_line);
        self.model.offset_at_column(line, point.x as usize)
    }

    fn char_bounds(&self, offset: usize) -> Option<Rect> {
        if offset > self.model.char_len() {
            return None;
        }
        let line = self.model.line_of_offset(offset);
        let start = self.model.line_start(line)?;
        let text = self.model.line_text(line)?;

        let mut col = 0;
        let mut width = 1;
        for (idx, ch) in text.chars().enumerate() {
            let ch_width = cell_width(ch);
            if start + idx == offset {
                width = ch_width;
                break;
            }
            col += ch_width;
        }
        Some(Rect::new(clamp_i32(col), clamp_i32(line), clamp_i32(width), 1))
    }
}

/// Display state
pub struct Display {
    /// Whether a full redraw is needed
    needs_redraw: bool,
    /// Message to show in the status line
    message: Option<String>,
    /// Whether to show line numbers
    pub show_line_numbers: bool,
}

impl Display {
    pub fn new() -> Self {
        Self {
            needs_redraw: true,
            message: None,
            show_line_numbers: true,
        }
    }

    /// Toggle line numbers on/off
    pub fn toggle_line_numbers(&mut self) {
        self.show_line_numbers = !self.show_line_numbers;
        self.needs_redraw = true;
    }

    /// Width of the line number gutter (including separator)
    pub fn gutter_width(&self, pane: &SyntaxPane) -> usize {
        if !self.show_line_numbers {
            return 0;
        }
        let largest = pane.model().line_count().saturating_add(pane.line_number_offset());
        digits(largest).max(3) + 1
    }

    /// Rows available for text; the last row is the status line
    pub fn text_rows(terminal_rows: u16) -> usize {
        usize::from(terminal_rows.saturating_sub(1))
    }

    /// Mark that a full redraw is needed
    pub fn force_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Set a message to display
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Clear the message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Map a screen cell to a document point, `None` outside the text area
    pub fn screen_to_point(
        &self,
        pane: &SyntaxPane,
        top_line: usize,
        text_rows: usize,
        col: u16,
        row: u16,
    ) -> Option<Point> {
        let gutter = self.gutter_width(pane);
        let (col, row) = (usize::from(col), usize::from(row));
        if row >= text_rows || col < gutter {
            return None;
        }
        Some(Point::new(clamp_i32(col - gutter), clamp_i32(top_line + row)))
    }

    /// Render the pane
    pub fn render(
        &mut self,
        terminal: &mut Terminal,
        pane: &SyntaxPane,
        top_line: usize,
        title: &str,
    ) -> Result<()> {
        let cols = usize::from(terminal.cols());
        let text_rows = Self::text_rows(terminal.rows());

        if self.needs_redraw {
            terminal.clear_screen()?;
        }

        let model = pane.model();
        let gutter = self.gutter_width(pane);
        let text_cols = cols.saturating_sub(gutter);

        let mut frame = TerminalFrame::new(model, top_line, text_rows, text_cols);
        pane.paint_highlights(&mut frame);

        let plain = model.theme().map(|theme| theme.plain()).unwrap_or_default();
        let gutter_style = Style::fg(Color::BrightBlack);

        for row in 0..text_rows {
            let line = top_line + row;
            terminal.move_cursor(row as u16, 0)?;

            if line >= model.line_count() {
                terminal.apply_style(&plain, model.background())?;
                if gutter > 0 {
                    terminal.write_str(&" ".repeat(gutter))?;
                }
                terminal.set_dim(true)?;
                terminal.write_str("~")?;
                terminal.set_dim(false)?;
                terminal.clear_to_eol()?;
                continue;
            }

            if gutter > 0 {
                let number = (line + 1).saturating_add(pane.line_number_offset());
                terminal.apply_style(&gutter_style, model.background())?;
                terminal.write_str(&format!("{:>width$} ", number, width = gutter - 1))?;
            }

            let background = frame.row_fill(row).unwrap_or(model.background());
            let mut remaining = text_cols;
            for run in model.runs(line) {
                if remaining == 0 {
                    break;
                }
                let (text, width) = truncate_to_width(&run.text, remaining);
                terminal.apply_style(&run.style, background)?;
                terminal.write_str(&text)?;
                remaining -= width;
            }

            // Carry the row background to the right edge
            terminal.apply_style(&plain, background)?;
            terminal.clear_to_eol()?;
        }

        self.render_status_line(terminal, pane, top_line, text_rows, title)?;
        terminal.reset_attributes()?;
        terminal.flush()?;

        self.needs_redraw = false;
        Ok(())
    }

    /// Render the status line below the text
    fn render_status_line(
        &self,
        terminal: &mut Terminal,
        pane: &SyntaxPane,
        top_line: usize,
        text_rows: usize,
        title: &str,
    ) -> Result<()> {
        let cols = usize::from(terminal.cols());
        terminal.move_cursor(text_rows as u16, 0)?;
        terminal.reset_attributes()?;
        terminal.set_reverse(true)?;

        let total = pane.model().line_count();
        let offset = pane.line_number_offset();
        let first = (top_line + 1).min(total).saturating_add(offset);
        let last = top_line.saturating_add(text_rows).min(total).saturating_add(offset);
        let hover = pane
            .hovered_line()
            .map(|line| format!(" hover {}", line))
            .unwrap_or_default();

        let mut status = format!(
            " {}  lines {}-{} of {}{}  marked {}",
            title,
            first,
            last,
            total.saturating_add(offset),
            hover,
            pane.highlighted_line_list().len()
        );
        if let Some(ref msg) = self.message {
            status.push_str("  ");
            status.push_str(msg);
        }

        let (mut status, width) = truncate_to_width(&status, cols);
        status.push_str(&" ".repeat(cols - width));
        terminal.write_str(&status)?;
        terminal.set_reverse(false)?;

        Ok(())
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

/// Columns a character occupies. Control characters show as one blank cell.
fn cell_width(ch: char) -> usize {
    ch.width().unwrap_or(1)
}

/// Truncate a string to fit within a display width; returns the text to
/// print and its width
fn truncate_to_width(s: &str, max_width: usize) -> (String, usize) {
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = cell_width(ch);
        if width + ch_width > max_width {
            break;
        }
        result.push(if ch.is_control() { ' ' } else { ch });
        width += ch_width;
    }

    (result, width)
}

fn digits(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

fn clamp_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
