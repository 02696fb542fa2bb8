//! Viewer state and main loop

use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use tracing::{debug, info};

use crate::config::Config;
use crate::display::{Display, TerminalFrame};
use crate::error::Result;
use crate::pane::SyntaxPane;
use crate::terminal::Terminal;

/// How long to wait for input before checking for outside changes
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollUp(usize),
    ScrollDown(usize),
    PageUp,
    PageDown,
    Top,
    Bottom,
    ToggleLineNumbers,
    /// Add the hovered line to the highlighted lines
    MarkHovered,
    ClearMarks,
    Redraw,
}

impl Action {
    /// Key binding table
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            KeyCode::Char('c') if ctrl => Action::Quit,
            KeyCode::Char('l') if ctrl => Action::Redraw,
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Up | KeyCode::Char('k') => Action::ScrollUp(1),
            KeyCode::Down | KeyCode::Char('j') => Action::ScrollDown(1),
            KeyCode::PageUp | KeyCode::Char('b') => Action::PageUp,
            KeyCode::PageDown | KeyCode::Char(' ') => Action::PageDown,
            KeyCode::Home | KeyCode::Char('g') => Action::Top,
            KeyCode::End | KeyCode::Char('G') => Action::Bottom,
            KeyCode::Char('n') => Action::ToggleLineNumbers,
            KeyCode::Char('m') => Action::MarkHovered,
            KeyCode::Char('c') => Action::ClearMarks,
            _ => return None,
        };
        Some(action)
    }
}

/// Main viewer state
pub struct Viewer {
    /// Terminal interface
    pub terminal: Terminal,
    /// Display state
    pub display: Display,
    /// The pane being shown
    pub pane: SyntaxPane,
    /// Shown in the status line
    title: String,
    /// First document line on screen
    top_line: usize,
    /// Lines per wheel notch
    scroll_lines: usize,
    /// Last pointer cell, to re-hover after scrolling
    last_pointer: Option<(u16, u16)>,
    /// Highlighted lines at the last paint
    painted_marks: Vec<usize>,
    /// Whether viewer is running
    running: bool,
}

impl Viewer {
    pub fn new(
        terminal: Terminal,
        pane: SyntaxPane,
        title: impl Into<String>,
        config: &Config,
    ) -> Self {
        let mut display = Display::new();
        display.show_line_numbers = config.view.line_numbers;
        Self {
            terminal,
            display,
            pane,
            title: title.into(),
            top_line: 0,
            scroll_lines: config.view.scroll_lines.max(1),
            last_pointer: None,
            painted_marks: Vec::new(),
            running: true,
        }
    }

    /// Run the main loop until quit
    pub fn run(&mut self) -> Result<()> {
        self.display.force_redraw();
        self.pane.request_repaint();
        info!(title = %self.title, lines = self.pane.model().line_count(), "viewer_started");

        while self.running {
            // Lines may be marked from other threads through the shared handle
            let marks = self.pane.highlighted_line_list();
            if marks != self.painted_marks {
                self.pane.request_repaint();
            }

            if self.pane.take_repaint() {
                self.display
                    .render(&mut self.terminal, &self.pane, self.top_line, &self.title)?;
                self.painted_marks = marks;
            }

            if let Some(event) = self.terminal.poll_event(POLL_INTERVAL)? {
                self.handle_event(event);
            }
        }

        info!("viewer_stopped");
        Ok(())
    }

    /// Handle one terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                if let Some(action) = Action::from_key(&key) {
                    self.perform(action);
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::FocusLost => {
                self.last_pointer = None;
                self.pane.on_pointer_exit();
            }
            Event::Resize(cols, rows) => {
                debug!(cols, rows, "resized");
                self.top_line = self.top_line.min(self.max_top_line());
                self.display.force_redraw();
                self.pane.request_repaint();
            }
            _ => {}
        }
    }

    /// Carry out a key action
    pub fn perform(&mut self, action: Action) {
        let page = self.text_rows().saturating_sub(2).max(1);
        match action {
            Action::Quit => self.running = false,
            Action::ScrollUp(n) => self.scroll_to(self.top_line.saturating_sub(n)),
            Action::ScrollDown(n) => self.scroll_to(self.top_line.saturating_add(n)),
            Action::PageUp => self.scroll_to(self.top_line.saturating_sub(page)),
            Action::PageDown => self.scroll_to(self.top_line.saturating_add(page)),
            Action::Top => self.scroll_to(0),
            Action::Bottom => self.scroll_to(usize::MAX),
            Action::ToggleLineNumbers => {
                self.display.toggle_line_numbers();
                self.pane.request_repaint();
                self.rehover();
            }
            Action::MarkHovered => match self.pane.hovered_line() {
                Some(line) => {
                    self.pane.add_highlighted_line(line);
                    self.display.set_message(format!("marked {}", line));
                }
                None => {
                    self.display.set_message("no line under the mouse");
                    self.pane.request_repaint();
                }
            },
            Action::ClearMarks => {
                self.pane.set_highlighted_line_list(Vec::<usize>::new());
                self.display.clear_message();
            }
            Action::Redraw => {
                self.display.force_redraw();
                self.pane.request_repaint();
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.last_pointer = Some((mouse.column, mouse.row));
                self.rehover();
            }
            MouseEventKind::ScrollUp => {
                self.perform(Action::ScrollUp(self.scroll_lines));
            }
            MouseEventKind::ScrollDown => {
                self.perform(Action::ScrollDown(self.scroll_lines));
            }
            _ => {}
        }
    }

    fn scroll_to(&mut self, top_line: usize) {
        let top_line = top_line.min(self.max_top_line());
        if top_line != self.top_line {
            self.top_line = top_line;
            self.pane.request_repaint();
            // The pointer stayed put while the text moved under it
            self.rehover();
        }
    }

    /// Recompute the hovered line from the last pointer position
    fn rehover(&mut self) {
        let Some((col, row)) = self.last_pointer else {
            return;
        };
        let text_rows = self.text_rows();
        let point = self
            .display
            .screen_to_point(&self.pane, self.top_line, text_rows, col, row);
        let Some(point) = point else {
            self.pane.on_pointer_exit();
            return;
        };

        let gutter = self.display.gutter_width(&self.pane);
        let text_cols = usize::from(self.terminal.cols()).saturating_sub(gutter);
        let line = {
            let frame = TerminalFrame::new(self.pane.model(), self.top_line, text_rows, text_cols);
            self.pane.line_at(point, &frame)
        };
        self.pane.hover_line(line);
    }

    fn text_rows(&self) -> usize {
        Display::text_rows(self.terminal.rows())
    }

    fn max_top_line(&self) -> usize {
        self.pane
            .model()
            .line_count()
            .saturating_sub(self.text_rows())
    }
}
