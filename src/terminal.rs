//! Terminal abstraction using crossterm

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event,
    },
    execute, queue,
    style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::error::Result;
use crate::style::{Color, Style};

/// Terminal wrapper for cross-platform terminal I/O
pub struct Terminal {
    /// Terminal width in columns
    cols: u16,
    /// Terminal height in rows
    rows: u16,
}

impl Terminal {
    /// Create a new terminal instance: raw mode, alternate screen, mouse
    /// and focus reporting
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let (cols, rows) = terminal::size()?;

        let term = Self { cols, rows };
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange,
            cursor::Hide
        )?;

        Ok(term)
    }

    /// Get terminal width
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Get terminal height
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Update terminal size (call after resize event)
    pub fn set_size(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    /// Clear the entire screen
    pub fn clear_screen(&mut self) -> Result<()> {
        queue!(io::stdout(), terminal::Clear(ClearType::All))?;
        Ok(())
    }

    /// Clear from cursor to end of line
    pub fn clear_to_eol(&mut self) -> Result<()> {
        queue!(io::stdout(), terminal::Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    /// Move cursor to position (0-indexed)
    pub fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        queue!(io::stdout(), cursor::MoveTo(col, row))?;
        Ok(())
    }

    /// Write a string at current cursor position
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(io::stdout(), Print(s))?;
        Ok(())
    }

    /// Flush output buffer to terminal
    pub fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    /// Wait up to `timeout` for an event. Resize events also update the
    /// stored size.
    pub fn poll_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let event = event::read()?;
        if let Event::Resize(cols, rows) = event {
            self.set_size(cols, rows);
        }
        Ok(Some(event))
    }

    /// Set colors and attributes for following writes. `background` is used
    /// when the style has no background of its own.
    pub fn apply_style(&mut self, style: &Style, background: Color) -> Result<()> {
        let mut out = io::stdout();
        queue!(out, SetAttribute(Attribute::Reset))?;
        queue!(
            out,
            SetForegroundColor(to_crossterm(style.fg)),
            SetBackgroundColor(to_crossterm(style.bg.unwrap_or(background)))
        )?;
        if style.bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if style.italic {
            queue!(out, SetAttribute(Attribute::Italic))?;
        }
        if style.underline {
            queue!(out, SetAttribute(Attribute::Underlined))?;
        }
        Ok(())
    }

    /// Set reverse video mode
    pub fn set_reverse(&mut self, enabled: bool) -> Result<()> {
        if enabled {
            queue!(io::stdout(), SetAttribute(Attribute::Reverse))?;
        } else {
            queue!(io::stdout(), SetAttribute(Attribute::NoReverse))?;
        }
        Ok(())
    }

    /// Set dim/faint mode (for line numbers, etc.)
    pub fn set_dim(&mut self, enabled: bool) -> Result<()> {
        if enabled {
            queue!(io::stdout(), SetAttribute(Attribute::Dim))?;
        } else {
            queue!(io::stdout(), SetAttribute(Attribute::NormalIntensity))?;
        }
        Ok(())
    }

    /// Reset all attributes and colors
    pub fn reset_attributes(&mut self) -> Result<()> {
        queue!(io::stdout(), SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = execute!(
            io::stdout(),
            SetAttribute(Attribute::Reset),
            DisableFocusChange,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Map a style color onto the crossterm palette
pub fn to_crossterm(color: Color) -> crossterm::style::Color {
    use crossterm::style::Color as Ct;
    match color {
        Color::Default => Ct::Reset,
        Color::Black => Ct::Black,
        Color::Red => Ct::DarkRed,
        Color::Green => Ct::DarkGreen,
        Color::Yellow => Ct::DarkYellow,
        Color::Blue => Ct::DarkBlue,
        Color::Magenta => Ct::DarkMagenta,
        Color::Cyan => Ct::DarkCyan,
        Color::White => Ct::Grey,
        Color::BrightBlack => Ct::DarkGrey,
        Color::BrightRed => Ct::Red,
        Color::BrightGreen => Ct::Green,
        Color::BrightYellow => Ct::Yellow,
        Color::BrightBlue => Ct::Blue,
        Color::BrightMagenta => Ct::Magenta,
        Color::BrightCyan => Ct::Cyan,
        Color::BrightWhite => Ct::White,
        Color::Rgb(r, g, b) => Ct::Rgb { r, g, b },
    }
}
