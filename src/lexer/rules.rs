//! Matching rules for the regex lexer
//!
//! Pattern rules match within one line. Block rules (block comments,
//! strings) may stay open across line breaks; the lexer carries a
//! `LineState` from line to line for them.

use regex::Regex;

/// A single-line pattern rule
///
/// Matches a regex pattern and attributes the match to a category.
/// Rules are tried in priority order (highest first).
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Name for debugging
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Category assigned to matches
    pub category: &'static str,
    /// Priority (higher = matched first)
    pub priority: i32,
}

impl PatternRule {
    /// Create a new pattern rule, `None` if the pattern does not compile
    pub fn new(name: &str, pattern: &str, category: &'static str, priority: i32) -> Option<Self> {
        Regex::new(pattern).ok().map(|regex| Self {
            name: name.to_string(),
            pattern: regex,
            category,
            priority,
        })
    }

    /// Find the first non-empty match at or after a byte position.
    ///
    /// `^` and `\b` see the whole line, not just the searched tail.
    pub fn find_at(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        let mut from = start;
        while from < text.len() {
            let m = self.pattern.find_at(text, from)?;
            if !m.is_empty() {
                return Some((m.start(), m.end()));
            }
            // Step over the empty match to the next char boundary
            from = m.end() + text[m.end()..].chars().next()?.len_utf8();
        }
        None
    }
}

/// A construct that may span several lines (block comments, strings)
#[derive(Debug, Clone)]
pub struct BlockRule {
    /// Name for debugging
    pub name: String,
    /// Pattern that opens the construct
    pub start: Regex,
    /// Pattern that closes the construct
    pub end: Regex,
    /// Category of the whole construct, delimiters included
    pub category: &'static str,
    /// Escape character that makes the next close pattern literal
    pub escape_char: Option<char>,
    /// Unique ID for this block state (1-255, 0 = normal)
    pub state_id: u8,
}

impl BlockRule {
    /// Create a new block rule
    pub fn new(
        name: &str,
        start_pattern: &str,
        end_pattern: &str,
        category: &'static str,
        state_id: u8,
    ) -> Option<Self> {
        let start = Regex::new(start_pattern).ok()?;
        let end = Regex::new(end_pattern).ok()?;
        Some(Self {
            name: name.to_string(),
            start,
            end,
            category,
            escape_char: None,
            state_id,
        })
    }

    /// Create a block rule whose close pattern can be escaped
    pub fn with_escape(
        name: &str,
        start_pattern: &str,
        end_pattern: &str,
        category: &'static str,
        state_id: u8,
        escape_char: char,
    ) -> Option<Self> {
        let mut rule = Self::new(name, start_pattern, end_pattern, category, state_id)?;
        rule.escape_char = Some(escape_char);
        Some(rule)
    }

    /// Find the opening delimiter at or after `start`
    pub fn find_start(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        if start >= text.len() {
            return None;
        }
        self.start.find_at(text, start).map(|m| (m.start(), m.end()))
    }

    /// Byte position just past the closing delimiter, respecting escapes
    pub fn find_end(&self, text: &str, start: usize) -> Option<usize> {
        if start > text.len() {
            return None;
        }
        let search_text = &text[start..];

        let Some(escape) = self.escape_char else {
            return self.end.find(search_text).map(|m| start + m.end());
        };

        let mut pos = 0;
        while pos < search_text.len() {
            let m = self.end.find(&search_text[pos..])?;
            let match_start = pos + m.start();
            let escapes = search_text[..match_start]
                .chars()
                .rev()
                .take_while(|&c| c == escape)
                .count();
            if escapes % 2 == 0 {
                return Some(start + pos + m.end());
            }
            // Odd number of escapes: the delimiter is literal
            pos += m.end().max(1);
        }
        None
    }
}

/// Lexer state carried from one line to the next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineState {
    /// 0 = normal, non-zero = inside the block rule with this ID
    pub block_id: u8,
}

impl LineState {
    /// Create state for being inside a block construct
    pub fn inside(state_id: u8) -> Self {
        Self { block_id: state_id }
    }

    /// Check if we're inside a block construct
    pub fn is_inside_block(&self) -> bool {
        self.block_id != 0
    }
}
