//! Reference tokenizer
//!
//! The pane only consumes a `SpanIndex`; anything implementing `Lexer` can
//! feed it. `RegexLexer` is a small line-oriented implementation with a few
//! built-in languages, good enough for the viewer binary.

mod builtin;
mod rules;

use std::path::Path;

use tracing::debug;

use crate::spans::SpanIndex;

pub use builtin::{all_languages, for_path};
pub use rules::{BlockRule, LineState, PatternRule};

/// Source of category spans for a text
pub trait Lexer {
    /// Tokenize `text`. Offsets in the result are character offsets.
    fn lex(&self, text: &str) -> SpanIndex;
}

/// A language definition made of regex rules
#[derive(Debug, Clone)]
pub struct RegexLexer {
    /// Language name (e.g., "Rust", "Python")
    pub name: String,
    /// File extensions (e.g., ["rs"], ["py", "pyw"])
    pub extensions: Vec<String>,
    /// Single-line pattern rules, sorted by priority (highest first)
    pub patterns: Vec<PatternRule>,
    /// Block rules, tried in insertion order
    pub blocks: Vec<BlockRule>,
}

/// A byte-offset span produced while scanning one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineSpan {
    start: usize,
    end: usize,
    category: &'static str,
}

impl RegexLexer {
    /// Create a new empty language definition
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            extensions: Vec::new(),
            patterns: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Add a file extension
    pub fn add_extension(&mut self, ext: &str) {
        self.extensions.push(ext.to_string());
    }

    /// Add a pattern rule
    pub fn add_pattern(&mut self, rule: PatternRule) {
        self.patterns.push(rule);
        // Stable sort: equal priorities keep insertion order
        self.patterns.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Add a block rule
    pub fn add_block(&mut self, rule: BlockRule) {
        self.blocks.push(rule);
    }

    /// Whether this language handles files like `path`
    pub fn matches_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|known| known.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    fn block(&self, state_id: u8) -> Option<&BlockRule> {
        self.blocks.iter().find(|rule| rule.state_id == state_id)
    }

    /// Scan one line given the state left by the previous line
    fn scan_line(&self, text: &str, prev_state: LineState) -> (Vec<LineSpan>, LineState) {
        let mut spans = Vec::new();
        let mut pos = 0;

        if prev_state.is_inside_block() {
            if let Some(rule) = self.block(prev_state.block_id) {
                match rule.find_end(text, 0) {
                    Some(end) => {
                        push_span(&mut spans, 0, end, rule.category);
                        pos = end;
                    }
                    None => {
                        push_span(&mut spans, 0, text.len(), rule.category);
                        return (spans, prev_state);
                    }
                }
            }
        }

        while pos < text.len() {
            // Earliest construct wins; blocks beat patterns at the same spot
            let block = self
                .blocks
                .iter()
                .filter_map(|rule| rule.find_start(text, pos).map(|(s, e)| (s, e, rule)))
                .min_by_key(|(start, _, _)| *start);
            let pattern = self
                .patterns
                .iter()
                .filter_map(|rule| rule.find_at(text, pos).map(|(s, e)| (s, e, rule)))
                .min_by_key(|(start, _, _)| *start);

            match (block, pattern) {
                (Some((start, open_end, rule)), pattern)
                    if pattern.map_or(true, |(p_start, _, _)| start <= p_start) =>
                {
                    match rule.find_end(text, open_end) {
                        Some(end) => {
                            push_span(&mut spans, start, end, rule.category);
                            pos = end;
                        }
                        None => {
                            push_span(&mut spans, start, text.len(), rule.category);
                            return (spans, LineState::inside(rule.state_id));
                        }
                    }
                }
                (_, Some((start, end, rule))) => {
                    push_span(&mut spans, start, end, rule.category);
                    pos = end;
                }
                (_, None) => break,
            }
        }

        (spans, LineState::default())
    }
}

impl Lexer for RegexLexer {
    fn lex(&self, text: &str) -> SpanIndex {
        let mut index = SpanIndex::new();
        let mut state = LineState::default();
        let mut line_start_char = 0;

        for line in text.split('\n') {
            let (spans, next_state) = self.scan_line(line, state);
            let mut chars = CharCursor::new(line);
            for span in spans {
                let start = chars.char_offset(span.start);
                let end = chars.char_offset(span.end);
                index.push(span.category, (line_start_char + start, end - start));
            }
            state = next_state;
            // +1 for the newline
            line_start_char += chars.total() + 1;
        }

        debug!(language = %self.name, spans = index.span_count(), "lexed");
        index
    }
}

/// A lexer that finds nothing; plain text
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl Lexer for PlainText {
    fn lex(&self, _text: &str) -> SpanIndex {
        SpanIndex::new()
    }
}

fn push_span(spans: &mut Vec<LineSpan>, start: usize, end: usize, category: &'static str) {
    if start < end {
        spans.push(LineSpan { start, end, category });
    }
}

/// Converts increasing byte offsets of one line to char offsets
struct CharCursor<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            chars: 0,
        }
    }

    fn char_offset(&mut self, byte: usize) -> usize {
        if byte < self.byte {
            self.byte = 0;
            self.chars = 0;
        }
        self.chars += self.text[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }

    fn total(&mut self) -> usize {
        self.char_offset(self.text.len())
    }
}
