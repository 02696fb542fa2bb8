//! Styled text model - the text of the pane and one style per character
//!
//! Offsets are character offsets, never byte offsets. Lines are separated by
//! `'\n'`; a document always has at least one line and a trailing newline
//! opens an empty last line.

use std::sync::Arc;

use tracing::{debug, warn};
use unicode_width::UnicodeWidthChar;

use crate::spans::SpanIndex;
use crate::style::{font_variant, Color, Font, Style, StyleTable};

/// What `apply_style` did with a span index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleOutcome {
    /// No theme yet; the index is kept and applied when one arrives
    Deferred,
    /// The index was applied. `skipped` spans did not fit the text.
    Applied { spans: usize, skipped: usize },
}

/// A maximal run of equally styled characters within one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    /// Character offset of the first character in the document
    pub offset: usize,
    pub text: String,
    pub style: Style,
}

/// Text content plus per-character styles
#[derive(Debug)]
pub struct StyledTextModel {
    text: String,
    /// Byte offset of every character, so char ranges slice cheaply
    char_bytes: Vec<usize>,
    /// Character offset where each line starts
    line_starts: Vec<usize>,
    styles: Vec<Style>,
    theme: Option<Arc<StyleTable>>,
    span_index: Option<SpanIndex>,
    caret: usize,
    font: Option<Font>,
    background: Color,
}

impl StyledTextModel {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            char_bytes: Vec::new(),
            line_starts: vec![0],
            styles: Vec::new(),
            theme: None,
            span_index: None,
            caret: 0,
            font: None,
            background: Color::Default,
        }
    }

    /// Replace the whole text.
    ///
    /// Every character gets the plain style, the caret moves to the start and
    /// any held span index is dropped: it described the old text.
    pub fn set_content(&mut self, text: &str) {
        self.text = text.to_string();
        self.char_bytes = text.char_indices().map(|(byte, _)| byte).collect();
        self.line_starts = std::iter::once(0)
            .chain(
                text.chars()
                    .enumerate()
                    .filter(|(_, ch)| *ch == '\n')
                    .map(|(idx, _)| idx + 1),
            )
            .collect();
        self.styles = vec![self.plain_style(); self.char_bytes.len()];
        self.caret = 0;
        self.span_index = None;
        debug!(chars = self.char_len(), lines = self.line_count(), "content_set");
    }

    /// Style the text from a span index.
    ///
    /// Without a theme the index is only stored. Otherwise every character
    /// is reset to plain and the categories are applied in index order, each
    /// span overwriting what earlier ones set. Spans that do not fit the text
    /// are logged and skipped.
    pub fn apply_style(&mut self, index: SpanIndex) -> StyleOutcome {
        self.span_index = Some(index);
        self.restyle()
    }

    fn restyle(&mut self) -> StyleOutcome {
        let (Some(theme), Some(index)) = (self.theme.as_ref(), self.span_index.as_ref()) else {
            return StyleOutcome::Deferred;
        };

        let plain = theme.plain();
        self.styles.iter_mut().for_each(|style| *style = plain);

        let text_len = self.styles.len();
        let mut applied = 0;
        let mut skipped = 0;
        for (category, spans) in index.iter() {
            let style = theme.style(category);
            for span in spans {
                match span.checked_range(category, text_len) {
                    Ok(range) => {
                        self.styles[range].iter_mut().for_each(|slot| *slot = style);
                        applied += 1;
                    }
                    Err(err) => {
                        warn!(
                            %err,
                            category,
                            offset = span.offset,
                            length = span.length,
                            text_len,
                            "span_skipped"
                        );
                        skipped += 1;
                    }
                }
            }
        }

        debug!(theme = theme.name(), applied, skipped, "style_applied");
        StyleOutcome::Applied {
            spans: applied,
            skipped,
        }
    }

    /// Install a theme, restyling from the held span index if there is one
    pub fn set_theme(&mut self, theme: Arc<StyleTable>) {
        let plain = theme.plain();
        self.font = Some(font_variant(theme.font(), plain.bold, plain.italic));
        self.background = theme.background();
        self.theme = Some(theme);

        if self.span_index.is_some() {
            self.restyle();
        } else {
            self.styles.iter_mut().for_each(|style| *style = plain);
        }
    }

    pub fn theme(&self) -> Option<&Arc<StyleTable>> {
        self.theme.as_ref()
    }

    /// The span index last handed to `apply_style` for the current text
    pub fn span_index(&self) -> Option<&SpanIndex> {
        self.span_index.as_ref()
    }

    /// Font derived from the theme's plain style
    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.char_bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of lines, at least one
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 0-based line containing a character offset, clamped to the last line
    pub fn line_of_offset(&self, offset: usize) -> usize {
        self.line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }

    /// Character offset where a line starts
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Character offset where a line ends, excluding its newline
    pub fn line_end(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line)?;
        Some(match self.line_starts.get(line + 1) {
            Some(next) => next - 1,
            None => self.char_len(),
        })
    }

    /// Text of a line without its newline
    pub fn line_text(&self, line: usize) -> Option<&str> {
        let start = self.line_start(line)?;
        let end = self.line_end(line)?;
        Some(self.slice(start, end))
    }

    /// Style of the character at `offset`
    pub fn style_at(&self, offset: usize) -> Option<Style> {
        self.styles.get(offset).copied()
    }

    /// Per-character styles of the whole text
    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    /// Character offset for a display column within a line, clamped to the
    /// line end
    pub fn offset_at_column(&self, line: usize, col: usize) -> Option<usize> {
        let start = self.line_start(line)?;
        let mut current_col = 0;
        for (idx, ch) in self.line_text(line)?.chars().enumerate() {
            let width = ch.width().unwrap_or(1);
            if current_col + width > col {
                return Some(start + idx);
            }
            current_col += width;
        }
        self.line_end(line)
    }

    /// Split a line into runs of identical style
    pub fn runs(&self, line: usize) -> Vec<StyledRun> {
        let (Some(start), Some(end)) = (self.line_start(line), self.line_end(line)) else {
            return Vec::new();
        };

        let mut runs: Vec<StyledRun> = Vec::new();
        let mut run_start = start;
        for offset in start..end {
            let style = self.styles[offset];
            let next_differs = offset + 1 == end || self.styles[offset + 1] != style;
            if next_differs {
                runs.push(StyledRun {
                    offset: run_start,
                    text: self.slice(run_start, offset + 1).to_string(),
                    style,
                });
                run_start = offset + 1;
            }
        }
        runs
    }

    fn slice(&self, start: usize, end: usize) -> &str {
        let byte = |idx: usize| self.char_bytes.get(idx).copied().unwrap_or(self.text.len());
        &self.text[byte(start)..byte(end)]
    }

    fn plain_style(&self) -> Style {
        self.theme.as_ref().map(|theme| theme.plain()).unwrap_or_default()
    }
}

impl Default for StyledTextModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> Arc<StyleTable> {
        Arc::new(
            StyleTable::builder("test")
                .plain(Style::fg(Color::Black))
                .category("keyword", Style::fg(Color::Red))
                .category("string", Style::fg(Color::Green))
                .build(),
        )
    }

    fn keyword_index() -> SpanIndex {
        [("keyword", vec![(0, 2)])].into_iter().collect()
    }

    #[test]
    fn test_line_structure() {
        let mut model = StyledTextModel::new();
        assert_eq!(model.line_count(), 1);

        model.set_content("ab\ncd\nef");
        assert_eq!(model.line_count(), 3);
        assert_eq!(model.char_len(), 8);
        assert_eq!(model.line_of_offset(0), 0);
        assert_eq!(model.line_of_offset(2), 0);
        assert_eq!(model.line_of_offset(3), 1);
        assert_eq!(model.line_of_offset(7), 2);
        assert_eq!(model.line_of_offset(100), 2);
        assert_eq!(model.line_text(1), Some("cd"));
        assert_eq!(model.line_end(2), Some(8));
        assert_eq!(model.line_text(3), None);

        model.set_content("x\n");
        assert_eq!(model.line_count(), 2);
        assert_eq!(model.line_text(1), Some(""));
    }

    #[test]
    fn test_multibyte_offsets_are_chars() {
        let mut model = StyledTextModel::new();
        model.set_theme(theme());
        model.set_content("é😀x\nok");
        assert_eq!(model.char_len(), 6);
        assert_eq!(model.line_text(0), Some("é😀x"));
        assert_eq!(model.line_of_offset(4), 1);

        model.apply_style([("keyword", vec![(1, 2)])].into_iter().collect());
        let runs = model.runs(0);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].text, "😀x");
        assert_eq!(runs[1].offset, 1);
        assert_eq!(runs[1].style.fg, Color::Red);
    }

    #[test]
    fn test_apply_keyword_span() {
        let mut model = StyledTextModel::new();
        model.set_theme(theme());
        model.set_content("ab\ncd\nef");
        let outcome = model.apply_style(keyword_index());
        assert_eq!(outcome, StyleOutcome::Applied { spans: 1, skipped: 0 });

        for offset in 0..2 {
            assert_eq!(model.style_at(offset).unwrap().fg, Color::Red);
        }
        for offset in 2..8 {
            assert_eq!(model.style_at(offset).unwrap().fg, Color::Black);
        }
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut model = StyledTextModel::new();
        model.set_theme(theme());
        model.set_content("let s = \"x\";");
        let index: SpanIndex = [("keyword", vec![(0, 3)]), ("string", vec![(8, 3)])]
            .into_iter()
            .collect();

        model.apply_style(index.clone());
        let first = model.styles().to_vec();
        model.apply_style(index);
        assert_eq!(model.styles(), first.as_slice());
    }

    #[test]
    fn test_later_category_wins_overlap() {
        let mut model = StyledTextModel::new();
        model.set_theme(theme());
        model.set_content("abcdef");
        model.apply_style(
            [("keyword", vec![(0, 4)]), ("string", vec![(2, 4)])]
                .into_iter()
                .collect(),
        );
        assert_eq!(model.style_at(1).unwrap().fg, Color::Red);
        assert_eq!(model.style_at(2).unwrap().fg, Color::Green);
        assert_eq!(model.style_at(5).unwrap().fg, Color::Green);
    }

    #[test]
    fn test_out_of_range_span_is_skipped() {
        let mut model = StyledTextModel::new();
        model.set_theme(theme());
        model.set_content("abc");
        let index: SpanIndex = [("keyword", vec![(2, 5), (0, 1)])].into_iter().collect();
        let outcome = model.apply_style(index);
        assert_eq!(outcome, StyleOutcome::Applied { spans: 1, skipped: 1 });
        assert_eq!(model.style_at(0).unwrap().fg, Color::Red);
        assert_eq!(model.style_at(2).unwrap().fg, Color::Black);
    }

    #[test]
    fn test_unknown_category_uses_plain() {
        let mut model = StyledTextModel::new();
        model.set_theme(theme());
        model.set_content("abc");
        model.apply_style([("mystery", vec![(0, 3)])].into_iter().collect());
        assert!(model.styles().iter().all(|s| s.fg == Color::Black));
    }

    #[test]
    fn test_set_content_resets_styles() {
        let mut model = StyledTextModel::new();
        model.set_theme(theme());
        model.set_content("ab\ncd");
        model.apply_style(keyword_index());
        model.set_content("ab\ncd");
        assert!(model.styles().iter().all(|s| *s == Style::fg(Color::Black)));
        assert!(model.span_index().is_none());
        assert_eq!(model.caret(), 0);
    }

    #[test]
    fn test_style_deferred_until_theme() {
        let mut model = StyledTextModel::new();
        model.set_content("ab\ncd\nef");
        assert_eq!(model.apply_style(keyword_index()), StyleOutcome::Deferred);
        assert!(model.styles().iter().all(Style::is_default));

        model.set_theme(theme());
        assert_eq!(model.style_at(0).unwrap().fg, Color::Red);
        assert_eq!(model.style_at(3).unwrap().fg, Color::Black);
    }

    #[test]
    fn test_theme_swap_restyles() {
        let mut model = StyledTextModel::new();
        model.set_theme(theme());
        model.set_content("ab");
        model.apply_style(keyword_index());

        let other = Arc::new(
            StyleTable::builder("other")
                .plain(Style::fg(Color::White))
                .category("keyword", Style::fg(Color::Blue).with_bold())
                .font(Font::new("mono", 9))
                .build(),
        );
        model.set_theme(other);
        assert_eq!(model.style_at(0).unwrap().fg, Color::Blue);
        assert!(model.style_at(1).unwrap().bold);
        assert_eq!(model.font().map(|f| f.size), Some(9));
    }

    #[test]
    fn test_theme_font_follows_plain_style() {
        let mut model = StyledTextModel::new();
        let table = StyleTable::builder("bold")
            .font(Font::new("mono", 12).with_variant(false, true))
            .plain(Style::fg(Color::White).with_bold())
            .build();
        model.set_theme(Arc::new(table));
        let font = model.font().unwrap();
        assert!(font.bold);
        assert!(!font.italic);
    }

    #[test]
    fn test_runs_merge_equal_styles() {
        let mut model = StyledTextModel::new();
        model.set_theme(theme());
        model.set_content("fn main\nx");
        model.apply_style([("keyword", vec![(0, 2)])].into_iter().collect());
        let runs = model.runs(0);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "fn");
        assert_eq!(runs[1].text, " main");
        assert_eq!(runs[1].offset, 2);
        assert!(model.runs(5).is_empty());
    }

    #[test]
    fn test_offset_at_column() {
        let mut model = StyledTextModel::new();
        model.set_content("a你b\nxy");
        assert_eq!(model.offset_at_column(0, 0), Some(0));
        assert_eq!(model.offset_at_column(0, 1), Some(1));
        assert_eq!(model.offset_at_column(0, 2), Some(1));
        assert_eq!(model.offset_at_column(0, 3), Some(2));
        assert_eq!(model.offset_at_column(0, 40), Some(3));
        assert_eq!(model.offset_at_column(1, 1), Some(5));
        assert_eq!(model.offset_at_column(2, 0), None);
    }
}
