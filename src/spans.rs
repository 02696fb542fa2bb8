//! Lexer output: category name -> character spans
//!
//! A `SpanIndex` is the whole contract with the tokenizer. It is produced
//! fresh for every parse of the text and thrown away when the text changes.

use std::ops::Range;

use indexmap::IndexMap;

use crate::error::StyleError;

/// A run of characters attributed to one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Character offset where this span starts (inclusive)
    pub offset: usize,
    /// Number of characters covered
    pub length: usize,
}

impl Span {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// Character offset where this span ends (exclusive), `None` on overflow
    pub fn end(&self) -> Option<usize> {
        self.offset.checked_add(self.length)
    }

    /// The covered range, if it fits in a text of `text_len` characters
    pub fn checked_range(
        &self,
        category: &str,
        text_len: usize,
    ) -> Result<Range<usize>, StyleError> {
        match self.end() {
            Some(end) if end <= text_len => Ok(self.offset..end),
            _ => Err(StyleError::SpanOutOfRange {
                category: category.to_string(),
                offset: self.offset,
                length: self.length,
                text_len,
            }),
        }
    }
}

impl From<(usize, usize)> for Span {
    fn from((offset, length): (usize, usize)) -> Self {
        Self::new(offset, length)
    }
}

/// Spans grouped by category.
///
/// Categories keep the order in which they were first inserted. When spans
/// of two categories cover the same character, the category inserted later
/// is applied later and wins. Spans inside a category are neither sorted
/// nor deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanIndex {
    categories: IndexMap<String, Vec<Span>>,
}

impl SpanIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a span to a category, creating the category at the end of the
    /// order if it is new
    pub fn push(&mut self, category: &str, span: impl Into<Span>) {
        let span = span.into();
        match self.categories.get_mut(category) {
            Some(spans) => spans.push(span),
            None => {
                self.categories.insert(category.to_string(), vec![span]);
            }
        }
    }

    /// Append several spans to a category
    pub fn extend<I, S>(&mut self, category: &str, spans: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Span>,
    {
        let entry = self.categories.entry(category.to_string()).or_default();
        entry.extend(spans.into_iter().map(Into::into));
    }

    /// Spans of one category
    pub fn get(&self, category: &str) -> Option<&[Span]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// Categories and their spans in application order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Span])> {
        self.categories
            .iter()
            .map(|(name, spans)| (name.as_str(), spans.as_slice()))
    }

    /// Number of categories
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Total number of spans across all categories
    pub fn span_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.span_count() == 0
    }
}

impl<C, I, S> FromIterator<(C, I)> for SpanIndex
where
    C: AsRef<str>,
    I: IntoIterator<Item = S>,
    S: Into<Span>,
{
    fn from_iter<T: IntoIterator<Item = (C, I)>>(iter: T) -> Self {
        let mut index = SpanIndex::new();
        for (category, spans) in iter {
            index.extend(category.as_ref(), spans);
        }
        index
    }
}
