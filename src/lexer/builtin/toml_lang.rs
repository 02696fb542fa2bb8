//! TOML language definition

use crate::lexer::rules::{BlockRule, PatternRule};
use crate::lexer::RegexLexer;

/// Create TOML language definition
pub fn toml_language() -> RegexLexer {
    let mut lang = RegexLexer::new("TOML");
    lang.add_extension("toml");

    if let Some(rule) = BlockRule::new("multiline_basic", r#"""""#, r#"""""#, "string", 1) {
        lang.add_block(rule);
    }
    if let Some(rule) = BlockRule::new("multiline_literal", r"'''", r"'''", "string", 2) {
        lang.add_block(rule);
    }
    if let Some(rule) = BlockRule::with_escape("basic_string", "\"", "\"", "string", 3, '\\') {
        lang.add_block(rule);
    }
    if let Some(rule) = BlockRule::new("literal_string", "'", "'", "string", 4) {
        lang.add_block(rule);
    }

    if let Some(rule) = PatternRule::new("comment", r"#.*$", "comment", 100) {
        lang.add_pattern(rule);
    }

    // Table headers
    if let Some(rule) = PatternRule::new("table", r"^\s*\[\[?[^\]]+\]\]?", "keyword", 95) {
        lang.add_pattern(rule);
    }

    // Bare keys at line start
    if let Some(rule) = PatternRule::new("key", r"^\s*[\w\-.]+", "type", 90) {
        lang.add_pattern(rule);
    }

    if let Some(rule) = PatternRule::new("boolean", r"\b(true|false)\b", "constant", 80) {
        lang.add_pattern(rule);
    }

    if let Some(rule) = PatternRule::new("datetime", r"\d{4}-\d{2}-\d{2}(?:T\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|[+-]\d{2}:\d{2})?)?", "number", 75) {
        lang.add_pattern(rule);
    }

    if let Some(rule) = PatternRule::new("float", r"[+-]?(?:\d[\d_]*\.\d[\d_]*(?:[eE][+-]?\d+)?|inf|nan)\b", "number", 64) {
        lang.add_pattern(rule);
    }
    if let Some(rule) = PatternRule::new("integer", r"[+-]?\d[\d_]*\b", "number", 63) {
        lang.add_pattern(rule);
    }

    lang
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::spans::Span;

    #[test]
    fn test_toml_table_and_key() {
        let index = toml_language().lex("[package]\nname = \"x\"\nok = true");
        assert_eq!(index.get("keyword"), Some(&[Span::new(0, 9)][..]));
        assert_eq!(index.get("type"), Some(&[Span::new(10, 4), Span::new(21, 2)][..]));
        assert_eq!(index.get("string"), Some(&[Span::new(17, 3)][..]));
        assert_eq!(index.get("constant"), Some(&[Span::new(26, 4)][..]));
    }
}
