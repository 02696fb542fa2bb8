//! Python language definition

use crate::lexer::rules::{BlockRule, PatternRule};
use crate::lexer::RegexLexer;

/// Create Python language definition
pub fn python_language() -> RegexLexer {
    let mut lang = RegexLexer::new("Python");
    lang.add_extension("py");
    lang.add_extension("pyw");
    lang.add_extension("pyi");

    // Triple-quoted strings (docstrings) before the single-quote forms
    if let Some(rule) = BlockRule::new("triple_double", r#"""""#, r#"""""#, "string", 1) {
        lang.add_block(rule);
    }
    if let Some(rule) = BlockRule::new("triple_single", r"'''", r"'''", "string", 2) {
        lang.add_block(rule);
    }
    if let Some(rule) = BlockRule::with_escape("double_string", "\"", "\"", "string", 3, '\\') {
        lang.add_block(rule);
    }
    if let Some(rule) = BlockRule::with_escape("single_string", "'", "'", "string", 4, '\\') {
        lang.add_block(rule);
    }

    if let Some(rule) = PatternRule::new("comment", r"#.*$", "comment", 100) {
        lang.add_pattern(rule);
    }

    if let Some(rule) = PatternRule::new("decorator", r"@[\w.]+", "attribute", 95) {
        lang.add_pattern(rule);
    }

    let keywords = r"\b(False|None|True|and|as|assert|async|await|break|class|continue|def|del|elif|else|except|finally|for|from|global|if|import|in|is|lambda|nonlocal|not|or|pass|raise|return|try|while|with|yield)\b";
    if let Some(rule) = PatternRule::new("keyword", keywords, "keyword", 80) {
        lang.add_pattern(rule);
    }

    if let Some(rule) = PatternRule::new("self", r"\b(self|cls)\b", "escape", 77) {
        lang.add_pattern(rule);
    }

    let builtins = r"\b(abs|all|any|bool|bytes|dict|enumerate|filter|float|getattr|hasattr|int|isinstance|iter|len|list|map|max|min|next|object|open|print|range|repr|reversed|set|sorted|str|sum|super|tuple|type|zip)\b";
    if let Some(rule) = PatternRule::new("builtin", builtins, "function", 75) {
        lang.add_pattern(rule);
    }

    if let Some(rule) = PatternRule::new("class_name", r"\b[A-Z][a-zA-Z0-9_]*\b", "type", 60) {
        lang.add_pattern(rule);
    }

    if let Some(rule) = PatternRule::new("hex", r"\b0[xX][0-9a-fA-F_]+\b", "number", 65) {
        lang.add_pattern(rule);
    }
    if let Some(rule) = PatternRule::new("float", r"\b\d[\d_]*\.\d[\d_]*(?:[eE][+-]?\d+)?j?\b", "number", 64) {
        lang.add_pattern(rule);
    }
    if let Some(rule) = PatternRule::new("integer", r"\b\d[\d_]*j?\b", "number", 63) {
        lang.add_pattern(rule);
    }

    if let Some(rule) = PatternRule::new("operator", r"[+\-*/%&|^!<>=~]+", "operator", 40) {
        lang.add_pattern(rule);
    }

    lang
}
