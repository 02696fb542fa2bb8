//! Rust language definition

use crate::lexer::rules::{BlockRule, PatternRule};
use crate::lexer::RegexLexer;

/// Create Rust language definition
pub fn rust_language() -> RegexLexer {
    let mut lang = RegexLexer::new("Rust");
    lang.add_extension("rs");

    // Block comments (nesting not tracked)
    if let Some(rule) = BlockRule::new("block_comment", r"/\*", r"\*/", "comment", 1) {
        lang.add_block(rule);
    }

    // Raw strings r#"..."#
    if let Some(rule) = BlockRule::new("raw_string", r##"r#""##, r##""#"##, "string", 2) {
        lang.add_block(rule);
    }

    // Regular strings, may span lines
    if let Some(rule) = BlockRule::with_escape("string", "\"", "\"", "string", 3, '\\') {
        lang.add_block(rule);
    }

    // Doc and line comments
    if let Some(rule) = PatternRule::new("doc_comment", r"///.*$", "comment", 101) {
        lang.add_pattern(rule);
    }
    if let Some(rule) = PatternRule::new("line_comment", r"//.*$", "comment", 100) {
        lang.add_pattern(rule);
    }

    // Attributes
    if let Some(rule) = PatternRule::new("attribute", r"#!?\[[^\]]*\]", "attribute", 95) {
        lang.add_pattern(rule);
    }

    // Character literals before lifetimes
    if let Some(rule) = PatternRule::new("char", r"'(?:[^'\\]|\\.)'", "char", 90) {
        lang.add_pattern(rule);
    }
    if let Some(rule) = PatternRule::new("lifetime", r"'\w+", "lifetime", 89) {
        lang.add_pattern(rule);
    }

    // Macros (ending with !)
    if let Some(rule) = PatternRule::new("macro", r"\b\w+!", "macro", 85) {
        lang.add_pattern(rule);
    }

    let keywords = r"\b(as|async|await|break|const|continue|crate|dyn|else|enum|extern|false|fn|for|if|impl|in|let|loop|match|mod|move|mut|pub|ref|return|self|Self|static|struct|super|trait|true|type|union|unsafe|use|where|while)\b";
    if let Some(rule) = PatternRule::new("keyword", keywords, "keyword", 80) {
        lang.add_pattern(rule);
    }

    let types = r"\b(bool|char|str|u8|u16|u32|u64|u128|usize|i8|i16|i32|i64|i128|isize|f32|f64)\b";
    if let Some(rule) = PatternRule::new("primitive", types, "type", 75) {
        lang.add_pattern(rule);
    }

    // SCREAMING_CASE constants before capitalized type names
    if let Some(rule) = PatternRule::new("constant", r"\b[A-Z][A-Z0-9_]+\b", "constant", 62) {
        lang.add_pattern(rule);
    }
    if let Some(rule) = PatternRule::new("type_name", r"\b[A-Z][a-zA-Z0-9_]*\b", "type", 60) {
        lang.add_pattern(rule);
    }

    // Calls and definitions: identifier followed by '('
    if let Some(rule) = PatternRule::new("function", r"\b[a-z_][a-zA-Z0-9_]*\s*\(", "function", 55) {
        lang.add_pattern(rule);
    }

    if let Some(rule) = PatternRule::new("hex", r"\b0x[0-9a-fA-F_]+\b", "number", 65) {
        lang.add_pattern(rule);
    }
    if let Some(rule) = PatternRule::new("float", r"\b\d[\d_]*\.\d[\d_]*(?:[eE][+-]?\d+)?\b", "number", 64) {
        lang.add_pattern(rule);
    }
    if let Some(rule) = PatternRule::new("integer", r"\b\d[\d_]*(?:u8|u16|u32|u64|u128|usize|i8|i16|i32|i64|i128|isize)?\b", "number", 63) {
        lang.add_pattern(rule);
    }

    if let Some(rule) = PatternRule::new("operator", r"[+\-*/%&|^!<>=]+", "operator", 40) {
        lang.add_pattern(rule);
    }

    lang
}
