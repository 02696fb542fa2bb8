//! Built-in language definitions
//!
//! This module provides lexers for a few common file types.

mod python;
mod rust;
mod toml_lang;

use std::path::Path;

use super::RegexLexer;

/// Get all built-in language definitions
pub fn all_languages() -> Vec<RegexLexer> {
    vec![
        rust::rust_language(),
        python::python_language(),
        toml_lang::toml_language(),
    ]
}

/// Built-in lexer for a file, by extension
pub fn for_path(path: &Path) -> Option<RegexLexer> {
    all_languages()
        .into_iter()
        .find(|lang| lang.matches_path(path))
}
