//! Semantic errors and source-context rendering.
//!
//! Lex and parse errors live in `huayu_syntax::diagnostics`; this module adds
//! the resolver's error family and the plain-text renderer the CLI uses to
//! show the offending source line with a caret.

use thiserror::Error;

/// A semantic-resolution failure.
///
/// Resolution is fail-fast: the first violation aborts the whole unit and no
/// partial AST is returned.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SemanticError {
    /// A name or signature collision within one scope.
    #[error("`{name}` is already defined in {scope}")]
    DuplicateDefinition { name: String, scope: &'static str },

    /// A name or receiver-less call signature not found in the visible scope chain.
    #[error("`{name}` is not declared")]
    UnresolvedReference { name: String },

    /// An assignment whose target is a constant binding.
    #[error("cannot assign to `{name}`: it is a constant binding")]
    InvalidLvalue { name: String },
}

/// Render an error message with the offending source line and a caret.
///
/// `line` is zero-based and `offset` is a character index into `source`, as
/// carried by tokens and lex errors.
pub fn format_error_at(file: &str, source: &str, message: &str, line: u32, offset: usize) -> String {
    let (line_start, line_text) = line_of(source, line);
    let column = offset.saturating_sub(line_start) + 1;

    let line_display = line + 1;
    let gutter = line_display.to_string().len();
    let mut out = String::new();
    out.push_str(&format!("error: {message}\n"));
    out.push_str(&format!("  --> {file}:{line_display}:{column}\n"));
    out.push_str(&format!("  {:>gutter$} |\n", ""));
    out.push_str(&format!("  {line_display:>gutter$} | {line_text}\n"));
    out.push_str(&format!("  {:>gutter$} | {}^\n", "", " ".repeat(column.saturating_sub(1))));
    out
}

/// Character offset of the first character of line number `line`, plus that
/// line's text.
fn line_of(source: &str, line: u32) -> (usize, String) {
    let mut start = 0usize;
    let mut current = 0u32;
    for c in source.chars() {
        if current == line {
            break;
        }
        start += 1;
        if c == '\n' {
            current += 1;
        }
    }
    let text: String = source.chars().skip(start).take_while(|&c| c != '\n').collect();
    (start, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_points_at_the_offending_line() {
        let source = "foo = 1.\nbar = 2.\n";
        // Offset 15 is the `2` on the second line (char index, zero-based line 1).
        let rendered = format_error_at("demo.hua", source, "boom", 1, 15);
        assert!(rendered.contains("demo.hua:2:7"), "rendered: {rendered}");
        assert!(rendered.contains("bar = 2."), "rendered: {rendered}");
    }

    #[test]
    fn semantic_errors_display_their_context() {
        let err = SemanticError::DuplicateDefinition {
            name: "存入".to_string(),
            scope: "this object",
        };
        assert_eq!(err.to_string(), "`存入` is already defined in this object");
    }
}
