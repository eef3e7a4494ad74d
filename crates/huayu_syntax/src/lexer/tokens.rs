//! Token types for the Huayu lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words (both spellings map to one id)
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for structural tokens
//!
//! ## Notes
//! - Number tokens keep their raw text; the parser computes the value so that
//!   the declaration tree can carry both.
//! - Every token records the zero-based source line and the character offset
//!   where it starts; errors report these verbatim.

use huayu_core::lang::keywords::{self, KeywordId};
use huayu_core::lang::operators::OperatorId;
use huayu_core::lang::punctuation::PunctuationId;

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and literals ==========
    Ident(String),
    /// Raw spelling of a decimal number literal, e.g. `"5.14"`.
    Number(String),
    /// Cooked contents of a string literal (escapes already resolved).
    Str(String),

    // ========== Special ==========
    Eof,
}

/// A token with its source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Zero-based source line.
    pub line: u32,
    /// Character offset into the source where this token starts.
    pub offset: usize,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, line: u32, offset: usize) -> Self {
        Self { kind, line, offset }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
