//! Punctuation vocabulary.
//!
//! This module defines the structural punctuation tokens used by the lexer and
//! parser: the statement terminator, the variable-declaration bars, brackets,
//! parentheses, and the init operator. Each entry records the ASCII spelling
//! plus the fullwidth/CJK alternates the lexer accepts.
//!
//! ## Examples
//! ```rust
//! use huayu_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_char('。'), Some(PunctuationId::Dot));
//! assert_eq!(punctuation::from_char('【'), Some(PunctuationId::LBracket));
//! assert_eq!(punctuation::as_str(PunctuationId::Init), ":=");
//! ```

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    /// Statement terminator `.` / `。`.
    Dot,
    /// Variable-declaration delimiter `|` / `｜`.
    VBar,
    /// Selector separator `:` / `：`.
    Colon,
    /// Message-chaining separator `,` / `，`.
    Comma,
    /// Declare-and-assign operator `:=`.
    Init,
    /// Block open `[` / `【`.
    LBracket,
    /// Block close `]` / `】`.
    RBracket,
    /// Grouping open `(` / `（`.
    LParen,
    /// Grouping close `)` / `）`.
    RParen,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    /// Fullwidth/CJK alternates accepted by the lexer (single characters only).
    pub alternates: &'static [char],
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::Dot, ".", &['。']),
    info(PunctuationId::VBar, "|", &['｜']),
    info(PunctuationId::Colon, ":", &['：']),
    info(PunctuationId::Comma, ",", &['，']),
    // `:=` is composed by the lexer from a colon followed by `=`.
    info(PunctuationId::Init, ":=", &[]),
    info(PunctuationId::LBracket, "[", &['【']),
    info(PunctuationId::RBracket, "]", &['】']),
    info(PunctuationId::LParen, "(", &['（']),
    info(PunctuationId::RParen, ")", &['）']),
];

/// Canonical (ASCII) spelling.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION.iter().find(|p| p.id == id).expect("punctuation info missing")
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: PunctuationId,
    canonical: &'static str,
    alternates: &'static [char],
) -> PunctuationInfo {
    PunctuationInfo {
        id,
        canonical,
        alternates,
    }
}

/// Lookup a single source character (canonical or fullwidth alternate).
///
/// ## Notes
/// - `:=` never matches here; the lexer composes it from [`PunctuationId::Colon`].
pub fn from_char(c: char) -> Option<PunctuationId> {
    PUNCTUATION
        .iter()
        .find(|p| {
            let mut canonical = p.canonical.chars();
            (canonical.next() == Some(c) && canonical.next().is_none()) || p.alternates.contains(&c)
        })
        .map(|p| p.id)
}
