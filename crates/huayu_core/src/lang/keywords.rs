//! Reserved keyword vocabulary.
//!
//! This module is the single source of truth for reserved words: a stable
//! identifier ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that
//! records the English spelling and the Simplified Chinese spelling of each
//! keyword. Both spellings resolve to the same id via [`from_str`].
//!
//! ## Notes
//! - Lookup is **case-sensitive**.
//! - `self` (自己) and `_` (the discard marker) are keywords so they can never
//!   be declared as ordinary variables.
//!
//! ## Examples
//! ```rust
//! use huayu_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("while"), Some(KeywordId::While));
//! assert_eq!(keywords::from_str("每当"), Some(KeywordId::While));
//! assert_eq!(keywords::hans(KeywordId::While), "每当");
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Control flow
    If,
    Elif,
    Else,
    While,
    Break,
    Continue,
    Return,

    // Declarations
    Object,
    Func,
    Method,

    // Receivers / markers
    SelfKw,
    Discard,

    // Literals
    True,
    False,
    Null,
    Undefined,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    ControlFlow,
    Definition,
    Binding,
    Literal,
}

/// Metadata for a keyword.
///
/// ## Notes
/// - `english` is the canonical spelling used in diagnostics and emission.
/// - `hans` is the Simplified Chinese spelling; both are accepted by the lexer.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub english: &'static str,
    pub hans: &'static str,
    pub category: KeywordCategory,
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Control flow
    info(KeywordId::If, "if", "如果", KeywordCategory::ControlFlow),
    info(KeywordId::Elif, "elif", "又如果", KeywordCategory::ControlFlow),
    info(KeywordId::Else, "else", "否则", KeywordCategory::ControlFlow),
    info(KeywordId::While, "while", "每当", KeywordCategory::ControlFlow),
    info(KeywordId::Break, "break", "中断", KeywordCategory::ControlFlow),
    info(KeywordId::Continue, "continue", "继续", KeywordCategory::ControlFlow),
    info(KeywordId::Return, "return", "返回", KeywordCategory::ControlFlow),
    // Declarations
    info(KeywordId::Object, "object", "对象", KeywordCategory::Definition),
    info(KeywordId::Func, "func", "函数", KeywordCategory::Definition),
    info(KeywordId::Method, "method", "方法", KeywordCategory::Definition),
    // Receivers / markers
    info(KeywordId::SelfKw, "self", "自己", KeywordCategory::Binding),
    info(KeywordId::Discard, "_", "_", KeywordCategory::Binding),
    // Literals
    info(KeywordId::True, "true", "真值", KeywordCategory::Literal),
    info(KeywordId::False, "false", "假值", KeywordCategory::Literal),
    info(KeywordId::Null, "null", "空值", KeywordCategory::Literal),
    info(KeywordId::Undefined, "undefined", "未定义", KeywordCategory::Literal),
];

/// Canonical (English) spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).english
}

/// Simplified Chinese spelling.
pub fn hans(id: KeywordId) -> &'static str {
    info_for(id).hans
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling (English or Simplified Chinese).
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling matches this registry, `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS
        .iter()
        .find(|k| k.english == s || k.hans == s)
        .map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: KeywordId,
    english: &'static str,
    hans: &'static str,
    category: KeywordCategory,
) -> KeywordInfo {
    KeywordInfo {
        id,
        english,
        hans,
        category,
    }
}
