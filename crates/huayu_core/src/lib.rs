#![forbid(unsafe_code)]
//! Shared language vocabulary for the Huayu compiler.
//!
//! Huayu is bilingual: every reserved word has an English spelling and a
//! Simplified Chinese spelling, and the structural punctuation accepts the
//! fullwidth CJK forms. This crate is the single source of truth for those
//! spellings plus operator metadata (precedence, associativity).
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - Callers work with stable IDs (`KeywordId`, `OperatorId`, `PunctuationId`)
//!   rather than string comparisons.
//!
//! ## Examples
//! ```rust
//! use huayu_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("object"), Some(KeywordId::Object));
//! assert_eq!(keywords::from_str("对象"), Some(KeywordId::Object));
//! assert_eq!(keywords::as_str(KeywordId::Object), "object");
//! ```

pub mod lang;
