//! Huayu language vocabulary registries.
//!
//! The design goal is to avoid stringly-typed checks scattered across the
//! lexer, parser, and emitter. Instead, callers work with **stable IDs**
//! (`KeywordId`, `OperatorId`, `PunctuationId`) and look up spellings and
//! metadata via registry tables.
//!
//! ## Notes
//! - The lexer/parser enforce syntax; registries only provide spellings and
//!   metadata for shared use (tokenizing, diagnostics, emission).
//! - Every keyword carries both its English and its Simplified Chinese
//!   spelling; both map to the same id.

pub mod keywords;
pub mod operators;
pub mod punctuation;
