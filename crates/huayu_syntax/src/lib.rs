#![forbid(unsafe_code)]
//! Syntax frontend for the Huayu language: lexer, declaration tree, parser.
//!
//! This crate is intentionally "syntax-only": it turns source text into a
//! token stream and a token stream into a declaration tree. Name resolution
//! and code emission live in the `huayu` crate.
//!
//! ## Notes
//! - Vocabulary identity (keywords/operators/punctuation) comes from the
//!   `huayu_core::lang` registries; both the English and the Chinese
//!   spellings of the language are accepted everywhere.
//! - Errors are fail-fast: the first malformed construct aborts its phase.
//!
//! ## Examples
//! ```rust,no_run
//! use huayu_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("账户甲 存入: 799。").unwrap();
//! let file = parser::parse(&tokens).unwrap();
//! assert_eq!(file.top_levels.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
