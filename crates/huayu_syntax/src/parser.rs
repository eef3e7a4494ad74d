//! Parser for the Huayu language.
//!
//! Converts a token stream into a declaration tree ([`FileDef`]).
//!
//! The grammar's defining ambiguity is the message send: an identifier
//! followed immediately by another identifier begins a send with the first as
//! receiver; an identifier followed by `:` begins a receiver-less keyword
//! send; anything else is a bare reference or literal. A trailing `,`
//! continues the send against the *result* of the previous call.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use huayu_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("函数 主程序 【 返回 1。 】").unwrap();
//! let file = parser::parse(&tokens).unwrap();
//! assert_eq!(file.top_levels.len(), 1);
//! ```

use crate::ast::*;
use crate::diagnostics::ParseError;
use crate::lexer::{Token, TokenKind};
use huayu_core::lang::keywords::KeywordId;
use huayu_core::lang::operators::{self, Associativity};
use huayu_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all
// parser methods in the same Rust module (preserving privacy + call patterns)
// while avoiding a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
