//! Compiler frontend: semantic resolution over the declaration tree.
//!
//! The syntax layer (lexer, parser, declaration tree) lives in the
//! `huayu_syntax` crate; this module turns its output into a scoped,
//! reference-resolved AST ready for the JavaScript emitter.
//!
//! - `symbols`: the scope/symbol arena
//! - `resolver`: the two-pass build/link resolution
//! - `ast`: the resolved AST handed to the backend
//! - `diagnostics`: semantic errors and source-context rendering

pub mod ast;
pub mod diagnostics;
pub mod resolver;
pub mod symbols;
