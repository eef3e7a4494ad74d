//! Compiler backend: JavaScript emission from the resolved AST.
//!
//! The pipeline is:
//! 1. Resolved AST from the frontend → `JsEmitter` → JavaScript source text
//! 2. The CLI writes the text next to the input (or wherever `-o` points)
//!
//! Every reference node arriving here already carries its resolved symbol;
//! the emitter only decides spelling and addressing (e.g. whether a field
//! access goes through `this` or the constructor's `self` binding).

pub mod js;

pub use js::{EmitError, emit};
