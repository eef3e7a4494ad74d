//! Operator vocabulary.
//!
//! This module defines the canonical operator set along with the metadata the
//! parser's precedence climber needs: precedence and associativity.
//!
//! ## Notes
//! - Higher `precedence` binds tighter. The assignment family is lowest and
//!   right-associative, so `a = b = c` parses as `a = (b = c)`.
//! - The compound assignments (`+=` and friends) sit in the assignment family
//!   and require an lvalue left operand, which the parser enforces.
//!
//! ## Examples
//! ```rust
//! use huayu_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("+"), Some(OperatorId::Plus));
//! assert!(operators::info_for(OperatorId::Star).precedence > operators::info_for(OperatorId::Plus).precedence);
//! assert!(operators::is_assignment(OperatorId::PlusEq));
//! ```

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Assignment family
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
}

// Precedence tiers: multiplicative > additive > relational > equality > assignment.
const MULTIPLICATIVE: u8 = 60;
const ADDITIVE: u8 = 50;
const RELATIONAL: u8 = 40;
const EQUALITY: u8 = 30;
const ASSIGNMENT: u8 = 10;

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::Plus, "+", ADDITIVE, Associativity::Left),
    op(OperatorId::Minus, "-", ADDITIVE, Associativity::Left),
    op(OperatorId::Star, "*", MULTIPLICATIVE, Associativity::Left),
    op(OperatorId::Slash, "/", MULTIPLICATIVE, Associativity::Left),
    op(OperatorId::Percent, "%", MULTIPLICATIVE, Associativity::Left),
    // Comparison
    op(OperatorId::EqEq, "==", EQUALITY, Associativity::Left),
    op(OperatorId::NotEq, "!=", EQUALITY, Associativity::Left),
    op(OperatorId::Lt, "<", RELATIONAL, Associativity::Left),
    op(OperatorId::LtEq, "<=", RELATIONAL, Associativity::Left),
    op(OperatorId::Gt, ">", RELATIONAL, Associativity::Left),
    op(OperatorId::GtEq, ">=", RELATIONAL, Associativity::Left),
    // Assignment family
    op(OperatorId::Eq, "=", ASSIGNMENT, Associativity::Right),
    op(OperatorId::PlusEq, "+=", ASSIGNMENT, Associativity::Right),
    op(OperatorId::MinusEq, "-=", ASSIGNMENT, Associativity::Right),
    op(OperatorId::StarEq, "*=", ASSIGNMENT, Associativity::Right),
    op(OperatorId::SlashEq, "/=", ASSIGNMENT, Associativity::Right),
    op(OperatorId::PercentEq, "%=", ASSIGNMENT, Associativity::Right),
];

/// Spelling of an operator (also what the JavaScript emitter writes).
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Lookup by spelling.
pub fn from_str(s: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == s).map(|o| o.id)
}

/// Whether the operator belongs to the assignment family (`=`, `+=`, ...).
pub fn is_assignment(id: OperatorId) -> bool {
    info_for(id).precedence == ASSIGNMENT
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    spelling: &'static str,
    precedence: u8,
    associativity: Associativity,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity,
    }
}
