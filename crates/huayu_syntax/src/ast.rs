//! Declaration tree for the Huayu language.
//!
//! This is the parser's output: an ordered list of top-level declarations and
//! statements, each a tree of statement and expression nodes. Nodes are
//! created once by the parser and are immutable afterwards; the semantic
//! resolver in the `huayu` crate walks this tree twice (build, then link) and
//! produces its own resolved AST.
//!
//! ## Notes
//! - Function-like declarations and calls are keyed by their **signature**:
//!   the selector parts joined in order with `$` (e.g. `存入` or `交换财产$与`).
//!   `$` stays a valid identifier character in the emitted JavaScript.
//! - Message chaining (`,`) binds each subsequent send to the result of the
//!   previous call, so `R a: x, b: y` nests as `Call(Call(R, a:x), b:y)`.

use std::fmt;

use huayu_core::lang::operators::OperatorId;

/// Identifier spelling as written in the source (either script).
pub type Ident = String;

/// Separator used when joining selector parts into a signature.
pub const SIGNATURE_SEPARATOR: char = '$';

/// A parsed source file: the ordered top-level declarations and statements.
#[derive(Debug, Clone, PartialEq)]
pub struct FileDef {
    pub top_levels: Vec<TopLevel>,
}

/// One top-level item.
#[derive(Debug, Clone, PartialEq)]
pub enum TopLevel {
    Obj(ObjDecl),
    Func(FuncDecl),
    Vars(VarDecl),
    Init(InitStatmt),
    Expr(ExprStatmt),
}

// ============================================================================
// Declarations
// ============================================================================

/// A `|`-delimited variable declaration list: `| 余额 utils |`.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub names: Vec<Ident>,
}

/// One `selector: param` pair of an n-ary declaration.
///
/// A `param` of `None` means the argument is discarded (`selector: _`).
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorDecl {
    pub selector: Ident,
    pub param: Option<Ident>,
}

/// Selector sequence of a function-like declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Selectors {
    /// A single bare selector, no parameters.
    Nullary(Ident),
    /// One or more `selector: param` pairs.
    Nary(Vec<SelectorDecl>),
}

impl Selectors {
    /// Canonical signature key: selector parts joined with `$`.
    pub fn signature(&self) -> String {
        match self {
            Selectors::Nullary(sel) => sel.clone(),
            Selectors::Nary(parts) => parts
                .iter()
                .map(|p| p.selector.as_str())
                .collect::<Vec<_>>()
                .join(&SIGNATURE_SEPARATOR.to_string()),
        }
    }
}

/// A function, constructor, or method declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub selectors: Selectors,
    pub body: CodeBlock,
}

impl FuncDecl {
    pub fn signature(&self) -> String {
        self.selectors.signature()
    }
}

/// An `object` declaration.
///
/// Constructors share the object's own name as their leading selector;
/// instance methods are introduced by the `method` keyword; anything else in
/// the body that is not a field list is a class-level method.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjDecl {
    pub name: Ident,
    pub fields: Vec<VarDecl>,
    pub ctors: Vec<FuncDecl>,
    pub methods: Vec<FuncDecl>,
    pub class_methods: Vec<FuncDecl>,
}

// ============================================================================
// Statements
// ============================================================================

/// A `[...]` block: hoisted `|`-declared locals plus ordered statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeBlock {
    pub locals: Vec<VarDecl>,
    pub statements: Vec<Statmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statmt {
    If(IfStatmt),
    While(WhileStatmt),
    Return(ReturnStatmt),
    Break,
    Continue,
    Expr(ExprStatmt),
    Init(InitStatmt),
}

/// `if cond [...] elif ... else [...]` — a cascading `elif` is folded into a
/// nested `If` held in `alternate`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatmt {
    pub condition: Expr,
    pub consequent: CodeBlock,
    pub alternate: Option<CodeBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatmt {
    pub condition: Expr,
    pub body: CodeBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatmt {
    pub value: Expr,
}

/// An expression terminated by `.` / `。`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprStatmt {
    pub expr: Expr,
}

/// Declare-and-assign in one statement: `账户甲 := 账户 新建。`
#[derive(Debug, Clone, PartialEq)]
pub struct InitStatmt {
    pub name: Ident,
    pub value: Expr,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Ref(RefExpr),
    SelfRef,
    Binary(BinaryExpr),
    Call(CallExpr),
}

impl Expr {
    /// Whether this expression may appear on the left of an assignment.
    pub fn is_lvalue(&self) -> bool {
        matches!(self, Expr::Ref(_))
    }
}

/// A bare name reference (an lvalue). Field access has no dedicated node:
/// a bare field name resolves through the enclosing object scope.
#[derive(Debug, Clone, PartialEq)]
pub struct RefExpr {
    pub name: Ident,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub op: OperatorId,
    pub right: Box<Expr>,
}

/// One `selector: argument` pair of an n-ary send.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSelector {
    pub selector: Ident,
    pub arg: Expr,
}

/// Selector sequence of a message send.
#[derive(Debug, Clone, PartialEq)]
pub enum CallSelectors {
    Nullary(Ident),
    Nary(Vec<CallSelector>),
}

impl CallSelectors {
    /// Canonical signature key: selector parts joined with `$`.
    pub fn signature(&self) -> String {
        match self {
            CallSelectors::Nullary(sel) => sel.clone(),
            CallSelectors::Nary(parts) => parts
                .iter()
                .map(|p| p.selector.as_str())
                .collect::<Vec<_>>()
                .join(&SIGNATURE_SEPARATOR.to_string()),
        }
    }

    /// Human-readable form for diagnostics: `交换财产: 与:`.
    pub fn repr(&self) -> String {
        match self {
            CallSelectors::Nullary(sel) => sel.clone(),
            CallSelectors::Nary(parts) => parts
                .iter()
                .map(|p| format!("{}:", p.selector))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// A message send. `caller` is absent for receiver-less sends, which must
/// resolve statically during linking.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub caller: Option<Box<Expr>>,
    pub selectors: CallSelectors,
}

impl CallExpr {
    pub fn signature(&self) -> String {
        self.selectors.signature()
    }
}

// ============================================================================
// Literals
// ============================================================================

/// Kind discriminant of a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Number,
    Str,
    Bool,
    Null,
    Undefined,
}

/// Resolved value of a literal.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Number(f64),
    Str(String),
    Bool(bool),
    Null,
    Undefined,
}

/// A literal with both its raw spelling and its resolved value.
///
/// For the keyword literals the raw spelling is the canonical English one
/// regardless of which script the source used.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub raw: String,
    pub value: LiteralValue,
}

impl Literal {
    pub fn kind(&self) -> LiteralKind {
        match self.value {
            LiteralValue::Number(_) => LiteralKind::Number,
            LiteralValue::Str(_) => LiteralKind::Str,
            LiteralValue::Bool(_) => LiteralKind::Bool,
            LiteralValue::Null => LiteralKind::Null,
            LiteralValue::Undefined => LiteralKind::Undefined,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
