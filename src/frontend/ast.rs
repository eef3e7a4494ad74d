//! Resolved AST: the tree the resolver hands to the backend.
//!
//! Every reference slot in this tree is non-optional: a [`RefNode`] always
//! carries its resolved symbol and a [`CallNode`] is either statically bound
//! or explicitly marked for runtime dispatch. Unlinked states are
//! unrepresentable — the link pass constructs these nodes only after every
//! lookup has succeeded, and a failed lookup aborts resolution instead.
//!
//! Nodes refer to scopes and symbols by arena index into the [`SymbolTable`]
//! bundled in [`Ast`]; parents stay implicit in the tree structure.

use huayu_core::lang::operators::OperatorId;
use huayu_syntax::ast::LiteralValue;

use crate::frontend::symbols::{ScopeId, SymbolId, SymbolTable};

/// A fully resolved compilation unit.
///
/// Owned exclusively by the invocation that produced it; nothing in here is
/// shared across compilations.
#[derive(Debug)]
pub struct Ast {
    pub symbols: SymbolTable,
    pub file: FileNode,
}

/// The file: object/function declarations plus top-level locals and statements.
#[derive(Debug)]
pub struct FileNode {
    pub scope: ScopeId,
    pub decls: Vec<DeclNode>,
    /// Top-level locals (`|…|` groups and `:=` targets) in declaration order.
    pub locals: Vec<SymbolId>,
    pub statements: Vec<StmtNode>,
}

#[derive(Debug)]
pub enum DeclNode {
    Obj(ObjNode),
    Func(FuncNode),
}

/// A resolved `object` declaration.
#[derive(Debug)]
pub struct ObjNode {
    pub symbol: SymbolId,
    pub scope: ScopeId,
    /// Field symbols in declaration order.
    pub fields: Vec<SymbolId>,
    pub ctors: Vec<FuncNode>,
    pub methods: Vec<FuncNode>,
    pub class_methods: Vec<FuncNode>,
}

/// A resolved function, constructor, or method.
#[derive(Debug)]
pub struct FuncNode {
    pub symbol: SymbolId,
    pub scope: ScopeId,
    /// Bound parameter symbols in selector order (discarded ones are absent).
    pub params: Vec<SymbolId>,
    pub body: BlockNode,
}

/// A resolved block: its scope, its locals in declaration order, and its
/// statements.
#[derive(Debug)]
pub struct BlockNode {
    pub scope: ScopeId,
    pub locals: Vec<SymbolId>,
    pub statements: Vec<StmtNode>,
}

#[derive(Debug)]
pub enum StmtNode {
    If(IfNode),
    While(WhileNode),
    Return(ExprNode),
    Break,
    Continue,
    Expr(ExprNode),
    Init(InitNode),
}

#[derive(Debug)]
pub struct IfNode {
    pub condition: ExprNode,
    pub consequent: BlockNode,
    pub alternate: Option<BlockNode>,
}

#[derive(Debug)]
pub struct WhileNode {
    pub condition: ExprNode,
    pub body: BlockNode,
}

/// `:=`: assigns to a local that the build pass registered at this statement's
/// position.
#[derive(Debug)]
pub struct InitNode {
    pub lvalue: SymbolId,
    pub value: ExprNode,
}

#[derive(Debug)]
pub enum ExprNode {
    Literal(LiteralNode),
    Ref(RefNode),
    Binary(BinaryNode),
    Call(CallNode),
}

impl ExprNode {
    /// Whether the emitter can inline this expression without parentheses.
    pub fn is_single(&self) -> bool {
        !matches!(self, ExprNode::Binary(_))
    }
}

#[derive(Debug)]
pub struct LiteralNode {
    pub raw: String,
    pub value: LiteralValue,
}

/// A name reference carrying its resolved symbol (`self` resolves to the
/// synthesized self-symbol of the enclosing instance method).
#[derive(Debug)]
pub struct RefNode {
    pub symbol: SymbolId,
}

#[derive(Debug)]
pub struct BinaryNode {
    pub left: Box<ExprNode>,
    pub op: OperatorId,
    pub right: Box<ExprNode>,
}

/// How a call reaches its callee.
#[derive(Debug)]
pub enum Callee {
    /// Receiver-less call bound at link time to a known function-like symbol.
    Static(SymbolId),
    /// Receiver-having send left to the generated code's own method lookup;
    /// carries the `$`-joined signature the receiver will be sent.
    Dynamic(String),
}

#[derive(Debug)]
pub struct CallNode {
    pub callee: Callee,
    pub caller: Option<Box<ExprNode>>,
    /// Arguments in selector order.
    pub args: Vec<ExprNode>,
}
