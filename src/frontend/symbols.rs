//! Symbol table and scope management.
//!
//! Scopes and symbols live in two index-addressed arenas owned by
//! [`SymbolTable`]; parents are non-owning indices, so the scope tree carries
//! upward links without any shared mutable aliasing. Names and signatures
//! share a single namespace per scope: no two symbols in one scope may have
//! the same name, and nullary/n-ary signatures collide like any other name.
//!
//! The table is used in two phases. The **build** pass allocates scopes with
//! [`SymbolTable::enter_scope`] while walking the declaration tree and
//! populates them with [`SymbolTable::define`]. The **link** pass calls
//! [`SymbolTable::begin_link`] once, then re-walks the tree in the same
//! order, re-entering each scope with [`SymbolTable::reenter_scope`]; since
//! scopes were allocated in walk order, they come back in allocation order.

use std::collections::HashMap;

use crate::frontend::diagnostics::SemanticError;

/// Index of a scope in the [`SymbolTable`] arena.
pub type ScopeId = usize;
/// Index of a symbol in the [`SymbolTable`] arena.
pub type SymbolId = usize;

/// Kind of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    File,
    Obj,
    Func,
    Ctor,
    Method,
    ClassMethod,
    Block,
}

impl ScopeKind {
    /// Human phrasing for duplicate-definition messages.
    fn describe(self) -> &'static str {
        match self {
            ScopeKind::File => "this file",
            ScopeKind::Obj => "this object",
            ScopeKind::Func => "this function",
            ScopeKind::Ctor => "this constructor",
            ScopeKind::Method => "this method",
            ScopeKind::ClassMethod => "this class method",
            ScopeKind::Block => "this block",
        }
    }
}

/// A scope: one name→symbol map plus an upward link.
#[derive(Debug)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    /// For object scopes, the object's own symbol; the emitter uses this to
    /// recover the owning class of statically-bound ctor/method calls.
    pub owner: Option<SymbolId>,
    symbols: HashMap<String, SymbolId>,
}

impl Scope {
    fn new(parent: Option<ScopeId>, kind: ScopeKind, owner: Option<SymbolId>) -> Self {
        Self {
            parent,
            kind,
            owner,
            symbols: HashMap::new(),
        }
    }
}

/// Kind of symbol.
///
/// One exhaustive sum type dispatched by pattern matching; `Obj`, `Func`,
/// `Ctor`, and the method kinds are constant bindings, as is the synthesized
/// `self`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    LocalVar,
    Param,
    Field,
    SelfRef,
    Obj,
    Func,
    Ctor,
    Method,
    ClassMethod,
}

impl SymbolKind {
    /// Constant bindings cannot be assigned to.
    pub fn is_constant(self) -> bool {
        !matches!(self, SymbolKind::LocalVar | SymbolKind::Param | SymbolKind::Field)
    }

    /// Whether a receiver-less call may bind to this symbol statically.
    pub fn is_callable(self) -> bool {
        matches!(
            self,
            SymbolKind::Func | SymbolKind::Ctor | SymbolKind::Method | SymbolKind::ClassMethod
        )
    }
}

/// A named entity: a variable, parameter, field, object, or function-like.
#[derive(Debug, Clone)]
pub struct Symbol {
    /// Name, or for function-like symbols the `$`-joined signature.
    pub name: String,
    pub kind: SymbolKind,
    /// Owning scope (every symbol has exactly one).
    pub scope: ScopeId,
}

/// Scope and symbol arenas plus the walk cursor shared by both resolver passes.
#[derive(Debug)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
    current: ScopeId,
    /// Highest scope id re-entered so far during the link pass.
    visited: ScopeId,
}

impl SymbolTable {
    /// Create a table holding only the file scope.
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
            scopes: vec![Scope::new(None, ScopeKind::File, None)],
            current: 0,
            visited: 0,
        }
    }

    // ========================================================================
    // Scope walking
    // ========================================================================

    /// Allocate a child of the current scope and make it current (build pass).
    pub fn enter_scope(&mut self, kind: ScopeKind, owner: Option<SymbolId>) -> ScopeId {
        let id = self.scopes.len();
        self.scopes.push(Scope::new(Some(self.current), kind, owner));
        self.current = id;
        id
    }

    /// Return to the parent scope.
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current].parent {
            self.current = parent;
        }
    }

    /// Reset the walk to the file scope before the link pass.
    pub fn begin_link(&mut self) {
        self.current = 0;
        self.visited = 0;
    }

    /// Re-enter the next scope allocated during the build pass (link pass).
    ///
    /// The link pass walks the declaration tree in the same order as build,
    /// so scopes come back in allocation order.
    pub fn reenter_scope(&mut self) -> ScopeId {
        self.visited += 1;
        debug_assert_eq!(
            self.scopes[self.visited].parent,
            Some(self.current),
            "link pass diverged from build order"
        );
        self.current = self.visited;
        self.current
    }

    /// The scope the walk is currently inside.
    pub fn current_scope(&self) -> ScopeId {
        self.current
    }

    // ========================================================================
    // Definition and lookup
    // ========================================================================

    /// Define a symbol in the current scope.
    ///
    /// ## Errors
    /// [`SemanticError::DuplicateDefinition`] if the scope already holds a
    /// symbol of this name (names and signatures share one namespace).
    pub fn define(&mut self, name: &str, kind: SymbolKind) -> Result<SymbolId, SemanticError> {
        let scope = &mut self.scopes[self.current];
        if scope.symbols.contains_key(name) {
            return Err(SemanticError::DuplicateDefinition {
                name: name.to_string(),
                scope: scope.kind.describe(),
            });
        }
        let id = self.symbols.len();
        scope.symbols.insert(name.to_string(), id);
        self.symbols.push(Symbol {
            name: name.to_string(),
            kind,
            scope: self.current,
        });
        Ok(id)
    }

    /// Look up a name in the current scope chain, innermost first.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        let mut scope = self.current;
        loop {
            if let Some(&id) = self.scopes[scope].symbols.get(name) {
                return Some(id);
            }
            scope = self.scopes[scope].parent?;
        }
    }

    /// Look up a name only in the current scope (no parent lookup).
    pub fn lookup_local(&self, name: &str) -> Option<SymbolId> {
        self.scopes[self.current].symbols.get(name).copied()
    }

    /// Resolve a call signature to a statically known function-like symbol.
    ///
    /// Walks the chain innermost-first; the first scope holding the name
    /// decides. A non-callable symbol of the same name shadows any callable
    /// further out, which then reads as "no statically known function".
    pub fn resolve_signature(&self, signature: &str) -> Option<SymbolId> {
        let id = self.lookup(signature)?;
        self.symbols[id].kind.is_callable().then_some(id)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id]
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id]
    }

    /// The object symbol owning `scope`, if it is an object scope.
    pub fn scope_owner(&self, scope: ScopeId) -> Option<SymbolId> {
        self.scopes[scope].owner
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_the_scope_chain() {
        let mut table = SymbolTable::new();
        table.define("x", SymbolKind::LocalVar).unwrap();

        table.enter_scope(ScopeKind::Func, None);
        assert!(table.lookup("x").is_some());

        table.define("y", SymbolKind::Param).unwrap();
        assert!(table.lookup("y").is_some());

        table.exit_scope();
        assert!(table.lookup("x").is_some());
        assert!(table.lookup("y").is_none());
    }

    #[test]
    fn duplicate_names_in_one_scope_are_rejected() {
        let mut table = SymbolTable::new();
        table.define("存入", SymbolKind::Func).unwrap();
        let err = table.define("存入", SymbolKind::LocalVar).unwrap_err();
        assert_eq!(
            err,
            SemanticError::DuplicateDefinition {
                name: "存入".to_string(),
                scope: "this file",
            }
        );
    }

    #[test]
    fn same_name_in_nested_scope_shadows() {
        let mut table = SymbolTable::new();
        let outer = table.define("x", SymbolKind::LocalVar).unwrap();
        table.enter_scope(ScopeKind::Block, None);
        let inner = table.define("x", SymbolKind::LocalVar).unwrap();
        assert_ne!(outer, inner);
        assert_eq!(table.lookup("x"), Some(inner));
        table.exit_scope();
        assert_eq!(table.lookup("x"), Some(outer));
    }

    #[test]
    fn signature_resolution_filters_non_callables() {
        let mut table = SymbolTable::new();
        table.define("转账$给", SymbolKind::Func).unwrap();
        table.define("余额", SymbolKind::LocalVar).unwrap();

        assert!(table.resolve_signature("转账$给").is_some());
        // A plain variable never satisfies a call.
        assert!(table.resolve_signature("余额").is_none());
        assert!(table.resolve_signature("不存在").is_none());
    }

    #[test]
    fn shadowing_variable_hides_outer_function() {
        let mut table = SymbolTable::new();
        table.define("帮助", SymbolKind::Func).unwrap();
        table.enter_scope(ScopeKind::Block, None);
        table.define("帮助", SymbolKind::LocalVar).unwrap();
        assert!(table.resolve_signature("帮助").is_none());
    }

    #[test]
    fn link_pass_revisits_scopes_in_allocation_order() {
        let mut table = SymbolTable::new();
        let a = table.enter_scope(ScopeKind::Func, None);
        table.exit_scope();
        let b = table.enter_scope(ScopeKind::Func, None);
        let c = table.enter_scope(ScopeKind::Block, None);
        table.exit_scope();
        table.exit_scope();

        table.begin_link();
        assert_eq!(table.reenter_scope(), a);
        table.exit_scope();
        assert_eq!(table.reenter_scope(), b);
        assert_eq!(table.reenter_scope(), c);
    }
}
