//! Semantic resolver: two passes over the declaration tree.
//!
//! The **build** pass instantiates the scope tree and registers every
//! declared symbol into its *enclosing* scope before descending into the
//! body. Because all top-level names exist before any body is linked,
//! forward references and mutual recursion between top-level functions and
//! objects are legal. `|…|` locals are hoisted to their block's top; `:=`
//! locals are registered at the statement position.
//!
//! The **link** pass re-walks the declaration tree in the same order,
//! re-entering the scopes the build pass allocated, and materializes the
//! resolved AST: every name reference gets its symbol, every receiver-less
//! call is statically bound (or resolution fails), and every receiver-having
//! send is marked for dispatch by the generated code.
//!
//! Both passes are fail-fast; the first violation aborts resolution for the
//! whole unit and no partial AST is observable.

use huayu_core::lang::keywords::{self, KeywordId};
use huayu_core::lang::operators;
use huayu_syntax::ast as decl;

use crate::frontend::ast::{
    Ast, BinaryNode, BlockNode, CallNode, Callee, DeclNode, ExprNode, FileNode, FuncNode, IfNode,
    InitNode, LiteralNode, ObjNode, RefNode, StmtNode, WhileNode,
};
use crate::frontend::diagnostics::SemanticError;
use crate::frontend::symbols::{ScopeKind, SymbolId, SymbolKind, SymbolTable};

/// Resolve a declaration tree into a scoped, reference-resolved AST.
///
/// ## Errors
/// The first [`SemanticError`] (duplicate definition, unresolved reference,
/// or invalid assignment target) aborts resolution.
#[tracing::instrument(skip_all, fields(top_levels = file.top_levels.len()))]
pub fn resolve(file: &decl::FileDef) -> Result<Ast, SemanticError> {
    let mut resolver = Resolver {
        symbols: SymbolTable::new(),
    };
    resolver.build_file(file)?;
    resolver.symbols.begin_link();
    let file_node = resolver.link_file(file)?;
    Ok(Ast {
        symbols: resolver.symbols,
        file: file_node,
    })
}

struct Resolver {
    symbols: SymbolTable,
}

impl Resolver {
    // ========================================================================
    // Build pass
    // ========================================================================

    fn build_file(&mut self, file: &decl::FileDef) -> Result<(), SemanticError> {
        for top in &file.top_levels {
            match top {
                decl::TopLevel::Obj(obj) => self.build_obj(obj)?,
                decl::TopLevel::Func(func) => {
                    self.symbols.define(&func.signature(), SymbolKind::Func)?;
                    self.build_func(func, ScopeKind::Func, false)?;
                }
                decl::TopLevel::Vars(vars) => self.build_vars(vars)?,
                decl::TopLevel::Init(init) => {
                    self.symbols.define(&init.name, SymbolKind::LocalVar)?;
                }
                decl::TopLevel::Expr(_) => {}
            }
        }
        Ok(())
    }

    fn build_obj(&mut self, obj: &decl::ObjDecl) -> Result<(), SemanticError> {
        // The object's own name goes into the enclosing scope first, so its
        // body (and everything after it) can refer to it.
        let symbol = self.symbols.define(&obj.name, SymbolKind::Obj)?;
        self.symbols.enter_scope(ScopeKind::Obj, Some(symbol));
        for group in &obj.fields {
            for name in &group.names {
                self.symbols.define(name, SymbolKind::Field)?;
            }
        }
        for ctor in &obj.ctors {
            self.symbols.define(&ctor.signature(), SymbolKind::Ctor)?;
            self.build_func(ctor, ScopeKind::Ctor, false)?;
        }
        for method in &obj.methods {
            self.symbols.define(&method.signature(), SymbolKind::Method)?;
            self.build_func(method, ScopeKind::Method, true)?;
        }
        for method in &obj.class_methods {
            self.symbols.define(&method.signature(), SymbolKind::ClassMethod)?;
            self.build_func(method, ScopeKind::ClassMethod, false)?;
        }
        self.symbols.exit_scope();
        Ok(())
    }

    fn build_func(
        &mut self,
        func: &decl::FuncDecl,
        kind: ScopeKind,
        inject_self: bool,
    ) -> Result<(), SemanticError> {
        self.symbols.enter_scope(kind, None);
        if inject_self {
            // The synthesized, constant `self` binding of instance methods.
            self.symbols
                .define(keywords::as_str(KeywordId::SelfKw), SymbolKind::SelfRef)?;
        }
        if let decl::Selectors::Nary(parts) = &func.selectors {
            for part in parts {
                if let Some(param) = &part.param {
                    self.symbols.define(param, SymbolKind::Param)?;
                }
            }
        }
        self.build_block(&func.body)?;
        self.symbols.exit_scope();
        Ok(())
    }

    fn build_block(&mut self, block: &decl::CodeBlock) -> Result<(), SemanticError> {
        self.symbols.enter_scope(ScopeKind::Block, None);
        for group in &block.locals {
            self.build_vars(group)?;
        }
        for statmt in &block.statements {
            self.build_statmt(statmt)?;
        }
        self.symbols.exit_scope();
        Ok(())
    }

    fn build_statmt(&mut self, statmt: &decl::Statmt) -> Result<(), SemanticError> {
        match statmt {
            decl::Statmt::If(s) => {
                self.build_block(&s.consequent)?;
                if let Some(alternate) = &s.alternate {
                    self.build_block(alternate)?;
                }
            }
            decl::Statmt::While(s) => self.build_block(&s.body)?,
            decl::Statmt::Init(s) => {
                // Registered at the statement position, not hoisted.
                self.symbols.define(&s.name, SymbolKind::LocalVar)?;
            }
            decl::Statmt::Return(_)
            | decl::Statmt::Break
            | decl::Statmt::Continue
            | decl::Statmt::Expr(_) => {}
        }
        Ok(())
    }

    fn build_vars(&mut self, vars: &decl::VarDecl) -> Result<(), SemanticError> {
        for name in &vars.names {
            self.symbols.define(name, SymbolKind::LocalVar)?;
        }
        Ok(())
    }

    // ========================================================================
    // Link pass
    // ========================================================================

    fn link_file(&mut self, file: &decl::FileDef) -> Result<FileNode, SemanticError> {
        let scope = self.symbols.current_scope();
        let mut decls = Vec::new();
        let mut locals = Vec::new();
        let mut statements = Vec::new();
        for top in &file.top_levels {
            match top {
                decl::TopLevel::Obj(obj) => decls.push(DeclNode::Obj(self.link_obj(obj)?)),
                decl::TopLevel::Func(func) => decls.push(DeclNode::Func(self.link_func(func)?)),
                decl::TopLevel::Vars(vars) => self.link_vars(vars, &mut locals)?,
                decl::TopLevel::Init(init) => {
                    let node = self.link_init(init)?;
                    locals.push(node.lvalue);
                    statements.push(StmtNode::Init(node));
                }
                decl::TopLevel::Expr(stmt) => {
                    statements.push(StmtNode::Expr(self.link_expr(&stmt.expr)?));
                }
            }
        }
        Ok(FileNode {
            scope,
            decls,
            locals,
            statements,
        })
    }

    fn link_obj(&mut self, obj: &decl::ObjDecl) -> Result<ObjNode, SemanticError> {
        let symbol = self.local_symbol(&obj.name)?;
        let scope = self.symbols.reenter_scope();
        let mut fields = Vec::new();
        for group in &obj.fields {
            for name in &group.names {
                fields.push(self.local_symbol(name)?);
            }
        }
        let mut ctors = Vec::new();
        for ctor in &obj.ctors {
            ctors.push(self.link_func(ctor)?);
        }
        let mut methods = Vec::new();
        for method in &obj.methods {
            methods.push(self.link_func(method)?);
        }
        let mut class_methods = Vec::new();
        for method in &obj.class_methods {
            class_methods.push(self.link_func(method)?);
        }
        self.symbols.exit_scope();
        Ok(ObjNode {
            symbol,
            scope,
            fields,
            ctors,
            methods,
            class_methods,
        })
    }

    fn link_func(&mut self, func: &decl::FuncDecl) -> Result<FuncNode, SemanticError> {
        let symbol = self.local_symbol(&func.signature())?;
        let scope = self.symbols.reenter_scope();
        let mut params = Vec::new();
        if let decl::Selectors::Nary(parts) = &func.selectors {
            for part in parts {
                if let Some(param) = &part.param {
                    params.push(self.local_symbol(param)?);
                }
            }
        }
        let body = self.link_block(&func.body)?;
        self.symbols.exit_scope();
        Ok(FuncNode {
            symbol,
            scope,
            params,
            body,
        })
    }

    fn link_block(&mut self, block: &decl::CodeBlock) -> Result<BlockNode, SemanticError> {
        let scope = self.symbols.reenter_scope();
        let mut locals = Vec::new();
        for group in &block.locals {
            self.link_vars(group, &mut locals)?;
        }
        let mut statements = Vec::new();
        for statmt in &block.statements {
            statements.push(self.link_statmt(statmt, &mut locals)?);
        }
        self.symbols.exit_scope();
        Ok(BlockNode {
            scope,
            locals,
            statements,
        })
    }

    fn link_statmt(
        &mut self,
        statmt: &decl::Statmt,
        locals: &mut Vec<SymbolId>,
    ) -> Result<StmtNode, SemanticError> {
        match statmt {
            decl::Statmt::If(s) => {
                let condition = self.link_expr(&s.condition)?;
                let consequent = self.link_block(&s.consequent)?;
                let alternate = match &s.alternate {
                    Some(block) => Some(self.link_block(block)?),
                    None => None,
                };
                Ok(StmtNode::If(IfNode {
                    condition,
                    consequent,
                    alternate,
                }))
            }
            decl::Statmt::While(s) => Ok(StmtNode::While(WhileNode {
                condition: self.link_expr(&s.condition)?,
                body: self.link_block(&s.body)?,
            })),
            decl::Statmt::Return(s) => Ok(StmtNode::Return(self.link_expr(&s.value)?)),
            decl::Statmt::Break => Ok(StmtNode::Break),
            decl::Statmt::Continue => Ok(StmtNode::Continue),
            decl::Statmt::Expr(s) => Ok(StmtNode::Expr(self.link_expr(&s.expr)?)),
            decl::Statmt::Init(s) => {
                let node = self.link_init(s)?;
                locals.push(node.lvalue);
                Ok(StmtNode::Init(node))
            }
        }
    }

    fn link_init(&mut self, init: &decl::InitStatmt) -> Result<InitNode, SemanticError> {
        let lvalue = self.resolve_name(&init.name)?;
        let value = self.link_expr(&init.value)?;
        Ok(InitNode { lvalue, value })
    }

    fn link_vars(
        &mut self,
        vars: &decl::VarDecl,
        locals: &mut Vec<SymbolId>,
    ) -> Result<(), SemanticError> {
        for name in &vars.names {
            locals.push(self.local_symbol(name)?);
        }
        Ok(())
    }

    fn link_expr(&mut self, expr: &decl::Expr) -> Result<ExprNode, SemanticError> {
        match expr {
            decl::Expr::Literal(lit) => Ok(ExprNode::Literal(LiteralNode {
                raw: lit.raw.clone(),
                value: lit.value.clone(),
            })),
            decl::Expr::Ref(r) => Ok(ExprNode::Ref(RefNode {
                symbol: self.resolve_name(&r.name)?,
            })),
            decl::Expr::SelfRef => Ok(ExprNode::Ref(RefNode {
                // Resolvable only where the build pass injected it: inside an
                // instance method.
                symbol: self.resolve_name(keywords::as_str(KeywordId::SelfKw))?,
            })),
            decl::Expr::Binary(b) => self.link_binary(b),
            decl::Expr::Call(c) => self.link_call(c),
        }
    }

    fn link_binary(&mut self, bin: &decl::BinaryExpr) -> Result<ExprNode, SemanticError> {
        let left = self.link_expr(&bin.left)?;
        if operators::is_assignment(bin.op) {
            if let ExprNode::Ref(r) = &left {
                let symbol = self.symbols.symbol(r.symbol);
                if symbol.kind.is_constant() {
                    return Err(SemanticError::InvalidLvalue {
                        name: symbol.name.clone(),
                    });
                }
            }
        }
        let right = self.link_expr(&bin.right)?;
        Ok(ExprNode::Binary(BinaryNode {
            left: Box::new(left),
            op: bin.op,
            right: Box::new(right),
        }))
    }

    fn link_call(&mut self, call: &decl::CallExpr) -> Result<ExprNode, SemanticError> {
        let caller = match &call.caller {
            Some(expr) => Some(Box::new(self.link_expr(expr)?)),
            None => None,
        };
        let mut args = Vec::new();
        if let decl::CallSelectors::Nary(parts) = &call.selectors {
            for part in parts {
                args.push(self.link_expr(&part.arg)?);
            }
        }
        let callee = if caller.is_some() {
            // With an explicit receiver the callee is dispatched at runtime
            // against the receiver's own methods; the linker only records the
            // signature the receiver will be sent.
            Callee::Dynamic(call.signature())
        } else {
            match self.symbols.resolve_signature(&call.signature()) {
                Some(id) => Callee::Static(id),
                None => {
                    return Err(SemanticError::UnresolvedReference {
                        name: call.selectors.repr(),
                    });
                }
            }
        };
        Ok(ExprNode::Call(CallNode {
            callee,
            caller,
            args,
        }))
    }

    // ========================================================================
    // Lookup helpers
    // ========================================================================

    /// Resolve a name against the current scope chain.
    fn resolve_name(&self, name: &str) -> Result<SymbolId, SemanticError> {
        self.symbols
            .lookup(name)
            .ok_or_else(|| SemanticError::UnresolvedReference {
                name: name.to_string(),
            })
    }

    /// Fetch a symbol the build pass defined in the current scope.
    fn local_symbol(&self, name: &str) -> Result<SymbolId, SemanticError> {
        self.symbols
            .lookup_local(name)
            .ok_or_else(|| SemanticError::UnresolvedReference {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huayu_syntax::{lexer, parser};

    fn resolve_str(source: &str) -> Result<Ast, SemanticError> {
        let tokens = lexer::lex(source).expect("lexing should succeed");
        let file = parser::parse(&tokens).expect("parsing should succeed");
        resolve(&file)
    }

    #[test]
    fn forward_reference_between_top_level_functions() {
        // 乙 calls 检查: before 检查: is declared.
        let ast = resolve_str("func 乙 [ 返回 检查: 1。 ] func 检查: 数 [ 返回 数。 ]").unwrap();
        let DeclNode::Func(first) = &ast.file.decls[0] else {
            panic!("expected function");
        };
        let StmtNode::Return(ExprNode::Call(call)) = &first.body.statements[0] else {
            panic!("expected return of a call");
        };
        let Callee::Static(callee) = &call.callee else {
            panic!("receiver-less call should bind statically");
        };
        assert_eq!(ast.symbols.symbol(*callee).name, "检查");
        assert_eq!(ast.symbols.symbol(*callee).kind, SymbolKind::Func);
    }

    #[test]
    fn duplicate_method_signature_is_rejected() {
        let err = resolve_str(
            "对象 账户【
               方法 存入: 金额【 返回 金额。 】
               方法 存入: 数目【 返回 数目。 】
             】",
        )
        .unwrap_err();
        assert_eq!(
            err,
            SemanticError::DuplicateDefinition {
                name: "存入".to_string(),
                scope: "this object",
            }
        );
    }

    #[test]
    fn duplicate_signature_across_ctor_and_class_method_is_rejected() {
        // Signatures share one namespace inside the object scope.
        let err = resolve_str(
            "对象 账户【
               账户 新建【 返回 1。 】
               新建【 返回 2。 】
             】",
        )
        .unwrap_err();
        assert!(matches!(err, SemanticError::DuplicateDefinition { name, .. } if name == "新建"));
    }

    #[test]
    fn block_local_shadows_global() {
        let ast = resolve_str("x := 1。 func main [ x := 2. 返回 x。 ]").unwrap();
        let global = ast.file.locals[0];
        let DeclNode::Func(func) = &ast.file.decls[0] else {
            panic!("expected function");
        };
        let inner = func.body.locals[0];
        assert_ne!(global, inner);
        let StmtNode::Return(ExprNode::Ref(r)) = &func.body.statements[1] else {
            panic!("expected return of a reference");
        };
        assert_eq!(r.symbol, inner, "the returned x should bind to the inner local");
    }

    #[test]
    fn unresolved_reference_names_the_identifier() {
        let err = resolve_str("func main [ 返回 未声明变量。 ]").unwrap_err();
        assert_eq!(
            err,
            SemanticError::UnresolvedReference {
                name: "未声明变量".to_string(),
            }
        );
    }

    #[test]
    fn receiverless_call_without_static_target_is_rejected() {
        let err = resolve_str("转账: 1 给: 2。").unwrap_err();
        assert_eq!(
            err,
            SemanticError::UnresolvedReference {
                name: "转账: 给:".to_string(),
            }
        );
    }

    #[test]
    fn receiver_having_call_stays_dynamic() {
        // 设置余额: is never declared; with an explicit receiver that is fine.
        let ast = resolve_str("账户甲 := 1。 账户甲 设置余额: 5。").unwrap();
        let StmtNode::Expr(ExprNode::Call(call)) = &ast.file.statements[1] else {
            panic!("expected call statement");
        };
        assert!(matches!(&call.callee, Callee::Dynamic(sig) if sig == "设置余额"));
    }

    #[test]
    fn self_resolves_only_inside_instance_methods() {
        let ast = resolve_str(
            "对象 账户【
               | 余额 |
               方法 存入: 金额【 余额 += 金额. 返回 自己。 】
             】",
        )
        .unwrap();
        let DeclNode::Obj(obj) = &ast.file.decls[0] else {
            panic!("expected object");
        };
        let StmtNode::Return(ExprNode::Ref(r)) = &obj.methods[0].body.statements[1] else {
            panic!("expected return of a reference");
        };
        assert_eq!(ast.symbols.symbol(r.symbol).kind, SymbolKind::SelfRef);

        let err = resolve_str("自己。").unwrap_err();
        assert_eq!(
            err,
            SemanticError::UnresolvedReference {
                name: "self".to_string(),
            }
        );
    }

    #[test]
    fn self_is_absent_in_constructors() {
        let err = resolve_str(
            "对象 账户【
               账户 新建【 返回 自己。 】
             】",
        )
        .unwrap_err();
        assert!(matches!(err, SemanticError::UnresolvedReference { name } if name == "self"));
    }

    #[test]
    fn bare_field_resolves_through_the_object_scope() {
        let ast = resolve_str(
            "对象 账户【
               | 余额 |
               方法 查询【 返回 余额。 】
             】",
        )
        .unwrap();
        let DeclNode::Obj(obj) = &ast.file.decls[0] else {
            panic!("expected object");
        };
        let StmtNode::Return(ExprNode::Ref(r)) = &obj.methods[0].body.statements[0] else {
            panic!("expected return of a reference");
        };
        assert_eq!(r.symbol, obj.fields[0]);
    }

    #[test]
    fn assignment_to_constant_binding_is_rejected() {
        let err = resolve_str("对象 账户【 】 账户 = 5。").unwrap_err();
        assert_eq!(
            err,
            SemanticError::InvalidLvalue {
                name: "账户".to_string(),
            }
        );
    }

    #[test]
    fn duplicate_init_in_one_block_is_rejected() {
        let err = resolve_str("func main [ x := 1. x := 2. ]").unwrap_err();
        assert!(matches!(err, SemanticError::DuplicateDefinition { name, .. } if name == "x"));
    }

    #[test]
    fn sibling_method_call_binds_statically() {
        let ast = resolve_str(
            "对象 账户【
               | 余额 |
               方法 存入: 金额【 余额 += 金额. 返回 自己。 】
               方法 存两次: 金额【 存入: 金额. 返回 存入: 金额。 】
             】",
        )
        .unwrap();
        let DeclNode::Obj(obj) = &ast.file.decls[0] else {
            panic!("expected object");
        };
        let StmtNode::Expr(ExprNode::Call(call)) = &obj.methods[1].body.statements[0] else {
            panic!("expected call statement");
        };
        let Callee::Static(callee) = &call.callee else {
            panic!("sibling method call should bind statically");
        };
        assert_eq!(ast.symbols.symbol(*callee).kind, SymbolKind::Method);
    }
}
