//! JavaScript emitter.
//!
//! Walks the resolved AST and writes compact JavaScript:
//!
//! - Objects become classes. Constructors are `static` methods that allocate
//!   `const self = new <Name>()`, run the body against it, and return it;
//!   fields get accessor methods so dynamic nullary sends reach them;
//!   instance methods become prototype methods and class methods `static`
//!   methods.
//! - Field references address `this._$name` inside instance methods and
//!   `self._$name` inside constructors; those are the only two contexts where
//!   a field is addressable.
//! - Statically bound calls invoke their target directly (top-level functions
//!   by signature name, ctors/class methods through the owning class, sibling
//!   instance methods through `this`/`self`); receiver-having sends rely on
//!   the receiver's own method lookup: `receiver.signature(args)`.
//!
//! Signature parts are joined with `$`, which is a valid identifier character
//! in JavaScript, so `交换财产$与` works as a plain function name.

use std::io::Write;

use thiserror::Error;

use huayu_core::lang::operators;
use huayu_syntax::ast::LiteralValue;

use crate::frontend::ast::{
    Ast, BlockNode, CallNode, Callee, DeclNode, ExprNode, FuncNode, ObjNode, StmtNode,
};
use crate::frontend::symbols::{SymbolId, SymbolKind};

/// A code-emission failure.
///
/// The resolver guarantees references are bound, but how a reference is
/// *addressed* depends on the emission context; the cases below are the
/// context mismatches the resolver's scope chain cannot rule out.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("field `{name}` is only addressable inside a constructor or instance method")]
    FieldOutsideObject { name: String },

    #[error("`self` is only addressable inside an instance method")]
    SelfOutsideMethod,

    #[error("instance method `{name}` cannot be called without a receiver here")]
    MethodOutsideInstance { name: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Which function-like body the emitter is currently inside.
///
/// Constructors address fields through their `self` binding (pre-instance);
/// instance methods through `this` (post-instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyCtx {
    TopLevel,
    Func,
    Ctor,
    Method,
    ClassMethod,
}

/// Emit a resolved AST as JavaScript source text.
pub fn emit(ast: &Ast, out: &mut impl Write) -> Result<(), EmitError> {
    let mut emitter = JsEmitter {
        ast,
        out,
        ctx: BodyCtx::TopLevel,
    };
    emitter.file()
}

struct JsEmitter<'a, W: Write> {
    ast: &'a Ast,
    out: &'a mut W,
    ctx: BodyCtx,
}

impl<'a, W: Write> JsEmitter<'a, W> {
    fn file(&mut self) -> Result<(), EmitError> {
        for decl in &self.ast.file.decls {
            match decl {
                DeclNode::Obj(obj) => self.obj(obj)?,
                DeclNode::Func(func) => self.func_decl(func)?,
            }
        }
        for &local in &self.ast.file.locals {
            write!(self.out, "let {};", self.name(local))?;
        }
        for stmt in &self.ast.file.statements {
            self.stmt(stmt)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn obj(&mut self, obj: &ObjNode) -> Result<(), EmitError> {
        let class_name = self.name(obj.symbol).to_string();
        write!(self.out, "class {class_name}{{")?;
        for ctor in &obj.ctors {
            write!(self.out, "static {}", self.name(ctor.symbol))?;
            self.params(ctor)?;
            self.ctor_body(&class_name, ctor)?;
        }
        for &field in &obj.fields {
            let field_name = self.name(field).to_string();
            write!(self.out, "{field_name}(){{return this._${field_name};}}")?;
        }
        for method in &obj.methods {
            write!(self.out, "{}", self.name(method.symbol))?;
            self.params(method)?;
            self.body(method, BodyCtx::Method)?;
        }
        for method in &obj.class_methods {
            write!(self.out, "static {}", self.name(method.symbol))?;
            self.params(method)?;
            self.body(method, BodyCtx::ClassMethod)?;
        }
        write!(self.out, "}}")?;
        Ok(())
    }

    fn func_decl(&mut self, func: &FuncNode) -> Result<(), EmitError> {
        write!(self.out, "function {}", self.name(func.symbol))?;
        self.params(func)?;
        self.body(func, BodyCtx::Func)?;
        Ok(())
    }

    fn params(&mut self, func: &FuncNode) -> Result<(), EmitError> {
        let names: Vec<&str> = func.params.iter().map(|&p| self.name(p)).collect();
        write!(self.out, "({})", names.join(","))?;
        Ok(())
    }

    fn body(&mut self, func: &FuncNode, ctx: BodyCtx) -> Result<(), EmitError> {
        let outer = self.ctx;
        self.ctx = ctx;
        let result = self.block(&func.body);
        self.ctx = outer;
        result
    }

    /// Constructor body: allocate the instance, run the statements against
    /// it, and return it.
    fn ctor_body(&mut self, class_name: &str, ctor: &FuncNode) -> Result<(), EmitError> {
        let outer = self.ctx;
        self.ctx = BodyCtx::Ctor;
        write!(self.out, "{{const self=new {class_name}();")?;
        for &local in &ctor.body.locals {
            write!(self.out, "let {};", self.name(local))?;
        }
        let mut result = Ok(());
        for stmt in &ctor.body.statements {
            result = self.stmt(stmt);
            if result.is_err() {
                break;
            }
        }
        if result.is_ok() {
            write!(self.out, "return self;}}")?;
        }
        self.ctx = outer;
        result
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn block(&mut self, block: &BlockNode) -> Result<(), EmitError> {
        write!(self.out, "{{")?;
        for &local in &block.locals {
            write!(self.out, "let {};", self.name(local))?;
        }
        for stmt in &block.statements {
            self.stmt(stmt)?;
        }
        write!(self.out, "}}")?;
        Ok(())
    }

    fn stmt(&mut self, stmt: &StmtNode) -> Result<(), EmitError> {
        match stmt {
            StmtNode::If(s) => {
                write!(self.out, "if(")?;
                self.expr(&s.condition, false)?;
                write!(self.out, ")")?;
                self.block(&s.consequent)?;
                if let Some(alternate) = &s.alternate {
                    write!(self.out, "else")?;
                    self.block(alternate)?;
                }
            }
            StmtNode::While(s) => {
                write!(self.out, "while(")?;
                self.expr(&s.condition, false)?;
                write!(self.out, ")")?;
                self.block(&s.body)?;
            }
            StmtNode::Return(value) => {
                write!(self.out, "return ")?;
                self.expr(value, false)?;
                write!(self.out, ";")?;
            }
            StmtNode::Break => write!(self.out, "break;")?,
            StmtNode::Continue => write!(self.out, "continue;")?,
            StmtNode::Expr(expr) => {
                self.expr(expr, false)?;
                write!(self.out, ";")?;
            }
            StmtNode::Init(s) => {
                write!(self.out, "{}=", self.name(s.lvalue))?;
                self.expr(&s.value, false)?;
                write!(self.out, ";")?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn expr(&mut self, expr: &ExprNode, nested: bool) -> Result<(), EmitError> {
        match expr {
            ExprNode::Literal(lit) => match &lit.value {
                LiteralValue::Number(_) => write!(self.out, "{}", lit.raw)?,
                LiteralValue::Str(s) => write!(self.out, "{}", js_string(s))?,
                LiteralValue::Bool(b) => write!(self.out, "{b}")?,
                LiteralValue::Null => write!(self.out, "null")?,
                LiteralValue::Undefined => write!(self.out, "undefined")?,
            },
            ExprNode::Ref(r) => self.reference(r.symbol)?,
            ExprNode::Binary(b) => {
                if nested {
                    write!(self.out, "(")?;
                }
                self.expr(&b.left, true)?;
                write!(self.out, "{}", operators::as_str(b.op))?;
                self.expr(&b.right, true)?;
                if nested {
                    write!(self.out, ")")?;
                }
            }
            ExprNode::Call(call) => self.call(call)?,
        }
        Ok(())
    }

    fn reference(&mut self, symbol: SymbolId) -> Result<(), EmitError> {
        let info = self.ast.symbols.symbol(symbol);
        match info.kind {
            SymbolKind::SelfRef => match self.ctx {
                BodyCtx::Method => write!(self.out, "this")?,
                _ => return Err(EmitError::SelfOutsideMethod),
            },
            SymbolKind::Field => match self.ctx {
                BodyCtx::Method => write!(self.out, "this._${}", info.name)?,
                BodyCtx::Ctor => write!(self.out, "self._${}", info.name)?,
                _ => {
                    return Err(EmitError::FieldOutsideObject {
                        name: info.name.clone(),
                    });
                }
            },
            _ => write!(self.out, "{}", info.name)?,
        }
        Ok(())
    }

    fn call(&mut self, call: &CallNode) -> Result<(), EmitError> {
        match &call.callee {
            Callee::Dynamic(signature) => {
                // INVARIANT: the resolver only marks receiver-having calls dynamic.
                if let Some(caller) = &call.caller {
                    let single = caller.is_single();
                    if !single {
                        write!(self.out, "(")?;
                    }
                    self.expr(caller, false)?;
                    if !single {
                        write!(self.out, ")")?;
                    }
                }
                write!(self.out, ".{signature}")?;
            }
            Callee::Static(symbol) => {
                let info = self.ast.symbols.symbol(*symbol);
                match info.kind {
                    SymbolKind::Ctor | SymbolKind::ClassMethod => {
                        let owner = self
                            .ast
                            .symbols
                            .scope_owner(info.scope)
                            .expect("INVARIANT: ctors and class methods live in object scopes");
                        write!(self.out, "{}.{}", self.name(owner), info.name)?;
                    }
                    SymbolKind::Method => match self.ctx {
                        BodyCtx::Method => write!(self.out, "this.{}", info.name)?,
                        BodyCtx::Ctor => write!(self.out, "self.{}", info.name)?,
                        _ => {
                            return Err(EmitError::MethodOutsideInstance {
                                name: info.name.clone(),
                            });
                        }
                    },
                    _ => write!(self.out, "{}", info.name)?,
                }
            }
        }
        write!(self.out, "(")?;
        for (i, arg) in call.args.iter().enumerate() {
            if i > 0 {
                write!(self.out, ",")?;
            }
            self.expr(arg, false)?;
        }
        write!(self.out, ")")?;
        Ok(())
    }

    fn name(&self, symbol: SymbolId) -> &'a str {
        &self.ast.symbols.symbol(symbol).name
    }
}

/// Quote and escape a string for JavaScript source.
fn js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::resolver;
    use huayu_syntax::{lexer, parser};

    fn emit_str(source: &str) -> Result<String, EmitError> {
        let tokens = lexer::lex(source).expect("lexing should succeed");
        let file = parser::parse(&tokens).expect("parsing should succeed");
        let ast = resolver::resolve(&file).expect("resolution should succeed");
        let mut out = Vec::new();
        emit(&ast, &mut out)?;
        Ok(String::from_utf8(out).expect("emitted JavaScript should be UTF-8"))
    }

    #[test]
    fn object_emits_class_with_ctor_fields_and_methods() {
        let js = emit_str(
            "对象 账户【
               | 余额 |
               账户 新建【 余额 = 0。 】
               方法 存入: 金额【 余额 += 金额. 返回 自己。 】
             】",
        )
        .unwrap();
        assert!(js.contains("class 账户{"), "js: {js}");
        assert!(
            js.contains("static 新建(){const self=new 账户();self._$余额=0;return self;}"),
            "js: {js}"
        );
        assert!(js.contains("余额(){return this._$余额;}"), "js: {js}");
        assert!(js.contains("存入(金额){this._$余额+=金额;return this;}"), "js: {js}");
    }

    #[test]
    fn chained_sends_nest_left_to_right() {
        let js = emit_str(
            "对象 账户【
               账户 新建【 返回 1。 】
             】
             账户甲 := 账户 新建。
             账户甲 存入: 799, 取出: 199。",
        )
        .unwrap();
        assert!(js.contains("let 账户甲;"), "js: {js}");
        assert!(js.contains("账户甲=账户.新建();"), "js: {js}");
        assert!(js.contains("账户甲.存入(799).取出(199);"), "js: {js}");
    }

    #[test]
    fn static_function_call_uses_signature_name() {
        let js = emit_str(
            "函数 交换财产: 甲 与: 乙【 返回 甲。 】
             交换财产: 1 与: 2。",
        )
        .unwrap();
        assert!(js.contains("function 交换财产$与(甲,乙)"), "js: {js}");
        assert!(js.contains("交换财产$与(1,2);"), "js: {js}");
    }

    #[test]
    fn nested_binary_expressions_are_parenthesized() {
        let js = emit_str("x := 1。 x = x + 2 * 3。").unwrap();
        // Operands of the outer `=` are nested expressions, so the whole
        // right-hand side is parenthesized, as is the inner product.
        assert!(js.contains("x=(x+(2*3));"), "js: {js}");
    }

    #[test]
    fn string_literals_are_requoted() {
        let js = emit_str("x := \"a\\tb\"。").unwrap();
        assert!(js.contains("x=\"a\\tb\";"), "js: {js}");
    }

    #[test]
    fn field_access_in_class_method_is_an_emit_error() {
        let err = emit_str(
            "对象 账户【
               | 余额 |
               统计【 返回 余额。 】
             】",
        )
        .unwrap_err();
        assert!(matches!(err, EmitError::FieldOutsideObject { name } if name == "余额"));
    }

    #[test]
    fn literals_emit_their_javascript_spelling() {
        let js = emit_str("x := 真值。 y := 空值。 z := 未定义。 w := 5.14。").unwrap();
        assert!(js.contains("x=true;"), "js: {js}");
        assert!(js.contains("y=null;"), "js: {js}");
        assert!(js.contains("z=undefined;"), "js: {js}");
        assert!(js.contains("w=5.14;"), "js: {js}");
    }
}
