//! Integration tests for the Huayu compiler: the full lex → parse → resolve →
//! emit pipeline over realistic bilingual programs.

use huayu::backend;
use huayu::frontend::ast::{Ast, Callee, DeclNode, ExprNode, StmtNode};
use huayu::frontend::diagnostics::SemanticError;
use huayu::frontend::resolver;
use huayu::frontend::symbols::SymbolKind;
use huayu_syntax::ast::{FileDef, TopLevel};
use huayu_syntax::diagnostics::ParseErrorKind;
use huayu_syntax::{lexer, parser};

/// The bank-account program exercising objects, constructors, instance
/// methods, message chaining, and a top-level function.
const BANK_ACCOUNT: &str = "
对象 账户【
  | 余额 |
  账户 新建【
    余额 = 0。
  】
  账户 继承自: 另一账户【
    余额 = 另一账户 余额。
  】
  // to deposit money
  方法 存入: 金额【
    余额 += 金额。
    返回 自己。
  】
  // to withdraw money
  方法 取出: 金额【
    余额 -= 金额。
    返回 自己。
  】
】

// instantiation
账户甲 := 账户 新建。

// messaging
账户甲 存入: 799。
账户甲 取出: 199。

// method chaining
账户甲 存入: 799, 取出: 199。

账户乙 := 账户 继承自: 账户甲。
账户乙 存入: 299, 取出: 199。

函数 交换财产: 甲 与: 乙【
  子 := 甲 余额。
  甲 设置余额: 乙 余额。
  乙 设置余额: 子。
】

交换财产: (账户甲) 与: 账户乙。
";

fn parse_source(source: &str) -> FileDef {
    let tokens = lexer::lex(source).expect("lexing should succeed");
    parser::parse(&tokens).expect("parsing should succeed")
}

fn resolve_source(source: &str) -> Result<Ast, SemanticError> {
    resolver::resolve(&parse_source(source))
}

fn emit_source(source: &str) -> String {
    let ast = resolve_source(source).expect("resolution should succeed");
    let mut out = Vec::new();
    backend::emit(&ast, &mut out).expect("emission should succeed");
    String::from_utf8(out).expect("emitted JavaScript should be UTF-8")
}

#[test]
fn bank_account_program_compiles_end_to_end() {
    let file = parse_source(BANK_ACCOUNT);
    assert_eq!(file.top_levels.len(), 9);

    let js = emit_source(BANK_ACCOUNT);
    assert!(js.contains("class 账户{"), "js: {js}");
    assert!(js.contains("static 新建(){const self=new 账户();"), "js: {js}");
    assert!(js.contains("static 继承自(另一账户){"), "js: {js}");
    assert!(js.contains("余额(){return this._$余额;}"), "js: {js}");
    assert!(js.contains("存入(金额){this._$余额+=金额;return this;}"), "js: {js}");
    assert!(js.contains("function 交换财产$与(甲,乙)"), "js: {js}");
    assert!(js.contains("let 账户甲;"), "js: {js}");
    assert!(js.contains("账户甲=账户.新建();"), "js: {js}");
    assert!(js.contains("账户甲.存入(799).取出(199);"), "js: {js}");
    assert!(js.contains("账户乙=账户.继承自(账户甲);"), "js: {js}");
    assert!(js.contains("交换财产$与(账户甲,账户乙);"), "js: {js}");
}

#[test]
fn forward_reference_resolves() {
    // B is declared before A but calls it; the build pass registers both
    // top-level names before either body links.
    let ast = resolve_source(
        "func 乙方 [ 返回 甲方计算: 1。 ]
         func 甲方计算: 数 [ 返回 数 + 1。 ]",
    )
    .unwrap();
    let DeclNode::Func(b) = &ast.file.decls[0] else {
        panic!("expected function");
    };
    let StmtNode::Return(ExprNode::Call(call)) = &b.body.statements[0] else {
        panic!("expected return of a call");
    };
    assert!(matches!(call.callee, Callee::Static(_)));
}

#[test]
fn duplicate_signature_is_rejected() {
    let err = resolve_source(
        "对象 账户【
           方法 存入: 金额【 返回 金额。 】
           方法 存入: 数目【 返回 数目。 】
         】",
    )
    .unwrap_err();
    assert!(matches!(err, SemanticError::DuplicateDefinition { name, .. } if name == "存入"));
}

#[test]
fn block_local_shadows_global() {
    let ast = resolve_source("x := 1。 func main [ x := 2. 返回 x。 ]").unwrap();
    let DeclNode::Func(func) = &ast.file.decls[0] else {
        panic!("expected function");
    };
    let StmtNode::Return(ExprNode::Ref(r)) = &func.body.statements[1] else {
        panic!("expected return of a reference");
    };
    assert_eq!(r.symbol, func.body.locals[0]);
    assert_ne!(r.symbol, ast.file.locals[0]);
}

#[test]
fn chaining_sends_to_the_previous_call() {
    let file = parse_source("账户甲 存入: 799, 取出: 199。");
    let TopLevel::Expr(stmt) = &file.top_levels[0] else {
        panic!("expected expression statement");
    };
    let huayu_syntax::ast::Expr::Call(outer) = &stmt.expr else {
        panic!("expected call");
    };
    assert_eq!(outer.signature(), "取出");
    let Some(caller) = outer.caller.as_deref() else {
        panic!("expected chained caller");
    };
    let huayu_syntax::ast::Expr::Call(inner) = caller else {
        panic!("second send should receive the first call, not the original receiver");
    };
    assert_eq!(inner.signature(), "存入");
}

#[test]
fn assignment_to_rvalue_is_a_parse_error() {
    let tokens = lexer::lex("10 = 5。").unwrap();
    let err = parser::parse(&tokens).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InvalidLvalue);
}

#[test]
fn unresolved_reference_names_the_identifier() {
    let err = resolve_source("func main [ 返回 未声明变量。 ]").unwrap_err();
    assert_eq!(
        err,
        SemanticError::UnresolvedReference {
            name: "未声明变量".to_string(),
        }
    );
}

#[test]
fn literal_round_trip() {
    let file = parse_source("\"5.14\"。 5.14。 真值。 空值。 未定义。");
    let values: Vec<_> = file
        .top_levels
        .iter()
        .map(|top| match top {
            TopLevel::Expr(stmt) => match &stmt.expr {
                huayu_syntax::ast::Expr::Literal(lit) => lit.value.clone(),
                other => panic!("expected literal, got {other:?}"),
            },
            other => panic!("expected expression statement, got {other:?}"),
        })
        .collect();
    use huayu_syntax::ast::LiteralValue;
    assert_eq!(
        values,
        vec![
            LiteralValue::Str("5.14".to_string()),
            LiteralValue::Number(5.14),
            LiteralValue::Bool(true),
            LiteralValue::Null,
            LiteralValue::Undefined,
        ]
    );
}

#[test]
fn self_binds_inside_instance_methods_only() {
    let ast = resolve_source(
        "对象 账户【
           方法 我【 返回 自己。 】
         】",
    )
    .unwrap();
    let DeclNode::Obj(obj) = &ast.file.decls[0] else {
        panic!("expected object");
    };
    let StmtNode::Return(ExprNode::Ref(r)) = &obj.methods[0].body.statements[0] else {
        panic!("expected return of a reference");
    };
    assert_eq!(ast.symbols.symbol(r.symbol).kind, SymbolKind::SelfRef);

    let err = resolve_source("自己。").unwrap_err();
    assert!(matches!(err, SemanticError::UnresolvedReference { name } if name == "self"));
}

#[test]
fn english_and_chinese_spellings_are_interchangeable() {
    let english = "
object Account [
  | balance |
  Account new [ balance = 0. ]
  method deposit: amount [ balance += amount. return self. ]
]
a := Account new.
a deposit: 10, deposit: 20.
";
    let js = emit_source(english);
    assert!(js.contains("class Account{"), "js: {js}");
    assert!(js.contains("a.deposit(10).deposit(20);"), "js: {js}");
}

#[test]
fn compilations_are_independent() {
    // Two resolutions of different units share no state; symbol ids restart.
    let first = resolve_source("x := 1。").unwrap();
    let second = resolve_source("y := 2。").unwrap();
    assert_eq!(first.symbols.symbol(first.file.locals[0]).name, "x");
    assert_eq!(second.symbols.symbol(second.file.locals[0]).name, "y");
    assert_eq!(first.file.locals[0], second.file.locals[0]);
}
