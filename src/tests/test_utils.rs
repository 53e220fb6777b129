//! Builders for clang JSON fragments.
//!
//! Tests build the same JSON the front end prints and go through the real
//! deserializer, so shapes stay close to what `clang -ast-dump=json` emits.

use serde_json::{Value, json};

use crate::error::TranslateError;
use crate::session::{Session, SessionOptions};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Translates `decls` as one single-file unit.
pub fn translate(decls: Vec<Value>) -> Result<String, TranslateError> {
    let mut session = Session::new(SessionOptions::default());
    translate_with(&mut session, decls)
}

pub fn translate_ok(decls: Vec<Value>) -> String {
    match translate(decls) {
        Ok(out) => out,
        Err(e) => panic!("translation failed: {e}"),
    }
}

pub fn translate_with(session: &mut Session, decls: Vec<Value>) -> Result<String, TranslateError> {
    init_logger();
    let json = unit(decls).to_string();
    let root = crate::ast::parse_ast(&json).expect("valid AST JSON");
    session.translate(root, None)
}

/// Tabs become four spaces so inline snapshots stay readable.
pub fn normalize(out: &str) -> String {
    out.replace('\t', "    ").trim_end().to_string()
}

pub fn unit(decls: Vec<Value>) -> Value {
    json!({
        "id": "0x1",
        "kind": "TranslationUnitDecl",
        "loc": {},
        "range": { "begin": {}, "end": {} },
        "inner": decls,
    })
}

/// A location in the main source file.
pub fn loc(offset: u64) -> Value {
    json!({ "offset": offset, "file": "test.c", "line": 1, "col": 1, "tokLen": 1 })
}

pub fn null() -> Value {
    json!({})
}

pub fn int_lit(value: i64) -> Value {
    json!({ "kind": "IntegerLiteral", "type": { "qualType": "int" }, "value": value.to_string() })
}

pub fn decl_ref(name: &str, decl_kind: &str, ty: &str) -> Value {
    json!({
        "kind": "DeclRefExpr",
        "type": { "qualType": ty },
        "referencedDecl": { "id": format!("0x{name}"), "kind": decl_kind, "name": name },
    })
}

pub fn var_ref(name: &str, ty: &str) -> Value {
    decl_ref(name, "VarDecl", ty)
}

pub fn parm_ref(name: &str, ty: &str) -> Value {
    decl_ref(name, "ParmVarDecl", ty)
}

pub fn enum_ref(member: &str) -> Value {
    decl_ref(member, "EnumConstantDecl", "int")
}

pub fn implicit_cast(ty: &str, expr: Value) -> Value {
    json!({ "kind": "ImplicitCastExpr", "type": { "qualType": ty }, "inner": [expr] })
}

pub fn constant(expr: Value) -> Value {
    json!({ "kind": "ConstantExpr", "type": { "qualType": "int" }, "inner": [expr] })
}

pub fn binop(op: &str, ty: &str, lhs: Value, rhs: Value) -> Value {
    json!({ "kind": "BinaryOperator", "type": { "qualType": ty }, "opcode": op, "inner": [lhs, rhs] })
}

pub fn assign(lhs: Value, rhs: Value) -> Value {
    binop("=", "int", lhs, rhs)
}

pub fn call(callee: &str, ty: &str, args: Vec<Value>) -> Value {
    let mut inner = vec![implicit_cast(
        "int (*)()",
        decl_ref(callee, "FunctionDecl", ty),
    )];
    inner.extend(args);
    json!({ "kind": "CallExpr", "type": { "qualType": "int" }, "inner": inner })
}

pub fn compound(stmts: Vec<Value>) -> Value {
    json!({ "kind": "CompoundStmt", "inner": stmts })
}

pub fn ret(expr: Option<Value>) -> Value {
    match expr {
        Some(e) => json!({ "kind": "ReturnStmt", "inner": [e] }),
        None => json!({ "kind": "ReturnStmt" }),
    }
}

pub fn brk() -> Value {
    json!({ "kind": "BreakStmt" })
}

pub fn parm(name: &str, ty: &str) -> Value {
    json!({ "kind": "ParmVarDecl", "loc": loc(20), "name": name, "type": { "qualType": ty } })
}

pub fn function(name: &str, ty: &str, params: Vec<Value>, body: Option<Value>) -> Value {
    let mut inner = params;
    inner.extend(body);
    json!({
        "id": format!("0xf{name}"),
        "kind": "FunctionDecl",
        "loc": loc(10),
        "name": name,
        "type": { "qualType": ty },
        "inner": inner,
    })
}

/// A global or local variable; `init` is a `c`-style initializer.
pub fn var(name: &str, ty: &str, init: Option<Value>) -> Value {
    let mut v = json!({
        "id": format!("0x{name}"),
        "kind": "VarDecl",
        "loc": loc(30),
        "name": name,
        "type": { "qualType": ty },
    });
    if let Some(init) = init {
        v["init"] = json!("c");
        v["inner"] = json!([init]);
    }
    v
}

pub fn extern_var(name: &str, ty: &str) -> Value {
    let mut v = var(name, ty, None);
    v["storageClass"] = json!("extern");
    v
}

pub fn decl_stmt(vars: Vec<Value>) -> Value {
    json!({ "kind": "DeclStmt", "inner": vars })
}

pub fn enum_decl(name: &str, members: &[&str]) -> Value {
    let inner: Vec<Value> = members
        .iter()
        .map(|m| {
            json!({
                "kind": "EnumConstantDecl",
                "loc": loc(40),
                "name": m,
                "type": { "qualType": "int" },
            })
        })
        .collect();
    json!({
        "id": format!("0xe{name}"),
        "kind": "EnumDecl",
        "loc": loc(40),
        "name": name,
        "inner": inner,
    })
}

pub fn case(value: Value, stmt: Value) -> Value {
    json!({ "kind": "CaseStmt", "inner": [constant(value), stmt] })
}

pub fn default(stmt: Value) -> Value {
    json!({ "kind": "DefaultStmt", "inner": [stmt] })
}

pub fn switch(cond: Value, body: Vec<Value>) -> Value {
    json!({ "kind": "SwitchStmt", "inner": [cond, compound(body)] })
}

/// `void name(void) { body }`
pub fn void_fn(name: &str, body: Vec<Value>) -> Value {
    function(name, "void (void)", vec![], Some(compound(body)))
}
