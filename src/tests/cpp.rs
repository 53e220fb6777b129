//! The C++ subset and unknown node kinds
use serde_json::{Value, json};

use crate::ast::NodeKind;
use crate::error::TranslateError;
use crate::tests::test_utils::*;

fn method_call(object: Value, method: &str, args: Vec<Value>) -> Value {
    let mut inner = vec![json!({
        "kind": "MemberExpr",
        "type": { "qualType": "<bound member function type>" },
        "name": method,
        "isArrow": false,
        "inner": [object],
    })];
    inner.extend(args);
    json!({ "kind": "CXXMemberCallExpr", "type": { "qualType": "int" }, "inner": inner })
}

fn vec_ref() -> Value {
    var_ref("v", "std::vector<int>")
}

#[test]
fn test_namespace_and_vector_idioms() {
    let range_for = json!({
        "kind": "CXXForRangeStmt",
        "inner": [(null()), decl_stmt(vec![]), compound(vec![brk()])],
    });
    let body = vec![
        method_call(vec_ref(), "push_back", vec![int_lit(3)]),
        assign(var_ref("n", "int"), method_call(vec_ref(), "size", vec![])),
        method_call(vec_ref(), "clear", vec![]),
        range_for,
    ];
    let namespace = json!({
        "kind": "NamespaceDecl",
        "loc": loc(1),
        "name": "ns",
        "inner": [
            { "kind": "CXXRecordDecl", "loc": loc(2), "name": "Widget", "tagUsed": "class" },
            void_fn("f", body),
        ],
    });
    let out = translate_ok(vec![namespace]);
    insta::assert_snapshot!(normalize(&out), @r"
    [translated]
    module main

    func f() {
        v << 3
        n = v.len
        v.clear()
        for val in vals {
            break
        }
    }
    ");
}

#[test]
fn test_extern_c_block() {
    let block = json!({
        "kind": "LinkageSpecDecl",
        "loc": loc(1),
        "language": "C",
        "inner": [void_fn("exported", vec![])],
    });
    let out = normalize(&translate_ok(vec![block]));
    assert!(out.contains("func exported() {\n}"), "{out}");
}

#[test]
fn test_unknown_expression() {
    let err = translate(vec![void_fn("f", vec![json!({ "kind": "FancyNewExpr" })])]).unwrap_err();
    assert_eq!(
        err,
        TranslateError::UnhandledNode {
            kind: NodeKind::Unknown,
            context: "expression",
        }
    );
}

#[test]
fn test_unknown_top_level() {
    let err = translate(vec![json!({ "kind": "FancyNewDecl", "loc": loc(1) })]).unwrap_err();
    assert_eq!(err, TranslateError::UnhandledTopLevel { kind: NodeKind::Unknown });
}
