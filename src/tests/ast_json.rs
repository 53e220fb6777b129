//! Tests for the JSON node model, the cursor and the session pre-pass
use serde_json::json;

use crate::ast::{LiteralValue, NodeKind, parse_ast};
use crate::error::TranslateError;
use crate::session::prepare;
use crate::tests::test_utils::*;

#[test]
fn test_kinds_are_derived_once() {
    let json = json!({
        "kind": "CompoundStmt",
        "inner": [
            { "kind": "NullStmt" },
            {},
            { "kind": "ColdAttr" },
            { "kind": "FullComment" },
            { "kind": "CXXForRangeStmt" },
            { "kind": "SomeFutureExpr" },
        ],
    });
    let node = parse_ast(&json.to_string()).unwrap();
    let kinds: Vec<NodeKind> = node.inner.iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::NullStmt,
            NodeKind::Null,
            NodeKind::Attribute,
            NodeKind::Comment,
            NodeKind::CxxForRangeStmt,
            NodeKind::Unknown,
        ]
    );
    assert_eq!(node.inner[5].kind_name, "SomeFutureExpr");
    assert_eq!(node.count_children_of_kind(NodeKind::NullStmt), 1);
    assert!(node.has_child_of_kind(NodeKind::Comment));
    assert_eq!(node.find_children(NodeKind::Unknown).count(), 1);
}

#[test]
fn test_literal_values() {
    let json = json!({
        "kind": "CompoundStmt",
        "inner": [
            { "kind": "IntegerLiteral", "value": "42" },
            { "kind": "CharacterLiteral", "value": 65 },
            { "kind": "CXXBoolLiteralExpr", "value": true },
        ],
    });
    let node = parse_ast(&json.to_string()).unwrap();
    assert_eq!(node.inner[0].value, Some(LiteralValue::Text("42".into())));
    assert_eq!(node.inner[1].value, Some(LiteralValue::Int(65)));
    assert_eq!(node.inner[2].value_text(), "true");
}

#[test]
fn test_node_fields() {
    let json = json!({
        "id": "0x10",
        "kind": "VarDecl",
        "loc": { "offset": 5, "file": "a.c", "line": 3 },
        "name": "count",
        "type": { "qualType": "size_t", "desugaredQualType": "unsigned long" },
        "storageClass": "extern",
        "previousDecl": "0x8",
    });
    let node = parse_ast(&json.to_string()).unwrap();
    assert_eq!(node.kind, NodeKind::VarDecl);
    assert_eq!(node.loc.file, "a.c");
    assert_eq!(node.loc.line, 3);
    assert!(node.loc.has_position);
    assert_eq!(node.ty.qual, "size_t");
    assert_eq!(node.ty.desugared, "unsigned long");
    assert!(node.is_extern());
    assert_eq!(node.previous_decl.as_deref(), Some("0x8"));
}

#[test]
fn test_cursor_protocol() {
    let json = json!({
        "kind": "ForStmt",
        "inner": [int_lit(1), {}, int_lit(3)],
    });
    let node = parse_ast(&json.to_string()).unwrap();
    let mut cur = node.cursor();

    let saved = cur;
    assert_eq!(cur.next_child().map(|n| n.kind), Some(NodeKind::IntegerLiteral));
    assert_eq!(saved.position(), 0);
    assert_eq!(cur.position(), 1);

    // A mismatch does not advance.
    assert!(cur.next_child_of_kind(NodeKind::IntegerLiteral).is_none());
    assert_eq!(cur.position(), 1);
    assert!(cur.next_child_of_kind(NodeKind::Null).is_some());

    assert_eq!(cur.remaining().len(), 1);
    assert!(cur.expect_child("increment").is_ok());
    assert!(cur.is_done());
    assert_eq!(
        cur.expect_child("body").unwrap_err(),
        TranslateError::MissingChild {
            parent: NodeKind::ForStmt,
            expected: "body",
        }
    );

    cur.rewind();
    assert_eq!(cur.position(), 0);
}

#[test]
fn test_strip_transparent() {
    let json = implicit_cast("int", json!({
        "kind": "ParenExpr",
        "inner": [constant(int_lit(7))],
    }));
    let node = parse_ast(&json.to_string()).unwrap();
    let inner = node.strip_transparent();
    assert_eq!(inner.kind, NodeKind::IntegerLiteral);
    assert_eq!(inner.value_text(), "7");
}

#[test]
fn test_file_propagation() {
    let json = unit(vec![
        json!({
            "kind": "TypedefDecl",
            "loc": { "offset": 1, "file": "/usr/include/stdio.h", "line": 1 },
            "name": "FILE",
        }),
        json!({ "kind": "FunctionDecl", "loc": { "offset": 9, "line": 2 }, "name": "fopen" }),
        json!({ "kind": "TypedefDecl", "loc": {}, "name": "__int128_t" }),
        json!({
            "kind": "VarDecl",
            "loc": { "offset": 3, "file": "main.c", "line": 1 },
            "name": "counter",
        }),
        json!({ "kind": "VarDecl", "loc": { "offset": 20, "line": 2 }, "name": "other" }),
    ]);
    let mut root = parse_ast(&json.to_string()).unwrap();
    prepare(&mut root);

    assert_eq!(root.inner[1].loc.file, "/usr/include/stdio.h");
    let builtin: Vec<bool> = root.inner.iter().map(|n| n.is_builtin).collect();
    assert_eq!(builtin, vec![true, true, true, false, false]);
    assert_eq!(root.inner[4].loc.file, "main.c");
}

#[test]
fn test_file_propagation_through_ranges() {
    // A file change printed inside a range applies to the next location.
    let json = unit(vec![
        json!({
            "kind": "FunctionDecl",
            "loc": { "offset": 1, "file": "main.c", "line": 1 },
            "range": {
                "begin": { "offset": 1 },
                "end": { "offset": 50, "file": "/usr/include/x86_64-linux-gnu/bits/types.h", "line": 9 },
            },
            "name": "f",
        }),
        json!({ "kind": "VarDecl", "loc": { "offset": 60, "line": 10 }, "name": "leak" }),
    ]);
    let mut root = parse_ast(&json.to_string()).unwrap();
    prepare(&mut root);
    assert!(!root.inner[0].is_builtin);
    assert!(root.inner[1].is_builtin);
}

#[test]
fn test_redeclaration_count() {
    let json = unit(vec![
        json!({ "id": "0xa", "kind": "VarDecl", "loc": loc(1), "name": "x", "storageClass": "extern" }),
        json!({ "id": "0xb", "kind": "VarDecl", "loc": loc(2), "name": "x", "previousDecl": "0xa" }),
        json!({ "id": "0xc", "kind": "VarDecl", "loc": loc(3), "name": "x", "previousDecl": "0xa" }),
    ]);
    let mut root = parse_ast(&json.to_string()).unwrap();
    prepare(&mut root);
    let counts: Vec<usize> = root.inner.iter().map(|n| n.redeclarations).collect();
    assert_eq!(counts, vec![2, 0, 0]);
}
