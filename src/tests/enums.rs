//! Enum declarations and how enum constants are qualified at each use site
use serde_json::{Value, json};

use crate::tests::test_utils::*;

fn subscript(base: Value, index: Value) -> Value {
    json!({
        "kind": "ArraySubscriptExpr",
        "type": { "qualType": "int" },
        "inner": [implicit_cast("int *", base), index],
    })
}

fn table() -> Value {
    var_ref("table", "int [3]")
}

fn color(member: &str) -> Value {
    implicit_cast("enum color", enum_ref(member))
}

#[test]
fn test_enum_constant_forms() {
    let body = vec![
        decl_stmt(vec![var("table", "int [3]", None)]),
        decl_stmt(vec![var("x", "enum color", Some(color("green")))]),
        switch(
            implicit_cast("unsigned int", parm_ref("c", "enum color")),
            vec![
                case(enum_ref("green"), assign(var_ref("x", "enum color"), color("green"))),
                assign(subscript(table(), enum_ref("green")), int_lit(1)),
                brk(),
            ],
        ),
        assign(var_ref("x", "enum color"), color("blue")),
        assign(subscript(table(), enum_ref("green")), int_lit(2)),
        assign(
            subscript(table(), implicit_cast("enum color", var_ref("x", "enum color"))),
            int_lit(3),
        ),
    ];
    let out = translate_ok(vec![
        enum_decl("color", &["red", "green", "blue"]),
        function(
            "f",
            "void (enum color)",
            vec![parm("c", "enum color")],
            Some(compound(body)),
        ),
    ]);

    insta::assert_snapshot!(normalize(&out), @r"
    [translated]
    module main

    enum Color {
        red
        green
        blue
    }

    func f(c Color) {
        table := [3]int{}
        x := Color.green
        match Color(c) {
            .green {
                x = .green
                table[int(Color.green)] = 1
            }
            else {}
        }
        x = Color.blue
        table[int(Color.green)] = 2
        table[int(x)] = 3
    }
    ");
}

#[test]
fn test_switch_on_int_variable() {
    let body = vec![switch(
        implicit_cast("int", var_ref("n", "int")),
        vec![case(enum_ref("red"), ret(None)), default(brk())],
    )];
    let out = translate_ok(vec![
        enum_decl("color", &["red", "green", "blue"]),
        void_fn("g", body),
    ]);
    let out = normalize(&out);
    assert!(out.contains("match n {"), "{out}");
    assert!(out.contains("Color.red {"), "{out}");
}

#[test]
fn test_enum_explicit_values() {
    let mut decl = enum_decl("mode", &["read", "write"]);
    decl["inner"][1]["inner"] = json!([constant(int_lit(4))]);
    let out = normalize(&translate_ok(vec![decl]));
    assert!(out.contains("enum Mode {\n    read\n    write = 4\n}"), "{out}");
}

#[test]
fn test_enum_members_named_like_libc_and_keywords() {
    let mode = |member: &str| implicit_cast("enum mode", enum_ref(member));
    let body = vec![
        decl_stmt(vec![var("m", "enum mode", Some(mode("READ")))]),
        switch(
            implicit_cast("unsigned int", parm_ref("c", "enum mode")),
            vec![
                case(enum_ref("WRITE"), assign(var_ref("m", "enum mode"), mode("WRITE"))),
                brk(),
                case(enum_ref("TYPE"), brk()),
            ],
        ),
    ];
    let out = translate_ok(vec![
        enum_decl("mode", &["READ", "WRITE", "TYPE"]),
        function("f", "void (enum mode)", vec![parm("c", "enum mode")], Some(compound(body))),
    ]);
    let out = normalize(&out);
    assert!(out.contains("enum Mode {\n    read\n    write\n    type_\n}"), "{out}");
    assert!(out.contains("m := Mode.read"), "{out}");
    assert!(out.contains("match Mode(c) {"), "{out}");
    assert!(out.contains(".write {\n            m = .write"), "{out}");
    assert!(out.contains(".type_ {"), "{out}");
    assert!(!out.contains("C."), "{out}");
}

#[test]
fn test_anonymous_enum_is_const_block() {
    let mut decl = enum_decl("", &["FIRST", "SECOND"]);
    decl["inner"][0]["inner"] = json!([constant(int_lit(1))]);
    let out = normalize(&translate_ok(vec![decl]));
    assert!(out.contains("const (\n    first = 1\n    second = first + 1\n)"), "{out}");
}

#[test]
fn test_enum_declared_once() {
    let out = normalize(&translate_ok(vec![
        enum_decl("color", &["red"]),
        enum_decl("color", &["red"]),
    ]));
    assert_eq!(out.matches("enum Color {").count(), 1);
}
