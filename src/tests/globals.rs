//! Global variables: duplicates, constants, externs and the directory globals file
use serde_json::json;

use crate::error::TranslateError;
use crate::session::{Session, SessionOptions};
use crate::tests::test_utils::*;

#[test]
fn test_identical_duplicate_emitted_once() {
    let out = translate_ok(vec![var("counter", "int", None), var("counter", "int", None)]);
    assert_eq!(out.matches("__global ( counter int )").count(), 1, "{out}");
    assert!(out.contains("[weak]\n__global ( counter int )"));
}

#[test]
fn test_conflicting_duplicate() {
    let err = translate(vec![var("counter", "int", None), var("counter", "unsigned int", None)]).unwrap_err();
    assert_eq!(
        err,
        TranslateError::DuplicateGlobal {
            name: "counter".into(),
            existing: "int".into(),
            new: "u32".into(),
        }
    );
}

#[test]
fn test_const_global() {
    let out = translate_ok(vec![var("limit", "const int", Some(int_lit(10)))]);
    insta::assert_snapshot!(normalize(&out), @r#"
    [translated]
    module main

    [export:"limit"]
    const (
        limit = 10
    )
    "#);
}

#[test]
fn test_const_global_reference_keeps_case() {
    let out = translate_ok(vec![
        var("MAX_LEN", "const int", Some(int_lit(8))),
        void_fn(
            "f",
            vec![call("g", "void (int)", vec![implicit_cast("int", var_ref("MAX_LEN", "const int"))])],
        ),
    ]);
    assert!(out.contains("g(MAX_LEN)"), "{out}");
}

#[test]
fn test_extern_completed_later() {
    let mut definition = var("counter", "int", Some(int_lit(5)));
    definition["id"] = json!("0xdef");
    definition["previousDecl"] = json!("0xcounter");
    let out = translate_ok(vec![extern_var("counter", "int"), definition]);
    assert_eq!(out.matches("__global").count(), 1, "{out}");
    assert!(out.contains("__global ( counter = int(5) )"), "{out}");
}

#[test]
fn test_extern_fixed_array() {
    let out = translate_ok(vec![extern_var("table", "int [4]")]);
    assert!(out.contains("[c_extern]\n__global ( table [4]int )"), "{out}");
}

#[test]
fn test_extern_unsized_array() {
    let err = translate(vec![extern_var("names", "int []")]).unwrap_err();
    assert_eq!(
        err,
        TranslateError::UnsizedExternArray {
            name: "names".into(),
            ty: "int []".into(),
        }
    );
}

#[test]
fn test_local_extern_rejected() {
    let err = translate(vec![void_fn("f", vec![decl_stmt(vec![extern_var("x", "int")])])]).unwrap_err();
    assert_eq!(err, TranslateError::LocalExtern { name: "x".into() });
}

#[test]
fn test_directory_globals_file() {
    let mut session = Session::new(SessionOptions { is_dir: true });
    let first = translate_with(&mut session, vec![var("counter", "int", None)]).unwrap();
    let second = translate_with(&mut session, vec![var("counter", "int", None)]).unwrap();
    assert!(!first.contains("__global"), "{first}");
    assert!(!second.contains("__global"), "{second}");

    assert!(session.registry().has_global("counter"));
    let globals = session.globals_file();
    assert!(globals.starts_with("[translated]\n"));
    assert_eq!(globals.matches("__global ( counter int )").count(), 1, "{globals}");
}
