//! Command line parsing and the file-level driver
use clap::Parser;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

use crate::driver::output::OutputWriter;
use crate::driver::{Cli, ClangFrontend, DriverError, FrontendError, TranslateConfig, TranslateDriver};
use crate::tests::test_utils::*;

fn write_ast(path: &Path) {
    let json = unit(vec![var("counter", "int", None), void_fn("run", vec![ret(None)])]);
    fs::write(path, json.to_string()).unwrap();
}

#[test]
fn test_cli_into_config() {
    let cli = Cli::try_parse_from([
        "c2v",
        "a.c",
        "src",
        "-o",
        "out",
        "--clang",
        "clang-18",
        "--clang-flag=-Iinclude",
        "--clang-flag",
        "-DNDEBUG",
        "--keep-ast",
    ])
    .unwrap();
    let config = cli.into_config();
    assert_eq!(config.inputs, vec![PathBuf::from("a.c"), PathBuf::from("src")]);
    assert_eq!(config.output_dir, Some(PathBuf::from("out")));
    assert_eq!(config.clang, PathBuf::from("clang-18"));
    assert_eq!(config.clang_flags, vec!["-Iinclude", "-DNDEBUG"]);
    assert!(config.keep_ast);
    assert!(!config.verbose);
    assert_eq!(config.globals_file, "_globals.v");
}

#[test]
fn test_cli_requires_input() {
    assert!(Cli::try_parse_from(["c2v"]).is_err());
}

#[test]
fn test_v_path() {
    let beside = OutputWriter::new(None);
    assert_eq!(beside.v_path(Path::new("src/list.c")), PathBuf::from("src/list.v"));
    assert_eq!(beside.v_path(Path::new("list.json")), PathBuf::from("list.v"));

    let into = OutputWriter::new(Some(PathBuf::from("out")));
    assert_eq!(into.v_path(Path::new("src/list.c")), PathBuf::from("out/list.v"));
}

#[test]
fn test_translate_json_input() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prog.json");
    write_ast(&input);
    let out_dir = dir.path().join("out");

    let mut config = TranslateConfig::new(vec![input]);
    config.output_dir = Some(out_dir.clone());
    let mut driver = TranslateDriver::from_config(config);
    let outputs = driver.run().unwrap();

    assert_eq!(outputs.units, vec![out_dir.join("prog.v")]);
    assert!(outputs.globals.is_none());
    let text = fs::read_to_string(out_dir.join("prog.v")).unwrap();
    assert!(text.starts_with("[translated]\nmodule main\n"), "{text}");
    assert!(text.contains("__global ( counter int )"), "{text}");
    assert!(text.contains("func run() {"), "{text}");
}

#[test]
fn test_translate_error_reports_path() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.json");
    let json = unit(vec![json!({ "kind": "SomeFutureDecl", "loc": loc(1) })]);
    fs::write(&input, json.to_string()).unwrap();

    let mut driver = TranslateDriver::from_config(TranslateConfig::new(vec![input.clone()]));
    let err = driver.run().unwrap_err();
    assert!(matches!(err, DriverError::Translate(_)), "{err}");
    assert_eq!(driver.current_path(), Some(input.as_path()));
    assert!(driver.report(&err).msg().contains("Unknown"));
}

#[test]
fn test_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "not C").unwrap();
    let mut driver = TranslateDriver::from_config(TranslateConfig::new(vec![dir.path().to_path_buf()]));
    assert!(matches!(driver.run(), Err(DriverError::NoInputs)));
}

#[test]
fn test_directory_skips_frontend_failures() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.c"), "int main(void) { return 0; }\n").unwrap();

    let mut config = TranslateConfig::new(vec![dir.path().to_path_buf()]);
    config.clang = dir.path().join("no-such-clang");
    let mut driver = TranslateDriver::from_config(config);
    let outputs = driver.run().unwrap();

    assert!(outputs.units.is_empty());
    assert_eq!(outputs.skipped, vec![dir.path().join("a.c")]);
    let globals = outputs.globals.unwrap();
    assert_eq!(globals, dir.path().join("_globals.v"));
    assert!(fs::read_to_string(globals).unwrap().starts_with("[translated]\n"));
}

#[test]
fn test_frontend_command_and_spawn_error() {
    let frontend = ClangFrontend::new(PathBuf::from("/nonexistent/clang"), vec!["-Iinclude".into()]);
    let cmd = frontend.command(Path::new("a.c"));
    let args: Vec<String> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
    assert_eq!(
        args,
        vec!["-w", "-Xclang", "-ast-dump=json", "-fsyntax-only", "-fno-diagnostics-color", "-c", "a.c", "-Iinclude"]
    );

    let err = frontend.dump_ast(Path::new("a.c")).unwrap_err();
    assert!(matches!(err, FrontendError::Spawn { .. }), "{err}");
}
