//! CLI parsing and configuration module
//!
//! Command-line arguments are parsed with clap and turned into a
//! [`TranslateConfig`] for the driver.

use clap::Parser as CliParser;
use std::path::PathBuf;

/// CLI interface using clap
#[derive(CliParser, Debug)]
#[clap(name = "c2v", about = "Translate C sources into V through the clang JSON AST")]
pub struct Cli {
    /// Input `.c` files, `.json` AST dumps or directories of `.c` files
    #[clap(value_parser, required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory for the generated `.v` files (default: next to each input)
    #[clap(short, long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Enable verbose diagnostic output
    #[clap(short, long)]
    pub verbose: bool,

    /// Clang executable used to dump the AST
    #[clap(long, default_value = "clang", value_name = "PATH")]
    pub clang: PathBuf,

    /// Extra flag passed to clang, e.g. `--clang-flag=-Iinclude`
    #[clap(long = "clang-flag", value_name = "FLAG", allow_hyphen_values = true, action = clap::ArgAction::Append)]
    pub clang_flags: Vec<String>,

    /// Keep the intermediate `.json` AST next to each input
    #[clap(long)]
    pub keep_ast: bool,

    /// File name of the shared globals file written for directory inputs
    #[clap(long, default_value = "_globals.v", value_name = "NAME")]
    pub globals_file: String,
}

/// Configuration for one translation run
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    pub inputs: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub verbose: bool,
    pub clang: PathBuf,
    pub clang_flags: Vec<String>,
    pub keep_ast: bool,
    pub globals_file: String,
}

impl TranslateConfig {
    /// Configuration with defaults for the given inputs.
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        TranslateConfig {
            inputs,
            output_dir: None,
            verbose: false,
            clang: PathBuf::from("clang"),
            clang_flags: Vec::new(),
            keep_ast: false,
            globals_file: "_globals.v".to_string(),
        }
    }
}

impl Cli {
    /// Convert CLI arguments into a translation configuration
    pub fn into_config(self) -> TranslateConfig {
        TranslateConfig {
            inputs: self.inputs,
            output_dir: self.output_dir,
            verbose: self.verbose,
            clang: self.clang,
            clang_flags: self.clang_flags,
            keep_ast: self.keep_ast,
            globals_file: self.globals_file,
        }
    }
}
