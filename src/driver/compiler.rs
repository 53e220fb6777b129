//! Translation pipeline orchestration module
//!
//! Resolves the inputs, runs the front end when needed, feeds every unit
//! through one [`Session`] and writes the results.

use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ast::parse_ast;
use crate::error::{Report, TranslateError};
use crate::session::{Session, SessionOptions};

use super::cli::TranslateConfig;
use super::frontend::{ClangFrontend, FrontendError};
use super::output::OutputWriter;

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunOutputs {
    /// Generated `.v` files in translation order.
    pub units: Vec<PathBuf>,
    /// The shared globals file of a directory run.
    pub globals: Option<PathBuf>,
    /// Inputs skipped because the front end rejected them.
    pub skipped: Vec<PathBuf>,
}

/// Main translation driver
pub struct TranslateDriver {
    config: TranslateConfig,
    frontend: ClangFrontend,
    output: OutputWriter,
    current: Option<PathBuf>,
}

impl TranslateDriver {
    /// Create a new driver from CLI arguments
    pub fn new(cli: super::cli::Cli) -> Self {
        Self::from_config(cli.into_config())
    }

    /// Create a new driver from configuration
    pub fn from_config(config: TranslateConfig) -> Self {
        TranslateDriver {
            frontend: ClangFrontend::new(config.clang.clone(), config.clang_flags.clone()),
            output: OutputWriter::new(config.output_dir.clone()),
            current: None,
            config,
        }
    }

    /// The input being translated when the last error happened.
    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    /// Diagnostic for an error returned by [`TranslateDriver::run`].
    pub fn report(&self, err: &DriverError) -> Report {
        Report::new(err.to_string(), self.current.clone())
    }

    /// Expands directories into their `.c` files, sorted by name.
    fn collect_inputs(&self) -> Result<(Vec<PathBuf>, Option<PathBuf>), DriverError> {
        let mut files = Vec::new();
        let mut first_dir = None;
        for input in &self.config.inputs {
            if input.is_dir() {
                let mut entries: Vec<PathBuf> = fs::read_dir(input)?
                    .filter_map(|entry| entry.ok().map(|e| e.path()))
                    .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "c"))
                    .collect();
                entries.sort();
                files.extend(entries);
                first_dir.get_or_insert_with(|| input.clone());
            } else {
                files.push(input.clone());
            }
        }
        if files.is_empty() {
            return Err(DriverError::NoInputs);
        }
        Ok((files, first_dir))
    }

    /// Run the translation for all inputs
    pub fn run(&mut self) -> Result<RunOutputs, DriverError> {
        let (files, dir) = self.collect_inputs()?;
        let is_dir = dir.is_some();
        let mut session = Session::new(SessionOptions { is_dir });
        let mut outputs = RunOutputs::default();

        for path in files {
            self.current = Some(path.clone());
            match self.translate_file(&mut session, &path) {
                Ok(written) => {
                    info!("translated {} -> {}", path.display(), written.display());
                    outputs.units.push(written);
                }
                Err(DriverError::Frontend(e)) if is_dir => {
                    warn!("skipping {}: {e}", path.display());
                    outputs.skipped.push(path);
                }
                Err(e) => return Err(e),
            }
        }
        self.current = None;

        if let Some(dir) = dir {
            let written = self
                .output
                .write_globals(&dir, &self.config.globals_file, &session.globals_file())?;
            info!("wrote globals to {}", written.display());
            outputs.globals = Some(written);
        }
        Ok(outputs)
    }

    fn translate_file(&self, session: &mut Session, path: &Path) -> Result<PathBuf, DriverError> {
        let (json, source) = if path.extension().is_some_and(|ext| ext == "json") {
            let json = fs::read_to_string(path)?;
            let source = fs::read_to_string(path.with_extension("c")).ok();
            (json, source)
        } else {
            let source = fs::read_to_string(path)?;
            let json = self.frontend.dump_ast(path)?;
            if self.config.keep_ast {
                fs::write(path.with_extension("json"), &json)?;
            }
            (json, Some(source))
        };

        let root = parse_ast(&json)?;
        let text = session.translate(root, source.as_deref())?;
        Ok(self.output.write_unit(path, &text)?)
    }
}

/// Error types for the translation driver
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid AST JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Frontend(#[from] FrontendError),

    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error("no .c or .json inputs found")]
    NoInputs,
}
