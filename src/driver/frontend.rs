//! The clang subprocess that produces the JSON AST.

use log::debug;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    #[error("failed to run `{clang}`: {source}")]
    Spawn {
        clang: String,
        #[source]
        source: std::io::Error,
    },

    #[error("clang failed on {}: {stderr}", path.display())]
    Failed { path: PathBuf, stderr: String },
}

/// Runs `clang -ast-dump=json` on C files.
#[derive(Debug, Clone)]
pub struct ClangFrontend {
    clang: PathBuf,
    flags: Vec<String>,
}

impl ClangFrontend {
    pub fn new(clang: PathBuf, flags: Vec<String>) -> Self {
        ClangFrontend { clang, flags }
    }

    pub fn command(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.clang);
        cmd.args(["-w", "-Xclang", "-ast-dump=json", "-fsyntax-only", "-fno-diagnostics-color", "-c"])
            .arg(path)
            .args(&self.flags);
        cmd
    }

    /// Returns the JSON AST of `path`.
    pub fn dump_ast(&self, path: &Path) -> Result<String, FrontendError> {
        let mut cmd = self.command(path);
        debug!("running {cmd:?}");
        let output = cmd.output().map_err(|source| FrontendError::Spawn {
            clang: self.clang.display().to_string(),
            source,
        })?;
        if !output.status.success() {
            return Err(FrontendError::Failed {
                path: path.to_path_buf(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
