use std::path::PathBuf;

use thiserror::Error;

use crate::ast::NodeKind;

/// Conditions under which translation of a unit stops.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error("unhandled {kind} node in {context}")]
    UnhandledNode { kind: NodeKind, context: &'static str },

    #[error("{parent} node is missing its {expected} child")]
    MissingChild { parent: NodeKind, expected: &'static str },

    #[error("local extern variables are not supported: `{name}`")]
    LocalExtern { name: String },

    #[error("uninitialized fixed array without a size: `{name}` of type `{ty}`")]
    UnsizedExternArray { name: String, ty: String },

    #[error(
        "duplicate global `{name}` with different types: `{existing}` and `{new}`; rename one of them"
    )]
    DuplicateGlobal {
        name: String,
        existing: String,
        new: String,
    },

    #[error("goto target with label id {id} is never defined")]
    UnresolvedLabel { id: String },

    #[error("unexpected switch body shape: {context}")]
    UnexpectedSwitchShape { context: String },

    #[error("unhandled top level node {kind}")]
    UnhandledTopLevel { kind: NodeKind },
}

/// A diagnostic ready to be printed.
#[derive(Debug, Clone)]
pub struct Report {
    msg: String,
    path: Option<PathBuf>,
}

impl Report {
    pub fn new(msg: String, path: Option<PathBuf>) -> Self {
        Self { msg, path }
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }
}

pub fn report(report: &Report) {
    eprintln!("\x1b[31mError\x1b[0m: {}", report.msg);
    if let Some(path) = &report.path {
        eprintln!(" --> {}", path.display());
    }
}
