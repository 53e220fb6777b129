//! In-memory model of the clang JSON AST.
//!
//! The front end emits one JSON object per node. This module turns that
//! document into an owned tree of [`Node`]s and provides the cursor protocol
//! used by the generator to walk irregular child layouts.
//!
//! ## Architecture
//!
//! - [`kind`]: the closed [`NodeKind`] enumeration
//! - [`node`]: [`Node`] and its serde representation
//! - [`cursor`]: ordered-child consumption over an immutable node
//!

pub mod cursor;
pub mod kind;
pub mod node;

pub use cursor::Cursor;
pub use kind::NodeKind;
pub use node::{FileMark, LiteralValue, Location, Node, QualType, RefDecl};

/// Parses one translation unit dumped with `-ast-dump=json`.
pub fn parse_ast(json: &str) -> Result<Node, serde_json::Error> {
    serde_json::from_str(json)
}
