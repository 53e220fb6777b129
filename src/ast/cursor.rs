use log::warn;

use super::kind::NodeKind;
use super::node::Node;
use crate::error::TranslateError;

/// Ordered consumption of a node's children.
///
/// A cursor is a plain `Copy` value. Each traversal frame owns its own, so a
/// caller can save a position and read the same children again without
/// affecting anyone else walking that node.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    node: &'a Node,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(node: &'a Node) -> Self {
        Cursor { node, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_done(&self) -> bool {
        self.pos >= self.node.inner.len()
    }

    /// Returns the child at the cursor and advances past it.
    pub fn next_child(&mut self) -> Option<&'a Node> {
        let child = self.node.inner.get(self.pos)?;
        self.pos += 1;
        Some(child)
    }

    /// Like [`Cursor::next_child`], but only when the child has the expected kind.
    ///
    /// A mismatch is reported and the cursor stays on the mismatched child.
    pub fn next_child_of_kind(&mut self, expected: NodeKind) -> Option<&'a Node> {
        let child = self.node.inner.get(self.pos)?;
        if child.kind != expected {
            warn!(
                "{} child {}: wanted {expected} but got {}",
                self.node.kind, self.pos, child.kind
            );
            return None;
        }
        self.pos += 1;
        Some(child)
    }

    pub fn rewind(&mut self) {
        self.pos = 0;
    }

    /// Children not consumed yet.
    pub fn remaining(&self) -> &'a [Node] {
        self.node.inner.get(self.pos..).unwrap_or(&[])
    }

    /// Next child, or a [`TranslateError::MissingChild`] naming what was expected.
    pub fn expect_child(&mut self, expected: &'static str) -> Result<&'a Node, TranslateError> {
        self.next_child().ok_or(TranslateError::MissingChild {
            parent: self.node.kind,
            expected,
        })
    }

    pub fn expect_child_of_kind(&mut self, kind: NodeKind) -> Result<&'a Node, TranslateError> {
        self.next_child_of_kind(kind).ok_or(TranslateError::MissingChild {
            parent: self.node.kind,
            expected: kind_label(kind),
        })
    }
}

fn kind_label(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::CompoundStmt => "CompoundStmt",
        NodeKind::DeclStmt => "DeclStmt",
        NodeKind::MemberExpr => "MemberExpr",
        NodeKind::CxxConstructExpr => "CXXConstructExpr",
        NodeKind::MaterializeTemporaryExpr => "MaterializeTemporaryExpr",
        NodeKind::ImplicitCastExpr => "ImplicitCastExpr",
        NodeKind::CxxBindTemporaryExpr => "CXXBindTemporaryExpr",
        NodeKind::StringLiteral => "StringLiteral",
        NodeKind::ParmVarDecl => "ParmVarDecl",
        _ => "child",
    }
}
