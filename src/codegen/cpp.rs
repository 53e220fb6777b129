//! The C++ subset: namespaces, a few standard library idioms and casts.
//! Everything else C++ is accepted and produces no output.

use log::debug;

use super::{GenResult, Generator};
use crate::ast::{Node, NodeKind};
use crate::error::TranslateError;
use crate::names::filter_name;
use crate::types::convert_type;

/// First node of `kind` below `node`, depth first.
fn find_descendant(node: &Node, kind: NodeKind) -> Option<&Node> {
    node.inner.iter().find_map(|child| {
        if child.kind == kind {
            Some(child)
        } else {
            find_descendant(child, kind)
        }
    })
}

impl<'a> Generator<'a> {
    /// Top-level C++ declarations. Returns `false` for kinds that are not C++.
    pub(crate) fn cpp_top_level(&mut self, node: &Node) -> GenResult<bool> {
        match node.kind {
            NodeKind::NamespaceDecl | NodeKind::LinkageSpecDecl => {
                let decls = &node.inner;
                for (i, child) in decls.iter().enumerate() {
                    self.top_level(child, decls.get(i + 1))?;
                }
            }
            NodeKind::CxxRecordDecl
            | NodeKind::CxxConstructorDecl
            | NodeKind::CxxDestructorDecl
            | NodeKind::CxxMethodDecl
            | NodeKind::UsingDecl
            | NodeKind::UsingShadowDecl
            | NodeKind::UsingDirectiveDecl
            | NodeKind::ClassTemplateDecl
            | NodeKind::ClassTemplateSpecializationDecl
            | NodeKind::ClassTemplatePartialSpecializationDecl
            | NodeKind::FunctionTemplateDecl => {
                debug!("skipping C++ declaration {} `{}`", node.kind, node.name);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// C++ expressions. Returns `false` when `node` is not one of them.
    pub(crate) fn cpp_expr(&mut self, node: &Node) -> GenResult<bool> {
        match node.kind {
            // std::vector<int> a;
            NodeKind::CxxConstructExpr => {
                if node.ty.qual.contains("<int>") {
                    self.emit("int");
                }
            }
            NodeKind::CxxMemberCallExpr => self.member_call(node)?,
            NodeKind::CxxOperatorCallExpr => self.operator_call(node)?,
            // std::string s = "hi";
            NodeKind::ExprWithCleanups => {
                if node.ty.qual.contains("basic_string<") {
                    if let Some(lit) = find_descendant(node, NodeKind::StringLiteral) {
                        self.emit(&lit.value_text());
                    }
                } else if let Some(child) = node.first_child() {
                    self.expr(child)?;
                }
            }
            NodeKind::MaterializeTemporaryExpr | NodeKind::CxxBindTemporaryExpr => {
                if let Some(child) = node.first_child() {
                    self.expr(child)?;
                }
            }
            NodeKind::CxxDynamicCastExpr | NodeKind::CxxStaticCastExpr => {
                let ty = convert_type(&node.ty.qual);
                self.emit(&format!("{}(", ty.name));
                let child = node.cursor().expect_child("operand")?;
                self.expr(child)?;
                self.emit(")");
            }
            NodeKind::CxxThisExpr => self.emit("this"),
            NodeKind::CxxBoolLiteralExpr => self.emit(&node.value_text()),
            NodeKind::CxxNullPtrLiteralExpr => self.emit("nullptr"),
            NodeKind::UnresolvedLookupExpr
            | NodeKind::CxxTryStmt
            | NodeKind::CxxThrowExpr
            | NodeKind::CxxReinterpretCastExpr
            | NodeKind::CxxUnresolvedConstructExpr
            | NodeKind::CxxDependentScopeMemberExpr
            | NodeKind::CxxFunctionalCastExpr
            | NodeKind::CxxDeleteExpr
            | NodeKind::CxxNewExpr
            | NodeKind::CxxTemporaryObjectExpr => {
                debug!("no translation for {}", node.kind);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// `v.push_back(x)` becomes `v << x` and `v.size()` becomes `v.len`.
    fn member_call(&mut self, node: &Node) -> GenResult {
        let mut cur = node.cursor();
        let member = cur.expect_child_of_kind(NodeKind::MemberExpr)?;
        let object = member.cursor().expect_child("object")?;
        self.expr(object)?;

        let method = member.name.trim_start_matches("->").trim_start_matches('.');
        match method {
            "push_back" => {
                self.emit(" << ");
                if let Some(arg) = cur.next_child() {
                    self.expr(arg)?;
                }
            }
            "size" => self.emit(".len"),
            _ => {
                self.emit(&format!(".{}(", filter_name(method)));
                for (i, arg) in cur.remaining().iter().enumerate() {
                    if i > 0 {
                        self.emit(", ");
                    }
                    self.expr(arg)?;
                }
                self.emit(")");
            }
        }
        Ok(())
    }

    /// `a << b` through an overloaded operator is written as the plain operator.
    fn operator_call(&mut self, node: &Node) -> GenResult {
        let mut cur = node.cursor();
        let callee = cur.expect_child("operator")?;
        let name = callee
            .strip_transparent()
            .referenced_decl
            .as_ref()
            .map(|d| d.name.as_str())
            .unwrap_or_default();
        let op = name.strip_prefix("operator").unwrap_or(name);
        let lhs = cur.expect_child("left operand")?;
        self.expr(lhs)?;
        if let Some(rhs) = cur.next_child() {
            self.emit(&format!(" {op} "));
            self.expr(rhs)?;
        } else {
            self.emit(op);
        }
        Ok(())
    }

    /// Range-based `for` over a container.
    pub(crate) fn for_range(&mut self, node: &Node) -> GenResult {
        let body = node.inner.last().ok_or(TranslateError::MissingChild {
            parent: node.kind,
            expected: "body",
        })?;
        self.emitln("for val in vals {");
        self.block(body)?;
        self.emitln("}");
        Ok(())
    }
}
