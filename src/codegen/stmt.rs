use log::debug;

use super::decl::init_expr;
use super::{GenResult, Generator};
use crate::ast::{Node, NodeKind};
use crate::error::TranslateError;
use crate::names::filter_name;
use crate::types::{convert_type, zero_value};

/// Converted types that need an explicit `!= 0` in a condition.
fn is_integer(ty: &str) -> bool {
    matches!(
        ty,
        "int" | "i8" | "i16" | "i64" | "u8" | "u16" | "u32" | "u64" | "usize" | "isize"
    )
}

impl<'a> Generator<'a> {
    /// Emits the children of a compound statement one level deeper.
    pub(crate) fn statements(&mut self, compound: &Node) -> GenResult {
        self.out.indent();
        for child in &compound.inner {
            self.statement(child)?;
        }
        self.out.dedent();
        Ok(())
    }

    /// Body of a block whose `{` is already written; the caller closes it.
    pub(crate) fn block(&mut self, node: &Node) -> GenResult {
        if node.kind == NodeKind::CompoundStmt {
            self.statements(node)
        } else {
            self.out.indent();
            self.statement(node)?;
            self.out.dedent();
            Ok(())
        }
    }

    /// Loop bodies are not directly inside a switch arm.
    fn loop_block(&mut self, node: &Node) -> GenResult {
        let saved = std::mem::take(&mut self.ctx.switch_depth);
        let res = self.block(node);
        self.ctx.switch_depth = saved;
        res
    }

    pub(crate) fn statement(&mut self, node: &Node) -> GenResult {
        match node.kind {
            NodeKind::DeclStmt => {
                self.var_decl(node)?;
                self.out.end_line();
            }
            NodeKind::ReturnStmt => {
                self.return_stmt(node)?;
                self.out.end_line();
            }
            NodeKind::IfStmt => self.if_stmt(node)?,
            NodeKind::WhileStmt => self.while_stmt(node)?,
            NodeKind::ForStmt => self.for_stmt(node)?,
            NodeKind::DoStmt => self.do_stmt(node)?,
            NodeKind::SwitchStmt => self.switch_stmt(node)?,
            NodeKind::CompoundStmt => {
                self.emitln("{");
                self.statements(node)?;
                self.emitln("}");
            }
            NodeKind::GccAsmStmt => self.emitln("/* __asm__ */"),
            NodeKind::GotoStmt => self.goto_stmt(node),
            NodeKind::LabelStmt => {
                self.labels.define(&node.decl_id, &node.name);
                self.emitln(&format!("{}:", node.name));
                for child in &node.inner {
                    self.statement(child)?;
                }
            }
            NodeKind::CxxForRangeStmt => self.for_range(node)?,
            NodeKind::BreakStmt => {
                if self.ctx.switch_depth == 0 {
                    self.emitln("break");
                }
            }
            NodeKind::ContinueStmt => self.emitln("continue"),
            NodeKind::NullStmt => {}
            kind if kind.is_annotation() => {}
            _ => {
                self.expr(node)?;
                self.out.end_line();
            }
        }
        Ok(())
    }

    pub(crate) fn goto_stmt(&mut self, node: &Node) {
        let target = self.labels.target(&node.target_label_id);
        self.emitln(&format!("goto {target}"));
    }

    fn return_stmt(&mut self, node: &Node) -> GenResult {
        self.emit("return");
        let Some(value) = node.first_child() else {
            return Ok(());
        };
        if self.ctx.inside_main {
            return Ok(());
        }
        self.emit(" ");
        // `return 1` from a bool function is `return true`.
        let saved = self.ctx.returning_bool;
        if value.kind == NodeKind::ImplicitCastExpr && matches!(value.ty.qual.as_str(), "bool" | "_Bool") {
            self.ctx.returning_bool = true;
        }
        let res = self.expr(value);
        self.ctx.returning_bool = saved;
        res.map(|_| ())
    }

    /// A condition; integer-typed values are compared against zero.
    fn condition(&mut self, node: &Node) -> GenResult {
        let ret = self.expr(node)?;
        if ret != "bool" && is_integer(&convert_type(&node.ty.qual).name) {
            self.emit(" != 0");
        }
        Ok(())
    }

    fn if_stmt(&mut self, node: &Node) -> GenResult {
        let mut cur = node.cursor();
        let cond = cur.expect_child("condition")?;
        let then = cur.expect_child("then branch")?;
        let otherwise = cur.next_child().filter(|n| n.kind != NodeKind::Null);

        self.emit("if ");
        self.condition(cond)?;
        self.emitln(" {");
        self.block(then)?;
        match otherwise {
            None => self.emitln("}"),
            Some(else_if) if else_if.kind == NodeKind::IfStmt => {
                self.emit("} else ");
                self.if_stmt(else_if)?;
            }
            Some(other) => {
                self.emitln("} else {");
                self.block(other)?;
                self.emitln("}");
            }
        }
        Ok(())
    }

    fn while_stmt(&mut self, node: &Node) -> GenResult {
        let mut cur = node.cursor();
        let cond = cur.expect_child("condition")?;
        let body = cur.expect_child("body")?;
        self.emit("for ");
        self.condition(cond)?;
        self.emitln(" {");
        self.loop_block(body)?;
        self.emitln("}");
        Ok(())
    }

    /// Children are init, condition variable, condition, increment and body;
    /// absent clauses are null children.
    fn for_stmt(&mut self, node: &Node) -> GenResult {
        let mut cur = node.cursor();
        let init = cur.expect_child("init")?;
        let _cond_var = cur.expect_child("condition variable")?;
        let cond = cur.expect_child("condition")?;
        let inc = cur.expect_child("increment")?;
        let body = cur.expect_child("body")?;

        let is_null = |n: &Node| n.kind == NodeKind::Null;
        if is_null(init) && is_null(cond) && is_null(inc) {
            self.emitln("for {");
        } else {
            self.emit("for ");
            match init.kind {
                NodeKind::DeclStmt => self.var_decl(init)?,
                NodeKind::Null => {}
                _ => {
                    self.expr(init)?;
                }
            }
            self.emit("; ");
            if !is_null(cond) {
                self.condition(cond)?;
            }
            self.emit("; ");
            self.expr(inc)?;
            self.emitln(" {");
        }
        self.loop_block(body)?;
        self.emitln("}");
        Ok(())
    }

    fn do_stmt(&mut self, node: &Node) -> GenResult {
        let mut cur = node.cursor();
        let body = cur.expect_child("body")?;
        let cond = cur.expect_child("condition")?;
        self.emitln("for {");
        self.loop_block(body)?;
        self.out.indent();
        self.emit("if !(");
        self.condition(cond)?;
        self.emitln(") {");
        self.out.indent();
        self.emitln("break");
        self.out.dedent();
        self.emitln("}");
        self.out.dedent();
        self.emitln("}");
        Ok(())
    }

    /// Local declarations of one `DeclStmt`; the last one is left on the open line.
    pub(crate) fn var_decl(&mut self, decl_stmt: &Node) -> GenResult {
        let vars: Vec<&Node> = decl_stmt
            .inner
            .iter()
            .filter(|n| match n.kind {
                NodeKind::VarDecl => true,
                other => {
                    debug!("skipping local {other}");
                    false
                }
            })
            .collect();

        for (i, var) in vars.iter().enumerate() {
            if var.is_extern() {
                return Err(TranslateError::LocalExtern { name: var.name.clone() });
            }
            if i > 0 {
                self.out.end_line();
            }
            let name = filter_name(&var.name.to_lowercase());
            if var.is_static() {
                self.emit("static ");
            }
            match init_expr(var) {
                Some(value) if var.init == "c" || var.init.is_empty() => {
                    self.emit(&format!("{name} := "));
                    self.expr(value)?;
                }
                _ => {
                    let ty = convert_type(&var.ty.qual);
                    let zero = zero_value(&ty, &var.ty.qual, &var.ty.desugared);
                    self.emit(&format!("{name} := {zero}"));
                }
            }
        }
        Ok(())
    }
}
