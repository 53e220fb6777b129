//! `switch` lowering.
//!
//! A C `switch` becomes a `match`. Case chains without a body share one arm,
//! statements that clang places after a case as siblings are replayed into the
//! open arm, and arms that fall through pick up the body of the next arm.

use log::debug;

use super::{GenResult, Generator};
use crate::ast::{Node, NodeKind};
use crate::error::TranslateError;
use crate::names::enum_member_name;

/// One arm of the generated `match`.
#[derive(Debug, Default, Clone)]
struct Arm<'n> {
    labels: Vec<&'n Node>,
    body: Vec<&'n Node>,
    is_default: bool,
}

impl Arm<'_> {
    /// Whether control leaves the arm at its end instead of falling into the next one.
    fn is_terminated(&self) -> bool {
        ends_in_jump(last_statement(self.body.iter().copied()))
    }
}

fn last_statement<'n>(stmts: impl DoubleEndedIterator<Item = &'n Node>) -> Option<&'n Node> {
    stmts
        .rev()
        .find(|n| n.kind != NodeKind::NullStmt && !n.kind.is_annotation())
}

/// Looks through trailing blocks such as `case 1: x(); { y(); break; }`.
fn ends_in_jump(last: Option<&Node>) -> bool {
    match last {
        Some(n) if n.kind == NodeKind::CompoundStmt => ends_in_jump(last_statement(n.inner.iter())),
        Some(n) => matches!(
            n.kind,
            NodeKind::BreakStmt | NodeKind::ReturnStmt | NodeKind::ContinueStmt | NodeKind::GotoStmt
        ),
        None => false,
    }
}

fn push_flattened<'n>(body: &mut Vec<&'n Node>, node: &'n Node) {
    if node.kind == NodeKind::CompoundStmt {
        body.extend(node.inner.iter());
    } else {
        body.push(node);
    }
}

/// Splits a switch body into arms.
fn collect_arms(body: &Node) -> GenResult<Vec<Arm<'_>>> {
    let children: &[Node] = if body.kind == NodeKind::CompoundStmt {
        &body.inner
    } else {
        std::slice::from_ref(body)
    };

    let mut arms: Vec<Arm> = Vec::new();
    for child in children {
        match child.kind {
            NodeKind::CaseStmt | NodeKind::DefaultStmt => arms.push(case_chain(child)?),
            _ if child.kind.is_annotation() => {}
            _ => match arms.last_mut() {
                Some(arm) => arm.body.push(child),
                None => {
                    return Err(TranslateError::UnexpectedSwitchShape {
                        context: format!("{} before the first case", child.kind),
                    });
                }
            },
        }
    }

    // Fallthrough: an arm without a terminator continues into the next one.
    for i in (0..arms.len().saturating_sub(1)).rev() {
        if !arms[i].body.is_empty() && !arms[i].is_terminated() {
            let next = arms[i + 1].body.clone();
            arms[i].body.extend(next);
        }
    }
    Ok(arms)
}

/// Follows `case A: case B: stmt` down to its statement.
fn case_chain(node: &Node) -> GenResult<Arm<'_>> {
    let mut arm = Arm::default();
    let mut cur = node;
    loop {
        match cur.kind {
            NodeKind::CaseStmt => {
                let (Some(label), Some(stmt)) = (cur.inner.first(), cur.inner.get(1..).and_then(<[Node]>::last))
                else {
                    return Err(TranslateError::UnexpectedSwitchShape {
                        context: "case without a statement".to_string(),
                    });
                };
                arm.labels.push(label);
                cur = stmt;
            }
            NodeKind::DefaultStmt => {
                arm.is_default = true;
                let Some(stmt) = cur.inner.first() else {
                    return Ok(arm);
                };
                cur = stmt;
            }
            _ => {
                push_flattened(&mut arm.body, cur);
                return Ok(arm);
            }
        }
    }
}

impl<'a> Generator<'a> {
    /// Enum the switch dispatches on, if any.
    fn switch_enum_of(&self, cond: &Node, arms: &[Arm]) -> Option<String> {
        // Promotions wrap the operand; a plain `int` variable is matched as an integer.
        if cond.strip_transparent().ty.qual == "int" {
            return None;
        }
        let first = arms.iter().flat_map(|arm| arm.labels.iter()).next()?;
        let operand = first.strip_transparent();
        if operand.kind != NodeKind::DeclRefExpr || !operand.refers_to(NodeKind::EnumConstantDecl) {
            return None;
        }
        let decl = operand.referenced_decl.as_ref()?;
        let member = enum_member_name(&decl.name);
        self.registry.enum_of(&member).map(str::to_string)
    }

    pub(crate) fn switch_stmt(&mut self, node: &Node) -> GenResult {
        let mut cur = node.cursor();
        let cond = cur.expect_child("condition")?;
        let body = cur
            .remaining()
            .last()
            .ok_or(TranslateError::MissingChild {
                parent: node.kind,
                expected: "body",
            })?;
        let arms = collect_arms(body)?;
        let switch_enum = self.switch_enum_of(cond, &arms);
        debug!("switch with {} arms over {:?}", arms.len(), switch_enum);

        let saved_enum = std::mem::replace(&mut self.ctx.switch_enum, switch_enum.clone());
        self.ctx.switch_depth += 1;
        let res = self.match_arms(cond, &arms, switch_enum.as_deref());
        self.ctx.switch_depth -= 1;
        self.ctx.switch_enum = saved_enum;
        res
    }

    fn match_arms(&mut self, cond: &Node, arms: &[Arm], switch_enum: Option<&str>) -> GenResult {
        self.emit("match ");
        match switch_enum {
            Some(name) => {
                self.emit(&format!("{name}("));
                self.expr(cond)?;
                self.emit(")");
            }
            None => {
                self.expr(cond)?;
            }
        }
        self.emitln(" {");
        self.out.indent();

        for arm in arms.iter().filter(|arm| !arm.is_default) {
            for (i, label) in arm.labels.iter().enumerate() {
                if i > 0 {
                    self.emit(", ");
                }
                self.expr(label)?;
            }
            self.emitln(" {");
            self.arm_body(arm)?;
            self.emitln("}");
        }

        match arms.iter().find(|arm| arm.is_default) {
            Some(default) => {
                self.emitln("else {");
                self.arm_body(default)?;
                self.emitln("}");
            }
            None => self.emitln("else {}"),
        }

        self.out.dedent();
        self.emitln("}");
        Ok(())
    }

    fn arm_body(&mut self, arm: &Arm) -> GenResult {
        self.out.indent();
        for stmt in &arm.body {
            self.statement(stmt)?;
        }
        self.out.dedent();
        Ok(())
    }
}
