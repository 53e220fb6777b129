use log::debug;

use super::{GenResult, Generator};
use crate::ast::{Node, NodeKind};
use crate::error::TranslateError;
use crate::names::{enum_member_name, filter_name};
use crate::types::{convert_type, zero_value};

/// Operators whose result is a boolean in the target language.
fn is_boolean_op(op: &str) -> bool {
    matches!(op, "<" | ">" | "<=" | ">=" | "==" | "!=" | "&&" | "||" | "!")
}

/// Checked libc builtins emitted by some front ends, and their plain names.
fn unchecked_builtin(name: &str) -> Option<&'static str> {
    match name {
        "__builtin___memcpy_chk" => Some("C.memcpy"),
        "__builtin___memmove_chk" => Some("C.memmove"),
        "__builtin___memset_chk" => Some("C.memset"),
        _ => None,
    }
}

/// A character literal as a backtick rune.
fn rune_literal(code: i64) -> String {
    let escaped = match code {
        0 => "\\0".to_string(),
        7 => "\\a".to_string(),
        8 => "\\b".to_string(),
        9 => "\\t".to_string(),
        10 => "\\n".to_string(),
        11 => "\\v".to_string(),
        12 => "\\f".to_string(),
        13 => "\\r".to_string(),
        39 => "'".to_string(),
        92 => "\\\\".to_string(),
        96 => "\\`".to_string(),
        32..=126 => char::from(code as u8).to_string(),
        _ => match u32::try_from(code).ok().and_then(char::from_u32) {
            Some(c) if code > 127 => c.to_string(),
            _ => format!("\\x{:02x}", code & 0xff),
        },
    };
    format!("`{escaped}`")
}

/// Kinds between a `return` and a literal that still make the literal the returned value.
fn passes_returned_bool(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::IntegerLiteral
            | NodeKind::ImplicitCastExpr
            | NodeKind::ConstantExpr
            | NodeKind::ParenExpr
            | NodeKind::ConditionalOperator
    )
}

/// Element count of a fixed array type such as `int [4]`.
fn array_len(ty: &str) -> Option<usize> {
    let start = ty.find('[')?;
    let end = ty[start..].find(']')? + start;
    ty[start + 1..end].trim().parse().ok()
}

impl<'a> Generator<'a> {
    /// Emits one expression.
    ///
    /// Returns the node's literal value, or `"bool"` for comparisons and
    /// logical operators so conditions know no `!= 0` is needed.
    pub(crate) fn expr(&mut self, node: &Node) -> GenResult<String> {
        // Only literals that are the returned value itself become `true`/`false`.
        if self.ctx.returning_bool && !passes_returned_bool(node.kind) {
            self.ctx.returning_bool = false;
            let res = self.expr(node);
            self.ctx.returning_bool = true;
            return res;
        }
        match node.kind {
            NodeKind::Null | NodeKind::NullStmt => return Ok(String::new()),
            NodeKind::IntegerLiteral => {
                let value = node.value_text();
                if self.ctx.returning_bool {
                    self.emit(if value == "0" { "false" } else { "true" });
                } else {
                    self.emit(&value);
                }
            }
            NodeKind::CharacterLiteral => {
                let code = match &node.value {
                    Some(crate::ast::LiteralValue::Int(n)) => *n,
                    _ => node.value_text().parse().unwrap_or_default(),
                };
                self.emit(&rune_literal(code));
            }
            NodeKind::FloatingLiteral => self.emit(&node.value_text()),
            NodeKind::StringLiteral => {
                let text = node.value_text();
                let unquoted = text
                    .strip_prefix('"')
                    .and_then(|s| s.strip_suffix('"'))
                    .unwrap_or(&text);
                self.emit(&format!("c\"{unquoted}\""));
            }
            NodeKind::ConstantExpr | NodeKind::ImplicitCastExpr => {
                let child = node.cursor().expect_child("operand")?;
                return self.expr(child);
            }
            NodeKind::ParenExpr => {
                let child = node.cursor().expect_child("operand")?;
                let skip = self.ctx.skip_parens;
                if !skip {
                    self.emit("(");
                }
                let ret = self.expr(child)?;
                if !skip {
                    self.emit(")");
                }
                return Ok(ret);
            }
            NodeKind::BinaryOperator => return self.binary_op(node),
            NodeKind::CompoundAssignOperator => {
                let mut cur = node.cursor();
                let lhs = cur.expect_child("left operand")?;
                let rhs = cur.expect_child("right operand")?;
                self.expr(lhs)?;
                self.emit(&format!(" {} ", node.opcode));
                self.expr(rhs)?;
            }
            NodeKind::UnaryOperator => return self.unary_op(node),
            NodeKind::ConditionalOperator => {
                let mut cur = node.cursor();
                let cond = cur.expect_child("condition")?;
                let then = cur.expect_child("true value")?;
                let otherwise = cur.expect_child("false value")?;
                self.emit("if ");
                let returning_bool = std::mem::take(&mut self.ctx.returning_bool);
                let res = self.expr(cond);
                self.ctx.returning_bool = returning_bool;
                res?;
                self.emit(" { ");
                self.expr(then)?;
                self.emit(" } else { ");
                self.expr(otherwise)?;
                self.emit(" }");
            }
            NodeKind::DeclRefExpr => self.name_expr(node),
            NodeKind::MemberExpr => {
                let base = node.cursor().expect_child("base")?;
                self.expr(base)?;
                let field = node.name.trim_start_matches("->").trim_start_matches('.');
                if !field.is_empty() {
                    self.emit(&format!(".{}", filter_name(field)));
                }
            }
            NodeKind::CallExpr => self.call_expr(node)?,
            NodeKind::ArraySubscriptExpr => self.array_subscript(node)?,
            NodeKind::UnaryExprOrTypeTraitExpr => {
                let op = if node.name.is_empty() { "sizeof" } else { node.name.as_str() };
                self.emit(&format!("{op}("));
                match node.first_child() {
                    Some(operand) => {
                        let operand = if operand.kind == NodeKind::ParenExpr {
                            operand.first_child().unwrap_or(operand)
                        } else {
                            operand
                        };
                        self.expr(operand)?;
                    }
                    None => self.emit(&convert_type(&node.arg_type.qual).name),
                }
                self.emit(")");
            }
            NodeKind::InitListExpr => self.init_list_expr(node)?,
            NodeKind::ImplicitValueInitExpr => {
                let ty = convert_type(&node.ty.qual);
                self.emit(&zero_value(&ty, &node.ty.qual, &node.ty.desugared));
            }
            NodeKind::CStyleCastExpr => {
                let operand = node.cursor().expect_child("operand")?;
                let ty = convert_type(&node.ty.qual);
                if ty.name == "void" {
                    return self.expr(operand);
                }
                self.emit(&format!("{}(", ty.name));
                self.expr(operand)?;
                self.emit(")");
            }
            NodeKind::BreakStmt | NodeKind::ContinueStmt | NodeKind::GotoStmt => self.statement(node)?,
            NodeKind::OpaqueValueExpr
            | NodeKind::ParenListExpr
            | NodeKind::VaArgExpr
            | NodeKind::OffsetOfExpr
            | NodeKind::StmtExpr
            | NodeKind::Attribute
            | NodeKind::Comment => {
                debug!("no translation for {}", node.kind);
            }

            NodeKind::NamespaceDecl
            | NodeKind::LinkageSpecDecl
            | NodeKind::CxxRecordDecl
            | NodeKind::CxxConstructorDecl
            | NodeKind::CxxDestructorDecl
            | NodeKind::CxxMethodDecl
            | NodeKind::UsingDecl
            | NodeKind::UsingShadowDecl
            | NodeKind::UsingDirectiveDecl
            | NodeKind::ClassTemplateDecl
            | NodeKind::ClassTemplateSpecializationDecl
            | NodeKind::ClassTemplatePartialSpecializationDecl
            | NodeKind::FunctionTemplateDecl
            | NodeKind::TemplateArgument
            | NodeKind::CxxForRangeStmt
            | NodeKind::CxxTryStmt
            | NodeKind::CxxConstructExpr
            | NodeKind::CxxMemberCallExpr
            | NodeKind::CxxOperatorCallExpr
            | NodeKind::ExprWithCleanups
            | NodeKind::MaterializeTemporaryExpr
            | NodeKind::CxxBindTemporaryExpr
            | NodeKind::UnresolvedLookupExpr
            | NodeKind::CxxThrowExpr
            | NodeKind::CxxDynamicCastExpr
            | NodeKind::CxxReinterpretCastExpr
            | NodeKind::CxxStaticCastExpr
            | NodeKind::CxxUnresolvedConstructExpr
            | NodeKind::CxxDependentScopeMemberExpr
            | NodeKind::CxxThisExpr
            | NodeKind::CxxBoolLiteralExpr
            | NodeKind::CxxNullPtrLiteralExpr
            | NodeKind::CxxFunctionalCastExpr
            | NodeKind::CxxDeleteExpr
            | NodeKind::CxxNewExpr
            | NodeKind::CxxTemporaryObjectExpr => {
                if !self.cpp_expr(node)? {
                    return self.unhandled(node);
                }
            }

            NodeKind::TranslationUnitDecl
            | NodeKind::TypedefDecl
            | NodeKind::RecordDecl
            | NodeKind::FieldDecl
            | NodeKind::IndirectFieldDecl
            | NodeKind::EnumDecl
            | NodeKind::EnumConstantDecl
            | NodeKind::FunctionDecl
            | NodeKind::ParmVarDecl
            | NodeKind::VarDecl
            | NodeKind::LabelDecl
            | NodeKind::EmptyDecl
            | NodeKind::StaticAssertDecl
            | NodeKind::CompoundStmt
            | NodeKind::DeclStmt
            | NodeKind::ReturnStmt
            | NodeKind::IfStmt
            | NodeKind::WhileStmt
            | NodeKind::ForStmt
            | NodeKind::DoStmt
            | NodeKind::SwitchStmt
            | NodeKind::CaseStmt
            | NodeKind::DefaultStmt
            | NodeKind::LabelStmt
            | NodeKind::GccAsmStmt
            | NodeKind::Unknown => return self.unhandled(node),
        }
        Ok(node.value_text())
    }

    fn unhandled(&mut self, node: &Node) -> GenResult<String> {
        if node.is_builtin {
            return Ok(node.value_text());
        }
        Err(TranslateError::UnhandledNode {
            kind: node.kind,
            context: "expression",
        })
    }

    fn binary_op(&mut self, node: &Node) -> GenResult<String> {
        let op = node.opcode.as_str();
        let mut cur = node.cursor();
        let lhs = cur.expect_child("left operand")?;
        let rhs = cur.expect_child("right operand")?;

        if op == "=" && rhs.kind == NodeKind::BinaryOperator && rhs.opcode == "=" {
            return self.chained_assign(lhs, rhs);
        }
        self.expr(lhs)?;
        self.emit(&format!(" {op} "));
        self.expr(rhs)?;
        if is_boolean_op(op) {
            return Ok("bool".to_string());
        }
        Ok(String::new())
    }

    /// `a = b = c` becomes `b = c` followed by `a = b`, innermost first.
    fn chained_assign(&mut self, first: &Node, mut rhs: &Node) -> GenResult<String> {
        let mut targets = vec![first];
        while rhs.kind == NodeKind::BinaryOperator && rhs.opcode == "=" {
            let mut cur = rhs.cursor();
            targets.push(cur.expect_child("left operand")?);
            rhs = cur.expect_child("right operand")?;
        }
        // Each target is read again as the source of the next assignment out.
        let mut source = rhs;
        for (i, &target) in targets.iter().rev().enumerate() {
            if i > 0 {
                self.out.end_line();
            }
            self.expr(target)?;
            self.emit(" = ");
            self.expr(source)?;
            source = target;
        }
        Ok(String::new())
    }

    fn unary_op(&mut self, node: &Node) -> GenResult<String> {
        let op = node.opcode.as_str();
        let operand = node.cursor().expect_child("operand")?;
        match op {
            "++" | "--" => {
                self.expr(operand)?;
                self.emit(op);
            }
            "__extension__" => {
                self.expr(operand)?;
            }
            _ => {
                self.emit(op);
                self.expr(operand)?;
            }
        }
        if op == "!" {
            return Ok("bool".to_string());
        }
        Ok(String::new())
    }

    /// Identifier references, with enum constants qualified by their enum.
    pub(crate) fn name_expr(&mut self, node: &Node) {
        let Some(decl) = &node.referenced_decl else {
            self.emit(&filter_name(&node.name));
            return;
        };

        if decl.kind == NodeKind::EnumConstantDecl {
            let member = enum_member_name(&decl.name);
            let in_index = self.ctx.inside_array_index;
            let owner = self.registry.enum_of(&member).map(str::to_string);
            let short = !in_index && owner.is_some() && owner == self.ctx.switch_enum;
            if in_index {
                self.emit("int(");
            }
            match owner {
                Some(_) if short => self.emit(&format!(".{member}")),
                Some(owner) => self.emit(&format!("{owner}.{member}")),
                None => self.emit(&member),
            }
            if in_index {
                self.emit(")");
            }
            return;
        }

        let name = &decl.name;
        let name = if self.registry.has_const(name) || self.registry.has_global(&filter_name(name)) {
            name.clone()
        } else {
            name.to_lowercase()
        };
        self.emit(&filter_name(&name));
    }

    fn call_expr(&mut self, node: &Node) -> GenResult {
        let mut cur = node.cursor();
        let callee = cur.expect_child("callee")?;
        let callee_name = callee
            .strip_transparent()
            .referenced_decl
            .as_ref()
            .map(|d| d.name.clone())
            .unwrap_or_default();

        let mut max_args = usize::MAX;
        match unchecked_builtin(&callee_name) {
            Some(plain) => {
                self.emit(plain);
                // The checked variant carries an extra object-size argument.
                max_args = 3;
            }
            None if callee_name == "memset" => self.emit("C.memset"),
            None => {
                self.expr(callee)?;
            }
        }

        self.emit("(");
        for (i, arg) in cur.remaining().iter().take(max_args).enumerate() {
            if i > 0 {
                self.emit(", ");
            }
            self.expr(arg)?;
        }
        self.emit(")");
        Ok(())
    }

    fn array_subscript(&mut self, node: &Node) -> GenResult {
        let mut cur = node.cursor();
        let base = cur.expect_child("base")?;
        let index = cur.expect_child("index")?;
        self.expr(base)?;
        self.emit("[");

        let saved = std::mem::replace(&mut self.ctx.inside_array_index, true);
        let target = index.strip_transparent();
        let enum_var = target.kind == NodeKind::DeclRefExpr
            && !target.refers_to(NodeKind::EnumConstantDecl)
            && (target.ty.qual.starts_with("enum ")
                || self.registry.has_enum(&convert_type(&target.ty.qual).name));
        if enum_var {
            self.emit("int(");
        }
        let res = self.expr(index);
        if enum_var {
            self.emit(")");
        }
        self.ctx.inside_array_index = saved;
        res?;

        self.emit("]");
        Ok(())
    }

    fn init_element(&mut self, node: &Node) -> GenResult {
        if node.kind == NodeKind::ImplicitValueInitExpr {
            self.emit("0");
        } else {
            self.expr(node)?;
        }
        Ok(())
    }

    /// `{1, 2}` becomes an array literal or a struct literal depending on the type.
    ///
    /// clang labels the first element of a partially initialized array as
    /// `array_filler`, so that list holds the filler value followed by the
    /// written elements and `inner` is empty.
    fn init_list_expr(&mut self, node: &Node) -> GenResult {
        let ty = node.ty.qual.as_str();
        let is_array = ty.contains('[');
        if is_array {
            self.emit("[");
        } else {
            self.emit(&format!("{}{{", convert_type(ty).name));
        }

        let (filler, written) = match node.array_filler.split_first() {
            Some((filler, written)) => (Some(filler), written),
            None => (None, node.inner.as_slice()),
        };
        let mut count = 0;
        for child in written {
            if count > 0 {
                self.emit(", ");
            }
            self.init_element(child)?;
            count += 1;
        }
        // The filler stands for every element the source left out.
        if let Some(filler) = filler {
            let len = array_len(ty).unwrap_or(count + 1);
            while count < len {
                if count > 0 {
                    self.emit(", ");
                }
                self.init_element(filler)?;
                count += 1;
            }
        }

        if is_array {
            self.emit("]!");
        } else {
            self.emit("}");
        }
        Ok(())
    }
}
