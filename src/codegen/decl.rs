use indexmap::IndexSet;
use log::debug;

use super::{GenResult, Generator};
use crate::ast::{Node, NodeKind};
use crate::error::TranslateError;
use crate::names::{capitalize, capitalize_type, enum_member_name, filter_name, is_builtin_global_name, is_builtin_type_name};
use crate::registry::{GlobalCheck, GlobalRecord};
use crate::types::convert_type;

/// Record and enum types clang prints for declarations without a tag name.
fn is_unnamed_tag(ty: &str) -> bool {
    ty.contains("anonymous at") || ty.contains("unnamed at") || ty.contains("(anonymous")
        || ty.contains("(unnamed")
}

impl<'a> Generator<'a> {
    /// Routes one top-level declaration. `next` is the following sibling.
    pub(crate) fn top_level(&mut self, node: &Node, next: Option<&Node>) -> GenResult {
        if node.is_builtin {
            debug!("skipping builtin {} `{}`", node.kind, node.name);
            return Ok(());
        }
        match node.kind {
            NodeKind::TypedefDecl => self.typedef_decl(node),
            NodeKind::FunctionDecl => self.function_decl(node),
            NodeKind::RecordDecl => self.record_decl(node, next),
            NodeKind::VarDecl => self.global_var_decl(node),
            NodeKind::EnumDecl => self.enum_decl(node, next),
            NodeKind::EmptyDecl | NodeKind::StaticAssertDecl => Ok(()),
            _ if node.kind.is_annotation() => Ok(()),
            _ => {
                if self.cpp_top_level(node)? {
                    Ok(())
                } else {
                    Err(TranslateError::UnhandledTopLevel { kind: node.kind })
                }
            }
        }
    }

    /// `typedef struct { ... } name;` names the anonymous record after the typedef.
    fn tag_name(node: &Node, next: Option<&Node>) -> String {
        if node.name.is_empty()
            && let Some(next) = next
            && next.kind == NodeKind::TypedefDecl
        {
            return next.name.clone();
        }
        node.name.clone()
    }

    pub(crate) fn record_decl(&mut self, node: &Node, next: Option<&Node>) -> GenResult {
        // Forward declaration.
        if node.inner.is_empty() {
            return Ok(());
        }
        let name = Self::tag_name(node, next);
        if name.is_empty() {
            debug!("skipping anonymous record at offset {}", node.loc.offset);
            return Ok(());
        }
        if is_builtin_type_name(&name) || self.registry.has_type(&name) {
            return Ok(());
        }
        self.registry.add_type(&name);
        debug!(
            "record {name} with {} fields",
            node.count_children_of_kind(NodeKind::FieldDecl)
        );

        for nested in node.find_children(NodeKind::RecordDecl) {
            if !nested.name.is_empty() {
                self.record_decl(nested, None)?;
            }
        }

        let keyword = if node.tag_used == "union" { "union" } else { "struct" };
        self.emitln(&format!("{keyword} {} {{", capitalize_type(&name)));
        self.out.indent();
        for field in node.find_children(NodeKind::FieldDecl) {
            if is_unnamed_tag(&field.ty.qual) || field.name.is_empty() {
                continue;
            }
            let ty = convert_type(&field.ty.qual);
            self.emitln(&format!("{} {}", filter_name(&field.name), ty.name));
        }
        self.out.dedent();
        self.emitln("}");
        self.emitln("");
        Ok(())
    }

    pub(crate) fn typedef_decl(&mut self, node: &Node) -> GenResult {
        let alias = node.name.as_str();
        let typ = node.ty.qual.as_str();
        if is_builtin_type_name(alias) || typ.contains(alias) || is_unnamed_tag(typ) {
            // Records and enums of that name are emitted by their own declarations.
            return Ok(());
        }
        if alias.starts_with("__") {
            return Ok(());
        }
        if self.registry.has_type(alias) || self.registry.has_enum(&capitalize(alias)) {
            return Ok(());
        }
        let target = convert_type(typ).name;
        if self.registry.has_enum(&target) {
            return Ok(());
        }
        self.registry.add_type(alias);
        self.emitln(&format!("type {} = {target}", capitalize_type(alias)));
        self.emitln("");
        Ok(())
    }

    pub(crate) fn enum_decl(&mut self, node: &Node, next: Option<&Node>) -> GenResult {
        let tag = Self::tag_name(node, next);
        if tag == "boolean" {
            return Ok(());
        }
        if tag.is_empty() {
            return self.const_enum(node);
        }

        let enum_name = capitalize(&tag);
        if self.registry.has_enum(&enum_name) {
            return Ok(());
        }
        self.emitln(&format!("enum {enum_name} {{"));
        self.out.indent();
        let mut members = IndexSet::new();
        for member in node.find_children(NodeKind::EnumConstantDecl) {
            let name = enum_member_name(&member.name);
            self.emit(&name);
            if let Some(value) = member.find_children(NodeKind::ConstantExpr).next() {
                self.emit(" = ");
                self.enum_value(value)?;
            }
            self.out.end_line();
            members.insert(name);
        }
        self.out.dedent();
        self.emitln("}");
        self.emitln("");
        debug!("enum {enum_name} with {} members", members.len());
        self.registry.add_enum(&enum_name, members);
        Ok(())
    }

    /// Anonymous enums are plain integer constants.
    fn const_enum(&mut self, node: &Node) -> GenResult {
        self.emitln("const (");
        self.out.indent();
        let mut prev: Option<String> = None;
        for member in node.find_children(NodeKind::EnumConstantDecl) {
            let name = enum_member_name(&member.name);
            self.registry.add_const(&member.name);
            self.emit(&format!("{name} = "));
            match member.find_children(NodeKind::ConstantExpr).next() {
                Some(value) => self.enum_value(value)?,
                None => match &prev {
                    Some(p) => self.emit(&format!("{p} + 1")),
                    None => self.emit("0"),
                },
            }
            self.out.end_line();
            prev = Some(name);
        }
        self.out.dedent();
        self.emitln(")");
        self.emitln("");
        Ok(())
    }

    fn enum_value(&mut self, value: &Node) -> GenResult {
        let saved = std::mem::replace(&mut self.ctx.skip_parens, true);
        let inner = value.first_child().unwrap_or(value);
        let res = self.expr(inner);
        self.ctx.skip_parens = saved;
        res.map(|_| ())
    }

    pub(crate) fn function_decl(&mut self, node: &Node) -> GenResult {
        self.ctx.inside_main = false;
        let name = node.name.as_str();
        if node.loc.file.contains("usr/include") || name.is_empty() || name == "invalid" {
            return Ok(());
        }
        if !self.source_mentions(name) {
            debug!("function {name} is not in this unit, skipping");
            return Ok(());
        }

        let has_body = node.has_child_of_kind(NodeKind::CompoundStmt);
        if !has_body && (self.registry.has_function(name) || self.unit_defines_function(name)) {
            return Ok(());
        }

        let qual = node.ty.qual.as_str();
        let ret = qual.split('(').next().unwrap_or_default().trim();
        let mut ret = if ret == "void" { String::new() } else { convert_type(ret).name };
        if qual.contains("...)") {
            self.emitln("[c2v_variadic]");
        }

        let is_main = name == "main";
        let params = if is_main {
            ret.clear();
            String::new()
        } else {
            self.function_params(node).join(", ")
        };

        let v_name = filter_name(&name.to_lowercase());
        if v_name != name {
            self.emitln(&format!("[c:\"{name}\"]"));
        }
        let signature = format!("func {v_name}({params}) {ret}");
        self.registry.add_function(name);

        match node.find_children(NodeKind::CompoundStmt).next() {
            Some(body) => {
                self.ctx.inside_main = is_main;
                self.emitln(&format!("{} {{", signature.trim_end()));
                self.statements(body)?;
                self.emitln("}");
                self.ctx.inside_main = false;
            }
            None => self.emitln(signature.trim_end()),
        }
        self.emitln("");
        Ok(())
    }

    fn function_params(&self, node: &Node) -> Vec<String> {
        node.find_children(NodeKind::ParmVarDecl)
            .enumerate()
            .map(|(i, param)| {
                let name = if param.name.is_empty() {
                    format!("arg{i}")
                } else {
                    filter_name(&param.name.to_lowercase())
                };
                format!("{name} {}", convert_type(&param.ty.qual).name)
            })
            .collect()
    }

    fn unit_defines_function(&self, name: &str) -> bool {
        self.unit.inner.iter().any(|n| {
            n.kind == NodeKind::FunctionDecl && n.name == name && n.has_child_of_kind(NodeKind::CompoundStmt)
        })
    }

    /// An extern declaration completed later in the same unit.
    fn initialized_later(&self, node: &Node) -> bool {
        self.unit.inner.iter().any(|x| {
            x.kind == NodeKind::VarDecl && x.name == node.name && x.id != node.id && init_expr(x).is_some()
        })
    }

    pub(crate) fn global_var_decl(&mut self, node: &Node) -> GenResult {
        let qual = node.ty.qual.as_str();
        if qual.starts_with("[]") {
            return Ok(());
        }
        let name = filter_name(&node.name);
        let typ = convert_type(qual);
        let init = init_expr(node);
        let is_extern = node.is_extern();

        if self.registry.check_global(&name, &typ.name)? == GlobalCheck::Duplicate {
            debug!("skipping duplicate global {name}");
            return Ok(());
        }
        if is_extern && init.is_none() && self.initialized_later(node) {
            return Ok(());
        }

        let is_fixed_array = qual.contains(']');
        let is_const = init.is_some() && (typ.is_const || is_fixed_array);
        if !self.is_dir && is_extern && node.redeclarations > 0 {
            return Ok(());
        }
        if is_extern && init.is_none() && qual.contains("[]") && !qual.contains('*') {
            return Err(TranslateError::UnsizedExternArray {
                name,
                ty: qual.to_string(),
            });
        }

        let mark = self.out.mark();
        match init {
            Some(value) if is_const => {
                self.registry.add_const(&name);
                self.emitln(&format!("[export:\"{name}\"]"));
                self.emitln("const (");
                self.out.indent();
                self.emit(&format!("{name} = "));
                self.expr(value)?;
                self.out.end_line();
                self.out.dedent();
                self.emitln(")");
            }
            _ => {
                if !self.source_mentions(&node.name) {
                    debug!("global {name} is not in this unit, skipping");
                    return Ok(());
                }
                if is_builtin_global_name(&name) {
                    return Ok(());
                }
                if init.is_none() && (qual.contains("anonymous enum") || qual.contains("unnamed enum")) {
                    return Ok(());
                }
                let attr = if init.is_none() && is_extern && is_fixed_array && node.redeclarations == 0 {
                    "[c_extern]"
                } else {
                    "[weak]"
                };
                self.emitln(attr);
                match init {
                    Some(value) => {
                        self.emit(&format!("__global ( {name} = "));
                        if value.kind == NodeKind::InitListExpr && !is_fixed_array {
                            self.expr(value)?;
                        } else {
                            self.emit(&format!("{}(", typ.name));
                            self.expr(value)?;
                            self.emit(")");
                        }
                        self.emitln(" )");
                    }
                    None => self.emitln(&format!("__global ( {name} {} )", typ.name)),
                }
            }
        }
        self.emitln("");

        if self.is_dir {
            let text = self.out.take_from(mark);
            self.registry.set_global_text(&name, text);
        }
        self.registry.add_global(GlobalRecord {
            name,
            ty: typ.name,
            is_extern,
        });
        Ok(())
    }
}

/// The initializer of a variable declaration, skipping attributes.
pub(crate) fn init_expr(node: &Node) -> Option<&Node> {
    node.inner.iter().find(|c| !c.kind.is_annotation())
}
