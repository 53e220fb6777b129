//! Translation of whole units.
//!
//! A [`Session`] owns the [`SymbolRegistry`] shared by every unit it
//! translates, so declarations repeated across the files of a directory are
//! emitted once. Each call to [`Session::translate`] runs the pre-pass over a
//! fresh tree, generates the unit and resolves its goto placeholders.

use hashbrown::HashMap;
use log::debug;

use crate::ast::{FileMark, Node, NodeKind};
use crate::codegen::Generator;
use crate::error::TranslateError;
use crate::registry::SymbolRegistry;

const HEADER: &str = "[translated]\nmodule main\n\n";
const FILE_SHIM: &str = "[typedef]\nstruct C.FILE {}\n\n";

#[derive(Debug, Default, Clone, Copy)]
pub struct SessionOptions {
    /// Units are translated as part of a directory; globals go to a shared file.
    pub is_dir: bool,
}

#[derive(Debug, Default)]
pub struct Session {
    registry: SymbolRegistry,
    options: SessionOptions,
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        Session {
            registry: SymbolRegistry::new(),
            options,
        }
    }

    pub fn registry(&self) -> &SymbolRegistry {
        &self.registry
    }

    /// Translates one unit. `source` is the raw C text, used to skip
    /// declarations that only come from headers.
    pub fn translate(&mut self, mut root: Node, source: Option<&str>) -> Result<String, TranslateError> {
        prepare(&mut root);

        let mut generator = Generator::new(&mut self.registry, &root, source, self.options.is_dir);
        generator.translate_unit()?;
        let body = generator.finish()?;

        let mut out = String::from(HEADER);
        out.push_str(&body);
        if out.contains("FILE") {
            self.registry.mark_c_file();
            if !self.options.is_dir && out.contains("C.FILE") {
                out.insert_str(HEADER.len(), FILE_SHIM);
            }
        }
        Ok(out)
    }

    /// Contents of the directory-wide globals file.
    pub fn globals_file(&self) -> String {
        let mut lines = vec!["[translated]\n".to_string()];
        if self.registry.uses_c_file() {
            lines.push(FILE_SHIM.trim_end().to_string());
        }
        for (name, text) in self.registry.global_texts() {
            debug!("collecting global {name}");
            lines.push(text.to_string());
        }
        let mut out = lines.join("\n");
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

/// Completes locations, counts redeclarations and flags builtin declarations.
pub fn prepare(root: &mut Node) {
    let mut mark = FileMark::default();
    propagate_files(root, &mut mark);
    count_redeclarations(&mut root.inner);
    mark_builtins(&mut root.inner);
}

/// Clang prints a location's file only when it differs from the last one it
/// printed. Replays the file changes in document order and fills the gaps.
fn propagate_files(node: &mut Node, current: &mut FileMark) {
    for mark in &node.loc.loc_marks {
        *current = mark.clone();
    }
    if node.loc.has_position && node.loc.file.is_empty() {
        node.loc.file = current.file.clone();
        if node.loc.included_from.is_empty() {
            node.loc.included_from = current.included_from.clone();
        }
    }
    for mark in &node.loc.range_marks {
        *current = mark.clone();
    }
    for child in node.array_filler.iter_mut().chain(node.inner.iter_mut()) {
        propagate_files(child, current);
    }
}

fn count_redeclarations(decls: &mut [Node]) {
    let index: HashMap<String, usize> = decls
        .iter()
        .enumerate()
        .filter(|(_, n)| !n.id.is_empty())
        .map(|(i, n)| (n.id.clone(), i))
        .collect();

    let previous: Vec<usize> = decls
        .iter()
        .filter_map(|n| n.previous_decl.as_ref())
        .filter_map(|id| index.get(id).copied())
        .collect();
    for i in previous {
        decls[i].redeclarations += 1;
    }
}

fn mark_builtins(decls: &mut [Node]) {
    for node in decls {
        node.is_builtin = node.has_builtin_origin();
        if matches!(node.kind, NodeKind::NamespaceDecl | NodeKind::LinkageSpecDecl) {
            mark_builtins(&mut node.inner);
        }
    }
}
