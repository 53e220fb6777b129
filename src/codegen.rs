//! Target source generation.
//!
//! [`Generator`] walks one translation unit and writes target code into a
//! [`Writer`]. The work is split by concern:
//! - `decl`: top-level declarations (records, typedefs, enums, functions, globals)
//! - `stmt`: statements and local variables
//! - `expr`: expressions, including calls and initializer lists
//! - `switch`: `switch` lowering and enum disambiguation
//! - `cpp`: the C++ subset

mod cpp;
mod decl;
mod expr;
mod stmt;
mod switch;
pub mod writer;

pub use writer::Writer;

use crate::ast::Node;
use crate::error::TranslateError;
use crate::labels::LabelTable;
use crate::registry::SymbolRegistry;

pub type GenResult<T = ()> = Result<T, TranslateError>;

/// Flags describing where the generator currently is.
#[derive(Debug, Default, Clone)]
pub(crate) struct Context {
    /// Switches enclosing the current statement, reset inside loops.
    pub switch_depth: usize,
    /// Enum of the innermost switch dispatching on an enum.
    pub switch_enum: Option<String>,
    pub inside_array_index: bool,
    pub inside_main: bool,
    /// Integer literals are written as `true`/`false`.
    pub returning_bool: bool,
    pub skip_parens: bool,
}

pub struct Generator<'a> {
    pub(crate) out: Writer,
    pub(crate) registry: &'a mut SymbolRegistry,
    pub(crate) labels: LabelTable,
    pub(crate) unit: &'a Node,
    pub(crate) source: Option<&'a str>,
    pub(crate) is_dir: bool,
    pub(crate) ctx: Context,
}

impl<'a> Generator<'a> {
    pub fn new(registry: &'a mut SymbolRegistry, unit: &'a Node, source: Option<&'a str>, is_dir: bool) -> Self {
        Generator {
            out: Writer::new(),
            registry,
            labels: LabelTable::new(),
            unit,
            source,
            is_dir,
            ctx: Context::default(),
        }
    }

    pub(crate) fn emit(&mut self, s: &str) {
        self.out.emit(s);
    }

    pub(crate) fn emitln(&mut self, s: &str) {
        self.out.emitln(s);
    }

    /// Whether `word` occurs in the raw C source; always true without source text.
    pub(crate) fn source_mentions(&self, word: &str) -> bool {
        self.source.is_none_or(|src| src.contains(word))
    }

    /// Translates every top-level declaration of the unit.
    pub fn translate_unit(&mut self) -> GenResult {
        let unit = self.unit;
        let decls = &unit.inner;
        for (i, node) in decls.iter().enumerate() {
            self.top_level(node, decls.get(i + 1))?;
        }
        Ok(())
    }

    /// Returns the generated text with every goto placeholder resolved.
    pub fn finish(self) -> GenResult<String> {
        let text = self.out.finish();
        self.labels.finalize(&text)
    }
}
