//! Session-wide tables of everything already emitted.
//!
//! One registry lives for a whole run, so a directory of files shares it and
//! the first occurrence of a name wins.

use hashbrown::HashSet;
use indexmap::{IndexMap, IndexSet};

use crate::error::TranslateError;
use crate::types::types_are_equal;

/// One global variable seen so far, keyed by its source name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalRecord {
    pub name: String,
    pub ty: String,
    pub is_extern: bool,
}

/// Outcome of checking a global against earlier declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalCheck {
    /// First declaration, or an earlier extern one being completed.
    Emit,
    /// A defining declaration with the same type was already emitted.
    Duplicate,
}

#[derive(Debug, Default)]
pub struct SymbolRegistry {
    types: HashSet<String>,
    enums: HashSet<String>,
    functions: HashSet<String>,
    consts: HashSet<String>,
    enum_members: IndexMap<String, IndexSet<String>>,
    globals: IndexMap<String, GlobalRecord>,
    global_text: IndexMap<String, String>,
    uses_c_file: bool,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains(name)
    }

    /// Returns false when the type was already registered.
    pub fn add_type(&mut self, name: &str) -> bool {
        self.types.insert(name.to_string())
    }

    pub fn has_enum(&self, name: &str) -> bool {
        self.enums.contains(name)
    }

    pub fn add_enum(&mut self, name: &str, members: IndexSet<String>) {
        self.enums.insert(name.to_string());
        self.enum_members.entry(name.to_string()).or_default().extend(members);
    }

    /// The enum owning `member`; the first registered enum wins.
    pub fn enum_of(&self, member: &str) -> Option<&str> {
        self.enum_members
            .iter()
            .find(|(_, members)| members.contains(member))
            .map(|(name, _)| name.as_str())
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains(name)
    }

    pub fn add_function(&mut self, name: &str) {
        self.functions.insert(name.to_string());
    }

    pub fn has_const(&self, name: &str) -> bool {
        self.consts.contains(name)
    }

    pub fn add_const(&mut self, name: &str) {
        self.consts.insert(name.to_string());
    }

    pub fn has_global(&self, name: &str) -> bool {
        self.globals.contains_key(name)
    }

    /// Checks a new declaration of `name` against what was emitted before.
    pub fn check_global(&self, name: &str, ty: &str) -> Result<GlobalCheck, TranslateError> {
        let Some(existing) = self.globals.get(name) else {
            return Ok(GlobalCheck::Emit);
        };
        if !types_are_equal(&existing.ty, ty) {
            return Err(TranslateError::DuplicateGlobal {
                name: name.to_string(),
                existing: existing.ty.clone(),
                new: ty.to_string(),
            });
        }
        if existing.is_extern {
            Ok(GlobalCheck::Emit)
        } else {
            Ok(GlobalCheck::Duplicate)
        }
    }

    pub fn add_global(&mut self, record: GlobalRecord) {
        self.globals.insert(record.name.clone(), record);
    }

    /// Stores the emitted text of a global for the directory-wide globals file.
    pub fn set_global_text(&mut self, name: &str, text: String) {
        self.global_text.insert(name.to_string(), text);
    }

    pub fn global_texts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.global_text.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn mark_c_file(&mut self) {
        self.uses_c_file = true;
    }

    pub fn uses_c_file(&self) -> bool {
        self.uses_c_file
    }
}
