//! Goto label resolution.
//!
//! Clang refers to labels by declaration id only. A `goto` emitted before its
//! label gets a placeholder that [`LabelTable::finalize`] patches once the
//! whole unit has been generated.

use hashbrown::HashMap;
use indexmap::IndexSet;
use log::debug;

use crate::error::TranslateError;

const PLACEHOLDER_PREFIX: &str = "__GOTO_PLACEHOLDER_";

#[derive(Debug, Default)]
pub struct LabelTable {
    names: HashMap<String, String>,
    pending: IndexSet<String>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placeholder(id: &str) -> String {
        format!("{PLACEHOLDER_PREFIX}{id}__")
    }

    pub fn define(&mut self, id: &str, name: &str) {
        debug!("label {name} defined with id {id}");
        self.names.insert(id.to_string(), name.to_string());
    }

    /// Name to write for a `goto`: the label itself or a placeholder.
    pub fn target(&mut self, id: &str) -> String {
        match self.names.get(id) {
            Some(name) => name.clone(),
            None => {
                self.pending.insert(id.to_string());
                Self::placeholder(id)
            }
        }
    }

    /// Replaces every placeholder in `out`.
    pub fn finalize(&self, out: &str) -> Result<String, TranslateError> {
        let mut text = out.to_string();
        for id in &self.pending {
            let Some(name) = self.names.get(id) else {
                return Err(TranslateError::UnresolvedLabel { id: id.clone() });
            };
            text = text.replace(&Self::placeholder(id), name);
        }
        Ok(text)
    }
}

pub fn has_placeholder(text: &str) -> bool {
    text.contains(PLACEHOLDER_PREFIX)
}
