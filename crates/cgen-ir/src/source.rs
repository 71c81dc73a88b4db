//! Translation-unit aggregation.
//!
//! `SourceCode::add` sorts items into includes, struct definitions and
//! functions. Composite items (anything implementing [`Composite`], such as a
//! generic container bundle) are flattened recursively.
//!
//! Output order is fixed: includes, struct definitions, function forward
//! declarations, function definitions. Includes are de-duplicated and keep
//! their insertion order. Structs and functions are de-duplicated by emitted
//! name; the first one added wins.

use crate::function::Function;
use cgen_types::StructDef;
use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use std::rc::Rc;
use tracing::{debug, warn};

/// `#include <name>` (system) or `#include "name"` (local).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Include {
    pub name: String,
    pub system: bool,
}

impl Include {
    pub fn system(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system: true,
        }
    }

    pub fn local(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system: false,
        }
    }
}

/// Anything that contributes several top-level items at once.
pub trait Composite {
    fn items(&self) -> Vec<Item>;
}

/// Top-level entry of a translation unit.
#[derive(Debug, Clone)]
pub enum Item {
    Include(Include),
    Struct(Rc<StructDef>),
    Function(Function),
    Composite(Vec<Item>),
}

impl From<Include> for Item {
    fn from(include: Include) -> Self {
        Self::Include(include)
    }
}

impl From<Rc<StructDef>> for Item {
    fn from(def: Rc<StructDef>) -> Self {
        Self::Struct(def)
    }
}

impl From<Function> for Item {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl<T: Composite + ?Sized> From<&T> for Item {
    fn from(composite: &T) -> Self {
        Self::Composite(composite.items())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SourceCode {
    includes: IndexSet<Include>,
    structs: Vec<Rc<StructDef>>,
    functions: Vec<Function>,
    struct_names: FxHashSet<String>,
    function_names: FxHashSet<String>,
}

impl SourceCode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: impl Into<Item>) {
        match item.into() {
            Item::Include(include) => {
                self.includes.insert(include);
            }
            Item::Struct(def) => self.add_struct(def),
            Item::Function(function) => self.add_function(function),
            Item::Composite(items) => {
                for item in items {
                    self.add(item);
                }
            }
        }
    }

    fn add_struct(&mut self, def: Rc<StructDef>) {
        let name = def.mangled_name();
        if self.struct_names.insert(name.clone()) {
            self.structs.push(def);
            return;
        }
        if self.structs.iter().any(|existing| Rc::ptr_eq(existing, &def)) {
            debug!(name = %name, "struct already in unit");
        } else {
            warn!(name = %name, "dropping second struct declaration with the same name");
        }
    }

    fn add_function(&mut self, function: Function) {
        let name = function.mangled_name();
        if self.function_names.insert(name.clone()) {
            self.functions.push(function);
        } else {
            warn!(name = %name, "dropping second function with the same name");
        }
    }

    pub fn includes(&self) -> impl Iterator<Item = &Include> {
        self.includes.iter()
    }

    pub fn structs(&self) -> &[Rc<StructDef>] {
        &self.structs
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }
}

#[cfg(test)]
#[path = "../tests/source_tests.rs"]
mod source_tests;
