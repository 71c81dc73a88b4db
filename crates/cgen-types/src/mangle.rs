//! Deterministic naming for generic instantiations.
//!
//! Every type has a mangled fragment:
//!
//! | Type | Fragment |
//! |------|----------|
//! | `Primitive(name)` | `name` (spaces become `_`) |
//! | `Pointer(inner)` | `ptr_<inner>` |
//! | `Array(inner, n)` | `array<n>_<inner>` |
//! | `Function(ret, params)` | `fn_<param>..._ret_<ret>` |
//! | `Struct` | `struct_<mangled name>` |
//!
//! A declaration with type arguments is named `<name>_` followed by
//! `_<fragment>` for each argument, in parameter-name order: `Vec` with
//! `T = int32_t` becomes `Vec__int32_t`. Identical bindings always produce
//! byte-identical names.

use crate::types::{Type, TypeData};
use std::collections::BTreeMap;

/// Parameter name to argument binding. Ordered so iteration is the mangling order.
pub type TypeArguments = BTreeMap<String, Type>;

pub fn mangle_name(name: &str, type_arguments: &TypeArguments) -> String {
    if type_arguments.is_empty() {
        return name.to_string();
    }
    let mut mangled = format!("{name}_");
    for argument in type_arguments.values() {
        mangled.push('_');
        mangled.push_str(&argument.mangled());
    }
    tracing::trace!(name, mangled = %mangled, "mangled generic name");
    mangled
}

impl Type {
    /// Canonical identifier fragment for this type.
    pub fn mangled(&self) -> String {
        match self.data() {
            TypeData::Primitive(name) => name.replace(' ', "_"),
            TypeData::Pointer(inner) => format!("ptr_{}", inner.mangled()),
            TypeData::Array(inner, length) => format!("array{length}_{}", inner.mangled()),
            TypeData::Function(signature) => {
                let mut fragment = String::from("fn");
                for parameter in &signature.parameters {
                    fragment.push('_');
                    fragment.push_str(&parameter.mangled());
                }
                fragment.push_str("_ret_");
                fragment.push_str(&signature.return_type.mangled());
                fragment
            }
            TypeData::Struct(def) => format!("struct_{}", def.mangled_name()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/mangle_tests.rs"]
mod mangle_tests;
