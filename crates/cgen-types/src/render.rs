//! C declarator rendering.
//!
//! C declarations read inside-out: `int *p`, `int a[4]`, `int (*p)[4]`,
//! `int (*f)(int)`. The declarator is built by walking from the outermost
//! type constructor inwards, then joined with the base type name.

use crate::types::{Type, TypeData};
use cgen_common::SourceWriter;

impl Type {
    /// Render a declaration of `identifier` with this type.
    ///
    /// An empty identifier yields the plain (abstract) type: `int *`, `int[4]`.
    /// Function types declare a function pointer: `int (*f)(char *)`.
    pub fn declaration(&self, identifier: &str) -> String {
        let (base, declarator) = self.split_declarator(identifier.to_string());
        if declarator.is_empty() {
            base
        } else if declarator.starts_with('[') {
            format!("{base}{declarator}")
        } else {
            format!("{base} {declarator}")
        }
    }

    pub fn write_declaration(&self, identifier: &str, writer: &mut SourceWriter) {
        writer.write(&self.declaration(identifier));
    }

    /// Plain type rendering, as used in casts and forward declarations.
    pub fn write(&self, writer: &mut SourceWriter) {
        self.write_declaration("", writer);
    }

    fn split_declarator(&self, declarator: String) -> (String, String) {
        match self.data() {
            TypeData::Primitive(name) => (name.to_string(), declarator),
            TypeData::Struct(def) => (format!("struct {}", def.mangled_name()), declarator),
            TypeData::Pointer(inner) => {
                let declarator = if inner.is_array() {
                    format!("(*{declarator})")
                } else {
                    format!("*{declarator}")
                };
                inner.split_declarator(declarator)
            }
            TypeData::Array(inner, length) => {
                inner.split_declarator(format!("{declarator}[{length}]"))
            }
            TypeData::Function(signature) => {
                let parameters = signature
                    .parameters
                    .iter()
                    .map(Type::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                signature
                    .return_type
                    .split_declarator(format!("(*{declarator})({parameters})"))
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/render_tests.rs"]
mod render_tests;
