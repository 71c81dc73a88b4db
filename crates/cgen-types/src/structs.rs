//! Struct declarations.

use crate::mangle::{TypeArguments, mangle_name};
use crate::types::Type;
use std::cell::{Ref, RefCell};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub ty: Type,
    pub name: String,
}

/// A struct declaration, optionally instantiated with named type arguments.
///
/// Fields are added while building; wrap the declaration in an `Rc` (or
/// convert it with `Type::from`) to use it as a type. Every wrap is a distinct
/// type. Fields can still be appended through the `Rc` with [`push_field`],
/// so a field may point back at its own struct:
///
/// ```
/// use cgen_types::{StructDef, Type, primitives};
/// use std::rc::Rc;
///
/// let node = Rc::new(StructDef::new("Node").with_field(primitives::int(), "value"));
/// node.push_field(Type::pointer(Type::structure(node.clone())), "next");
/// assert_eq!(node.fields().len(), 2);
/// ```
///
/// [`push_field`]: StructDef::push_field
#[derive(Debug, Clone)]
pub struct StructDef {
    name: String,
    type_arguments: TypeArguments,
    fields: RefCell<Vec<Field>>,
}

impl StructDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_arguments: TypeArguments::new(),
            fields: RefCell::new(Vec::new()),
        }
    }

    /// Declaration instantiated with the given parameter bindings.
    pub fn generic(name: impl Into<String>, type_arguments: TypeArguments) -> Self {
        Self {
            name: name.into(),
            type_arguments,
            fields: RefCell::new(Vec::new()),
        }
    }

    pub fn with_type_argument(mut self, parameter: impl Into<String>, argument: Type) -> Self {
        self.type_arguments.insert(parameter.into(), argument);
        self
    }

    pub fn add_field(&mut self, ty: Type, name: impl Into<String>) -> &mut Self {
        self.fields.get_mut().push(Field {
            ty,
            name: name.into(),
        });
        self
    }

    /// Append a field to a shared declaration. A field referring back to the
    /// declaration forms an `Rc` cycle that is never freed.
    pub fn push_field(&self, ty: Type, name: impl Into<String>) {
        self.fields.borrow_mut().push(Field {
            ty,
            name: name.into(),
        });
    }

    pub fn with_field(mut self, ty: Type, name: impl Into<String>) -> Self {
        self.add_field(ty, name);
        self
    }

    /// Base name, without type arguments.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_arguments(&self) -> &TypeArguments {
        &self.type_arguments
    }

    pub fn fields(&self) -> Ref<'_, [Field]> {
        Ref::map(self.fields.borrow(), Vec::as_slice)
    }

    pub fn field(&self, name: &str) -> Option<Field> {
        self.fields
            .borrow()
            .iter()
            .find(|field| field.name == name)
            .cloned()
    }

    /// Name used in emitted text: the base name for plain structs, the mangled
    /// name when type arguments are present.
    pub fn mangled_name(&self) -> String {
        mangle_name(&self.name, &self.type_arguments)
    }
}
