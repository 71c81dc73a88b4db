//! Core type representation.
//!
//! `Type` is a cheap-to-clone handle over an immutable `TypeData`. Equality is
//! structural for primitives, pointers, arrays and function types. Structs
//! compare by identity of their declaration: two separately built `StructDef`s
//! are different types even when name and fields coincide.

use crate::structs::StructDef;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

// =============================================================================
// TypeData
// =============================================================================

#[derive(Debug, Clone)]
pub enum TypeData {
    /// Named builtin: `int`, `char`, `int32_t`, `size_t`, ...
    Primitive(Cow<'static, str>),
    /// `inner *`
    Pointer(Type),
    /// `inner [length]`
    Array(Type, usize),
    /// Function signature; as a value it is a function pointer.
    Function(FunctionType),
    /// `struct <mangled name>`
    Struct(Rc<StructDef>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionType {
    pub return_type: Type,
    pub parameters: Vec<Type>,
}

impl PartialEq for TypeData {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primitive(a), Self::Primitive(b)) => a == b,
            (Self::Pointer(a), Self::Pointer(b)) => a == b,
            (Self::Array(a, n), Self::Array(b, m)) => n == m && a == b,
            (Self::Function(a), Self::Function(b)) => a == b,
            (Self::Struct(a), Self::Struct(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for TypeData {}

impl Hash for TypeData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Primitive(name) => name.hash(state),
            Self::Pointer(inner) => inner.hash(state),
            Self::Array(inner, length) => {
                inner.hash(state);
                length.hash(state);
            }
            Self::Function(signature) => signature.hash(state),
            Self::Struct(def) => std::ptr::hash(Rc::as_ptr(def), state),
        }
    }
}

// =============================================================================
// Type
// =============================================================================

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Type(Rc<TypeData>);

impl Type {
    pub fn new(data: TypeData) -> Self {
        Self(Rc::new(data))
    }

    pub fn data(&self) -> &TypeData {
        &self.0
    }

    pub fn primitive(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(TypeData::Primitive(name.into()))
    }

    pub fn pointer(inner: Type) -> Self {
        Self::new(TypeData::Pointer(inner))
    }

    pub fn array(inner: Type, length: usize) -> Self {
        Self::new(TypeData::Array(inner, length))
    }

    pub fn function(return_type: Type, parameters: Vec<Type>) -> Self {
        Self::new(TypeData::Function(FunctionType {
            return_type,
            parameters,
        }))
    }

    pub fn structure(def: Rc<StructDef>) -> Self {
        Self::new(TypeData::Struct(def))
    }

    // =========================================================================
    // Classification
    // =========================================================================

    pub fn primitive_name(&self) -> Option<&str> {
        match self.data() {
            TypeData::Primitive(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_void(&self) -> bool {
        self.primitive_name() == Some("void")
    }

    pub fn is_integer(&self) -> bool {
        self.primitive_name()
            .is_some_and(crate::primitives::is_integer_name)
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self.data(), TypeData::Pointer(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.data(), TypeData::Array(..))
    }

    /// Scalar types can be cast to each other.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self.data(),
            TypeData::Primitive(_) | TypeData::Pointer(_) | TypeData::Function(_)
        )
    }

    pub fn pointee(&self) -> Option<&Type> {
        match self.data() {
            TypeData::Pointer(inner) => Some(inner),
            _ => None,
        }
    }

    /// Element type of a pointer or array.
    pub fn element(&self) -> Option<&Type> {
        match self.data() {
            TypeData::Pointer(inner) | TypeData::Array(inner, _) => Some(inner),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionType> {
        match self.data() {
            TypeData::Function(signature) => Some(signature),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&Rc<StructDef>> {
        match self.data() {
            TypeData::Struct(def) => Some(def),
            _ => None,
        }
    }

    /// Callable signature. A `Function` value already is a function pointer,
    /// so a pointer to one must be dereferenced before it can be called.
    pub fn callable(&self) -> Option<&FunctionType> {
        self.as_function()
    }
}

impl From<Rc<StructDef>> for Type {
    fn from(def: Rc<StructDef>) -> Self {
        Self::structure(def)
    }
}

impl From<StructDef> for Type {
    fn from(def: StructDef) -> Self {
        Self::structure(Rc::new(def))
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({self})")
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.declaration(""))
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod types_tests;
