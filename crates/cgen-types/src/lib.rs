//! Type model for the cgen IR.
//!
//! - `Type` / `TypeData`: primitives, pointers, arrays, function types, structs
//! - `StructDef`: struct declarations with fields and named type arguments
//! - `primitives`: the well-known C primitives (`void`, `int`, `int32_t`, `size_t`, ...)
//! - Declarator rendering (`Type::declaration`, `Type::write_declaration`)
//! - Mangling (`Type::mangled`, `mangle_name`) for generic instantiations

pub mod mangle;
pub mod primitives;
mod render;
pub mod structs;
pub mod types;

pub use mangle::{TypeArguments, mangle_name};
pub use structs::{Field, StructDef};
pub use types::{FunctionType, Type, TypeData};
