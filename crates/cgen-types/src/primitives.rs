//! Well-known C primitives.
//!
//! Each constructor returns a fresh handle; primitives compare by name, so
//! `primitives::int32() == Type::primitive("int32_t")`.

use crate::types::Type;

/// Names accepted as integer types for literals, indices and shifts.
const INTEGER_NAMES: &[&str] = &[
    "char",
    "signed char",
    "unsigned char",
    "short",
    "unsigned short",
    "int",
    "unsigned int",
    "long",
    "unsigned long",
    "long long",
    "unsigned long long",
    "int8_t",
    "int16_t",
    "int32_t",
    "int64_t",
    "uint8_t",
    "uint16_t",
    "uint32_t",
    "uint64_t",
    "size_t",
    "ptrdiff_t",
];

pub fn is_integer_name(name: &str) -> bool {
    INTEGER_NAMES.contains(&name)
}

/// `void`, the unit type.
pub fn void() -> Type {
    Type::primitive("void")
}

pub fn int() -> Type {
    Type::primitive("int")
}

pub fn char() -> Type {
    Type::primitive("char")
}

pub fn int8() -> Type {
    Type::primitive("int8_t")
}

pub fn int16() -> Type {
    Type::primitive("int16_t")
}

pub fn int32() -> Type {
    Type::primitive("int32_t")
}

pub fn int64() -> Type {
    Type::primitive("int64_t")
}

pub fn uint8() -> Type {
    Type::primitive("uint8_t")
}

pub fn uint16() -> Type {
    Type::primitive("uint16_t")
}

pub fn uint32() -> Type {
    Type::primitive("uint32_t")
}

pub fn uint64() -> Type {
    Type::primitive("uint64_t")
}

/// Type of `sizeof` and of array indices.
pub fn size() -> Type {
    Type::primitive("size_t")
}

/// Result type of the comparison operators.
pub fn comparison() -> Type {
    int()
}
