//! Errors raised while assembling the IR.
//!
//! Every variant is produced at construction time of the offending node or
//! statement. Nothing is recovered locally: callers treat these as bugs in
//! the generator that built the tree.
//!
//! Types are carried as their rendered C text so this crate stays independent
//! of the type model.

use thiserror::Error;

/// Construction-time failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Operand, assignment, return or argument types disagree.
    #[error("type mismatch in {context}: expected `{expected}`, found `{found}`")]
    TypeMismatch {
        context: String,
        expected: String,
        found: String,
    },

    /// Attribute access on a name absent from the struct's field list.
    #[error("struct `{structure}` has no field `{field}`")]
    UnknownField { structure: String, field: String },

    /// A token tuple matched no recognized grammar shape.
    #[error("unrecognized token shape: {tokens}")]
    GrammarError { tokens: String },

    /// Cast between types the target language cannot convert.
    #[error("cannot cast `{from}` to `{to}`")]
    InvalidCast { from: String, to: String },

    /// Operator string outside the supported operator set.
    #[error("unsupported operator `{operator}`")]
    UnsupportedOperator { operator: String },

    /// Call with the wrong number of arguments.
    #[error("`{callee}` expects {expected} argument(s), found {found}")]
    ArityMismatch {
        callee: String,
        expected: usize,
        found: usize,
    },

    /// Call through a value whose type is known and is not a function.
    #[error("`{found}` is not callable")]
    NotCallable { found: String },

    /// Indexing a value whose type is known and is neither pointer nor array.
    #[error("`{found}` cannot be indexed")]
    NotIndexable { found: String },

    /// Attribute access on a value whose type is known and is not a struct.
    #[error("`{found}` is not a struct")]
    NotAStruct { found: String },
}

impl Error {
    /// Shorthand for [`Error::TypeMismatch`].
    pub fn mismatch(
        context: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            context: context.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Shorthand for [`Error::GrammarError`].
    pub fn grammar(tokens: impl Into<String>) -> Self {
        Self::GrammarError {
            tokens: tokens.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "../tests/error_tests.rs"]
mod error_tests;
