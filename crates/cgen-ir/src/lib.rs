//! Typed C IR: nodes, function builder, token grammar and emitter.
//!
//! # Architecture
//!
//! Hosts build `Type`s, then functions and structs through the `Function`
//! builder (directly with node constructors, or via the token grammar),
//! collect them in a `SourceCode` unit and render it once with `generate`.
//!
//! Node constructors check operand types as they go; a failed check aborts
//! construction of that node with a `cgen_common::Error`.

pub mod emit;
pub mod expr;
pub mod function;
pub mod grammar;
pub mod ops;
pub mod source;
pub mod stmt;

pub use emit::{Emit, generate, generate_with};
pub use expr::{
    Call, Cast, Compound, Expression, GetAttr, GetItem, Int, Null, Op, StringLiteral, Variable,
};
pub use function::{Function, Label};
pub use grammar::{Node, Token, parse, parse_expression, parse_type};
pub use ops::Operator;
pub use source::{Composite, Include, Item, SourceCode};
pub use stmt::{Assign, Block, Declaration, IfElse, SetAttr, SetItem, Statement, While};
