//! Ready-made C building blocks on top of `cgen-ir`.
//!
//! - [`vec`]: a growable array (`struct Vec` plus `vec_new`, `vec_drop`,
//!   `vec_reserve`, `vec_push`, `vec_get`) instantiated per element type.
//! - [`gallery`]: small complete programs used by the CLI, benches and tests.

pub mod gallery;
pub mod vec;

pub use gallery::{fib, fib_unit, vec_demo, vec_demo_main};
pub use vec::{VecInstance, VecRegistry};
