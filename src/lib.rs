//! cgen: build a typed C IR from Rust and render it as C source.
//!
//! | Module | Crate | Contents |
//! |--------|-------|----------|
//! | [`common`] | `cgen-common` | `Error`, `Result`, `SourceWriter`, `WriterOptions` |
//! | [`types`] | `cgen-types` | `Type`, `StructDef`, primitives, mangling |
//! | [`ir`] | `cgen-ir` | nodes, `Function` builder, token grammar, `SourceCode`, `generate` |
//! | [`library`] | `cgen-std` | generic `Vec` container and sample programs |
//!
//! ```
//! use cgen::ir::{Function, SourceCode, generate};
//! use cgen::types::primitives;
//!
//! let mut f = Function::new("twice").with_return_type(primitives::int());
//! let x = f.add_parameter(primitives::int(), Some("x"));
//! f.ret((&x, "+", &x)).unwrap();
//!
//! let mut unit = SourceCode::new();
//! unit.add(f);
//! assert_eq!(
//!     generate(&unit),
//!     "int twice(int);\nint twice(int x) {\n  return (x) + (x);\n}"
//! );
//! ```

pub use cgen_common as common;
pub use cgen_ir as ir;
pub use cgen_std as library;
pub use cgen_types as types;

pub use cgen_common::{Error, Result};
pub use cgen_ir::{Function, SourceCode, generate, generate_with};
pub use cgen_types::Type;
