use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use cgen::types::{Type, primitives};

/// CLI arguments for the cgen binary.
#[derive(Parser, Debug)]
#[command(
    name = "cgen",
    version,
    about = "Render the cgen sample programs as C source"
)]
pub struct CliArgs {
    /// Program to render.
    #[arg(value_enum)]
    pub program: Program,

    /// Element type: the integer type of `fib` (default `int`) or the
    /// container element of `vec-demo` (default `i32`).
    #[arg(short = 'e', long, value_enum, ignore_case = true)]
    pub element: Option<Element>,

    /// Write the source to this file instead of stdout.
    #[arg(short = 'o', long)]
    pub out: Option<PathBuf>,

    /// Spaces per indentation level.
    #[arg(long, default_value_t = 2)]
    pub indent: usize,
}

impl CliArgs {
    /// Element type after applying the per-program default.
    pub fn element_type(&self) -> Type {
        let element = self.element.unwrap_or(match self.program {
            Program::Fib => Element::Int,
            Program::VecDemo => Element::I32,
        });
        element.to_type()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Program {
    /// Iterative Fibonacci.
    Fib,
    /// `main` filling a growable array from `argv[1]`.
    #[value(name = "vec-demo", alias = "vec")]
    VecDemo,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Element {
    Int,
    I32,
    I64,
    U8,
    Usize,
    #[value(name = "char-ptr", alias = "str")]
    CharPtr,
}

impl Element {
    pub fn to_type(self) -> Type {
        match self {
            Self::Int => primitives::int(),
            Self::I32 => primitives::int32(),
            Self::I64 => primitives::int64(),
            Self::U8 => primitives::uint8(),
            Self::Usize => primitives::size(),
            Self::CharPtr => Type::pointer(primitives::char()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod args_tests;
