//! Common types and utilities for the cgen crates.
//!
//! This crate provides the pieces every other cgen crate builds on:
//! - The construction-time error taxonomy (`Error`, `Result`)
//! - The stateful text sink used for rendering (`SourceWriter`, `WriterOptions`, `BraceStyle`)

// Construction-time failures
pub mod error;
pub use error::{Error, Result};

// Indentation-aware text sink
pub mod source_writer;
pub use source_writer::{BraceStyle, SourceWriter, WriterOptions};
