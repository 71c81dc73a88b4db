//! Render the selected program and deliver the text.

use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;

use crate::args::{CliArgs, Program};
use cgen::common::WriterOptions;
use cgen::ir::generate_with;
use cgen::library::{fib_unit, vec_demo};

/// Build the selected program and render it.
pub fn render(args: &CliArgs) -> Result<String> {
    let element = args.element_type();
    let unit = match args.program {
        Program::Fib => fib_unit(element.clone())
            .with_context(|| format!("failed to build fib over `{element}`"))?,
        Program::VecDemo => vec_demo(element.clone())
            .with_context(|| format!("failed to build vec demo over `{element}`"))?,
    };
    let options = WriterOptions {
        indent_width: args.indent,
    };
    Ok(generate_with(&unit, options))
}

/// Render and write to `--out`, or to stdout followed by a line break.
pub fn run(args: &CliArgs) -> Result<()> {
    let text = render(args)?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = text.len(), "wrote source");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}").context("failed to write to stdout")?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod driver_tests;
