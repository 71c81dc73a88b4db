//! Indentation-aware text sink used by every renderer.
//!
//! The writer tracks two pieces of state besides the output buffer:
//!
//! - the current indentation depth, in levels
//! - a "fresh line" flag; leading indentation is emitted once per physical
//!   line, on the first non-empty write after a line break
//!
//! Scoped helpers take a closure so the closing delimiter and the indentation
//! restore always run, however the closure exits.
//!
//! | Helper | Layout |
//! |--------|--------|
//! | `parentheses`, `brackets` | inline, no indentation change |
//! | `braces(BraceStyle::Block)` | `{`, indented body, `}` + line break |
//! | `braces(BraceStyle::Chained)` | like `Block`, but no break after `}` |
//! | `braces(BraceStyle::Members)` | like `Chained`, empty body stays empty |
//! | `braces(BraceStyle::Inline)` | `{...}` on one line |
//! | `comma_delimited` | `, ` before every item after the first |
//! | `lines` | line break after every item |

use std::fmt::Display;

/// Rendering configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterOptions {
    /// Spaces per indentation level.
    pub indent_width: usize,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

/// How a brace pair lays out its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BraceStyle {
    /// Indented body on its own lines; line break after the closing brace.
    Block,
    /// Indented body; the caller continues on the closing brace's line
    /// (`} else {`, `};`).
    Chained,
    /// Declaration list (struct members): laid out like `Chained`, but an
    /// empty body gets no `;` filler.
    Members,
    /// Everything on the current line (initializer lists).
    Inline,
}

#[derive(Debug, Clone)]
pub struct SourceWriter {
    output: String,
    indent_level: usize,
    fresh_line: bool,
    options: WriterOptions,
}

impl Default for SourceWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::with_options(WriterOptions::default())
    }

    pub fn with_options(options: WriterOptions) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            fresh_line: true,
            options,
        }
    }

    // =========================================================================
    // Primitive output
    // =========================================================================

    /// Append `text`, indenting first if this is the first non-empty write on the line.
    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.fresh_line {
            let width = self.indent_level * self.options.indent_width;
            self.output.extend(std::iter::repeat_n(' ', width));
            self.fresh_line = false;
        }
        self.output.push_str(text);
    }

    pub fn write_display(&mut self, value: impl Display) {
        self.write(&value.to_string());
    }

    pub fn write_space(&mut self) {
        self.write(" ");
    }

    pub fn write_line(&mut self) {
        self.output.push('\n');
        self.fresh_line = true;
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    // =========================================================================
    // State queries
    // =========================================================================

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    pub fn is_fresh_line(&self) -> bool {
        self.fresh_line
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn into_output(self) -> String {
        self.output
    }

    // =========================================================================
    // Scoped wrapping
    // =========================================================================

    pub fn parentheses<R>(&mut self, body: impl FnOnce(&mut Self) -> R) -> R {
        self.wrap("(", ")", body)
    }

    pub fn brackets<R>(&mut self, body: impl FnOnce(&mut Self) -> R) -> R {
        self.wrap("[", "]", body)
    }

    fn wrap<R>(&mut self, open: &str, close: &str, body: impl FnOnce(&mut Self) -> R) -> R {
        self.write(open);
        let result = body(self);
        self.write(close);
        result
    }

    /// Wrap `body` in braces.
    ///
    /// A statement body (`Block`, `Chained`) that writes nothing gets a lone
    /// `;` so the block stays syntactically valid.
    pub fn braces<R>(&mut self, style: BraceStyle, body: impl FnOnce(&mut Self) -> R) -> R {
        if style == BraceStyle::Inline {
            return self.wrap("{", "}", body);
        }

        self.write("{");
        self.increase_indent();
        self.write_line();
        let start = self.output.len();
        let result = body(self);
        if self.output.len() == start && style != BraceStyle::Members {
            self.write(";");
        }
        if !self.fresh_line {
            self.write_line();
        }
        self.decrease_indent();
        self.write("}");
        if style == BraceStyle::Block {
            self.write_line();
        }
        result
    }

    /// Call `each` once per item, writing `delimiter` before every call after the first.
    pub fn delimited<I, F>(&mut self, delimiter: &str, items: I, mut each: F)
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item),
    {
        let mut prefix = "";
        for item in items {
            self.write(prefix);
            prefix = delimiter;
            each(self, item);
        }
    }

    pub fn comma_delimited<I, F>(&mut self, items: I, each: F)
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item),
    {
        self.delimited(", ", items, each);
    }

    /// Call `each` once per item, breaking the line after every call.
    pub fn lines<I, F>(&mut self, items: I, mut each: F)
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item),
    {
        for item in items {
            each(self, item);
            self.write_line();
        }
    }
}

#[cfg(test)]
#[path = "../tests/source_writer_tests.rs"]
mod source_writer_tests;
