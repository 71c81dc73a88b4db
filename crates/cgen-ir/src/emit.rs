//! Rendering of IR nodes to C source text.
//!
//! Layout rules:
//! - two-space indentation per nesting level (configurable via `WriterOptions`)
//! - opening brace on the header line, separated by one space
//! - every simple statement ends with `;`
//! - both operands of a binary operator are always parenthesized, as is the
//!   operand of a unary operator
//! - a translation unit emits includes, struct definitions, forward
//!   declarations and definitions, in that order

use crate::expr::{Expression, GetAttr, GetItem};
use crate::function::Function;
use crate::source::{Include, SourceCode};
use crate::stmt::{Block, Statement};
use cgen_common::{BraceStyle, SourceWriter, WriterOptions};
use cgen_types::{StructDef, Type};

/// Node that can render itself into a `SourceWriter`.
pub trait Emit {
    fn emit(&self, writer: &mut SourceWriter);
}

/// Render `node` with default options.
pub fn generate<T: Emit + ?Sized>(node: &T) -> String {
    generate_with(node, WriterOptions::default())
}

/// Render `node`; trailing line breaks are trimmed from the result.
pub fn generate_with<T: Emit + ?Sized>(node: &T, options: WriterOptions) -> String {
    let mut writer = SourceWriter::with_options(options);
    node.emit(&mut writer);
    let mut text = writer.into_output();
    let trimmed = text.trim_end_matches('\n').len();
    text.truncate(trimmed);
    tracing::debug!(bytes = text.len(), "generated source");
    text
}

// =============================================================================
// Expressions
// =============================================================================

impl Emit for Expression {
    fn emit(&self, writer: &mut SourceWriter) {
        match self {
            Self::Variable(variable) => writer.write(&variable.name),
            Self::Int(literal) => writer.write_display(literal.value),
            Self::String(literal) => write_string_literal(&literal.value, writer),
            Self::Null(_) => writer.write("NULL"),
            Self::Call(call) => {
                emit_postfix_operand(&call.callee, writer);
                writer.parentheses(|w| {
                    w.comma_delimited(&call.arguments, |w, argument| argument.emit(w));
                });
            }
            Self::Op(op) => {
                if let Some(left) = &op.left {
                    writer.parentheses(|w| left.emit(w));
                    writer.write_space();
                    writer.write(op.operator.as_str());
                    writer.write_space();
                } else {
                    writer.write(op.operator.as_str());
                }
                writer.parentheses(|w| op.right.emit(w));
            }
            Self::GetItem(item) => emit_get_item(item, writer),
            Self::GetAttr(attr) => emit_get_attr(attr, writer),
            Self::Cast(cast) => {
                writer.parentheses(|w| cast.target.write(w));
                writer.parentheses(|w| cast.inner.emit(w));
            }
            Self::Compound(compound) => {
                writer.parentheses(|w| compound.ty.write(w));
                writer.braces(BraceStyle::Inline, |w| {
                    w.comma_delimited(&compound.values, |w, value| value.emit(w));
                });
            }
            Self::TypeName(ty) => ty.write(writer),
        }
    }
}

fn emit_get_item(item: &GetItem, writer: &mut SourceWriter) {
    emit_postfix_operand(&item.array, writer);
    writer.brackets(|w| item.index.emit(w));
}

fn emit_get_attr(attr: &GetAttr, writer: &mut SourceWriter) {
    emit_postfix_operand(&attr.base, writer);
    writer.write(if attr.arrow { "->" } else { "." });
    writer.write(&attr.field);
}

/// Operands of `()`, `[]`, `.` and `->` need parentheses unless they are atoms
/// or postfix expressions themselves.
fn emit_postfix_operand(expression: &Expression, writer: &mut SourceWriter) {
    match expression {
        Expression::Op(_) | Expression::Cast(_) | Expression::Compound(_) => {
            writer.parentheses(|w| expression.emit(w));
        }
        _ => expression.emit(writer),
    }
}

fn write_string_literal(value: &str, writer: &mut SourceWriter) {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('"');
    for ch in value.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\0' => escaped.push_str("\\0"),
            c if c.is_ascii_control() => escaped.push_str(&format!("\\x{:02x}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped.push('"');
    writer.write(&escaped);
}

// =============================================================================
// Statements
// =============================================================================

impl Emit for Statement {
    fn emit(&self, writer: &mut SourceWriter) {
        match self {
            Self::Declare(declaration) => {
                declaration.ty.write_declaration(&declaration.name, writer);
                writer.write(";");
            }
            Self::Assign(assign) => {
                assign.place.emit(writer);
                writer.write(" = ");
                assign.source.emit(writer);
                writer.write(";");
            }
            Self::Return(value) => {
                writer.write("return");
                if let Some(value) = value {
                    writer.write_space();
                    value.emit(writer);
                }
                writer.write(";");
            }
            Self::Run(expression) => {
                expression.emit(writer);
                writer.write(";");
            }
            Self::SetItem(set) => {
                emit_get_item(&set.target, writer);
                writer.write(" = ");
                set.source.emit(writer);
                writer.write(";");
            }
            Self::SetAttr(set) => {
                emit_get_attr(&set.target, writer);
                writer.write(" = ");
                set.source.emit(writer);
                writer.write(";");
            }
            Self::IfElse(branch) => {
                writer.write("if ");
                writer.parentheses(|w| branch.condition.emit(w));
                writer.write_space();
                branch.positive.emit_braced(BraceStyle::Chained, writer);
                if !branch.negative.is_empty() {
                    writer.write(" else ");
                    branch.negative.emit_braced(BraceStyle::Chained, writer);
                }
            }
            Self::While(body) => {
                writer.write("while ");
                writer.parentheses(|w| body.condition.emit(w));
                writer.write_space();
                body.body.emit_braced(BraceStyle::Chained, writer);
            }
            Self::Label(name) => {
                writer.write(name);
                writer.write(":;");
            }
            Self::Goto(name) => {
                writer.write("goto ");
                writer.write(name);
                writer.write(";");
            }
        }
    }
}

impl Block {
    /// Braced statement list, one statement per line.
    pub fn emit_braced(&self, style: BraceStyle, writer: &mut SourceWriter) {
        writer.braces(style, |w| {
            w.lines(self.statements(), |w, statement| statement.emit(w));
        });
    }
}

impl Emit for Block {
    fn emit(&self, writer: &mut SourceWriter) {
        self.emit_braced(BraceStyle::Block, writer);
    }
}

// =============================================================================
// Declarations
// =============================================================================

impl Function {
    fn write_signature(&self, named: bool, writer: &mut SourceWriter) {
        let parameters = self
            .parameters()
            .iter()
            .map(|parameter| match (&parameter.ty, named) {
                (Some(ty), true) => ty.declaration(&parameter.name),
                (Some(ty), false) => ty.to_string(),
                (None, _) => parameter.name.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        let declarator = format!("{}({parameters})", self.mangled_name());
        self.return_type().write_declaration(&declarator, writer);
    }

    /// `ret name(types);`
    pub fn write_forward_declaration(&self, writer: &mut SourceWriter) {
        self.write_signature(false, writer);
        writer.write(";");
        writer.write_line();
    }

    /// `ret name(params) { body }`
    pub fn write_definition(&self, writer: &mut SourceWriter) {
        self.write_signature(true, writer);
        writer.write_space();
        self.body().emit_braced(BraceStyle::Block, writer);
    }
}

impl Emit for Function {
    fn emit(&self, writer: &mut SourceWriter) {
        self.write_definition(writer);
    }
}

impl Emit for StructDef {
    fn emit(&self, writer: &mut SourceWriter) {
        writer.write("struct ");
        writer.write(&self.mangled_name());
        writer.write_space();
        writer.braces(BraceStyle::Members, |w| {
            w.lines(self.fields().iter(), |w, field| {
                field.ty.write_declaration(&field.name, w);
                w.write(";");
            });
        });
        writer.write(";");
        writer.write_line();
    }
}

impl Emit for Type {
    fn emit(&self, writer: &mut SourceWriter) {
        self.write(writer);
    }
}

impl Emit for Include {
    fn emit(&self, writer: &mut SourceWriter) {
        writer.write("#include ");
        if self.system {
            writer.write(&format!("<{}>", self.name));
        } else {
            writer.write(&format!("\"{}\"", self.name));
        }
        writer.write_line();
    }
}

impl Emit for SourceCode {
    fn emit(&self, writer: &mut SourceWriter) {
        let mut has_includes = false;
        for include in self.includes() {
            include.emit(writer);
            has_includes = true;
        }
        if has_includes {
            writer.write_line();
        }
        for def in self.structs() {
            def.emit(writer);
        }
        for function in self.functions() {
            function.write_forward_declaration(writer);
        }
        for function in self.functions() {
            function.write_definition(writer);
        }
    }
}

#[cfg(test)]
#[path = "../tests/emit_tests.rs"]
mod emit_tests;
