//! Operator table.
//!
//! Operators arrive as strings (from the builder API or the token grammar) and
//! are resolved once into an `Operator`; unknown spellings are rejected with
//! `UnsupportedOperator`.

use cgen_common::{Error, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    BitAnd,
    BitOr,
    BitXor,
    LogicalAnd,
    LogicalOr,
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    /// Unary `&`
    AddressOf,
    /// Unary `*`
    Deref,
    /// Unary `-`
    Neg,
    /// Unary `~`
    BitNot,
    /// Unary `!`
    Not,
    SizeOf,
}

impl Operator {
    /// Resolve a binary operator spelling.
    pub fn binary(spelling: &str) -> Option<Self> {
        Some(match spelling {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Rem,
            "<<" => Self::Shl,
            ">>" => Self::Shr,
            "&" => Self::BitAnd,
            "|" => Self::BitOr,
            "^" => Self::BitXor,
            "&&" => Self::LogicalAnd,
            "||" => Self::LogicalOr,
            "==" => Self::Eq,
            "!=" => Self::Ne,
            ">" => Self::Gt,
            ">=" => Self::Ge,
            "<" => Self::Lt,
            "<=" => Self::Le,
            _ => return None,
        })
    }

    /// Resolve a unary (prefix) operator spelling.
    pub fn unary(spelling: &str) -> Option<Self> {
        Some(match spelling {
            "&" => Self::AddressOf,
            "*" => Self::Deref,
            "-" => Self::Neg,
            "~" => Self::BitNot,
            "!" => Self::Not,
            "sizeof" => Self::SizeOf,
            _ => return None,
        })
    }

    pub(crate) fn parse_binary(spelling: &str) -> Result<Self> {
        Self::binary(spelling).ok_or_else(|| Error::UnsupportedOperator {
            operator: spelling.to_string(),
        })
    }

    pub(crate) fn parse_unary(spelling: &str) -> Result<Self> {
        Self::unary(spelling).ok_or_else(|| Error::UnsupportedOperator {
            operator: spelling.to_string(),
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub | Self::Neg => "-",
            Self::Mul | Self::Deref => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::BitAnd | Self::AddressOf => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::BitNot => "~",
            Self::Not => "!",
            Self::SizeOf => "sizeof",
        }
    }

    /// `+ - * / %`: operands must agree.
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Rem
        )
    }

    /// `== != > >= < <=`: always yield the comparison result type.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Ne | Self::Gt | Self::Ge | Self::Lt | Self::Le
        )
    }

    pub fn is_unary(self) -> bool {
        matches!(
            self,
            Self::AddressOf | Self::Deref | Self::Neg | Self::BitNot | Self::Not | Self::SizeOf
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
