//! Expression nodes.
//!
//! Every constructor that combines typed operands validates them immediately
//! and refuses to build the node on a mismatch. An operand without a type
//! (see [`Variable::type_unchecked`]) skips the checks that depend on it, so
//! checking is best-effort: it is only as strong as the types supplied.

use crate::ops::Operator;
use cgen_common::{Error, Result};
use cgen_types::{Type, TypeData, primitives};
use std::fmt;

/// Log and hand back a construction failure.
pub(crate) fn reject(error: Error) -> Error {
    tracing::debug!(%error, "rejected node construction");
    error
}

/// Fail with `TypeMismatch` when both types are known and differ.
pub(crate) fn expect_same(context: &str, expected: Option<&Type>, found: Option<&Type>) -> Result<()> {
    match (expected, found) {
        (Some(expected), Some(found)) if expected != found => Err(reject(Error::mismatch(
            context,
            expected.to_string(),
            found.to_string(),
        ))),
        _ => Ok(()),
    }
}

// =============================================================================
// Expression
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Variable(Variable),
    Int(Int),
    String(StringLiteral),
    Null(Null),
    Call(Call),
    Op(Op),
    GetItem(GetItem),
    GetAttr(GetAttr),
    Cast(Cast),
    Compound(Compound),
    /// A type in operand position, e.g. the operand of `sizeof`. Unchecked.
    TypeName(Type),
}

impl Expression {
    /// Static type of the expression, when known.
    pub fn ty(&self) -> Option<Type> {
        match self {
            Self::Variable(node) => node.ty.clone(),
            Self::Int(node) => node.ty.clone(),
            Self::String(_) => Some(Type::pointer(primitives::char())),
            Self::Null(node) => Some(Type::pointer(node.inner.clone())),
            Self::Call(node) => node.ty.clone(),
            Self::Op(node) => node.ty.clone(),
            Self::GetItem(node) => node.ty.clone(),
            Self::GetAttr(node) => node.ty.clone(),
            Self::Cast(node) => Some(node.target.clone()),
            Self::Compound(node) => Some(node.ty.clone()),
            Self::TypeName(_) => None,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::emit::generate(self))
    }
}

macro_rules! into_expression {
    ($($node:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$node> for Expression {
                fn from(node: $node) -> Self {
                    Self::$variant(node)
                }
            }
        )*
    };
}

into_expression! {
    Variable => Variable,
    Int => Int,
    StringLiteral => String,
    Null => Null,
    Call => Call,
    Op => Op,
    GetItem => GetItem,
    GetAttr => GetAttr,
    Cast => Cast,
    Compound => Compound,
}

impl From<&Variable> for Expression {
    fn from(variable: &Variable) -> Self {
        Self::Variable(variable.clone())
    }
}

impl From<Type> for Expression {
    fn from(ty: Type) -> Self {
        Self::TypeName(ty)
    }
}

// =============================================================================
// Leaves
// =============================================================================

/// Named value: parameter, local, global or extern function.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub ty: Option<Type>,
    pub name: String,
}

impl Variable {
    pub fn new(ty: Type, name: impl Into<String>) -> Self {
        Self {
            ty: Some(ty),
            name: name.into(),
        }
    }

    /// Variable whose uses are never type checked (`printf` and friends).
    pub fn type_unchecked(name: impl Into<String>) -> Self {
        Self {
            ty: None,
            name: name.into(),
        }
    }
}

/// Integer literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Int {
    pub value: i64,
    pub ty: Option<Type>,
}

impl Int {
    /// Literal of an integer primitive type.
    pub fn new(value: i64, ty: Type) -> Result<Self> {
        if !ty.is_integer() {
            return Err(reject(Error::mismatch(
                "integer literal",
                "integer type",
                ty.to_string(),
            )));
        }
        Ok(Self {
            value,
            ty: Some(ty),
        })
    }

    /// Literal without a type; it fits any integer context.
    pub fn untyped(value: i64) -> Self {
        Self { value, ty: None }
    }
}

/// String literal, typed `char *`.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
}

impl StringLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// `NULL` typed as a pointer to `inner`.
#[derive(Debug, Clone, PartialEq)]
pub struct Null {
    pub inner: Type,
}

impl Null {
    pub fn new(inner: Type) -> Self {
        Self { inner }
    }
}

// =============================================================================
// Compound expressions
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub ty: Option<Type>,
}

impl Call {
    pub fn new(callee: impl Into<Expression>, arguments: Vec<Expression>) -> Result<Self> {
        let callee = callee.into();
        let ty = match callee.ty() {
            None => None,
            Some(callee_ty) => {
                let Some(signature) = callee_ty.callable() else {
                    return Err(reject(Error::NotCallable {
                        found: callee_ty.to_string(),
                    }));
                };
                if signature.parameters.len() != arguments.len() {
                    return Err(reject(Error::ArityMismatch {
                        callee: callee.to_string(),
                        expected: signature.parameters.len(),
                        found: arguments.len(),
                    }));
                }
                for (position, (parameter, argument)) in
                    signature.parameters.iter().zip(&arguments).enumerate()
                {
                    let context = format!("argument {} of `{callee}`", position + 1);
                    expect_same(&context, Some(parameter), argument.ty().as_ref())?;
                }
                Some(signature.return_type.clone())
            }
        };
        Ok(Self {
            callee: Box::new(callee),
            arguments,
            ty,
        })
    }
}

/// Binary (`left` present) or unary (`left` absent) operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Op {
    pub operator: Operator,
    pub left: Option<Box<Expression>>,
    pub right: Box<Expression>,
    pub ty: Option<Type>,
}

impl Op {
    pub fn binary(
        operator: &str,
        left: impl Into<Expression>,
        right: impl Into<Expression>,
    ) -> Result<Self> {
        let operator = Operator::parse_binary(operator).map_err(reject)?;
        let (left, right) = (left.into(), right.into());
        let (left_ty, right_ty) = (left.ty(), right.ty());

        let ty = if operator.is_comparison() {
            Some(primitives::comparison())
        } else if operator.is_arithmetic() {
            expect_same(
                &format!("operator `{operator}`"),
                left_ty.as_ref(),
                right_ty.as_ref(),
            )?;
            left_ty.or(right_ty)
        } else {
            // Not exhaustive: remaining operators keep the left operand's type.
            left_ty
        };

        Ok(Self {
            operator,
            left: Some(Box::new(left)),
            right: Box::new(right),
            ty,
        })
    }

    pub fn unary(operator: &str, right: impl Into<Expression>) -> Result<Self> {
        let operator = Operator::parse_unary(operator).map_err(reject)?;
        let right = right.into();
        let right_ty = right.ty();

        let ty = match operator {
            Operator::SizeOf => Some(primitives::size()),
            Operator::AddressOf => right_ty.map(Type::pointer),
            Operator::Deref => match right_ty {
                None => None,
                Some(ty) => match ty.pointee() {
                    Some(pointee) => Some(pointee.clone()),
                    None => {
                        return Err(reject(Error::mismatch(
                            "dereference",
                            "pointer",
                            ty.to_string(),
                        )));
                    }
                },
            },
            _ => right_ty,
        };

        Ok(Self {
            operator,
            left: None,
            right: Box::new(right),
            ty,
        })
    }

    pub fn is_unary(&self) -> bool {
        self.left.is_none()
    }
}

/// `array[index]`
#[derive(Debug, Clone, PartialEq)]
pub struct GetItem {
    pub array: Box<Expression>,
    pub index: Box<Expression>,
    pub ty: Option<Type>,
}

impl GetItem {
    pub fn new(array: impl Into<Expression>, index: impl Into<Expression>) -> Result<Self> {
        let (array, index) = (array.into(), index.into());
        let ty = match array.ty() {
            None => None,
            Some(container) => match container.element() {
                Some(element) => Some(element.clone()),
                None => {
                    return Err(reject(Error::NotIndexable {
                        found: container.to_string(),
                    }));
                }
            },
        };
        expect_same("index", Some(&primitives::size()), index.ty().as_ref())?;
        Ok(Self {
            array: Box::new(array),
            index: Box::new(index),
            ty,
        })
    }
}

/// `base.field`, or `base->field` when `base` is a pointer to a struct.
#[derive(Debug, Clone, PartialEq)]
pub struct GetAttr {
    pub base: Box<Expression>,
    pub field: String,
    pub arrow: bool,
    pub ty: Option<Type>,
}

impl GetAttr {
    pub fn new(base: impl Into<Expression>, field: impl Into<String>) -> Result<Self> {
        let (base, field) = (base.into(), field.into());
        let (ty, arrow) = match base.ty() {
            None => (None, false),
            Some(base_ty) => {
                let (def, arrow) = if let Some(def) = base_ty.as_struct() {
                    (def.clone(), false)
                } else if let Some(def) = base_ty.pointee().and_then(Type::as_struct) {
                    (def.clone(), true)
                } else {
                    return Err(reject(Error::NotAStruct {
                        found: base_ty.to_string(),
                    }));
                };
                let Some(declared) = def.field(&field) else {
                    return Err(reject(Error::UnknownField {
                        structure: def.mangled_name(),
                        field,
                    }));
                };
                (Some(declared.ty.clone()), arrow)
            }
        };
        Ok(Self {
            base: Box::new(base),
            field,
            arrow,
            ty,
        })
    }
}

/// `(target)(inner)`
#[derive(Debug, Clone, PartialEq)]
pub struct Cast {
    pub target: Type,
    pub inner: Box<Expression>,
}

impl Cast {
    /// Casts between scalar types are accepted; aggregates only cast to themselves.
    pub fn new(target: Type, inner: impl Into<Expression>) -> Result<Self> {
        let inner = inner.into();
        if let Some(from) = inner.ty() {
            let convertible = target.is_scalar() && (from.is_scalar() || from.is_array());
            if from != target && !convertible {
                return Err(reject(Error::InvalidCast {
                    from: from.to_string(),
                    to: target.to_string(),
                }));
            }
        } else if matches!(target.data(), TypeData::Array(..)) {
            return Err(reject(Error::InvalidCast {
                from: "<unchecked>".to_string(),
                to: target.to_string(),
            }));
        }
        Ok(Self {
            target,
            inner: Box::new(inner),
        })
    }
}

/// Compound literal: `(T){a, b, c}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
    pub ty: Type,
    pub values: Vec<Expression>,
}

impl Compound {
    pub fn new(ty: Type, values: Vec<Expression>) -> Result<Self> {
        let context = format!("initializer for `{ty}`");
        match ty.data() {
            TypeData::Struct(def) => {
                let fields = def.fields();
                let slots = fields.iter().map(|field| &field.ty);
                check_initializers(&context, slots, fields.len(), &values)?;
            }
            TypeData::Array(element, length) => {
                check_initializers(&context, std::iter::repeat(element), *length, &values)?;
            }
            _ => check_initializers(&context, std::iter::once(&ty), 1, &values)?,
        }
        Ok(Self { ty, values })
    }
}

/// At most `capacity` values, each matching its slot type when known.
fn check_initializers<'a>(
    context: &str,
    slots: impl Iterator<Item = &'a Type>,
    capacity: usize,
    values: &[Expression],
) -> Result<()> {
    if values.len() > capacity {
        return Err(reject(Error::mismatch(
            context,
            format!("at most {capacity} value(s)"),
            format!("{} value(s)", values.len()),
        )));
    }
    for (slot, value) in slots.zip(values) {
        expect_same(context, Some(slot), value.ty().as_ref())?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/expr_tests.rs"]
mod expr_tests;
