//! Token grammar: lowers nested tuples into IR nodes.
//!
//! Hosts describe expressions and simple statements as Rust tuples of
//! operands and operator strings; precedence is whatever the nesting says.
//!
//! ```text
//! (left, "+", right)                  Op (binary)
//! ("&", right)                        Op (unary: & * - ~ ! sizeof)
//! (callee, [arg, ...])                Call
//! (base, ".field")                    GetAttr
//! (array, "[]", index)                GetItem
//! (place, "=", source)                Assign
//! (base, ".field", "=", source)       SetAttr
//! (array, "[]", index, "=", source)   SetItem
//! (inner, "as", type)                 Cast
//! ```
//!
//! Shapes are tried in that order and the first match wins; a singleton tuple
//! unwraps. Types have their own translator, [`parse_type`]:
//!
//! ```text
//! ("*", inner)                        Pointer
//! (inner, "[]", length)               Array
//! ([param, ...], "->", return)        FunctionType
//! ```

use crate::expr::{Call, Cast, Expression, GetAttr, GetItem, Int, Op, Variable, reject};
use crate::function::Function;
use crate::ops::Operator;
use crate::stmt::{Assign, SetAttr, SetItem, Statement};
use cgen_common::{Error, Result};
use cgen_types::Type;
use std::borrow::Cow;
use std::fmt;

// =============================================================================
// Token
// =============================================================================

#[derive(Debug, Clone)]
pub enum Token {
    Expression(Expression),
    Type(Type),
    /// Operator or punctuation: `"+"`, `"[]"`, `".len"`, `"="`, `"as"`, `"->"`.
    Text(Cow<'static, str>),
    Tuple(Vec<Token>),
    /// Argument or parameter list.
    List(Vec<Token>),
}

impl Token {
    fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    fn field(&self) -> Option<&str> {
        self.text().and_then(|text| text.strip_prefix('.'))
    }

    fn is(&self, expected: &str) -> bool {
        self.text() == Some(expected)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, tokens: &[Token]) -> fmt::Result {
            for (i, token) in tokens.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{token}")?;
            }
            Ok(())
        }

        match self {
            Self::Expression(expression) => write!(f, "{expression}"),
            Self::Type(ty) => write!(f, "{ty}"),
            Self::Text(text) => write!(f, "{text:?}"),
            Self::Tuple(tokens) => {
                f.write_str("(")?;
                join(f, tokens)?;
                if tokens.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Self::List(tokens) => {
                f.write_str("[")?;
                join(f, tokens)?;
                f.write_str("]")
            }
        }
    }
}

impl From<Expression> for Token {
    fn from(expression: Expression) -> Self {
        Self::Expression(expression)
    }
}

impl From<Variable> for Token {
    fn from(variable: Variable) -> Self {
        Self::Expression(variable.into())
    }
}

impl From<&Variable> for Token {
    fn from(variable: &Variable) -> Self {
        Self::Expression(variable.into())
    }
}

impl From<Int> for Token {
    fn from(literal: Int) -> Self {
        Self::Expression(literal.into())
    }
}

impl From<i32> for Token {
    fn from(value: i32) -> Self {
        Int::untyped(i64::from(value)).into()
    }
}

impl From<i64> for Token {
    fn from(value: i64) -> Self {
        Int::untyped(value).into()
    }
}

impl From<Type> for Token {
    fn from(ty: Type) -> Self {
        Self::Type(ty)
    }
}

impl From<&Type> for Token {
    fn from(ty: &Type) -> Self {
        Self::Type(ty.clone())
    }
}

impl From<&Function> for Token {
    fn from(function: &Function) -> Self {
        function.reference().into()
    }
}

impl From<&'static str> for Token {
    fn from(text: &'static str) -> Self {
        Self::Text(Cow::Borrowed(text))
    }
}

impl From<String> for Token {
    fn from(text: String) -> Self {
        Self::Text(Cow::Owned(text))
    }
}

impl<T: Into<Token>> From<Vec<T>> for Token {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Token>, const N: usize> From<[T; N]> for Token {
    fn from(items: [T; N]) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

macro_rules! tuple_token {
    ($($name:ident),+) => {
        impl<$($name: Into<Token>),+> From<($($name,)+)> for Token {
            #[allow(non_snake_case)]
            fn from(($($name,)+): ($($name,)+)) -> Self {
                Self::Tuple(vec![$($name.into()),+])
            }
        }
    };
}

tuple_token!(A);
tuple_token!(A, B);
tuple_token!(A, B, C);
tuple_token!(A, B, C, D);
tuple_token!(A, B, C, D, E);

// =============================================================================
// Expression grammar
// =============================================================================

/// Result of lowering a token tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Expression(Expression),
    Statement(Statement),
}

impl Node {
    /// Statement form: expressions become `Run` statements.
    pub fn into_statement(self) -> Statement {
        match self {
            Self::Expression(expression) => Statement::Run(expression),
            Self::Statement(statement) => statement,
        }
    }
}

/// Lower a token tree into an expression or statement.
pub fn parse(token: impl Into<Token>) -> Result<Node> {
    lower(token.into())
}

/// Lower a token tree that must denote an expression.
pub fn parse_expression(token: impl Into<Token>) -> Result<Expression> {
    expression(token.into())
}

fn expression(token: Token) -> Result<Expression> {
    match lower(token)? {
        Node::Expression(expression) => Ok(expression),
        Node::Statement(statement) => Err(reject(Error::grammar(format!(
            "{} (statement in expression position)",
            crate::emit::generate(&statement)
        )))),
    }
}

fn lower(token: Token) -> Result<Node> {
    let tokens = match token {
        Token::Expression(expression) => return Ok(Node::Expression(expression)),
        Token::Type(ty) => return Ok(Node::Expression(Expression::TypeName(ty))),
        Token::Tuple(tokens) => tokens,
        other @ (Token::Text(_) | Token::List(_)) => {
            return Err(reject(Error::grammar(other.to_string())));
        }
    };

    match <[Token; 1]>::try_from(tokens) {
        Ok([single]) => lower(single),
        Err(tokens) => lower_shape(tokens),
    }
}

fn unmatched(parts: Vec<Token>) -> Error {
    reject(Error::grammar(Token::Tuple(parts).to_string()))
}

/// Grammar shapes, in matching priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Binary,
    Unary,
    Call,
    GetAttr,
    GetItem,
    Assign,
    SetAttr,
    SetItem,
    Cast,
}

fn classify(parts: &[Token]) -> Option<Shape> {
    let binary = |token: &Token| token.text().is_some_and(|op| Operator::binary(op).is_some());
    let unary = |token: &Token| token.text().is_some_and(|op| Operator::unary(op).is_some());
    let field = |token: &Token| token.field().is_some();

    Some(match parts {
        [_, op, _] if binary(op) => Shape::Binary,
        [op, _] if unary(op) => Shape::Unary,
        [_, Token::List(_)] => Shape::Call,
        [_, name] if field(name) => Shape::GetAttr,
        [_, brackets, _] if brackets.is("[]") => Shape::GetItem,
        [_, eq, _] if eq.is("=") => Shape::Assign,
        [_, name, eq, _] if field(name) && eq.is("=") => Shape::SetAttr,
        [_, brackets, _, eq, _] if brackets.is("[]") && eq.is("=") => Shape::SetItem,
        [_, keyword, _] if keyword.is("as") => Shape::Cast,
        _ => return None,
    })
}

fn lower_shape(parts: Vec<Token>) -> Result<Node> {
    let Some(shape) = classify(&parts) else {
        return Err(unmatched(parts));
    };

    let node = match shape {
        Shape::Binary => {
            let [left, op, right] = take::<3>(parts)?;
            let op = op.text().unwrap_or_default();
            Node::Expression(Op::binary(op, expression(left)?, expression(right)?)?.into())
        }
        Shape::Unary => {
            let [op, right] = take::<2>(parts)?;
            let op = op.text().unwrap_or_default();
            Node::Expression(Op::unary(op, expression(right)?)?.into())
        }
        Shape::Call => {
            let [callee, arguments] = take::<2>(parts)?;
            let arguments = match arguments {
                Token::List(arguments) => arguments,
                other => return Err(unmatched(vec![callee, other])),
            };
            let arguments = arguments
                .into_iter()
                .map(expression)
                .collect::<Result<Vec<_>>>()?;
            Node::Expression(Call::new(expression(callee)?, arguments)?.into())
        }
        Shape::GetAttr => {
            let [base, field] = take::<2>(parts)?;
            let field = field.field().unwrap_or_default();
            Node::Expression(GetAttr::new(expression(base)?, field)?.into())
        }
        Shape::GetItem => {
            let [array, _, index] = take::<3>(parts)?;
            Node::Expression(GetItem::new(expression(array)?, expression(index)?)?.into())
        }
        Shape::Assign => {
            let [place, _, source] = take::<3>(parts)?;
            Node::Statement(Assign::new(expression(place)?, expression(source)?)?.into())
        }
        Shape::SetAttr => {
            let [base, field, _, source] = take::<4>(parts)?;
            let field = field.field().unwrap_or_default();
            Node::Statement(SetAttr::new(expression(base)?, field, expression(source)?)?.into())
        }
        Shape::SetItem => {
            let [array, _, index, _, source] = take::<5>(parts)?;
            let statement = SetItem::new(expression(array)?, expression(index)?, expression(source)?)?;
            Node::Statement(statement.into())
        }
        Shape::Cast => {
            let [inner, _, target] = take::<3>(parts)?;
            Node::Expression(Cast::new(type_of(target)?, expression(inner)?)?.into())
        }
    };
    Ok(node)
}

fn take<const N: usize>(parts: Vec<Token>) -> Result<[Token; N]> {
    <[Token; N]>::try_from(parts).map_err(unmatched)
}

// =============================================================================
// Type grammar
// =============================================================================

/// Lower a type token tree: `("*", T)`, `(T, "[]", n)`, `([P, ...], "->", R)`.
pub fn parse_type(token: impl Into<Token>) -> Result<Type> {
    type_of(token.into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeShape {
    Single,
    Pointer,
    Array,
    Function,
}

fn classify_type(parts: &[Token]) -> Option<TypeShape> {
    Some(match parts {
        [_] => TypeShape::Single,
        [star, _] if star.is("*") => TypeShape::Pointer,
        [_, brackets, Token::Expression(Expression::Int(_))] if brackets.is("[]") => {
            TypeShape::Array
        }
        [Token::List(_), arrow, _] if arrow.is("->") => TypeShape::Function,
        _ => return None,
    })
}

fn type_of(token: Token) -> Result<Type> {
    let parts = match token {
        Token::Type(ty) => return Ok(ty),
        Token::Tuple(parts) => parts,
        other => return Err(reject(Error::grammar(other.to_string()))),
    };
    let Some(shape) = classify_type(&parts) else {
        return Err(unmatched(parts));
    };

    match shape {
        TypeShape::Single => {
            let [single] = take::<1>(parts)?;
            type_of(single)
        }
        TypeShape::Pointer => {
            let [_, inner] = take::<2>(parts)?;
            Ok(Type::pointer(type_of(inner)?))
        }
        TypeShape::Array => {
            let [inner, brackets, length] = take::<3>(parts)?;
            let value = match &length {
                Token::Expression(Expression::Int(literal)) => usize::try_from(literal.value).ok(),
                _ => None,
            };
            let Some(value) = value else {
                return Err(unmatched(vec![inner, brackets, length]));
            };
            Ok(Type::array(type_of(inner)?, value))
        }
        TypeShape::Function => {
            let [parameters, arrow, return_type] = take::<3>(parts)?;
            let Token::List(parameters) = parameters else {
                return Err(unmatched(vec![parameters, arrow, return_type]));
            };
            let parameters = parameters
                .into_iter()
                .map(type_of)
                .collect::<Result<Vec<_>>>()?;
            Ok(Type::function(type_of(return_type)?, parameters))
        }
    }
}

#[cfg(test)]
#[path = "../tests/grammar_tests.rs"]
mod grammar_tests;
