//! Statement nodes and blocks.

use crate::expr::{Expression, GetAttr, GetItem, Variable, expect_same};
use cgen_common::Result;
use cgen_types::Type;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Declare(Declaration),
    Assign(Assign),
    /// `return expr;`, or `return;` without a value.
    Return(Option<Expression>),
    /// Expression evaluated for its side effect.
    Run(Expression),
    SetItem(SetItem),
    SetAttr(SetAttr),
    IfElse(IfElse),
    While(While),
    Label(String),
    Goto(String),
}

impl From<Assign> for Statement {
    fn from(node: Assign) -> Self {
        Self::Assign(node)
    }
}

impl From<SetItem> for Statement {
    fn from(node: SetItem) -> Self {
        Self::SetItem(node)
    }
}

impl From<SetAttr> for Statement {
    fn from(node: SetAttr) -> Self {
        Self::SetAttr(node)
    }
}

impl From<Expression> for Statement {
    fn from(expression: Expression) -> Self {
        Self::Run(expression)
    }
}

/// Local variable declaration: `T name;`
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub ty: Type,
    pub name: String,
}

impl Declaration {
    /// Handle for reading and writing the declared variable.
    pub fn variable(&self) -> Variable {
        Variable::new(self.ty.clone(), self.name.clone())
    }
}

/// `place = source;`
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub place: Expression,
    pub source: Expression,
}

impl Assign {
    pub fn new(place: impl Into<Expression>, source: impl Into<Expression>) -> Result<Self> {
        let (place, source) = (place.into(), source.into());
        expect_same("assignment", place.ty().as_ref(), source.ty().as_ref())?;
        Ok(Self { place, source })
    }
}

/// `array[index] = source;`
#[derive(Debug, Clone, PartialEq)]
pub struct SetItem {
    pub target: GetItem,
    pub source: Expression,
}

impl SetItem {
    pub fn new(
        array: impl Into<Expression>,
        index: impl Into<Expression>,
        source: impl Into<Expression>,
    ) -> Result<Self> {
        let target = GetItem::new(array, index)?;
        let source = source.into();
        expect_same("element assignment", target.ty.as_ref(), source.ty().as_ref())?;
        Ok(Self { target, source })
    }
}

/// `base.field = source;` or `base->field = source;`
#[derive(Debug, Clone, PartialEq)]
pub struct SetAttr {
    pub target: GetAttr,
    pub source: Expression,
}

impl SetAttr {
    pub fn new(
        base: impl Into<Expression>,
        field: impl Into<String>,
        source: impl Into<Expression>,
    ) -> Result<Self> {
        let target = GetAttr::new(base, field)?;
        let source = source.into();
        let context = format!("assignment to field `{}`", target.field);
        expect_same(&context, target.ty.as_ref(), source.ty().as_ref())?;
        Ok(Self { target, source })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfElse {
    pub condition: Expression,
    pub positive: Block,
    pub negative: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub condition: Expression,
    pub body: Block,
}

/// Ordered statement list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    statements: Vec<Statement>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: impl Into<Statement>) {
        self.statements.push(statement.into());
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }
}

impl FromIterator<Statement> for Block {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        Self {
            statements: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

#[cfg(test)]
#[path = "../tests/stmt_tests.rs"]
mod stmt_tests;
