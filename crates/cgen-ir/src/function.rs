//! Function builder.
//!
//! A `Function` owns its body plus a stack of blocks that are still being
//! filled. The top of that stack (or the body, when the stack is empty) is the
//! *active block*: every `declare`, `add`, `ret`, ... appends there.
//!
//! Control flow is built through scoped regions:
//!
//! ```text
//! f.when(cond, |f| { ... })                  if (cond) { ... }
//! f.if_else(cond, |f| { ... }, |f| { ... })  if (cond) { ... } else { ... }
//! f.loop_while(cond, |f| { ... })            while (cond) { ... }
//! ```
//!
//! Each region pushes a fresh block, runs the closure against it and pops it
//! again before returning, on success and on error alike. The finished
//! statement is appended to the enclosing block only after all of its
//! branches are complete, so the nesting is a strict stack. A branch whose
//! closure fails is discarded together with the statement it belonged to.
//!
//! Fresh identifiers and labels are unique per function: the first request
//! for a hint gets the hint itself, later ones get `hint2`, `hint3`, ...
//! A candidate already issued under another hint is skipped. Labels use their
//! own namespace.

use crate::expr::{Expression, Variable, expect_same, reject};
use crate::grammar::{Token, parse, parse_expression};
use crate::stmt::{Block, Declaration, IfElse, Statement, While};
use cgen_common::{Error, Result};
use cgen_types::{Type, TypeArguments, mangle_name, primitives};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::trace;

/// Jump target handed out by [`Function::label`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Per-hint suffix counters plus every name handed out so far.
#[derive(Debug, Clone, Default)]
struct NameCounters {
    counts: FxHashMap<String, usize>,
    issued: FxHashSet<String>,
}

impl NameCounters {
    /// Suffixes skip names already issued under another hint (`a2` vs `a` + 2).
    fn fresh(&mut self, hint: &str) -> String {
        let count = self.counts.entry(hint.to_string()).or_insert(0);
        loop {
            *count += 1;
            let candidate = if *count == 1 {
                hint.to_string()
            } else {
                format!("{hint}{count}")
            };
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Function {
    name: String,
    type_arguments: TypeArguments,
    parameters: Vec<Variable>,
    return_type: Type,
    body: Block,
    /// Blocks under construction; the last one is the active block.
    open: SmallVec<[Block; 4]>,
    identifiers: NameCounters,
    labels: NameCounters,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self::generic(name, TypeArguments::new())
    }

    /// Function instantiated with the given type arguments; emitted under its mangled name.
    pub fn generic(name: impl Into<String>, type_arguments: TypeArguments) -> Self {
        Self {
            name: name.into(),
            type_arguments,
            parameters: Vec::new(),
            return_type: primitives::void(),
            body: Block::new(),
            open: SmallVec::new(),
            identifiers: NameCounters::default(),
            labels: NameCounters::default(),
        }
    }

    pub fn with_return_type(mut self, return_type: Type) -> Self {
        self.return_type = return_type;
        self
    }

    pub fn set_return_type(&mut self, return_type: Type) {
        self.return_type = return_type;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name used in emitted text and references.
    pub fn mangled_name(&self) -> String {
        mangle_name(&self.name, &self.type_arguments)
    }

    pub fn type_arguments(&self) -> &TypeArguments {
        &self.type_arguments
    }

    pub fn parameters(&self) -> &[Variable] {
        &self.parameters
    }

    pub fn return_type(&self) -> &Type {
        &self.return_type
    }

    pub fn body(&self) -> &Block {
        &self.body
    }

    /// Nesting depth of the active block; 0 is the body.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Function type of this function.
    pub fn signature(&self) -> Type {
        let parameters = self
            .parameters
            .iter()
            .filter_map(|parameter| parameter.ty.clone())
            .collect();
        Type::function(self.return_type.clone(), parameters)
    }

    /// Typed handle for calling this function from generated code.
    pub fn reference(&self) -> Variable {
        Variable::new(self.signature(), self.mangled_name())
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// Reserve an identifier unique within this function.
    pub fn fresh_identifier(&mut self, hint: &str) -> String {
        let name = self.identifiers.fresh(hint);
        trace!(function = %self.name, hint, name = %name, "fresh identifier");
        name
    }

    /// Add a parameter; without a name it is called `arg<N>`.
    pub fn add_parameter(&mut self, ty: Type, name: Option<&str>) -> Variable {
        let hint = match name {
            Some(name) => name.to_string(),
            None => format!("arg{}", self.parameters.len() + 1),
        };
        let name = self.fresh_identifier(&hint);
        let parameter = Variable::new(ty, name);
        self.parameters.push(parameter.clone());
        parameter
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn active_block(&mut self) -> &mut Block {
        self.open.last_mut().unwrap_or(&mut self.body)
    }

    /// Append a finished statement to the active block.
    pub fn push(&mut self, statement: impl Into<Statement>) {
        self.active_block().push(statement);
    }

    /// Declare a local in the active block; the hint defaults to `x`.
    pub fn declare(&mut self, ty: Type, hint: Option<&str>) -> Variable {
        let name = self.fresh_identifier(hint.unwrap_or("x"));
        let declaration = Declaration { ty, name };
        let variable = declaration.variable();
        self.push(Statement::Declare(declaration));
        variable
    }

    /// Lower a token tree and append it; bare expressions become `Run` statements.
    pub fn add(&mut self, tokens: impl Into<Token>) -> Result<()> {
        let statement = parse(tokens)?.into_statement();
        self.push(statement);
        Ok(())
    }

    pub fn assign(
        &mut self,
        place: impl Into<Expression>,
        source: impl Into<Expression>,
    ) -> Result<()> {
        let statement = crate::stmt::Assign::new(place, source)?;
        self.push(statement);
        Ok(())
    }

    /// Evaluate an expression for its side effect.
    pub fn run(&mut self, tokens: impl Into<Token>) -> Result<()> {
        let expression = parse_expression(tokens)?;
        self.push(Statement::Run(expression));
        Ok(())
    }

    /// `return expr;` in the active block. Paths are not checked for a missing return.
    pub fn ret(&mut self, tokens: impl Into<Token>) -> Result<()> {
        let expression = parse_expression(tokens)?;
        let context = format!("return from `{}`", self.name);
        expect_same(&context, Some(&self.return_type), expression.ty().as_ref())?;
        self.push(Statement::Return(Some(expression)));
        Ok(())
    }

    /// `return;` in the active block; only valid in a `void` function.
    pub fn ret_void(&mut self) -> Result<()> {
        if !self.return_type.is_void() {
            return Err(reject(Error::mismatch(
                format!("return from `{}`", self.name),
                self.return_type.to_string(),
                "void",
            )));
        }
        self.push(Statement::Return(None));
        Ok(())
    }

    /// Place a label in the active block; the hint defaults to `label`.
    pub fn label(&mut self, hint: Option<&str>) -> Label {
        let name = self.labels.fresh(hint.unwrap_or("label"));
        trace!(function = %self.name, label = %name, "fresh label");
        self.push(Statement::Label(name.clone()));
        Label(name)
    }

    pub fn goto(&mut self, label: &Label) {
        self.push(Statement::Goto(label.0.clone()));
    }

    // =========================================================================
    // Scoped regions
    // =========================================================================

    /// Run `build` with a fresh active block and hand the block back.
    fn scoped<F>(&mut self, build: F) -> Result<Block>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.open.push(Block::new());
        trace!(function = %self.name, depth = self.open.len(), "enter block");
        let result = build(self);
        let block = self.open.pop().unwrap_or_default();
        trace!(function = %self.name, depth = self.open.len(), "leave block");
        result.map(|()| block)
    }

    /// `if (condition) { positive }`
    pub fn when<F>(&mut self, condition: impl Into<Token>, positive: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.if_else(condition, positive, |_| Ok(()))
    }

    /// `if (condition) { positive } else { negative }`
    pub fn if_else<P, N>(
        &mut self,
        condition: impl Into<Token>,
        positive: P,
        negative: N,
    ) -> Result<()>
    where
        P: FnOnce(&mut Self) -> Result<()>,
        N: FnOnce(&mut Self) -> Result<()>,
    {
        let condition = parse_expression(condition)?;
        let positive = self.scoped(positive)?;
        let negative = self.scoped(negative)?;
        self.push(Statement::IfElse(IfElse {
            condition,
            positive,
            negative,
        }));
        Ok(())
    }

    /// `while (condition) { body }`
    pub fn loop_while<F>(&mut self, condition: impl Into<Token>, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let condition = parse_expression(condition)?;
        let body = self.scoped(body)?;
        self.push(Statement::While(While { condition, body }));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/function_tests.rs"]
mod function_tests;
