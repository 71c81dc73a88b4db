//! Growable array instantiated per element type.
//!
//! For an element type `T` one instantiation contributes:
//!
//! | Item | C |
//! |------|---|
//! | struct | `struct Vec__T { T *buf; size_t len; size_t cap; }` |
//! | `vec_new` | returns an empty vector (`buf = NULL`, no capacity) |
//! | `vec_drop` | frees the buffer when one was allocated |
//! | `vec_reserve` | grows the buffer to at least `cap` elements |
//! | `vec_push` | appends, doubling the capacity (starting at 8) when full |
//! | `vec_get` | bounds-asserted element read |
//!
//! Every function is generic over `T`, so it is emitted under its mangled name
//! (`vec_push__int32_t`, `vec_push__ptr_char`, ...) and instantiations for
//! different element types can share one translation unit.

use cgen_common::Result;
use cgen_ir::{Composite, Expression, Function, Include, Int, Item, Null, Token, Variable};
use cgen_types::{StructDef, Type, TypeArguments, primitives};
use rustc_hash::FxHashMap;
use std::rc::Rc;
use tracing::debug;

/// Name of the element type parameter.
const ELEMENT: &str = "T";

/// One instantiation of the container for a fixed element type.
#[derive(Debug, Clone)]
pub struct VecInstance {
    element: Type,
    def: Rc<StructDef>,
    ty: Type,
    constructor: Function,
    destructor: Function,
    reserve: Function,
    push: Function,
    get: Function,
}

impl VecInstance {
    pub fn instantiate(element: Type) -> Result<Self> {
        let mut type_arguments = TypeArguments::new();
        type_arguments.insert(ELEMENT.to_string(), element.clone());

        let def = Rc::new(
            StructDef::generic("Vec", type_arguments.clone())
                .with_field(Type::pointer(element.clone()), "buf")
                .with_field(primitives::size(), "len")
                .with_field(primitives::size(), "cap"),
        );
        let ty = Type::structure(def.clone());
        let builder = Builder {
            type_arguments,
            element: element.clone(),
            ty: ty.clone(),
        };

        let constructor = builder.constructor()?;
        let destructor = builder.destructor()?;
        let reserve = builder.reserve()?;
        let push = builder.push(&reserve)?;
        let get = builder.get()?;
        debug!(name = %def.mangled_name(), "instantiated vec");

        Ok(Self {
            element,
            def,
            ty,
            constructor,
            destructor,
            reserve,
            push,
            get,
        })
    }

    pub fn element(&self) -> &Type {
        &self.element
    }

    pub fn def(&self) -> &Rc<StructDef> {
        &self.def
    }

    /// `struct Vec__T`
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// `struct Vec__T *`, the receiver type of every function but `vec_new`.
    pub fn pointer(&self) -> Type {
        Type::pointer(self.ty.clone())
    }

    /// `struct Vec__T vec_new()`
    pub fn constructor(&self) -> &Function {
        &self.constructor
    }

    /// `void vec_drop(struct Vec__T *v)`
    pub fn destructor(&self) -> &Function {
        &self.destructor
    }

    /// `void vec_reserve(struct Vec__T *v, size_t cap)`
    pub fn reserve(&self) -> &Function {
        &self.reserve
    }

    /// `void vec_push(struct Vec__T *v, T element)`
    pub fn push(&self) -> &Function {
        &self.push
    }

    /// `T vec_get(struct Vec__T *v, size_t index)`
    pub fn get(&self) -> &Function {
        &self.get
    }
}

impl Composite for VecInstance {
    fn items(&self) -> Vec<Item> {
        vec![
            Include::system("stdlib.h").into(),
            Include::system("assert.h").into(),
            self.def.clone().into(),
            self.constructor.clone().into(),
            self.destructor.clone().into(),
            self.reserve.clone().into(),
            self.push.clone().into(),
            self.get.clone().into(),
        ]
    }
}

// =============================================================================
// Function bodies
// =============================================================================

struct Builder {
    type_arguments: TypeArguments,
    element: Type,
    ty: Type,
}

fn size(value: i64) -> Result<Int> {
    Int::new(value, primitives::size())
}

fn null(inner: &Type) -> Expression {
    Null::new(inner.clone()).into()
}

/// `void assert(int)`
fn assert_fn() -> Variable {
    Variable::new(
        Type::function(primitives::void(), vec![primitives::int()]),
        "assert",
    )
}

impl Builder {
    fn function(&self, name: &str) -> Function {
        Function::generic(name, self.type_arguments.clone())
    }

    fn receiver(&self, f: &mut Function) -> Variable {
        f.add_parameter(Type::pointer(self.ty.clone()), Some("v"))
    }

    fn constructor(&self) -> Result<Function> {
        let mut f = self.function("vec_new").with_return_type(self.ty.clone());
        let v = f.declare(self.ty.clone(), Some("v"));
        f.add((&v, ".buf", "=", null(&self.element)))?;
        f.add((&v, ".len", "=", size(0)?))?;
        f.add((&v, ".cap", "=", size(0)?))?;
        f.ret(&v)?;
        Ok(f)
    }

    fn destructor(&self) -> Result<Function> {
        let mut f = self.function("vec_drop");
        let v = self.receiver(&mut f);
        let free = Variable::new(
            Type::function(primitives::void(), vec![Type::pointer(self.element.clone())]),
            "free",
        );
        f.when(((&v, ".cap"), "!=", size(0)?), |f| {
            f.run((&free, [(&v, ".buf")]))?;
            f.add((&v, ".len", "=", size(0)?))?;
            f.add((&v, ".cap", "=", size(0)?))
        })?;
        Ok(f)
    }

    fn reserve(&self) -> Result<Function> {
        let mut f = self.function("vec_reserve");
        let v = self.receiver(&mut f);
        let cap = f.add_parameter(primitives::size(), Some("cap"));
        let buffer = Type::pointer(self.element.clone());
        let realloc = Variable::new(
            Type::function(buffer.clone(), vec![buffer, primitives::size()]),
            "realloc",
        );
        let assert = assert_fn();

        f.when((&cap, ">", (&v, ".cap")), |f| {
            let bytes = Token::from((("sizeof", self.element.clone()), "*", &cap));
            let arguments = [Token::from((&v, ".buf")), bytes];
            f.add((&v, ".buf", "=", (&realloc, arguments)))?;
            f.run((&assert, [((&v, ".buf"), "!=", null(&self.element))]))?;
            f.add((&v, ".cap", "=", &cap))
        })?;
        Ok(f)
    }

    fn push(&self, reserve: &Function) -> Result<Function> {
        let mut f = self.function("vec_push");
        let v = self.receiver(&mut f);
        let element = f.add_parameter(self.element.clone(), Some("element"));

        f.when(((&v, ".len"), "==", (&v, ".cap")), |f| {
            let cap = f.declare(primitives::size(), Some("cap"));
            f.if_else(
                ((&v, ".cap"), "==", 0),
                |f| f.add((&cap, "=", size(8)?)),
                |f| f.add((&cap, "=", ((&v, ".cap"), "<<", 1))),
            )?;
            f.run((reserve, [&v, &cap]))
        })?;
        f.add(((&v, ".buf"), "[]", (&v, ".len"), "=", &element))?;
        f.add((&v, ".len", "=", ((&v, ".len"), "+", size(1)?)))?;
        Ok(f)
    }

    fn get(&self) -> Result<Function> {
        let mut f = self
            .function("vec_get")
            .with_return_type(self.element.clone());
        let v = self.receiver(&mut f);
        let index = f.add_parameter(primitives::size(), Some("index"));
        f.run((assert_fn(), [(&index, "<", (&v, ".len"))]))?;
        f.ret(((&v, ".buf"), "[]", &index))?;
        Ok(f)
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Memoizes one instantiation per element type, in first-request order.
#[derive(Debug, Clone, Default)]
pub struct VecRegistry {
    instances: Vec<Rc<VecInstance>>,
    by_element: FxHashMap<Type, usize>,
}

impl VecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiation for `element`, created on first request.
    pub fn instance(&mut self, element: &Type) -> Result<Rc<VecInstance>> {
        if let Some(&index) = self.by_element.get(element) {
            return Ok(self.instances[index].clone());
        }
        let instance = Rc::new(VecInstance::instantiate(element.clone())?);
        self.by_element.insert(element.clone(), self.instances.len());
        self.instances.push(instance.clone());
        Ok(instance)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl Composite for VecRegistry {
    fn items(&self) -> Vec<Item> {
        self.instances
            .iter()
            .map(|instance| Item::from(instance.as_ref()))
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/vec_tests.rs"]
mod vec_tests;
