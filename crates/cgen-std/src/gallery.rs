//! Sample programs.

use crate::vec::VecInstance;
use cgen_common::Result;
use cgen_ir::{Expression, Function, Include, Int, SourceCode, StringLiteral, Token, Variable};
use cgen_types::{Type, primitives};

/// Iterative Fibonacci over the integer type `ty`, seeded with 1, 1:
///
/// ```text
/// ty fib(ty n) {
///   ...
///   while ((m) < (n)) { ... }
///   return a;
/// }
/// ```
pub fn fib(ty: Type) -> Result<Function> {
    let literal = |value| Int::new(value, ty.clone());

    let mut f = Function::new("fib").with_return_type(ty.clone());
    let n = f.add_parameter(ty.clone(), Some("n"));
    let a = f.declare(ty.clone(), Some("a"));
    let b = f.declare(ty.clone(), Some("b"));
    let m = f.declare(ty.clone(), Some("m"));
    f.add((&a, "=", literal(1)?))?;
    f.add((&b, "=", literal(1)?))?;
    f.add((&m, "=", literal(2)?))?;
    f.loop_while((&m, "<", &n), |f| {
        let t = f.declare(ty.clone(), Some("t"));
        f.add((&t, "=", &a))?;
        f.add((&a, "=", (&a, "+", &b)))?;
        f.add((&b, "=", &t))?;
        f.add((&m, "=", (&m, "+", literal(1)?)))
    })?;
    f.ret(&a)?;
    Ok(f)
}

/// Translation unit holding only [`fib`].
pub fn fib_unit(ty: Type) -> Result<SourceCode> {
    let mut unit = SourceCode::new();
    unit.add(fib(ty)?);
    Ok(unit)
}

/// `int main(int argc, char **argv)` that pushes `0..atoi(argv[1])` into a
/// vector of `vec.element()`, prints its length and drops it.
pub fn vec_demo_main(vec: &VecInstance) -> Result<Function> {
    let int32 = primitives::int32();
    let printf = Variable::type_unchecked("printf");
    let atoi = Variable::new(
        Type::function(primitives::int(), vec![Type::pointer(primitives::char())]),
        "atoi",
    );

    let mut f = Function::new("main").with_return_type(primitives::int());
    f.add_parameter(primitives::int(), Some("argc"));
    let argv = f.add_parameter(
        Type::pointer(Type::pointer(primitives::char())),
        Some("argv"),
    );

    let n = f.declare(int32.clone(), Some("n"));
    let first = Int::new(1, primitives::size())?;
    f.add((&n, "=", ((&atoi, [(&argv, "[]", first)]), "as", int32.clone())))?;
    let v = f.declare(vec.ty().clone(), Some("v"));
    f.add((&v, "=", (vec.constructor(), Vec::<Token>::new())))?;
    let m = f.declare(int32.clone(), Some("m"));
    f.add((&m, "=", Int::new(0, int32.clone())?))?;
    f.loop_while((&m, "<", &n), |f| {
        let element = (&m, "as", vec.element().clone());
        f.run((vec.push(), [Token::from(("&", &v)), Token::from(element)]))?;
        f.add((&m, "=", (&m, "+", Int::new(1, int32.clone())?)))
    })?;
    let format = Expression::from(StringLiteral::new("%zu\n"));
    f.run((&printf, [Token::from(format), Token::from((&v, ".len"))]))?;
    f.run((vec.destructor(), [("&", &v)]))?;
    f.ret(Int::new(0, primitives::int())?)?;
    Ok(f)
}

/// Complete program around [`vec_demo_main`] for the given element type.
pub fn vec_demo(element: Type) -> Result<SourceCode> {
    let vec = VecInstance::instantiate(element)?;
    let mut unit = SourceCode::new();
    unit.add(Include::system("stdio.h"));
    unit.add(&vec);
    unit.add(vec_demo_main(&vec)?);
    Ok(unit)
}

#[cfg(test)]
#[path = "../tests/gallery_tests.rs"]
mod gallery_tests;
