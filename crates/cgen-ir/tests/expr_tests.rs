use super::*;
use cgen_types::{StructDef, primitives};
use std::rc::Rc;

fn int32_var(name: &str) -> Variable {
    Variable::new(primitives::int32(), name)
}

fn point() -> Rc<StructDef> {
    Rc::new(
        StructDef::new("Point")
            .with_field(primitives::int32(), "x")
            .with_field(primitives::int32(), "y"),
    )
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn test_int_requires_integer_type() {
    assert!(Int::new(3, primitives::int32()).is_ok());
    assert!(Int::new(3, primitives::size()).is_ok());

    let err = Int::new(3, Type::pointer(primitives::char())).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }), "got {err:?}");
}

#[test]
fn test_literal_types() {
    assert_eq!(Expression::from(Int::untyped(1)).ty(), None);
    assert_eq!(
        Expression::from(StringLiteral::new("hi")).ty(),
        Some(Type::pointer(primitives::char()))
    );
    assert_eq!(
        Expression::from(Null::new(primitives::int32())).ty(),
        Some(Type::pointer(primitives::int32()))
    );
}

#[test]
fn test_string_literal_is_escaped() {
    let literal: Expression = StringLiteral::new("a \"b\"\n").into();
    assert_eq!(literal.to_string(), r#""a \"b\"\n""#);
}

// =============================================================================
// Operators
// =============================================================================

#[test]
fn test_arithmetic_requires_equal_types() {
    let a = int32_var("a");
    let b = int32_var("b");
    let sum = Op::binary("+", &a, &b).unwrap();
    assert_eq!(sum.ty, Some(primitives::int32()));

    let wide = Variable::new(primitives::int64(), "w");
    let err = Op::binary("+", &a, &wide).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }), "got {err:?}");
}

#[test]
fn test_arithmetic_with_untyped_operand_takes_known_type() {
    let a = int32_var("a");
    let sum = Op::binary("+", Int::untyped(1), &a).unwrap();
    assert_eq!(sum.ty, Some(primitives::int32()));

    let unknown = Op::binary("*", Variable::type_unchecked("p"), Int::untyped(2)).unwrap();
    assert_eq!(unknown.ty, None);
}

#[test]
fn test_comparison_yields_int() {
    let a = int32_var("a");
    let b = int32_var("b");
    let less = Op::binary("<", &a, &b).unwrap();
    assert_eq!(less.ty, Some(primitives::comparison()));
}

#[test]
fn test_unknown_operator_is_rejected() {
    let a = int32_var("a");
    let err = Op::binary("**", &a, &a).unwrap_err();
    assert_eq!(
        err,
        Error::UnsupportedOperator {
            operator: "**".to_string()
        }
    );
    assert!(Op::unary("++", &a).is_err());
}

#[test]
fn test_unary_operator_types() {
    let a = int32_var("a");
    let address = Op::unary("&", &a).unwrap();
    assert_eq!(address.ty, Some(Type::pointer(primitives::int32())));

    let pointer = Variable::new(Type::pointer(primitives::int32()), "p");
    assert_eq!(Op::unary("*", &pointer).unwrap().ty, Some(primitives::int32()));
    assert_eq!(Op::unary("sizeof", primitives::int64()).unwrap().ty, Some(primitives::size()));
    assert_eq!(Op::unary("-", &a).unwrap().ty, Some(primitives::int32()));

    let err = Op::unary("*", &a).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }), "got {err:?}");
}

#[test]
fn test_operators_render_with_parenthesized_operands() {
    let a = int32_var("a");
    let b = int32_var("b");
    let sum: Expression = Op::binary("+", &a, &b).unwrap().into();
    assert_eq!(sum.to_string(), "(a) + (b)");

    let nested: Expression = Op::binary("*", sum, Int::untyped(2)).unwrap().into();
    assert_eq!(nested.to_string(), "((a) + (b)) * (2)");

    let negated: Expression = Op::unary("-", &a).unwrap().into();
    assert_eq!(negated.to_string(), "-(a)");
}

// =============================================================================
// Calls
// =============================================================================

#[test]
fn test_call_checks_arity_and_argument_types() {
    let atoi = Variable::new(
        Type::function(primitives::int(), vec![Type::pointer(primitives::char())]),
        "atoi",
    );
    let arg = Variable::new(Type::pointer(primitives::char()), "s");

    let call = Call::new(&atoi, vec![arg.clone().into()]).unwrap();
    assert_eq!(call.ty, Some(primitives::int()));

    let err = Call::new(&atoi, vec![]).unwrap_err();
    assert!(
        matches!(err, Error::ArityMismatch { expected: 1, found: 0, .. }),
        "got {err:?}"
    );

    let err = Call::new(&atoi, vec![int32_var("n").into()]).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }), "got {err:?}");
}

#[test]
fn test_call_through_function_pointer() {
    let callback = Variable::new(
        Type::function(primitives::void(), vec![primitives::int32()]),
        "cb",
    );
    let call = Call::new(&callback, vec![int32_var("n").into()]).unwrap();
    assert_eq!(call.ty, Some(primitives::void()));
    assert_eq!(Expression::from(call).to_string(), "cb(n)");
}

#[test]
fn test_pointer_to_function_pointer_needs_dereference() {
    let slot = Variable::new(
        Type::pointer(Type::function(primitives::void(), vec![primitives::int32()])),
        "slot",
    );
    let err = Call::new(&slot, vec![int32_var("n").into()]).unwrap_err();
    assert!(matches!(err, Error::NotCallable { .. }), "got {err:?}");

    let deref = Op::unary("*", &slot).unwrap();
    let call = Call::new(deref, vec![int32_var("n").into()]).unwrap();
    assert_eq!(call.ty, Some(primitives::void()));
    assert_eq!(Expression::from(call).to_string(), "(*(slot))(n)");
}

#[test]
fn test_call_on_non_function_is_rejected() {
    let err = Call::new(&int32_var("n"), vec![]).unwrap_err();
    assert!(matches!(err, Error::NotCallable { .. }), "got {err:?}");
}

#[test]
fn test_unchecked_callee_accepts_anything() {
    let printf = Variable::type_unchecked("printf");
    let call = Call::new(
        &printf,
        vec![StringLiteral::new("%d\n").into(), int32_var("n").into()],
    )
    .unwrap();
    assert_eq!(call.ty, None);
    assert_eq!(Expression::from(call).to_string(), r#"printf("%d\n", n)"#);
}

// =============================================================================
// Element and field access
// =============================================================================

#[test]
fn test_get_item_types() {
    let array = Variable::new(Type::array(primitives::int32(), 4), "arr");
    let index = Variable::new(primitives::size(), "i");
    let item = GetItem::new(&array, &index).unwrap();
    assert_eq!(item.ty, Some(primitives::int32()));
    assert_eq!(Expression::from(item).to_string(), "arr[i]");

    let err = GetItem::new(&array, &int32_var("j")).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }), "got {err:?}");

    let err = GetItem::new(&int32_var("n"), &index).unwrap_err();
    assert!(matches!(err, Error::NotIndexable { .. }), "got {err:?}");
}

#[test]
fn test_get_attr_on_struct_and_pointer() {
    let ty = Type::structure(point());
    let value = Variable::new(ty.clone(), "p");
    let dot = GetAttr::new(&value, "x").unwrap();
    assert!(!dot.arrow);
    assert_eq!(dot.ty, Some(primitives::int32()));
    assert_eq!(Expression::from(dot).to_string(), "p.x");

    let pointer = Variable::new(Type::pointer(ty), "pp");
    let arrow = GetAttr::new(&pointer, "y").unwrap();
    assert!(arrow.arrow);
    assert_eq!(Expression::from(arrow).to_string(), "pp->y");
}

#[test]
fn test_get_attr_unknown_field() {
    let value = Variable::new(Type::structure(point()), "p");
    let err = GetAttr::new(&value, "z").unwrap_err();
    assert_eq!(
        err,
        Error::UnknownField {
            structure: "Point".to_string(),
            field: "z".to_string()
        }
    );
}

#[test]
fn test_get_attr_on_non_struct() {
    let err = GetAttr::new(&int32_var("n"), "x").unwrap_err();
    assert!(matches!(err, Error::NotAStruct { .. }), "got {err:?}");
}

#[test]
fn test_postfix_operand_is_parenthesized() {
    let base = Variable::new(Type::pointer(Type::structure(point())), "pp");
    let deref = Op::unary("*", &base).unwrap();
    let attr = GetAttr::new(deref, "x").unwrap();
    assert!(!attr.arrow);
    assert_eq!(Expression::from(attr).to_string(), "(*(pp)).x");
}

// =============================================================================
// Casts and compound literals
// =============================================================================

#[test]
fn test_cast_between_scalars() {
    let n = int32_var("n");
    let cast = Cast::new(primitives::size(), &n).unwrap();
    assert_eq!(Expression::from(cast.clone()).ty(), Some(primitives::size()));
    assert_eq!(Expression::from(cast).to_string(), "(size_t)(n)");

    let unchecked = Cast::new(primitives::int32(), Variable::type_unchecked("v"));
    assert!(unchecked.is_ok());
}

#[test]
fn test_cast_of_struct_is_rejected() {
    let ty = Type::structure(point());
    let value = Variable::new(ty.clone(), "p");
    let err = Cast::new(primitives::int32(), &value).unwrap_err();
    assert!(matches!(err, Error::InvalidCast { .. }), "got {err:?}");

    assert!(Cast::new(ty, &value).is_ok());
    assert!(Cast::new(Type::structure(point()), &value).is_err());
}

#[test]
fn test_compound_literal() {
    let ty = Type::structure(point());
    let one = Int::new(1, primitives::int32()).unwrap();
    let two = Int::new(2, primitives::int32()).unwrap();
    let compound = Compound::new(ty.clone(), vec![one.clone().into(), two.into()]).unwrap();
    assert_eq!(Expression::from(compound).to_string(), "(struct Point){1, 2}");

    let err = Compound::new(
        ty.clone(),
        vec![one.clone().into(), one.clone().into(), one.clone().into()],
    )
    .unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }), "got {err:?}");

    let wrong = Variable::new(primitives::int64(), "w");
    assert!(Compound::new(ty, vec![(&wrong).into()]).is_err());
}

#[test]
fn test_compound_with_huge_array_length() {
    let ty = Type::array(primitives::int32(), usize::MAX);
    let empty = Compound::new(ty.clone(), vec![]).unwrap();
    assert!(empty.values.is_empty());

    let one = Int::new(1, primitives::int32()).unwrap();
    assert!(Compound::new(ty.clone(), vec![one.into()]).is_ok());

    let wrong = Variable::new(primitives::int64(), "w");
    let err = Compound::new(ty, vec![(&wrong).into()]).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }), "got {err:?}");
}

#[test]
fn test_compound_array_length_is_enforced() {
    let ty = Type::array(primitives::int32(), 1);
    let one = Int::new(1, primitives::int32()).unwrap();
    let err = Compound::new(ty, vec![one.clone().into(), one.into()]).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }), "got {err:?}");
}
