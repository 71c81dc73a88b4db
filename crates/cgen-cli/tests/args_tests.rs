use super::*;

#[test]
fn test_program_and_defaults() {
    let args = CliArgs::parse_from(["cgen", "fib"]);
    assert_eq!(args.program, Program::Fib);
    assert_eq!(args.element, None);
    assert_eq!(args.indent, 2);
    assert!(args.out.is_none());
    assert_eq!(args.element_type(), primitives::int());

    let args = CliArgs::parse_from(["cgen", "vec-demo"]);
    assert_eq!(args.program, Program::VecDemo);
    assert_eq!(args.element_type(), primitives::int32());
}

#[test]
fn test_element_values() {
    let args = CliArgs::parse_from(["cgen", "vec", "--element", "char-ptr"]);
    assert_eq!(args.program, Program::VecDemo);
    assert_eq!(args.element_type(), Type::pointer(primitives::char()));

    let args = CliArgs::parse_from(["cgen", "fib", "-e", "I64", "--indent", "4"]);
    assert_eq!(args.element, Some(Element::I64));
    assert_eq!(args.indent, 4);
}

#[test]
fn test_unknown_program_is_rejected() {
    assert!(CliArgs::try_parse_from(["cgen", "quicksort"]).is_err());
    assert!(CliArgs::try_parse_from(["cgen", "fib", "--element", "f32"]).is_err());
}
