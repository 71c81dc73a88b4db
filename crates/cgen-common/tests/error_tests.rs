use super::*;

#[test]
fn test_type_mismatch_message() {
    let err = Error::mismatch("assignment", "int32_t", "char *");
    assert_eq!(
        err.to_string(),
        "type mismatch in assignment: expected `int32_t`, found `char *`"
    );
}

#[test]
fn test_unknown_field_message() {
    let err = Error::UnknownField {
        structure: "Vec__int32_t".to_string(),
        field: "capacity".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "struct `Vec__int32_t` has no field `capacity`"
    );
}

#[test]
fn test_grammar_error_keeps_tokens() {
    let err = Error::grammar("(a, \"?\", b)");
    assert!(matches!(&err, Error::GrammarError { tokens } if tokens == "(a, \"?\", b)"));
}

#[test]
fn test_arity_message() {
    let err = Error::ArityMismatch {
        callee: "atoi".to_string(),
        expected: 1,
        found: 2,
    };
    assert_eq!(err.to_string(), "`atoi` expects 1 argument(s), found 2");
}
