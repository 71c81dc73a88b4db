use super::*;

#[test]
fn test_indent_only_on_first_non_empty_write() {
    let mut w = SourceWriter::new();
    w.increase_indent();
    w.write("");
    assert!(w.is_fresh_line());
    w.write("a");
    w.write("b");
    w.write_line();
    w.write("c");
    assert_eq!(w.output(), "  ab\n  c");
}

#[test]
fn test_empty_block_braces_emit_separator() {
    let mut w = SourceWriter::new();
    w.braces(BraceStyle::Block, |_| {});
    assert_eq!(w.output(), "{\n  ;\n}\n");
}

#[test]
fn test_empty_block_at_nested_indentation() {
    let mut w = SourceWriter::new();
    w.increase_indent();
    w.braces(BraceStyle::Block, |_| {});
    assert_eq!(w.output(), "  {\n    ;\n  }\n");
}

#[test]
fn test_block_braces_restore_indentation() {
    let mut w = SourceWriter::new();
    w.write("while (x) ");
    w.braces(BraceStyle::Block, |w| {
        w.write("f();");
        w.write_line();
        w.write("g();");
    });
    w.write("done;");
    assert_eq!(w.output(), "while (x) {\n  f();\n  g();\n}\ndone;");
    assert_eq!(w.indent_level(), 0);
}

#[test]
fn test_chained_braces_leave_line_open() {
    let mut w = SourceWriter::new();
    w.write("struct S ");
    w.braces(BraceStyle::Chained, |w| {
        w.write("int a;");
        w.write_line();
    });
    w.write(";");
    assert_eq!(w.output(), "struct S {\n  int a;\n};");
}

#[test]
fn test_empty_member_braces_have_no_separator() {
    let mut w = SourceWriter::new();
    w.write("struct S ");
    w.braces(BraceStyle::Members, |_| {});
    w.write(";");
    assert_eq!(w.output(), "struct S {\n};");
}

#[test]
fn test_inline_braces() {
    let mut w = SourceWriter::new();
    w.braces(BraceStyle::Inline, |w| {
        w.comma_delimited(["1", "2"], |w, item| w.write(item));
    });
    assert_eq!(w.output(), "{1, 2}");
}

#[test]
fn test_parentheses_and_brackets_are_inline() {
    let mut w = SourceWriter::new();
    w.increase_indent();
    w.parentheses(|w| w.write("a"));
    w.brackets(|w| w.write("0"));
    assert_eq!(w.output(), "  (a)[0]");
    assert_eq!(w.indent_level(), 1);
}

#[test]
fn test_comma_delimited() {
    let mut w = SourceWriter::new();
    w.comma_delimited(["int", "char *", "size_t"], |w, item| w.write(item));
    assert_eq!(w.output(), "int, char *, size_t");

    let mut empty = SourceWriter::new();
    empty.comma_delimited(Vec::<&str>::new(), |w, item| w.write(item));
    assert!(empty.is_empty());
}

#[test]
fn test_lines_break_after_each_item() {
    let mut w = SourceWriter::new();
    w.increase_indent();
    w.lines(["a;", "b;"], |w, item| w.write(item));
    assert_eq!(w.output(), "  a;\n  b;\n");
}

#[test]
fn test_custom_indent_width() {
    let mut w = SourceWriter::with_options(WriterOptions { indent_width: 4 });
    w.braces(BraceStyle::Block, |w| w.write("x;"));
    assert_eq!(w.output(), "{\n    x;\n}\n");
}

#[test]
fn test_closure_result_is_returned() {
    let mut w = SourceWriter::new();
    let value = w.parentheses(|w| {
        w.write("x");
        7
    });
    assert_eq!(value, 7);
}
