#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

fn parse_expr(source: &str) -> String {
    let grammar = EcmaGrammar::new().unwrap();
    let program = grammar.parse(source).into_result().unwrap();
    match &program.body[..] {
        [Stmt::Expr { expr, .. }] => expr.to_string(),
        other => panic!("expected one expression statement, got {other:?}"),
    }
}

#[test]
fn test_split_regex_literal() {
    assert_eq!(split_regex_literal("/ab+c/g"), ("ab+c", "g"));
    assert_eq!(split_regex_literal("/a\\/b/"), ("a\\/b", ""));
    assert_eq!(split_regex_literal("/[/]/gi"), ("[/]", "gi"));
}

#[test]
fn test_grammar_builds() {
    let grammar = EcmaGrammar::new().unwrap();
    let vocab = grammar.vocabulary();
    let k = grammar.kinds();

    assert!(vocab.has_skip_rule());
    assert_eq!(vocab.name(k.return_kw), "'return'");
    assert_eq!(vocab.name(k.regex_literal), "RegularExpressionLiteral");
    assert!(vocab.get(k.white_space).unwrap().is_skipped());
    assert!(vocab.get(k.block_comment).unwrap().may_span_lines());
    assert!(!vocab.get(k.line_comment).unwrap().may_span_lines());
}

#[test]
fn test_precedence_and_associativity() {
    assert_eq!(parse_expr("1 + 2 * 3;"), "(1 + (2 * 3))");
    assert_eq!(parse_expr("1 - 2 - 3;"), "((1 - 2) - 3)");
    assert_eq!(parse_expr("8 / 4 / 2;"), "((8 / 4) / 2)");
    assert_eq!(parse_expr("(1 + 2) * 3;"), "((1 + 2) * 3)");
}

#[test]
fn test_slash_after_operand_divides() {
    assert_eq!(parse_expr("a /b/ c;"), "((a / b) / c)");
    assert_eq!(parse_expr("x / 2.5;"), "(x / 2.5)");
}

#[test]
fn test_slash_in_operand_position_is_regex() {
    assert_eq!(parse_expr("/ab+c/g;"), "/ab+c/g");
    assert_eq!(parse_expr("1 + /x/i;"), "(1 + /x/i)");
    assert_eq!(parse_expr("(/[/]/);"), "/[/]/");
}

#[test]
fn test_binary_span_covers_operands() {
    let grammar = EcmaGrammar::new().unwrap();
    let program = grammar.parse("  10 / 2 ;").into_result().unwrap();
    let Stmt::Expr { expr, span } = &program.body[0] else {
        panic!("expected expression statement");
    };
    assert_eq!(expr.span, Span::new(2, 8));
    assert_eq!(*span, Span::new(2, 10));
}

#[test]
fn test_statement_display() {
    let grammar = EcmaGrammar::new().unwrap();
    let program = grammar
        .parse("var x = 1 + 2; var y; return x * y; return;")
        .into_result()
        .unwrap();
    let rendered: Vec<String> = program.body.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "var x = (1 + 2);",
            "var y;",
            "return (x * y);",
            "return;"
        ]
    );
}

#[test]
fn test_keyword_prefix_is_identifier() {
    assert_eq!(parse_expr("returned + variable;"), "(returned + variable)");
    assert_eq!(parse_expr("var$x;"), "var$x");
    assert_eq!(parse_expr("return_ * 2;"), "(return_ * 2)");
}
