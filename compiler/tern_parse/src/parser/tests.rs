#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use tern_ir::{Span, TokenFlags};
use tern_scan::Scanner;

struct Kinds {
    number: TokenKindId,
    comma: TokenKindId,
    semicolon: TokenKindId,
    lparen: TokenKindId,
    rparen: TokenKindId,
}

fn vocabulary() -> (Vocabulary, Kinds) {
    let mut b = Vocabulary::builder();
    b.skip("WhiteSpace", r"\s+", TokenFlags::LINE_BREAKS);
    let kinds = Kinds {
        number: b.pattern("NumericLiteral", r"[0-9]+"),
        comma: b.literal("','", ","),
        semicolon: b.literal("';'", ";"),
        lparen: b.literal("'('", "("),
        rparen: b.literal("')'", ")"),
    };
    (b.build().unwrap(), kinds)
}

fn parser<'src>(vocab: &Vocabulary) -> Parser<'src, Scanner<'_, 'src>> {
    Parser::new(Scanner::new(vocab, tern_scan::ScanConfig::default()))
}

#[test]
fn test_consume_counts_tokens() {
    let (vocab, k) = vocabulary();
    let mut p = parser(&vocab);
    p.begin_parse("1 ;");

    let number = p.consume(k.number).unwrap();
    let semi = p.consume(k.semicolon).unwrap();
    assert_eq!(number.text, "1");
    assert_eq!(semi.span, Span::new(2, 3));
    assert_eq!(p.consumed(), 2);
    p.expect_end().unwrap();
}

#[test]
fn test_consume_mismatch_without_rule() {
    let (vocab, k) = vocabulary();
    let mut p = parser(&vocab);
    p.begin_parse("  @");

    let err = p.consume(k.semicolon).unwrap_err();
    assert_eq!(err.expected.as_slice(), &[k.semicolon]);
    assert_eq!(err.found.text, "@");
    assert_eq!(err.found.kind, TokenKindId::ERROR);
    assert_eq!(err.span(), Span::new(2, 3));
    assert_eq!(err.rule, None);
    assert_eq!(err.message, "expected ';', found `@`");
}

#[test]
fn test_rule_names_innermost_active_rule() {
    let (vocab, k) = vocabulary();
    let mut p = parser(&vocab);
    p.begin_parse("1 2");

    let err = p
        .rule("Outer", |p| {
            p.consume(k.number)?;
            p.rule("Inner", |p| {
                assert_eq!(p.rule_stack(), &["Outer", "Inner"]);
                p.consume(k.semicolon)
            })
        })
        .unwrap_err();

    assert_eq!(err.rule, Some("Inner"));
    assert_eq!(err.message, "expected ';', found `2` while parsing Inner");
    assert!(p.rule_stack().is_empty());
    assert_eq!(p.active_rule(), None);
}

#[test]
fn test_rule_pops_after_success() {
    let (vocab, k) = vocabulary();
    let mut p = parser(&vocab);
    p.begin_parse("1 ;");

    p.rule("Number", |p| p.consume(k.number)).unwrap();
    let err = p.consume(k.number).unwrap_err();
    assert_eq!(err.rule, None);
}

#[test]
fn test_optional_enters_and_skips() {
    let (vocab, k) = vocabulary();
    let la = OptionalLookahead::from_kinds(&vocab, &[k.number]).unwrap();
    let mut p = parser(&vocab);

    p.begin_parse("7;");
    let value = p.optional(&la, |p| p.consume(k.number)).unwrap();
    assert_eq!(value.map(|t| t.text), Some("7"));

    p.begin_parse(";");
    let value = p.optional(&la, |p| p.consume(k.number)).unwrap();
    assert_eq!(value, None);
    assert_eq!(p.position(), tern_scan::Position::START);
    assert_eq!(p.consumed(), 0);
}

#[test]
fn test_many_collects_until_lookahead_fails() {
    let (vocab, k) = vocabulary();
    let la = OptionalLookahead::from_kinds(&vocab, &[k.number]).unwrap();
    let mut p = parser(&vocab);
    p.begin_parse("1 2  3 ;");

    let items = p
        .many(&la, |p| p.consume(k.number).map(|t| t.text))
        .unwrap();
    assert_eq!(items, vec!["1", "2", "3"]);
    p.consume(k.semicolon).unwrap();
}

#[test]
fn test_many_propagates_body_error() {
    let (vocab, k) = vocabulary();
    let la = OptionalLookahead::from_kinds(&vocab, &[k.number]).unwrap();
    let mut p = parser(&vocab);
    p.begin_parse("1, 2 3");

    let err = p
        .many(&la, |p| {
            let n = p.consume(k.number)?;
            p.consume(k.comma)?;
            Ok(n)
        })
        .unwrap_err();
    assert_eq!(err.found.text, "3");
}

#[test]
fn test_alternatives_selects_branch() {
    let (vocab, k) = vocabulary();
    let la = AlternativeLookahead::from_kinds(&vocab, &[&[k.number], &[k.lparen]]).unwrap();
    let mut p = parser(&vocab);

    p.begin_parse(" (");
    assert_eq!(p.alternatives(&la).unwrap(), 1);
    assert_eq!(p.position(), tern_scan::Position::START);
}

#[test]
fn test_alternatives_mismatch_expects_union() {
    let (vocab, k) = vocabulary();
    let la =
        AlternativeLookahead::from_kinds(&vocab, &[&[k.number], &[k.lparen, k.number]]).unwrap();
    let mut p = parser(&vocab);
    p.begin_parse("  )");

    let err = p.rule("Primary", |p| p.alternatives(&la)).unwrap_err();
    assert_eq!(err.expected.as_slice(), &[k.number, k.lparen]);
    assert_eq!(err.found.text, ")");
    assert_eq!(err.span(), Span::new(2, 3));
    assert_eq!(
        err.message,
        "expected NumericLiteral or '(', found `)` while parsing Primary"
    );
}

#[test]
fn test_expect_end() {
    let (vocab, k) = vocabulary();
    let mut p = parser(&vocab);

    p.begin_parse("1  \n");
    p.consume(k.number).unwrap();
    p.expect_end().unwrap();

    p.begin_parse("1 2");
    p.consume(k.number).unwrap();
    let err = p.expect_end().unwrap_err();
    assert_eq!(err.expected.as_slice(), &[TokenKindId::EOF]);
    assert_eq!(err.message, "expected end of input, found `2`");
}

#[test]
fn test_mismatch_at_end_of_input() {
    let (vocab, k) = vocabulary();
    let mut p = parser(&vocab);
    p.begin_parse("(1");

    let err = p
        .rule("Group", |p| {
            p.consume(k.lparen)?;
            p.consume(k.number)?;
            p.consume(k.rparen)
        })
        .unwrap_err();
    assert!(err.is_unexpected_end());
    assert_eq!(err.found.text, "<eof>");
    assert_eq!(err.span(), Span::point(2));
    assert_eq!(
        err.message,
        "expected ')', found end of input while parsing Group"
    );
}

fn number_text<'src>(
    p: &mut Parser<'src, Scanner<'_, 'src>>,
    kind: TokenKindId,
) -> ParseResult<'src, &'src str> {
    p.consume(kind).map(|t| t.text)
}

#[test]
fn test_run_collects_error_and_resets() {
    let (vocab, k) = vocabulary();
    let mut p = parser(&vocab);

    let failed = p.run("x", |p| number_text(p, k.number));
    assert_eq!(failed.value, None);
    assert_eq!(failed.errors.len(), 1);
    assert!(failed.has_errors());

    let ok = p.run("42", |p| number_text(p, k.number));
    assert_eq!(ok.value, Some("42"));
    assert!(ok.errors.is_empty());
    assert_eq!(p.consumed(), 1);
    assert_eq!(ok.into_result().unwrap(), "42");
}

#[test]
fn test_begin_parse_resets_rule_stack() {
    let (vocab, k) = vocabulary();
    let mut p = parser(&vocab);
    p.begin_parse("1");
    p.rule("Stuck", |p| {
        p.begin_parse("2");
        assert!(p.rule_stack().is_empty());
        p.consume(k.number)
    })
    .unwrap();
    assert_eq!(p.consumed(), 1);
}

struct Terse;

impl MessageBuilder for Terse {
    fn mismatch(
        &self,
        _vocabulary: &Vocabulary,
        _expected: &[TokenKindId],
        found: &Token<'_>,
        _rule: Option<&str>,
    ) -> String {
        format!("bad `{}`", found.text)
    }
}

#[test]
fn test_custom_message_builder() {
    let (vocab, k) = vocabulary();
    let mut p = Parser::with_messages(Scanner::with_source(&vocab, ""), Terse);
    p.begin_parse("?");

    let err = p.consume(k.number).unwrap_err();
    assert_eq!(err.message, "bad `?`");
}
