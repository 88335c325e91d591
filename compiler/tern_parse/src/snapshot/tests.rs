#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tern_ir::{TokenFlags, TokenKindId};
use tern_scan::{Scanner, Vocabulary};

fn vocabulary() -> (Vocabulary, TokenKindId) {
    let mut b = Vocabulary::builder();
    b.skip("WhiteSpace", r"\s+", TokenFlags::LINE_BREAKS);
    let number = b.pattern("NumericLiteral", r"[0-9]+");
    (b.build().unwrap(), number)
}

#[test]
fn test_guard_restores_on_drop() {
    let (vocab, number) = vocabulary();
    let mut scanner = Scanner::with_source(&vocab, "  1 2");

    {
        let mut guard = PositionGuard::new(&mut scanner);
        assert_eq!(guard.saved(), Position::START);
        guard.consume(number).unwrap();
        guard.consume(number).unwrap();
        assert!(guard.is_at_end());
    }

    assert_eq!(scanner.export_position(), Position::START);
}

#[test]
fn test_guard_restores_on_early_return() {
    fn probe(scanner: &mut Scanner<'_, '_>, kind: TokenKindId) -> Option<()> {
        let mut guard = PositionGuard::new(scanner);
        guard.consume(kind).ok()?;
        guard.consume(kind).ok()?;
        guard.consume(kind).ok()?;
        Some(())
    }

    let (vocab, number) = vocabulary();
    let mut scanner = Scanner::with_source(&vocab, "1 2");
    scanner.consume(number).unwrap();
    let before = scanner.export_position();

    assert_eq!(probe(&mut scanner, number), None);
    assert_eq!(scanner.export_position(), before);
}

#[test]
fn test_guard_restores_on_panic() {
    let (vocab, number) = vocabulary();
    let mut scanner = Scanner::with_source(&vocab, "12 34");

    let result = catch_unwind(AssertUnwindSafe(|| {
        let mut guard = PositionGuard::new(&mut scanner);
        guard.consume(number).unwrap();
        panic!("probe failed");
    }));

    assert!(result.is_err());
    assert_eq!(scanner.export_position(), Position::START);
}

#[test]
fn test_nested_guards_restore_in_order() {
    let (vocab, number) = vocabulary();
    let mut scanner = Scanner::with_source(&vocab, "1 2 3");

    let mut outer = PositionGuard::new(&mut scanner);
    outer.consume(number).unwrap();
    let after_first = outer.export_position();
    {
        let mut inner = PositionGuard::new(&mut *outer);
        inner.consume(number).unwrap();
        inner.consume(number).unwrap();
    }
    assert_eq!(outer.export_position(), after_first);
    drop(outer);

    assert_eq!(scanner.export_position(), Position::START);
}
