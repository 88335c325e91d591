use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_new_store_starts_at_zero() {
    let store = PositionStore::new("return;");
    assert_eq!(store.export(), Position::START);
    assert_eq!(store.remaining(), "return;");
    assert_eq!(store.current_char(), Some('r'));
    assert!(!store.is_at_end());
}

#[test]
fn test_export_import_round_trip() {
    let mut store = PositionStore::new("return 10;");
    store.advance(6);
    let saved = store.export();
    assert_eq!(saved.offset(), 6);

    store.advance(3);
    assert_eq!(store.remaining(), ";");

    store.import(saved);
    assert_eq!(store.offset(), 6);
    assert_eq!(store.remaining(), " 10;");
}

#[test]
fn test_end_of_input() {
    let mut store = PositionStore::new("ab");
    store.advance(2);
    assert!(store.is_at_end());
    assert_eq!(store.remaining(), "");
    assert_eq!(store.current_char(), None);
}

#[test]
fn test_reset_rewinds() {
    let mut store = PositionStore::new("first");
    store.advance(3);
    store.reset("second");
    assert_eq!(store.offset(), 0);
    assert_eq!(store.source(), "second");
}

#[test]
fn test_multibyte_current_char() {
    let store = PositionStore::new("λx");
    assert_eq!(store.current_char(), Some('λ'));
}

#[test]
fn test_position_ordering() {
    assert!(Position::new(3) < Position::new(4));
    assert_eq!(Position::default(), Position::START);
}
