use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_single_line() {
    let source = "return 10/2;";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_from_offset(11), 1);
    assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
    assert_eq!(table.offset_to_line_col(source, 7), (1, 8));
    assert_eq!(table.offset_to_line_col(source, 11), (1, 12));
}

#[test]
fn test_multiple_lines() {
    let source = "abc\ndefgh\nij";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.offset_to_line_col(source, 2), (1, 3)); // 'c'
    assert_eq!(table.offset_to_line_col(source, 3), (1, 4)); // '\n' stays on line 1
    assert_eq!(table.offset_to_line_col(source, 4), (2, 1)); // 'd'
    assert_eq!(table.offset_to_line_col(source, 7), (2, 4)); // 'g'
    assert_eq!(table.offset_to_line_col(source, 10), (3, 1)); // 'i'
}

#[test]
fn test_columns_count_characters() {
    // 'é' is two bytes; 'x' sits at byte 3 but is the third character.
    let source = "aéx";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.offset_to_line_col(source, 3), (1, 3));
}

#[test]
fn test_end_of_input_offset() {
    let source = "var a\n";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.offset_to_line_col(source, 6), (2, 1));
    assert_eq!(table.offset_to_line_col(source, 99), (2, 1));
}

#[test]
fn test_line_from_offset_at_line_starts() {
    let table = LineOffsetTable::build("a\nbb\nccc");
    assert_eq!(table.line_from_offset(0), 1);
    assert_eq!(table.line_from_offset(1), 1);
    assert_eq!(table.line_from_offset(2), 2);
    assert_eq!(table.line_from_offset(5), 3);
    assert_eq!(table.line_from_offset(8), 3);
}
