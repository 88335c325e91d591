use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::E1001.to_string(), "E1001");
    assert_eq!(ErrorCode::E1002.as_str(), "E1002");
}

#[test]
fn test_titles() {
    assert_eq!(ErrorCode::E1001.title(), "unexpected token");
    assert_eq!(ErrorCode::E1002.title(), "unexpected end of input");
}
