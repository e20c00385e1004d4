use super::*;

#[test]
fn test_display_is_line_and_column() {
    assert_eq!(Position::new(3, 5, 42).to_string(), "3:5");
}

#[test]
fn test_line_marker() {
    assert_eq!(Position::at(12, 1).to_line_marker(), "/* line 12:1 */");
}

#[test]
fn test_positions_are_copied() {
    let a = Position::at(1, 2);
    let mut b = a;
    b.line = 7;
    assert_eq!(a.line, 1);
    assert_eq!(b.line, 7);
}

#[test]
fn test_deserialize_without_offset() {
    let pos: Position = serde_json::from_str(r#"{"line": 4, "column": 9}"#).unwrap();
    assert_eq!(pos, Position::at(4, 9));
}
