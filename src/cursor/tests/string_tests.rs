//! Tests for string reads and skipping

use super::*;
use crate::ErrorKind;

#[test]
fn test_whitespace_strings() {
    let mut cursor = blank_cursor("alpha  beta\tgamma");

    assert_eq!(cursor.read_str(), Ok("alpha"));
    assert_eq!(cursor.read_string(), Ok("beta".to_string()));
    let span = cursor.read_span().unwrap();
    assert_eq!(&cursor.line()[span], "gamma");
    assert_eq!(cursor.read_str(), Err(ErrorKind::UnexpectedEndOfLine));
    assert_eq!(cursor.column(), 3);
}

#[test]
fn test_delimited_strings_may_be_empty() {
    let mut cursor = delimited_cursor("a,,c", ',');

    assert_eq!(cursor.read_str(), Ok("a"));
    assert_eq!(cursor.read_str(), Ok(""));
    assert_eq!(cursor.read_str(), Ok("c"));
    assert!(cursor.at_end_of_line());
    assert_eq!(cursor.read_str(), Err(ErrorKind::UnexpectedEndOfLine));
    assert_eq!(cursor.column(), 3);
}

#[test]
fn test_trailing_delimiter_yields_empty_last_field() {
    let mut cursor = delimited_cursor("a,b,", ',');

    assert_eq!(cursor.read_str(), Ok("a"));
    assert_eq!(cursor.read_str(), Ok("b"));
    assert_eq!(cursor.read_str(), Ok(""));
    assert_eq!(cursor.read_str(), Err(ErrorKind::UnexpectedEndOfLine));
}

#[test]
fn test_delimited_strings_are_trimmed() {
    let mut cursor = delimited_cursor(" a b , c ", ',');

    assert_eq!(cursor.read_str(), Ok("a b"));
    assert_eq!(cursor.read_str(), Ok("c"));
    assert_eq!(cursor.read_str(), Err(ErrorKind::UnexpectedEndOfLine));
}

#[test]
fn test_comment_ends_delimited_string() {
    let config = ReaderConfig::default()
        .with_delimiter(',')
        .with_comment('#');
    let mut cursor = configured_cursor("x,y#z,w", &config);

    assert_eq!(cursor.read_str(), Ok("x"));
    assert_eq!(cursor.read_str(), Ok("y"));
    assert_eq!(cursor.read_str(), Err(ErrorKind::UnexpectedEndOfLine));
}

#[test]
fn test_comment_ends_whitespace_string() {
    let config = ReaderConfig::default().with_comment('#');
    let mut cursor = configured_cursor("label#rest", &config);

    assert_eq!(cursor.read_str(), Ok("label"));
    assert!(cursor.at_end_of_line());
}

#[test]
fn test_last_delimited_string_ends_the_line_for_numbers() {
    let mut cursor = delimited_cursor("a", ',');

    assert_eq!(cursor.read_string(), Ok("a".to_string()));
    assert_eq!(cursor.read_u32(), Err(ErrorKind::UnexpectedEndOfLine));
}

#[test]
fn test_numbers_and_strings_mixed_with_delimiter() {
    let mut cursor = delimited_cursor("17,station north,2.5", ',');

    assert_eq!(cursor.read_u32(), Ok(17));
    assert_eq!(cursor.read_str(), Ok("station north"));
    assert_eq!(cursor.read_f64(), Ok(2.5));
    assert_eq!(cursor.column(), 3);
}

#[test]
fn test_skip_whitespace_fields() {
    let mut cursor = blank_cursor("1 two 3");

    cursor.skip().unwrap();
    cursor.skip().unwrap();
    assert_eq!(cursor.read_u32(), Ok(3));
    assert_eq!(cursor.skip(), Err(ErrorKind::UnexpectedEndOfLine));
    assert_eq!(cursor.column(), 3);
}

#[test]
fn test_skip_delimited_fields() {
    let mut cursor = delimited_cursor("1,2", ',');

    cursor.skip().unwrap();
    // the last field has no delimiter after it and is still skippable
    cursor.skip().unwrap();
    assert_eq!(cursor.skip(), Err(ErrorKind::UnexpectedEndOfLine));
    assert_eq!(cursor.column(), 2);
}

#[test]
fn test_string_in_sticky_state_fails() {
    let mut cursor = delimited_cursor("a,b", ',');
    let _moved = cursor.take();
    assert_eq!(cursor.read_str(), Err(ErrorKind::Invalidated));
}

#[test]
fn test_utf8_content_is_preserved() {
    let mut cursor = delimited_cursor("Zürich,12", ',');

    assert_eq!(cursor.read_str(), Ok("Zürich"));
    assert_eq!(cursor.read_u32(), Ok(12));
}

#[test]
fn test_no_field_after_last_delimited_number() {
    let mut cursor = delimited_cursor("1,2", ',');

    assert_eq!(cursor.read_u32(), Ok(1));
    assert_eq!(cursor.read_u32(), Ok(2));
    assert!(cursor.at_end_of_line());
    assert_eq!(cursor.skip(), Err(ErrorKind::UnexpectedEndOfLine));
    assert_eq!(cursor.read_str(), Err(ErrorKind::UnexpectedEndOfLine));
    assert_eq!(cursor.column(), 2);
}

#[test]
fn test_comment_after_delimited_number_ends_the_line() {
    let config = ReaderConfig::default()
        .with_delimiter(',')
        .with_comment('#');
    let mut cursor = configured_cursor("1,2 # note", &config);

    cursor.skip().unwrap();
    assert_eq!(cursor.read_u32(), Ok(2));
    assert_eq!(cursor.read_string(), Err(ErrorKind::UnexpectedEndOfLine));
    assert_eq!(cursor.column(), 2);
}

#[test]
fn test_empty_delimited_line_has_no_fields() {
    let mut cursor = delimited_cursor("  ", ',');
    assert_eq!(cursor.read_str(), Err(ErrorKind::UnexpectedEndOfLine));
    assert_eq!(cursor.column(), 0);

    // a lone delimiter separates two empty fields
    cursor.set_line(",").unwrap();
    assert_eq!(cursor.read_str(), Ok(""));
    assert_eq!(cursor.read_str(), Ok(""));
    assert_eq!(cursor.read_str(), Err(ErrorKind::UnexpectedEndOfLine));
}

#[test]
fn test_number_before_trailing_delimiter_leaves_empty_field() {
    let mut cursor = delimited_cursor("1, ", ',');

    assert_eq!(cursor.read_u32(), Ok(1));
    assert_eq!(cursor.read_str(), Ok(""));
    assert_eq!(cursor.skip(), Err(ErrorKind::UnexpectedEndOfLine));
    assert_eq!(cursor.column(), 2);
}
