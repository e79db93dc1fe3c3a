//! Integration tests for the shared text cursor.

use loom_common::{ParseError, TextCursor};

#[test]
fn test_consume_while_no_match_is_noop() {
    let mut cursor = TextCursor::new("abc");
    let run = cursor.consume_while(|c| c.is_ascii_digit());
    assert_eq!(run, "");
    assert_eq!(cursor.position(), 0);

    // Repeating the no-op changes nothing either.
    let run = cursor.consume_while(|c| c.is_ascii_digit());
    assert_eq!(run, "");
    assert_eq!(cursor.position(), 0);
}

#[test]
fn test_consume_while_stops_at_end() {
    let mut cursor = TextCursor::new("aaa");
    let run = cursor.consume_while(|c| c == 'a');
    assert_eq!(run, "aaa");
    assert!(cursor.is_at_end());
    assert_eq!(cursor.consume_while(|_| true), "");
}

#[test]
fn test_consume_while_stops_at_first_reject() {
    let mut cursor = TextCursor::new("12px");
    assert_eq!(cursor.consume_while(|c| c.is_ascii_digit()), "12");
    assert_eq!(cursor.peek_char(), Ok('p'));
}

#[test]
fn test_consume_whitespace() {
    let mut cursor = TextCursor::new(" \t\n x");
    assert_eq!(cursor.consume_whitespace(), " \t\n ");
    assert_eq!(cursor.peek_char(), Ok('x'));
}

#[test]
fn test_starts_with() {
    let mut cursor = TextCursor::new("<a></a>");
    assert!(cursor.starts_with("<a"));
    assert!(!cursor.starts_with("</"));
    let _ = cursor.consume_while(|c| c != '/');
    // Position is now on '/', one past the '<'.
    assert!(cursor.starts_with("/a>"));
    assert!(!cursor.starts_with("/a>>"));
}

#[test]
fn test_starts_with_empty_string() {
    let mut cursor = TextCursor::new("x");
    assert!(cursor.starts_with(""));
    let _ = cursor.consume_char();
    assert!(cursor.starts_with(""));
}

#[test]
fn test_peek_on_empty_input() {
    let cursor = TextCursor::new("");
    assert!(cursor.is_empty());
    assert!(cursor.is_at_end());
    assert_eq!(
        cursor.peek_char(),
        Err(ParseError::OutOfBounds { position: 0 })
    );
}

#[test]
fn test_expect_char() {
    let mut cursor = TextCursor::new("{}");
    assert_eq!(cursor.expect_char('{'), Ok(()));
    assert_eq!(
        cursor.expect_char(';'),
        Err(ParseError::UnexpectedChar {
            expected: ';',
            found: '}',
            position: 1,
        })
    );
    assert!(cursor.expect_char('x').unwrap_err().is_bounds());
}

#[test]
fn test_skip_delimited() {
    let mut cursor = TextCursor::new("/* note */p");
    assert_eq!(cursor.skip_delimited("/*", "*/"), Ok(true));
    assert_eq!(cursor.peek_char(), Ok('p'));
    assert_eq!(cursor.skip_delimited("/*", "*/"), Ok(false));
    assert_eq!(cursor.position(), 10);
}

#[test]
fn test_skip_delimited_unterminated() {
    let mut cursor = TextCursor::new("<!-- never closed");
    let err = cursor.skip_delimited("<!--", "-->").unwrap_err();
    assert!(err.is_syntax());
    assert_eq!(err.position(), 0);
}
