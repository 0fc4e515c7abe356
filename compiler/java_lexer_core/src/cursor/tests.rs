use super::earliest_of;
use crate::SourceBuffer;

// === Basic Navigation ===

#[test]
fn current_returns_first_byte() {
    let buf = SourceBuffer::new("abc");
    let cursor = buf.cursor();
    assert_eq!(cursor.current(), b'a');
}

#[test]
fn advance_n_moves_multiple() {
    let buf = SourceBuffer::new("public");
    let mut cursor = buf.cursor();
    cursor.advance_n(3);
    assert_eq!(cursor.current(), b'l');
    assert_eq!(cursor.pos(), 3);
}

#[test]
fn copy_is_an_independent_snapshot() {
    let buf = SourceBuffer::new("List<String>");
    let mut main = buf.cursor();
    main.advance_n(4);
    let mut ahead = main;
    ahead.advance_n(3);
    assert_eq!(main.current(), b'<');
    assert_eq!(ahead.current(), b'r');
}

// === Peek ===

#[test]
fn peek_variants() {
    let buf = SourceBuffer::new(">>>=");
    let cursor = buf.cursor();
    assert_eq!(cursor.peek(), b'>');
    assert_eq!(cursor.peek2(), b'>');
    assert_eq!(cursor.peek_at(3), b'=');
}

#[test]
fn peek_at_past_end_returns_zero() {
    let buf = SourceBuffer::new("a");
    let cursor = buf.cursor();
    assert_eq!(cursor.peek(), 0);
    assert_eq!(cursor.peek_at(3), 0);
    assert_eq!(cursor.peek_at(10_000), 0);
}

#[test]
fn peek_at_cache_line_boundary() {
    // 59 bytes + sentinel + 4 padding = 64: the old one-line padding case.
    let source = "x".repeat(59);
    let buf = SourceBuffer::new(&source);
    let mut cursor = buf.cursor();
    cursor.advance_n(58);
    assert_eq!(cursor.peek_at(4), 0);
}

// === EOF Detection ===

#[test]
fn is_eof_on_empty_source() {
    let buf = SourceBuffer::new("");
    assert!(buf.cursor().is_eof());
}

#[test]
fn interior_null_is_not_eof() {
    let buf = SourceBuffer::new("a\0b");
    let mut cursor = buf.cursor();
    cursor.advance();
    assert_eq!(cursor.current(), 0);
    assert!(!cursor.is_eof());
}

// === Slice ===

#[test]
fn slice_extracts_substring() {
    let buf = SourceBuffer::new("import java.util.List;");
    let cursor = buf.cursor();
    assert_eq!(cursor.slice(0, 6), "import");
    assert_eq!(cursor.slice(7, 11), "java");
}

#[test]
fn slice_splitting_a_char_is_empty() {
    let buf = SourceBuffer::new("S\u{e2}m");
    let cursor = buf.cursor();
    assert_eq!(cursor.slice(0, 2), "");
    assert_eq!(cursor.slice(0, 3), "S\u{e2}");
}

#[test]
fn slice_clamps_end_to_source() {
    let buf = SourceBuffer::new("ab");
    let cursor = buf.cursor();
    assert_eq!(cursor.slice(0, 99), "ab");
}

// === eat_while / whitespace ===

#[test]
fn eat_while_stops_at_sentinel() {
    let buf = SourceBuffer::new("abc");
    let mut cursor = buf.cursor();
    cursor.eat_while(|b| b.is_ascii_alphabetic());
    assert_eq!(cursor.pos(), 3);
    assert!(cursor.is_eof());
}

#[test]
fn eat_whitespace_includes_line_terminators_and_form_feed() {
    let buf = SourceBuffer::new(" \t\x0C\r\n  x");
    let mut cursor = buf.cursor();
    cursor.eat_whitespace();
    assert_eq!(cursor.current(), b'x');
}

// === UTF-8 ===

#[test]
fn utf8_char_width_by_leading_byte() {
    assert_eq!(super::Cursor::utf8_char_width(b'a'), 1);
    assert_eq!(super::Cursor::utf8_char_width(0xC3), 2);
    assert_eq!(super::Cursor::utf8_char_width(0xE2), 3);
    assert_eq!(super::Cursor::utf8_char_width(0xF0), 4);
    assert_eq!(super::Cursor::utf8_char_width(0x80), 1);
}

#[test]
fn advance_char_and_current_char() {
    let buf = SourceBuffer::new("\u{e9}t\u{e9}");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.current_char(), Some('\u{e9}'));
    cursor.advance_char();
    assert_eq!(cursor.pos(), 2);
    assert_eq!(cursor.current_char(), Some('t'));
}

#[test]
fn current_char_at_eof_is_none() {
    let buf = SourceBuffer::new("");
    assert_eq!(buf.cursor().current_char(), None);
}

// === memchr scans ===

#[test]
fn eat_until_line_end_stops_before_newline() {
    let buf = SourceBuffer::new("// note\nint x;");
    let mut cursor = buf.cursor();
    cursor.eat_until_line_end();
    assert_eq!(cursor.pos(), 7);
    assert_eq!(cursor.current(), b'\n');
}

#[test]
fn eat_until_line_end_stops_before_cr() {
    let buf = SourceBuffer::new("// note\r\n");
    let mut cursor = buf.cursor();
    cursor.eat_until_line_end();
    assert_eq!(cursor.current(), b'\r');
}

#[test]
fn eat_until_line_end_without_newline_reaches_eof() {
    let buf = SourceBuffer::new("// trailing");
    let mut cursor = buf.cursor();
    cursor.eat_until_line_end();
    assert!(cursor.is_eof());
}

#[test]
fn skip_to_quote_delim_finds_each_kind() {
    let buf = SourceBuffer::new("abc\"def");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.skip_to_quote_delim(b'"'), b'"');
    assert_eq!(cursor.pos(), 3);

    let buf = SourceBuffer::new("ab\\n'");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.skip_to_quote_delim(b'\''), b'\\');

    let buf = SourceBuffer::new("ab\rcd\"");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.skip_to_quote_delim(b'"'), b'\r');

    let buf = SourceBuffer::new("no end");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.skip_to_quote_delim(b'"'), 0);
    assert!(cursor.is_eof());
}

#[test]
fn skip_to_text_block_delim_crosses_lines() {
    let buf = SourceBuffer::new("line one\nline two\"\"\"");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.skip_to_text_block_delim(), b'"');
    assert_eq!(cursor.pos(), 17);
}

#[test]
fn eat_past_finds_comment_end() {
    let buf = SourceBuffer::new(" body */ rest");
    let mut cursor = buf.cursor();
    assert!(cursor.eat_past(b"*/"));
    assert_eq!(cursor.pos(), 8);
}

#[test]
fn eat_past_missing_needle_goes_to_eof() {
    let buf = SourceBuffer::new(" body never ends");
    let mut cursor = buf.cursor();
    assert!(!cursor.eat_past(b"*/"));
    assert!(cursor.is_eof());
}

#[test]
fn earliest_of_combinations() {
    assert_eq!(earliest_of(Some(3), Some(1)), Some(1));
    assert_eq!(earliest_of(None, Some(4)), Some(4));
    assert_eq!(earliest_of(Some(2), None), Some(2));
    assert_eq!(earliest_of(None, None), None);
}
