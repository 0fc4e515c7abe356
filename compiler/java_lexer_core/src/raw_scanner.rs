//! Hand-written raw scanner producing `(RawTag, len)` pairs.
//!
//! The scanner operates on a sentinel-terminated [`Cursor`] and produces
//! [`RawToken`] values with no heap allocation. It does not resolve
//! keywords, validate escapes, or parse numeric values; those are left to
//! the classification layer in `java_lexer`.
//!
//! # Design
//!
//! Main dispatch covers all 256 byte values. Each arm calls a focused method
//! that advances the cursor and returns `RawToken { tag, len }`. The sentinel
//! byte (`0x00`) naturally dispatches to `eof()`.
//!
//! The scanner is [`Clone`]: speculative lookahead (generic brackets,
//! lambda parameter lists) runs on a clone and never moves the original.

use crate::cursor::Cursor;
use crate::tag::{RawTag, RawToken};

/// Allocation-free scanner over one source buffer.
///
/// Error conditions are encoded as `RawTag` variants, not as `Result::Err`.
#[derive(Clone, Debug)]
pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
}

impl<'a> RawScanner<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        Self { cursor }
    }

    /// Byte offset where the next lexeme starts.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    /// Source text between two offsets of the scanned buffer.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        self.cursor.slice(start, end)
    }

    /// Produce the next raw token.
    ///
    /// Returns `RawTag::Eof` with `len == 0` when the source is exhausted.
    /// Subsequent calls after EOF continue to return `Eof`.
    pub fn next_token(&mut self) -> RawToken {
        let start = self.cursor.pos();
        match self.cursor.current() {
            0 => self.eof(start),
            b' ' | b'\t' | b'\x0C' | b'\n' | b'\r' => self.whitespace(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' => self.identifier(start),
            b'0'..=b'9' => self.number(start),
            b'"' => self.string_or_text_block(start),
            b'\'' => self.quoted(start, b'\'', RawTag::Char, RawTag::UnterminatedChar),
            b'/' => self.slash_or_comment(start),
            b'+' => self.plus(start),
            b'-' => self.minus(start),
            b'*' => self.with_equal(start, RawTag::Star, RawTag::StarEqual),
            b'%' => self.with_equal(start, RawTag::Percent, RawTag::PercentEqual),
            b'^' => self.with_equal(start, RawTag::Caret, RawTag::CaretEqual),
            b'!' => self.with_equal(start, RawTag::Bang, RawTag::BangEqual),
            b'=' => self.with_equal(start, RawTag::Equal, RawTag::EqualEqual),
            b'&' => self.doubled(
                start,
                RawTag::Ampersand,
                RawTag::AmpersandAmpersand,
                RawTag::AmpersandEqual,
            ),
            b'|' => self.doubled(start, RawTag::Pipe, RawTag::PipePipe, RawTag::PipeEqual),
            b'~' => self.single(start, RawTag::Tilde),
            b'<' => self.less(start),
            b'>' => self.greater(start),
            b'.' => self.dot(start),
            b'?' => self.single(start, RawTag::Question),
            b':' => self.colon(start),
            b'(' => self.single(start, RawTag::LeftParen),
            b')' => self.single(start, RawTag::RightParen),
            b'[' => self.single(start, RawTag::LeftBracket),
            b']' => self.single(start, RawTag::RightBracket),
            b'{' => self.single(start, RawTag::LeftBrace),
            b'}' => self.single(start, RawTag::RightBrace),
            b';' => self.single(start, RawTag::Semicolon),
            b',' => self.single(start, RawTag::Comma),
            b'@' => self.single(start, RawTag::At),
            0x80..=0xFF => self.non_ascii(start),
            // Control characters, `#`, `\`, backtick, DEL
            1..=8
            | 11
            | 14..=31
            | b'#'
            | b'\\'
            | b'`'
            | 127 => self.single(start, RawTag::InvalidByte),
        }
    }

    /// Token spanning from `start` to the current position.
    #[inline]
    fn emit(&self, start: u32, tag: RawTag) -> RawToken {
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
    }

    // ─── EOF ─────────────────────────────────────────────────────────

    fn eof(&mut self, start: u32) -> RawToken {
        if self.cursor.is_eof() {
            RawToken {
                tag: RawTag::Eof,
                len: 0,
            }
        } else {
            // Interior null byte
            self.cursor.advance();
            self.emit(start, RawTag::InvalidByte)
        }
    }

    // ─── Whitespace ──────────────────────────────────────────────────

    fn whitespace(&mut self, start: u32) -> RawToken {
        self.cursor.eat_whitespace();
        self.emit(start, RawTag::Whitespace)
    }

    // ─── Comments ────────────────────────────────────────────────────

    fn slash_or_comment(&mut self, start: u32) -> RawToken {
        match self.cursor.peek() {
            b'/' => {
                self.cursor.advance_n(2);
                self.cursor.eat_until_line_end();
                self.emit(start, RawTag::LineComment)
            }
            b'*' => self.block_comment(start),
            b'=' => {
                self.cursor.advance_n(2);
                self.emit(start, RawTag::SlashEqual)
            }
            _ => self.single(start, RawTag::Slash),
        }
    }

    /// `/* … */`, `/** … */` or `/*-{ … }-*/`. Every form ends at the first
    /// `*/`.
    fn block_comment(&mut self, start: u32) -> RawToken {
        let (done, unterminated) = if self.cursor.peek2() == b'-' && self.cursor.peek_at(3) == b'{'
        {
            (RawTag::NativeBlock, RawTag::UnterminatedNativeBlock)
        } else if self.cursor.peek2() == b'*' && self.cursor.peek_at(3) != b'/' {
            (RawTag::JavadocComment, RawTag::UnterminatedBlockComment)
        } else {
            (RawTag::BlockComment, RawTag::UnterminatedBlockComment)
        };

        self.cursor.advance_n(2); // consume "/*"
        if self.cursor.eat_past(b"*/") {
            self.emit(start, done)
        } else {
            self.emit(start, unterminated)
        }
    }

    // ─── Identifiers ─────────────────────────────────────────────────

    fn identifier(&mut self, start: u32) -> RawToken {
        self.cursor.advance(); // first byte already validated
        self.eat_ident_continue();
        self.emit(start, RawTag::Ident)
    }

    /// Identifier parts, including non-ASCII letters and digits.
    fn eat_ident_continue(&mut self) {
        loop {
            self.cursor.eat_while(is_ident_continue);
            if self.cursor.current() < 0x80 {
                return;
            }
            match self.cursor.current_char() {
                Some(c) if c.is_alphanumeric() => self.cursor.advance_char(),
                _ => return,
            }
        }
    }

    /// A non-ASCII code point: an identifier if it is a letter, otherwise
    /// one invalid lexeme covering the whole character.
    fn non_ascii(&mut self, start: u32) -> RawToken {
        match self.cursor.current_char() {
            Some(c) if c.is_alphabetic() => {
                self.cursor.advance_char();
                self.eat_ident_continue();
                self.emit(start, RawTag::Ident)
            }
            Some(_) => {
                self.cursor.advance_char();
                self.emit(start, RawTag::InvalidByte)
            }
            // Not a char boundary: consume one byte so scanning still
            // moves forward.
            None => self.single(start, RawTag::InvalidByte),
        }
    }

    // ─── Numbers ─────────────────────────────────────────────────────

    fn number(&mut self, start: u32) -> RawToken {
        let first = self.cursor.current();

        if first == b'0' && matches!(self.cursor.peek(), b'x' | b'X') {
            return self.hex_number(start);
        }

        if first == b'0'
            && matches!(self.cursor.peek(), b'b' | b'B')
            && matches!(self.cursor.peek2(), b'0' | b'1' | b'_')
        {
            return self.bin_number(start);
        }

        self.eat_decimal_digits();
        let digits_len = self.cursor.pos() - start;

        if self.cursor.current() == b'.' && self.dot_continues_number() {
            self.cursor.advance(); // consume '.'
            self.eat_decimal_digits();
            self.eat_exponent(b'e', b'E');
            return self.float_suffix(start);
        }

        if matches!(self.cursor.current(), b'e' | b'E') && self.exponent_follows() {
            self.eat_exponent(b'e', b'E');
            return self.float_suffix(start);
        }

        if matches!(self.cursor.current(), b'f' | b'F' | b'd' | b'D') {
            return self.float_suffix(start);
        }

        let tag = if first == b'0' && digits_len > 1 {
            RawTag::OctInt
        } else {
            RawTag::Int
        };
        self.long_suffix(start, tag)
    }

    /// `.` after integer digits belongs to the number unless it starts
    /// `...` or a member access such as `1.toString` (never valid Java, but
    /// it keeps the dot a dot).
    fn dot_continues_number(&self) -> bool {
        match self.cursor.peek() {
            b'.' => false,
            b'e' | b'E' | b'f' | b'F' | b'd' | b'D' => true,
            b => !is_ident_continue(b) || b.is_ascii_digit(),
        }
    }

    /// `e`/`E` starts an exponent only when digits (after an optional sign)
    /// follow.
    fn exponent_follows(&self) -> bool {
        match self.cursor.peek() {
            b'+' | b'-' => self.cursor.peek2().is_ascii_digit(),
            b => b.is_ascii_digit(),
        }
    }

    fn hex_number(&mut self, start: u32) -> RawToken {
        self.cursor.advance_n(2); // consume "0x"
        self.eat_hex_digits();
        let mut is_float = false;
        if self.cursor.current() == b'.' {
            self.cursor.advance();
            self.eat_hex_digits();
            is_float = true;
        }
        if matches!(self.cursor.current(), b'p' | b'P') {
            self.eat_exponent(b'p', b'P');
            is_float = true;
        }
        if is_float {
            self.float_suffix(start)
        } else {
            self.long_suffix(start, RawTag::HexInt)
        }
    }

    fn bin_number(&mut self, start: u32) -> RawToken {
        self.cursor.advance_n(2); // consume "0b"
        self.cursor.eat_while(|b| b == b'0' || b == b'1' || b == b'_');
        self.long_suffix(start, RawTag::BinInt)
    }

    fn eat_decimal_digits(&mut self) {
        self.cursor.eat_while(|b| b.is_ascii_digit() || b == b'_');
    }

    fn eat_hex_digits(&mut self) {
        self.cursor.eat_while(|b| b.is_ascii_hexdigit() || b == b'_');
    }

    fn eat_exponent(&mut self, lower: u8, upper: u8) {
        let b = self.cursor.current();
        if b == lower || b == upper {
            self.cursor.advance();
            if matches!(self.cursor.current(), b'+' | b'-') {
                self.cursor.advance();
            }
            self.eat_decimal_digits();
        }
    }

    fn float_suffix(&mut self, start: u32) -> RawToken {
        if matches!(self.cursor.current(), b'f' | b'F' | b'd' | b'D') {
            self.cursor.advance();
        }
        self.emit(start, RawTag::Float)
    }

    fn long_suffix(&mut self, start: u32, tag: RawTag) -> RawToken {
        if matches!(self.cursor.current(), b'l' | b'L') {
            self.cursor.advance();
        }
        self.emit(start, tag)
    }

    // ─── String, Char & Text Block Literals ──────────────────────────

    fn string_or_text_block(&mut self, start: u32) -> RawToken {
        if self.cursor.peek() == b'"' && self.cursor.peek2() == b'"' {
            self.text_block(start)
        } else {
            self.quoted(start, b'"', RawTag::String, RawTag::UnterminatedString)
        }
    }

    /// `"…"` or `'…'`. An unterminated literal stops before the line
    /// terminator.
    fn quoted(&mut self, start: u32, quote: u8, done: RawTag, unterminated: RawTag) -> RawToken {
        self.cursor.advance(); // consume opening quote
        loop {
            match self.cursor.skip_to_quote_delim(quote) {
                b'\\' => self.skip_escape(),
                b'\n' | b'\r' => return self.emit(start, unterminated),
                0 => return self.emit(start, unterminated),
                // The closing quote
                _ => {
                    self.cursor.advance();
                    return self.emit(start, done);
                }
            }
        }
    }

    /// `"""` … `"""`. Line terminators are content; an unterminated block
    /// runs to the end of the buffer.
    fn text_block(&mut self, start: u32) -> RawToken {
        self.cursor.advance_n(3); // consume opening `"""`
        loop {
            match self.cursor.skip_to_text_block_delim() {
                b'\\' => self.skip_escape(),
                b'"' => {
                    if self.cursor.peek() == b'"' && self.cursor.peek2() == b'"' {
                        self.cursor.advance_n(3);
                        return self.emit(start, RawTag::TextBlock);
                    }
                    self.cursor.advance();
                }
                _ => return self.emit(start, RawTag::UnterminatedTextBlock),
            }
        }
    }

    /// Skip `\` and the character it escapes. A line terminator or EOF after
    /// the backslash is left for the caller.
    fn skip_escape(&mut self) {
        self.cursor.advance(); // consume '\'
        if !self.cursor.is_eof() && !matches!(self.cursor.current(), b'\n' | b'\r') {
            self.cursor.advance_char();
        }
    }

    // ─── Operators ───────────────────────────────────────────────────

    /// Single-byte token: advance one byte and emit the given tag.
    fn single(&mut self, start: u32, tag: RawTag) -> RawToken {
        self.cursor.advance();
        self.emit(start, tag)
    }

    /// `op` or `op=`.
    fn with_equal(&mut self, start: u32, bare: RawTag, assign: RawTag) -> RawToken {
        if self.cursor.peek() == b'=' {
            self.cursor.advance_n(2);
            self.emit(start, assign)
        } else {
            self.single(start, bare)
        }
    }

    /// `op`, `opop` or `op=` (for `&` and `|`).
    fn doubled(&mut self, start: u32, bare: RawTag, double: RawTag, assign: RawTag) -> RawToken {
        if self.cursor.peek() == self.cursor.current() {
            self.cursor.advance_n(2);
            self.emit(start, double)
        } else {
            self.with_equal(start, bare, assign)
        }
    }

    fn plus(&mut self, start: u32) -> RawToken {
        if self.cursor.peek() == b'+' {
            self.cursor.advance_n(2);
            self.emit(start, RawTag::PlusPlus)
        } else {
            self.with_equal(start, RawTag::Plus, RawTag::PlusEqual)
        }
    }

    fn minus(&mut self, start: u32) -> RawToken {
        match self.cursor.peek() {
            b'-' => {
                self.cursor.advance_n(2);
                self.emit(start, RawTag::MinusMinus)
            }
            b'>' => {
                self.cursor.advance_n(2);
                self.emit(start, RawTag::Arrow)
            }
            _ => self.with_equal(start, RawTag::Minus, RawTag::MinusEqual),
        }
    }

    fn less(&mut self, start: u32) -> RawToken {
        match (self.cursor.peek(), self.cursor.peek2()) {
            (b'<', b'=') => {
                self.cursor.advance_n(3);
                self.emit(start, RawTag::ShlEqual)
            }
            (b'<', _) => {
                self.cursor.advance_n(2);
                self.emit(start, RawTag::Shl)
            }
            _ => self.with_equal(start, RawTag::Less, RawTag::LessEqual),
        }
    }

    /// Maximal munch: `>>>=`, `>>>`, `>>=`, `>>`, `>=`, `>`.
    fn greater(&mut self, start: u32) -> RawToken {
        let (n, tag) = match (
            self.cursor.peek(),
            self.cursor.peek2(),
            self.cursor.peek_at(3),
        ) {
            (b'>', b'>', b'=') => (4, RawTag::UShrEqual),
            (b'>', b'>', _) => (3, RawTag::UShr),
            (b'>', b'=', _) => (3, RawTag::ShrEqual),
            (b'>', _, _) => (2, RawTag::Shr),
            (b'=', _, _) => (2, RawTag::GreaterEqual),
            _ => (1, RawTag::Greater),
        };
        self.cursor.advance_n(n);
        self.emit(start, tag)
    }

    fn dot(&mut self, start: u32) -> RawToken {
        if self.cursor.peek().is_ascii_digit() {
            self.cursor.advance(); // consume '.'
            self.eat_decimal_digits();
            self.eat_exponent(b'e', b'E');
            return self.float_suffix(start);
        }
        if self.cursor.peek() == b'.' && self.cursor.peek2() == b'.' {
            self.cursor.advance_n(3);
            return self.emit(start, RawTag::Ellipsis);
        }
        self.single(start, RawTag::Dot)
    }

    fn colon(&mut self, start: u32) -> RawToken {
        if self.cursor.peek() == b':' {
            self.cursor.advance_n(2);
            self.emit(start, RawTag::ColonColon)
        } else {
            self.single(start, RawTag::Colon)
        }
    }
}

impl Iterator for RawScanner<'_> {
    type Item = RawToken;

    fn next(&mut self) -> Option<RawToken> {
        let tok = self.next_token();
        if tok.tag == RawTag::Eof {
            None
        } else {
            Some(tok)
        }
    }
}

/// 256-byte lookup table for ASCII identifier continuation bytes.
/// `true` for a-z, A-Z, 0-9, `_` and `$`. Non-ASCII bytes are `false` and
/// handled by decoding the full character.
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..=255, always fits in u8"
)]
static IS_IDENT_CONTINUE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0u16;
    while i < 256 {
        table[i as usize] = matches!(
            i as u8,
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'$'
        );
        i += 1;
    }
    table
};

#[inline]
fn is_ident_continue(b: u8) -> bool {
    IS_IDENT_CONTINUE_TABLE[b as usize]
}
