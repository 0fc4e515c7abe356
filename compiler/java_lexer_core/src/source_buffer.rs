//! Sentinel-terminated source buffer with a line index.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content,
//! so the scanner can detect EOF without explicit bounds checks in its hot
//! loops. The total size is rounded up to the next 64-byte boundary after
//! reserving a few bytes of zero padding for multi-byte lookahead.
//!
//! The line index (offsets of every line start) is built once at
//! construction and used to turn byte offsets into 1-based line/column
//! positions for tokens and diagnostics.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Zero bytes guaranteed after the sentinel. Covers `peek_at(n)` for every
/// lookahead distance the scanner uses (`>>>=` and `/*-{` need three).
const LOOKAHEAD_PAD: usize = 4;

/// Sentinel-terminated source buffer.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: u32,
    /// Byte offset of the first byte of every line. Always starts with `0`.
    line_starts: Vec<u32>,
}

/// A 1-based line/column position. Columns count bytes from the line start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

impl SourceBuffer {
    /// Create a new sentinel-terminated buffer from source code.
    ///
    /// Sources larger than `u32::MAX` bytes saturate the recorded length;
    /// anything past that point is never scanned.
    pub fn new(source: &str) -> Self {
        let source_bytes = source.as_bytes();
        let source_len = source_bytes.len();

        let padded_len = (source_len + 1 + LOOKAHEAD_PAD + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        // Sentinel and padding are already 0x00.
        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source_bytes);

        let source_len_u32 = u32::try_from(source_len).unwrap_or(u32::MAX);
        let line_starts = build_line_index(&source_bytes[..source_len_u32 as usize]);

        Self {
            buf,
            source_len: source_len_u32,
            line_starts,
        }
    }

    /// Returns the source bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Returns the source text.
    ///
    /// Empty only if saturating the length split a character, which needs a
    /// source of more than 4 GiB.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(self.as_bytes()).unwrap_or("")
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Create a [`Cursor`] positioned at `offset`, clamped to the source length.
    ///
    /// The offset should fall on a UTF-8 character boundary; `java_lexer`
    /// snaps caller-supplied offsets before getting here.
    pub fn cursor_at(&self, offset: u32) -> Cursor<'_> {
        let mut cursor = self.cursor();
        cursor.advance_n(offset.min(self.source_len));
        cursor
    }

    /// Length of the source content in bytes.
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Number of lines. An empty source has one (empty) line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Offsets of every line start, in ascending order.
    pub fn line_starts(&self) -> &[u32] {
        &self.line_starts
    }

    /// Convert a byte offset into a 1-based line/column position.
    ///
    /// Offsets past the end map onto the last line.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "line count is bounded by source_len which fits in u32"
    )]
    pub fn line_col(&self, offset: u32) -> LineCol {
        let offset = offset.min(self.source_len);
        // line_starts[0] == 0, so partition_point is at least 1.
        let idx = self.line_starts.partition_point(|&start| start <= offset) - 1;
        LineCol {
            line: idx as u32 + 1,
            column: offset - self.line_starts[idx] + 1,
        }
    }
}

/// Collect line-start offsets. `\n`, `\r\n` and a lone `\r` each end a line.
#[allow(
    clippy::cast_possible_truncation,
    reason = "source is truncated to u32::MAX bytes before indexing"
)]
fn build_line_index(source: &[u8]) -> Vec<u32> {
    let mut starts = vec![0u32];
    for pos in memchr::memchr2_iter(b'\n', b'\r', source) {
        if source[pos] == b'\r' && source.get(pos + 1) == Some(&b'\n') {
            // The `\n` of this CRLF pair records the line start.
            continue;
        }
        starts.push(pos as u32 + 1);
    }
    starts
}
