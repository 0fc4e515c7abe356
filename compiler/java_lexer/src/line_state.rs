//! Line-at-a-time tokenization for editor highlighters.
//!
//! An editor re-highlights one line at a time and caches the state at the
//! end of each line. [`tokenize_line`] takes the state left by the previous
//! line and returns the line's tokens plus the state for the next one.
//! Comments and text blocks still open at the end of a line are carried
//! over instead of being reported as unterminated.

use java_lexer_core::SourceBuffer;

use crate::context::ContextTracker;
use crate::diagnostic::Diagnostic;
use crate::lexer::Lexer;
use crate::token::{Span, Token, TokenFlags, TokenKind};

/// Multi-line construct left open at the end of a line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Carry {
    #[default]
    None,
    BlockComment,
    Javadoc,
    NativeBlock,
    TextBlock,
}

impl Carry {
    /// Kind of the token continuing this construct.
    fn kind(self) -> Option<TokenKind> {
        match self {
            Carry::None => None,
            Carry::BlockComment => Some(TokenKind::CommentBlock),
            Carry::Javadoc => Some(TokenKind::CommentJavadoc),
            Carry::NativeBlock => Some(TokenKind::NativeBlock),
            Carry::TextBlock => Some(TokenKind::TextBlock),
        }
    }

    /// End offset (exclusive) of the construct within `line`, if it closes.
    fn end_in(self, line: &str) -> Option<usize> {
        match self {
            Carry::None => Some(0),
            Carry::BlockComment | Carry::Javadoc | Carry::NativeBlock => {
                line.find("*/").map(|at| at + 2)
            }
            Carry::TextBlock => text_block_end(line),
        }
    }
}

/// State between two lines: the open construct and the context stack.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineState {
    carry: Carry,
    tracker: ContextTracker,
}

impl LineState {
    /// State before the first line of a file.
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn carry(&self) -> Carry {
        self.carry
    }

    pub fn tracker(&self) -> &ContextTracker {
        &self.tracker
    }
}

/// One line's tokens. Spans are relative to the line and `line` is always 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineTokens {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
    /// Feed this to the next line.
    pub state: LineState,
}

/// Tokenize one line, resuming from the state the previous line ended in.
///
/// `line` may include its line terminator.
pub fn tokenize_line(line: &str, state: &LineState) -> LineTokens {
    let buffer = SourceBuffer::new(line);
    let mut tracker = state.tracker.snapshot();
    let mut tokens = Vec::new();
    let mut offset = 0;

    if let Some(kind) = state.carry.kind() {
        let end = state.carry.end_in(line);
        let len = u32::try_from(end.unwrap_or(line.len())).unwrap_or(buffer.len());
        if len > 0 {
            let span = Span::new(0, len);
            tracker.observe(kind, buffer.as_str().get(span.to_range()).unwrap_or(""), false);
            tokens.push(Token {
                kind,
                span,
                line: 1,
                column: 1,
                flags: TokenFlags::empty(),
            });
        }
        if end.is_none() {
            return LineTokens {
                tokens,
                diagnostics: Vec::new(),
                state: LineState {
                    carry: state.carry,
                    tracker,
                },
            };
        }
        offset = len;
    }

    let mut lexer = Lexer::resume(&buffer, offset, tracker, true);
    tokens.extend(lexer.by_ref());
    let (diagnostics, tracker, carry) = lexer.into_line_parts();
    LineTokens {
        tokens,
        diagnostics,
        state: LineState { carry, tracker },
    }
}

/// Offset just past the first unescaped `"""`.
fn text_block_end(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' if bytes[i..].starts_with(b"\"\"\"") => return Some(i + 3),
            _ => i += 1,
        }
    }
    None
}

#[cfg(test)]
mod tests;
