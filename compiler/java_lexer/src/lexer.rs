//! Streaming lexer: the token stream handed to highlighting consumers.
//!
//! ```text
//! RawScanner ─▶ Classifier ─▶ Token ─▶ consumer
//!                   ▲           │
//!                   └─ ContextTracker ◀┘
//! ```
//!
//! Each raw lexeme is classified against the current tracker state, then
//! every resulting token is fed back into the tracker before the next lexeme
//! is scanned.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

use java_lexer_core::{RawScanner, RawTag, SourceBuffer};

use crate::classifier::{Classifier, Pieces};
use crate::context::ContextTracker;
use crate::diagnostic::Diagnostic;
use crate::line_state::Carry;
use crate::token::{Span, Token, TokenFlags};

/// Lazy, position-tagged token stream over one [`SourceBuffer`].
///
/// Iterate to pull tokens; call [`Lexer::finish`] afterwards to collect the
/// diagnostics, including the end-of-input brace check.
pub struct Lexer<'src> {
    buffer: &'src SourceBuffer,
    scanner: RawScanner<'src>,
    tracker: ContextTracker,
    classifier: Classifier,
    pieces: Pieces,
    queue: VecDeque<Token>,
    cancel: Option<&'src AtomicBool>,
    cancelled: bool,
    done: bool,
    line_mode: bool,
    /// Line of the last significant token, for `LINE_START`.
    last_line: u32,
}

impl<'src> Lexer<'src> {
    /// Lex `buffer` from the start with an empty context.
    pub fn new(buffer: &'src SourceBuffer) -> Self {
        Self::new_at(buffer, 0)
    }

    /// Lex `buffer` from `offset` with an empty context.
    ///
    /// `offset` is clamped to the buffer and should fall on a character
    /// boundary. Spans stay absolute.
    pub fn new_at(buffer: &'src SourceBuffer, offset: u32) -> Self {
        Self::resume(buffer, offset, ContextTracker::new(), false)
    }

    pub(crate) fn resume(
        buffer: &'src SourceBuffer,
        offset: u32,
        tracker: ContextTracker,
        line_mode: bool,
    ) -> Self {
        Lexer {
            buffer,
            scanner: RawScanner::new(buffer.cursor_at(offset)),
            tracker,
            classifier: Classifier::new(line_mode),
            pieces: Pieces::new(),
            queue: VecDeque::new(),
            cancel: None,
            cancelled: false,
            done: false,
            line_mode,
            last_line: 0,
        }
    }

    /// Stop at the next token boundary once `flag` becomes `true`.
    #[must_use]
    pub fn with_cancel(mut self, flag: &'src AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The text of a token produced by this lexer.
    pub fn text(&self, token: &Token) -> &'src str {
        self.scanner.slice(token.span.start, token.span.end)
    }

    /// Whether lexing stopped because the cancel flag was raised.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Current context state.
    pub fn tracker(&self) -> &ContextTracker {
        &self.tracker
    }

    /// Drain the remaining tokens and return every diagnostic, ordered by
    /// offset.
    ///
    /// A context stack still open at the end of the buffer is reported
    /// unless lexing was cancelled.
    pub fn finish(mut self) -> Vec<Diagnostic> {
        self.drain();
        if !self.cancelled && !self.line_mode {
            if let Some(issue) = self.tracker.finish() {
                let end = self.buffer.len();
                self.classifier
                    .report(Diagnostic::unbalanced(Span::point(end), issue));
            }
        }
        self.classifier.into_diagnostics()
    }

    /// Line-mode ending: diagnostics plus the state to resume from.
    pub(crate) fn into_line_parts(mut self) -> (Vec<Diagnostic>, ContextTracker, Carry) {
        self.drain();
        let carry = self.classifier.carry();
        (self.classifier.into_diagnostics(), self.tracker, carry)
    }

    fn drain(&mut self) {
        for _ in self.by_ref() {}
    }

    fn cancel_requested(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Scan and classify the next lexeme into the queue. Returns `false` at
    /// the end of input or on cancellation.
    fn fill(&mut self) -> bool {
        if self.cancel_requested() {
            tracing::debug!(offset = self.scanner.pos(), "tokenization cancelled");
            self.cancelled = true;
            return false;
        }

        let start = self.scanner.pos();
        let raw = self.scanner.next_token();
        if raw.tag == RawTag::Eof {
            return false;
        }

        let mut pieces = std::mem::take(&mut self.pieces);
        self.classifier
            .classify(raw, start, &self.scanner, &self.tracker, &mut pieces);

        let mut offset = start;
        for piece in &pieces {
            let span = Span::new(offset, offset + piece.len);
            offset = span.end;

            let mut flags = piece.flags;
            let text = self.scanner.slice(span.start, span.end);
            if let Some(issue) = self.tracker.observe(piece.kind, text, piece.opens_lambda) {
                self.classifier.report(Diagnostic::unbalanced(span, issue));
                flags |= TokenFlags::HAS_ERROR;
            }

            let position = self.buffer.line_col(span.start);
            if !piece.kind.is_trivia() && position.line != self.last_line {
                flags |= TokenFlags::LINE_START;
                self.last_line = position.line;
            }

            self.queue.push_back(Token {
                kind: piece.kind,
                span,
                line: position.line,
                column: position.column,
                flags,
            });
        }
        self.pieces = pieces;
        true
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return Some(token);
            }
            if self.done {
                return None;
            }
            if !self.fill() {
                self.done = true;
            }
        }
    }
}
