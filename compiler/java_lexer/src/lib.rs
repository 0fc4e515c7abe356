//! Context-aware Java tokenizer for syntax highlighting.
//!
//! Builds on the raw scanner in `java_lexer_core` and adds the context
//! needed to classify ambiguous lexemes:
//!
//! - module directive words are keywords only inside a module body
//! - `<` opens type arguments or compares, decided by a bounded lookahead
//! - `>>` / `>>>` closing nested type arguments split into one closer per `>`
//! - enum constants, their argument lists and constant bodies
//! - `@interface` versus annotation usage
//!
//! Tokenization never fails. Every entry point returns the full token stream
//! (which concatenates back to the source) plus a list of soft
//! [`Diagnostic`]s.
//!
//! ```text
//! &str → SourceBuffer → RawScanner → Classifier ⇄ ContextTracker → Token*
//! ```

mod classifier;
mod context;
mod diagnostic;
mod keywords;
mod lexer;
mod line_state;
mod lookahead;
mod token;

use std::sync::atomic::AtomicBool;

use rayon::prelude::*;

pub use context::{ContextFrame, ContextTracker};
pub use diagnostic::{BraceIssue, Diagnostic, DiagnosticKind};
pub use java_lexer_core::{LineCol, SourceBuffer};
pub use lexer::Lexer;
pub use line_state::{tokenize_line, Carry, LineState, LineTokens};
pub use token::{Span, Token, TokenFlags, TokenKind};

/// Result of tokenizing one buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
    /// Lexing stopped early at a cancellation request. `tokens` holds every
    /// token produced before that point.
    pub cancelled: bool,
}

impl LexOutput {
    /// Tokens that are not whitespace or comments.
    pub fn significant(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|token| !token.is_trivia())
    }
}

/// Tokenize a whole buffer.
pub fn tokenize(source: &str) -> LexOutput {
    tokenize_from(source, 0)
}

/// Tokenize starting at byte `offset` with an empty context.
///
/// The offset is clamped to the source and moved back to a character
/// boundary. Spans and line numbers stay relative to the whole source.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len(), offset = offset))]
pub fn tokenize_from(source: &str, offset: usize) -> LexOutput {
    let buffer = SourceBuffer::new(source);
    let offset = u32::try_from(char_floor(source, offset)).unwrap_or(buffer.len());
    run(Lexer::new_at(&buffer, offset))
}

/// Tokenize a whole buffer, stopping between tokens once `cancel` is set.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn tokenize_cancellable(source: &str, cancel: &AtomicBool) -> LexOutput {
    let buffer = SourceBuffer::new(source);
    run(Lexer::new(&buffer).with_cancel(cancel))
}

/// Tokenize independent buffers in parallel.
///
/// Results are in input order.
#[tracing::instrument(level = "debug", skip_all, fields(count = sources.len()))]
pub fn tokenize_batch(sources: &[&str]) -> Vec<LexOutput> {
    sources.par_iter().map(|source| tokenize(source)).collect()
}

fn run(mut lexer: Lexer<'_>) -> LexOutput {
    let tokens: Vec<Token> = lexer.by_ref().collect();
    let cancelled = lexer.is_cancelled();
    let diagnostics = lexer.finish();
    tracing::debug!(
        tokens = tokens.len(),
        diagnostics = diagnostics.len(),
        cancelled,
        "tokenized"
    );
    LexOutput {
        tokens,
        diagnostics,
        cancelled,
    }
}

/// Largest character boundary at or below `offset`.
fn char_floor(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
