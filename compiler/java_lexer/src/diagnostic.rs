//! Recoverable lexing diagnostics.
//!
//! Diagnostics are values, never `Err`: the tokenizer always completes and
//! hands back every token alongside whatever it had to report. Each carries
//! the span it concerns and a kind that renders its own message.

use std::fmt;

use crate::token::Span;

/// A problem found while tokenizing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Diagnostic {
    /// Byte offset where the problem starts (`span.start`).
    pub offset: u32,
    pub span: Span,
    pub kind: DiagnosticKind,
}

/// What went wrong.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum DiagnosticKind {
    #[error("unterminated {what}")]
    UnterminatedLiteral { what: &'static str },
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("unbalanced braces: {detail}")]
    UnbalancedBraces { detail: BraceIssue },
    #[error("cannot tell whether `<` opens type arguments; treated as an operator")]
    UnresolvedAmbiguity,
    #[error("unexpected character {ch:?}")]
    UnknownCharacter { ch: char },
}

/// How a closer failed to pair with an opener.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BraceIssue {
    /// A closer arrived with nothing open.
    UnexpectedCloser { found: char },
    /// A closer arrived while a different kind of region was innermost.
    Mismatched { expected: char, found: char },
    /// Input ended with regions still open.
    Unclosed { count: usize, innermost: char },
}

impl fmt::Display for BraceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BraceIssue::UnexpectedCloser { found } => {
                write!(f, "unexpected `{found}` with nothing open")
            }
            BraceIssue::Mismatched { expected, found } => {
                write!(f, "expected `{expected}`, found `{found}`")
            }
            BraceIssue::Unclosed { count, innermost } => {
                write!(
                    f,
                    "{count} unclosed region(s) at end of input, innermost needs `{innermost}`"
                )
            }
        }
    }
}

impl Diagnostic {
    fn new(span: Span, kind: DiagnosticKind) -> Self {
        Self {
            offset: span.start,
            span,
            kind,
        }
    }

    #[cold]
    pub fn unterminated_literal(span: Span, what: &'static str) -> Self {
        Self::new(span, DiagnosticKind::UnterminatedLiteral { what })
    }

    #[cold]
    pub fn unterminated_comment(span: Span) -> Self {
        Self::new(span, DiagnosticKind::UnterminatedComment)
    }

    #[cold]
    pub fn unbalanced(span: Span, detail: BraceIssue) -> Self {
        Self::new(span, DiagnosticKind::UnbalancedBraces { detail })
    }

    #[cold]
    pub fn unresolved_ambiguity(span: Span) -> Self {
        Self::new(span, DiagnosticKind::UnresolvedAmbiguity)
    }

    #[cold]
    pub fn unknown_character(span: Span, ch: char) -> Self {
        Self::new(span, DiagnosticKind::UnknownCharacter { ch })
    }

    /// Human-readable message for this diagnostic.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}
