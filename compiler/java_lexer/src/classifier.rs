//! Classification: raw lexemes to final token kinds.
//!
//! The classifier reads the context tracker but never mutates it; the lexer
//! feeds every emitted piece back into the tracker afterwards. Ambiguities
//! that need more than the tracker's state are settled by the bounded lookaheads
//! in [`crate::lookahead`].
//!
//! Each lexeme becomes exactly one piece, except a `>>` or `>>>` run closing
//! type arguments, which splits into one `GenericClose` per `>`.

use java_lexer_core::{RawScanner, RawTag, RawToken};
use smallvec::SmallVec;

use crate::context::{ContextFrame, ContextTracker};
use crate::diagnostic::Diagnostic;
use crate::keywords;
use crate::line_state::Carry;
use crate::lookahead::{self, AngleOutcome, PendingAngle};
use crate::token::{Span, TokenFlags, TokenKind};

/// One classified slice of a lexeme.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Piece {
    pub kind: TokenKind,
    pub len: u32,
    pub flags: TokenFlags,
    /// Only set on `(`: it opens a lambda parameter list.
    pub opens_lambda: bool,
}

impl Piece {
    fn new(kind: TokenKind, len: u32) -> Self {
        Piece {
            kind,
            len,
            flags: TokenFlags::empty(),
            opens_lambda: false,
        }
    }

    fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags |= flags;
        self
    }
}

pub(crate) type Pieces = SmallVec<[Piece; 3]>;

/// Assigns token kinds and collects diagnostics.
///
/// In line mode an unterminated comment or text block is not an error: it
/// is recorded as the [`Carry`] for the next line.
pub(crate) struct Classifier {
    line_mode: bool,
    carry: Carry,
    diagnostics: Vec<Diagnostic>,
}

impl Classifier {
    pub(crate) fn new(line_mode: bool) -> Self {
        Classifier {
            line_mode,
            carry: Carry::None,
            diagnostics: Vec::new(),
        }
    }

    /// Classify the lexeme `raw` starting at `start`.
    ///
    /// `scanner` is positioned just past the lexeme; lookaheads clone it.
    pub(crate) fn classify(
        &mut self,
        raw: RawToken,
        start: u32,
        scanner: &RawScanner<'_>,
        tracker: &ContextTracker,
        out: &mut Pieces,
    ) {
        out.clear();
        let span = Span::new(start, start + raw.len);
        let piece = match raw.tag {
            RawTag::Ident => {
                identifier(scanner.slice(span.start, span.end), raw.len, scanner, tracker)
            }
            RawTag::At => self.at_sign(span, scanner),
            RawTag::Less => self.less(span, scanner, tracker),
            RawTag::Greater | RawTag::Shr | RawTag::UShr => {
                closing_angles(raw, tracker, out);
                return;
            }
            RawTag::LeftParen => Piece {
                opens_lambda: lambda_candidate(tracker.last())
                    && lookahead::is_lambda_params(scanner.clone()),
                ..Piece::new(TokenKind::LParen, raw.len)
            },

            RawTag::Int | RawTag::HexInt | RawTag::OctInt | RawTag::BinInt => {
                Piece::new(TokenKind::IntegerLiteral, raw.len)
            }
            RawTag::Float => Piece::new(TokenKind::FloatLiteral, raw.len),
            RawTag::Char => Piece::new(TokenKind::CharLiteral, raw.len),
            RawTag::String => Piece::new(TokenKind::StringLiteral, raw.len),
            RawTag::TextBlock => Piece::new(TokenKind::TextBlock, raw.len),

            RawTag::Whitespace => Piece::new(TokenKind::Whitespace, raw.len),
            RawTag::LineComment => Piece::new(TokenKind::CommentLine, raw.len),
            RawTag::BlockComment => Piece::new(TokenKind::CommentBlock, raw.len),
            RawTag::JavadocComment => Piece::new(TokenKind::CommentJavadoc, raw.len),
            RawTag::NativeBlock => Piece::new(TokenKind::NativeBlock, raw.len),

            RawTag::RightParen => Piece::new(TokenKind::RParen, raw.len),
            RawTag::LeftBrace => Piece::new(TokenKind::LBrace, raw.len),
            RawTag::RightBrace => Piece::new(TokenKind::RBrace, raw.len),
            RawTag::LeftBracket => Piece::new(TokenKind::LBracket, raw.len),
            RawTag::RightBracket => Piece::new(TokenKind::RBracket, raw.len),
            RawTag::Semicolon => Piece::new(TokenKind::Semicolon, raw.len),
            RawTag::Comma => Piece::new(TokenKind::Comma, raw.len),
            RawTag::Dot => Piece::new(TokenKind::Dot, raw.len),
            RawTag::Ellipsis => Piece::new(TokenKind::Ellipsis, raw.len),
            RawTag::Question => Piece::new(TokenKind::Question, raw.len),
            RawTag::Colon => Piece::new(TokenKind::Colon, raw.len),
            RawTag::Arrow => Piece::new(TokenKind::Arrow, raw.len),
            RawTag::ColonColon => Piece::new(TokenKind::ColonColon, raw.len),

            RawTag::Plus
            | RawTag::Minus
            | RawTag::Star
            | RawTag::Slash
            | RawTag::Percent
            | RawTag::Caret
            | RawTag::Ampersand
            | RawTag::Pipe
            | RawTag::Tilde
            | RawTag::Bang
            | RawTag::Equal
            | RawTag::PlusPlus
            | RawTag::MinusMinus
            | RawTag::AmpersandAmpersand
            | RawTag::PipePipe
            | RawTag::EqualEqual
            | RawTag::BangEqual
            | RawTag::LessEqual
            | RawTag::GreaterEqual
            | RawTag::Shl
            | RawTag::PlusEqual
            | RawTag::MinusEqual
            | RawTag::StarEqual
            | RawTag::SlashEqual
            | RawTag::PercentEqual
            | RawTag::CaretEqual
            | RawTag::AmpersandEqual
            | RawTag::PipeEqual
            | RawTag::ShlEqual
            | RawTag::ShrEqual
            | RawTag::UShrEqual => Piece::new(TokenKind::Operator, raw.len),

            RawTag::UnterminatedString => self.unterminated_literal(span, "string literal"),
            RawTag::UnterminatedChar => self.unterminated_literal(span, "character literal"),
            RawTag::UnterminatedTextBlock => {
                if self.line_mode {
                    self.carry = Carry::TextBlock;
                    Piece::new(TokenKind::TextBlock, raw.len)
                } else {
                    self.unterminated_literal(span, "text block")
                }
            }
            RawTag::UnterminatedBlockComment => {
                let text = scanner.slice(span.start, span.end);
                if text.starts_with("/**") {
                    self.unterminated_comment(span, TokenKind::CommentJavadoc, Carry::Javadoc)
                } else {
                    self.unterminated_comment(span, TokenKind::CommentBlock, Carry::BlockComment)
                }
            }
            RawTag::UnterminatedNativeBlock => {
                self.unterminated_comment(span, TokenKind::NativeBlock, Carry::NativeBlock)
            }
            RawTag::InvalidByte => {
                let ch = scanner
                    .slice(span.start, span.end)
                    .chars()
                    .next()
                    .unwrap_or('\0');
                self.unknown(span, ch)
            }
            RawTag::Eof => return,
        };
        out.push(piece);
    }

    /// Record a diagnostic raised outside classification (brace matching).
    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(span = %diagnostic.span, message = %diagnostic.kind, "diagnostic");
        self.diagnostics.push(diagnostic);
    }

    /// Construct left open at the end of a line.
    pub(crate) fn carry(&self) -> Carry {
        self.carry
    }

    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    // ─── Annotations ───

    /// `@interface` starts a declaration; `@Name` an annotation.
    fn at_sign(&mut self, span: Span, scanner: &RawScanner<'_>) -> Piece {
        match lookahead::peek_ident(scanner) {
            Some("interface") => Piece::new(TokenKind::Keyword, span.len()),
            Some(_) => Piece::new(TokenKind::Annotation, span.len()),
            None => self.unknown(span, '@'),
        }
    }

    // ─── Angle brackets ───

    fn less(&mut self, span: Span, scanner: &RawScanner<'_>, tracker: &ContextTracker) -> Piece {
        if tracker.top() == Some(ContextFrame::GenericArgs) {
            return Piece::new(TokenKind::GenericOpen, span.len());
        }
        if !generic_eligible(tracker) {
            return Piece::new(TokenKind::Operator, span.len());
        }
        match PendingAngle::new(span.start).resolve(scanner.clone()) {
            AngleOutcome::Generic => Piece::new(TokenKind::GenericOpen, span.len()),
            AngleOutcome::Operator => Piece::new(TokenKind::Operator, span.len()),
            AngleOutcome::Exhausted => {
                self.report(Diagnostic::unresolved_ambiguity(span));
                Piece::new(TokenKind::Operator, span.len()).with_flags(TokenFlags::HAS_ERROR)
            }
        }
    }

    // ─── Errors ───

    #[cold]
    fn unterminated_literal(&mut self, span: Span, what: &'static str) -> Piece {
        self.report(Diagnostic::unterminated_literal(span, what));
        Piece::new(TokenKind::UnterminatedLiteral, span.len()).with_flags(TokenFlags::HAS_ERROR)
    }

    #[cold]
    fn unterminated_comment(&mut self, span: Span, kind: TokenKind, carry: Carry) -> Piece {
        if self.line_mode {
            self.carry = carry;
            return Piece::new(kind, span.len());
        }
        self.report(Diagnostic::unterminated_comment(span));
        Piece::new(kind, span.len()).with_flags(TokenFlags::HAS_ERROR)
    }

    #[cold]
    fn unknown(&mut self, span: Span, ch: char) -> Piece {
        self.report(Diagnostic::unknown_character(span, ch));
        Piece::new(TokenKind::Unknown, span.len()).with_flags(TokenFlags::HAS_ERROR)
    }
}

/// Identifier classes, in priority order.
fn identifier(
    text: &str,
    len: u32,
    scanner: &RawScanner<'_>,
    tracker: &ContextTracker,
) -> Piece {
    if tracker.expects_annotation_name() {
        return Piece::new(TokenKind::Annotation, len);
    }
    if let Some(kind) = keywords::lookup(text) {
        return Piece::new(kind, len);
    }
    if tracker.expects_type_name() {
        return Piece::new(TokenKind::ClassName, len);
    }
    if let Some(kind) = restricted_word(text, scanner, tracker) {
        return Piece::new(kind, len).with_flags(TokenFlags::CONTEXTUAL_KW);
    }
    if tracker.in_enum_constants() {
        return Piece::new(TokenKind::EnumConstant, len);
    }
    if lookahead::peek_significant(scanner) == RawTag::LeftParen {
        return Piece::new(TokenKind::FunctionName, len);
    }
    Piece::new(TokenKind::Identifier, len)
}

/// Restricted words resolve by the innermost frame.
fn restricted_word(
    text: &str,
    scanner: &RawScanner<'_>,
    tracker: &ContextTracker,
) -> Option<TokenKind> {
    match (tracker.top(), text) {
        (Some(ContextFrame::ModuleBody), _) if keywords::is_module_directive(text) => {
            Some(TokenKind::ModuleKeyword)
        }
        (None, "module") if lookahead::is_module_declaration(scanner.clone()) => {
            Some(TokenKind::ModuleKeyword)
        }
        (None, "open") if lookahead::is_open_module(scanner.clone()) => {
            Some(TokenKind::ModuleKeyword)
        }
        (
            None
            | Some(
                ContextFrame::ClassBody
                | ContextFrame::InterfaceBody
                | ContextFrame::EnumBody { .. }
                | ContextFrame::EnumConstantBody
                | ContextFrame::Block,
            ),
            "record",
        ) if lookahead::is_record_header(scanner.clone()) => Some(TokenKind::Keyword),
        _ => None,
    }
}

/// Positions where `<` may open type arguments: after a type or member
/// name, after `.` (`Collections.<T>emptyList()`), after a modifier or at
/// the start of a member (`<T> void f()`).
fn generic_eligible(tracker: &ContextTracker) -> bool {
    tracker.last_was_modifier()
        || matches!(
            tracker.last(),
            None | Some(
                TokenKind::Identifier
                    | TokenKind::ClassName
                    | TokenKind::Dot
                    | TokenKind::LBrace
                    | TokenKind::RBrace
                    | TokenKind::Semicolon
            )
        )
}

/// Calls, `if (...)`, `this(...)` and annotation arguments never take
/// lambda parameters directly.
fn lambda_candidate(last: Option<TokenKind>) -> bool {
    !matches!(
        last,
        Some(
            TokenKind::FunctionName
                | TokenKind::Identifier
                | TokenKind::ClassName
                | TokenKind::EnumConstant
                | TokenKind::Annotation
                | TokenKind::KeywordControl
                | TokenKind::KeywordThis
        )
    )
}

/// Split a `>`-run: one `GenericClose` per open type-argument level, any
/// remainder as a single operator.
fn closing_angles(raw: RawToken, tracker: &ContextTracker, out: &mut Pieces) {
    let run = raw.tag.closing_angle_count();
    let open = u32::try_from(tracker.generic_run()).unwrap_or(u32::MAX);
    let closes = run.min(open);
    if closes == 0 {
        out.push(Piece::new(TokenKind::Operator, raw.len));
        return;
    }
    let flags = if run > 1 {
        TokenFlags::SPLIT
    } else {
        TokenFlags::empty()
    };
    for _ in 0..closes {
        out.push(Piece::new(TokenKind::GenericClose, 1).with_flags(flags));
    }
    if run > closes {
        out.push(Piece::new(TokenKind::Operator, run - closes));
    }
}

#[cfg(test)]
mod tests;
