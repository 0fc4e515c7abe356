//! Context tracking: the stack of open syntactic regions.
//!
//! The tracker sees every emitted token (trivia excluded) and keeps just
//! enough structure to disambiguate context-sensitive lexemes: which body
//! kind is innermost, whether a declaration header is waiting for its `{`,
//! whether an annotation name is in progress, and how many generic argument
//! lists are open.
//!
//! The stack never underflows. A closer with nothing to close, or with a
//! different region innermost, yields one [`BraceIssue`] and the tracker
//! recovers by popping whatever is on top.

use smallvec::SmallVec;

use crate::diagnostic::BraceIssue;
use crate::keywords::{self, DeclarationBody};
use crate::token::TokenKind;

/// One open syntactic region.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContextFrame {
    ClassBody,
    /// `in_constants` holds until the `;` that ends the constant list.
    EnumBody { in_constants: bool },
    /// Anonymous class body attached to an enum constant.
    EnumConstantBody,
    InterfaceBody,
    ModuleBody,
    AnnotationArgs,
    GenericArgs,
    LambdaParams,
    /// Any other `{ ... }`: method bodies, initializers, array literals.
    Block,
    /// Any other `( ... )`.
    Paren,
}

impl ContextFrame {
    /// Closed by `}`.
    #[inline]
    pub fn is_body(self) -> bool {
        matches!(
            self,
            Self::ClassBody
                | Self::EnumBody { .. }
                | Self::EnumConstantBody
                | Self::InterfaceBody
                | Self::ModuleBody
                | Self::Block
        )
    }

    /// Closed by `)`.
    #[inline]
    pub fn is_paren(self) -> bool {
        matches!(self, Self::AnnotationArgs | Self::LambdaParams | Self::Paren)
    }

    /// The character that closes this region.
    pub fn closer(self) -> char {
        if self.is_body() {
            '}'
        } else if self.is_paren() {
            ')'
        } else {
            '>'
        }
    }
}

/// Progress through an annotation's (possibly qualified) name.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum AnnotationName {
    #[default]
    None,
    /// After `@` or after a `.` inside the name.
    ExpectName,
    /// After a name part; `(` here opens annotation arguments.
    AfterName,
}

/// Frame stack plus the few bits of pending state that decide what the next
/// opener pushes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContextTracker {
    frames: SmallVec<[ContextFrame; 16]>,
    max_depth: usize,
    /// Declaration header awaiting its `{`, with the depth it was seen at.
    header: Option<(ContextFrame, usize)>,
    type_name_pending: bool,
    annotation: AnnotationName,
    /// An enum constant (and possibly its argument list) was just seen at
    /// enum-body level.
    enum_constant_ready: bool,
    /// Depths of `new` expressions whose argument list has not closed yet.
    new_depths: SmallVec<[usize; 4]>,
    /// `new T(...)` just closed; a `{` here is an anonymous class body.
    anonymous_body_ready: bool,
    last: Option<TokenKind>,
    last_was_modifier: bool,
}

impl ContextTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Queries ───

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Deepest nesting seen so far.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    pub fn top(&self) -> Option<ContextFrame> {
        self.frames.last().copied()
    }

    /// Open frames, outermost first.
    #[inline]
    pub fn frames(&self) -> &[ContextFrame] {
        &self.frames
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// A `class`/`interface`/`enum`/`record` keyword was the last token, so
    /// the next identifier names the type.
    #[inline]
    pub fn expects_type_name(&self) -> bool {
        self.type_name_pending
    }

    /// The next identifier is part of an annotation name.
    #[inline]
    pub fn expects_annotation_name(&self) -> bool {
        self.annotation == AnnotationName::ExpectName
    }

    /// Constants are being listed directly inside an enum body.
    #[inline]
    pub fn in_enum_constants(&self) -> bool {
        matches!(self.top(), Some(ContextFrame::EnumBody { in_constants: true }))
    }

    /// Number of `GenericArgs` frames on top of the stack: how many `>` a
    /// closing run may consume as generic closers.
    pub fn generic_run(&self) -> usize {
        self.frames
            .iter()
            .rev()
            .take_while(|frame| **frame == ContextFrame::GenericArgs)
            .count()
    }

    /// Kind of the last significant token observed.
    #[inline]
    pub fn last(&self) -> Option<TokenKind> {
        self.last
    }

    /// The last significant token was a declaration modifier (`public`,
    /// `static`, ...).
    #[inline]
    pub fn last_was_modifier(&self) -> bool {
        self.last_was_modifier
    }

    /// Copy of the current state, for resuming on the next line.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    // ─── Transitions ───

    /// Update the state from one emitted token.
    ///
    /// `opens_lambda` is only consulted for `(`: the classifier's lookahead
    /// found the matching `)` followed by `->`. Returns the brace issue when
    /// the token is a closer that did not match.
    pub fn observe(
        &mut self,
        kind: TokenKind,
        text: &str,
        opens_lambda: bool,
    ) -> Option<BraceIssue> {
        if kind.is_trivia() {
            return None;
        }

        let at_enum_level = self.in_enum_constants();
        let annotation = std::mem::take(&mut self.annotation);
        let anonymous_body_ready = std::mem::take(&mut self.anonymous_body_ready);
        self.type_name_pending = false;
        let mut issue = None;

        match kind {
            TokenKind::Annotation => {
                self.annotation = if text == "@" {
                    AnnotationName::ExpectName
                } else {
                    AnnotationName::AfterName
                };
            }
            TokenKind::Dot if annotation == AnnotationName::AfterName => {
                self.annotation = AnnotationName::ExpectName;
            }
            TokenKind::Keyword => self.keyword(text),
            TokenKind::ModuleKeyword if text == "module" => {
                self.header = Some((ContextFrame::ModuleBody, self.depth()));
            }
            TokenKind::KeywordNew => self.new_depths.push(self.depth()),
            TokenKind::LBrace => self.open_brace(at_enum_level, anonymous_body_ready),
            TokenKind::RBrace => {
                issue = self.pop_matching(ContextFrame::is_body, '}');
                self.forget_deeper_news();
            }
            TokenKind::LParen => {
                let frame = if annotation == AnnotationName::AfterName {
                    ContextFrame::AnnotationArgs
                } else if opens_lambda {
                    ContextFrame::LambdaParams
                } else {
                    ContextFrame::Paren
                };
                self.push(frame);
            }
            TokenKind::RParen => {
                issue = self.pop_matching(ContextFrame::is_paren, ')');
                self.forget_deeper_news();
                if self.new_depths.last() == Some(&self.depth()) {
                    self.new_depths.pop();
                    self.anonymous_body_ready = true;
                }
            }
            TokenKind::GenericOpen => self.push(ContextFrame::GenericArgs),
            TokenKind::GenericClose => {
                if self.top() == Some(ContextFrame::GenericArgs) {
                    self.pop();
                }
            }
            TokenKind::Semicolon => {
                if let Some(ContextFrame::EnumBody { in_constants }) = self.frames.last_mut() {
                    *in_constants = false;
                }
                let depth = self.depth();
                if self.header.is_some_and(|(_, at)| at == depth) {
                    self.header = None;
                }
                self.new_depths.retain(|at| *at < depth);
            }
            _ => {}
        }

        if at_enum_level {
            self.enum_constant_ready = match kind {
                TokenKind::EnumConstant => true,
                TokenKind::LParen => self.enum_constant_ready,
                _ => false,
            };
        }

        self.last_was_modifier =
            kind == TokenKind::Keyword && keywords::is_declaration_modifier(text);
        self.last = Some(kind);
        issue
    }

    /// End of input: report regions left open.
    pub fn finish(&self) -> Option<BraceIssue> {
        let innermost = self.top()?;
        Some(BraceIssue::Unclosed {
            count: self.depth(),
            innermost: innermost.closer(),
        })
    }

    fn keyword(&mut self, text: &str) {
        if self.last == Some(TokenKind::Dot) {
            // `Foo.class`
            return;
        }
        let Some(body) = keywords::type_declaration_body(text) else {
            return;
        };
        let frame = match body {
            DeclarationBody::Class => ContextFrame::ClassBody,
            DeclarationBody::Interface => ContextFrame::InterfaceBody,
            DeclarationBody::Enum => ContextFrame::EnumBody { in_constants: true },
        };
        self.header = Some((frame, self.depth()));
        self.type_name_pending = true;
    }

    fn open_brace(&mut self, at_enum_level: bool, anonymous_body_ready: bool) {
        let depth = self.depth();
        let frame = match self.header {
            Some((frame, at)) if at == depth => {
                self.header = None;
                frame
            }
            _ if at_enum_level && self.enum_constant_ready => ContextFrame::EnumConstantBody,
            _ if anonymous_body_ready => ContextFrame::ClassBody,
            _ => ContextFrame::Block,
        };
        self.new_depths.retain(|at| *at < depth);
        self.push(frame);
    }

    fn forget_deeper_news(&mut self) {
        let depth = self.depth();
        self.new_depths.retain(|at| *at <= depth);
    }

    fn push(&mut self, frame: ContextFrame) {
        self.frames.push(frame);
        self.max_depth = self.max_depth.max(self.frames.len());
        tracing::trace!(?frame, depth = self.frames.len(), "push frame");
    }

    fn pop(&mut self) -> Option<ContextFrame> {
        let frame = self.frames.pop();
        tracing::trace!(?frame, depth = self.frames.len(), "pop frame");
        frame
    }

    /// Pop the innermost frame, reporting when it is not the kind `found`
    /// closes. Recovery always pops the top.
    fn pop_matching(
        &mut self,
        closes: fn(ContextFrame) -> bool,
        found: char,
    ) -> Option<BraceIssue> {
        match self.pop() {
            None => Some(BraceIssue::UnexpectedCloser { found }),
            Some(frame) if closes(frame) => None,
            Some(frame) => Some(BraceIssue::Mismatched {
                expected: frame.closer(),
                found,
            }),
        }
    }
}
