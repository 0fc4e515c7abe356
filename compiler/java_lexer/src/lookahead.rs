//! Bounded speculative scans.
//!
//! Every function here takes a *clone* of the raw scanner positioned just
//! after the lexeme being classified. The main scanner never moves
//! backwards; a lookahead copy is simply dropped once it has answered.

use java_lexer_core::{RawScanner, RawTag, RawToken};

use crate::keywords;

/// Significant lexemes a single lookahead may inspect before giving up.
pub(crate) const SPECULATION_BUDGET: u32 = 512;

/// Next lexeme that is not trivia, with its start offset.
pub(crate) fn next_significant(ahead: &mut RawScanner<'_>) -> (RawToken, u32) {
    loop {
        let start = ahead.pos();
        let token = ahead.next_token();
        if !token.tag.is_trivia() {
            return (token, start);
        }
    }
}

/// Tag of the next significant lexeme after the scanner's position.
pub(crate) fn peek_significant(ahead: &RawScanner<'_>) -> RawTag {
    next_significant(&mut ahead.clone()).0.tag
}

/// Text of the next significant lexeme if it is an identifier.
pub(crate) fn peek_ident<'a>(ahead: &RawScanner<'a>) -> Option<&'a str> {
    let mut ahead = ahead.clone();
    let (token, start) = next_significant(&mut ahead);
    (token.tag == RawTag::Ident).then(|| ahead.slice(start, start + token.len))
}

// ─── Angle brackets ───

/// How a speculative scan resolved a `<`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum AngleOutcome {
    /// A matching `>` closed a run of type-argument lexemes.
    Generic,
    /// Something that cannot appear in type arguments came first.
    Operator,
    /// Budget or input ran out before either answer.
    Exhausted,
}

/// A `<` awaiting resolution.
#[derive(Copy, Clone, Debug)]
pub(crate) struct PendingAngle {
    pub offset: u32,
}

impl PendingAngle {
    pub(crate) fn new(offset: u32) -> Self {
        Self { offset }
    }

    /// Scan ahead from just after the `<` and decide what it opens.
    ///
    /// Type arguments may contain identifiers, `,` `.` `?` `&` `[` `]`,
    /// annotations, `extends`, `super`, primitive type names and nested
    /// `<...>` pairs. A `>`-run wider than the open depth (`a < b >>> c`)
    /// rules out generics.
    pub(crate) fn resolve(self, mut ahead: RawScanner<'_>) -> AngleOutcome {
        let mut depth: u32 = 1;
        let mut outcome = AngleOutcome::Exhausted;
        for _ in 0..SPECULATION_BUDGET {
            let (token, start) = next_significant(&mut ahead);
            match token.tag {
                RawTag::Ident => {
                    let text = ahead.slice(start, start + token.len);
                    if keywords::lookup(text).is_some()
                        && !matches!(text, "extends" | "super")
                        && !keywords::is_primitive_type(text)
                    {
                        outcome = AngleOutcome::Operator;
                        break;
                    }
                }
                RawTag::Comma
                | RawTag::Dot
                | RawTag::Question
                | RawTag::Ampersand
                | RawTag::LeftBracket
                | RawTag::RightBracket
                | RawTag::At => {}
                RawTag::Less => depth += 1,
                RawTag::Greater | RawTag::Shr | RawTag::UShr => {
                    let run = token.tag.closing_angle_count();
                    if run > depth {
                        outcome = AngleOutcome::Operator;
                        break;
                    }
                    depth -= run;
                    if depth == 0 {
                        outcome = AngleOutcome::Generic;
                        break;
                    }
                }
                RawTag::Eof => break,
                _ => {
                    outcome = AngleOutcome::Operator;
                    break;
                }
            }
        }
        tracing::trace!(offset = self.offset, ?outcome, "resolved `<`");
        outcome
    }
}

// ─── Parentheses ───

/// Whether the `(` just scanned starts a lambda parameter list: its matching
/// `)` is followed by `->`.
pub(crate) fn is_lambda_params(mut ahead: RawScanner<'_>) -> bool {
    let mut depth: u32 = 1;
    for _ in 0..SPECULATION_BUDGET {
        match next_significant(&mut ahead).0.tag {
            RawTag::LeftParen => depth += 1,
            RawTag::RightParen => {
                depth -= 1;
                if depth == 0 {
                    return next_significant(&mut ahead).0.tag == RawTag::Arrow;
                }
            }
            RawTag::Semicolon | RawTag::LeftBrace | RawTag::RightBrace | RawTag::Eof => {
                return false;
            }
            _ => {}
        }
    }
    false
}

// ─── Restricted words ───

/// After `module`: a qualified name followed by `{`.
pub(crate) fn is_module_declaration(mut ahead: RawScanner<'_>) -> bool {
    loop {
        let (name, start) = next_significant(&mut ahead);
        if name.tag != RawTag::Ident
            || keywords::lookup(ahead.slice(start, start + name.len)).is_some()
        {
            return false;
        }
        match next_significant(&mut ahead).0.tag {
            RawTag::Dot => {}
            RawTag::LeftBrace => return true,
            _ => return false,
        }
    }
}

/// After `open`: `module` and then a module declaration.
pub(crate) fn is_open_module(mut ahead: RawScanner<'_>) -> bool {
    let (token, start) = next_significant(&mut ahead);
    token.tag == RawTag::Ident
        && ahead.slice(start, start + token.len) == "module"
        && is_module_declaration(ahead)
}

/// After `record`: a type name, then its component list or type parameters.
pub(crate) fn is_record_header(mut ahead: RawScanner<'_>) -> bool {
    let (name, start) = next_significant(&mut ahead);
    if name.tag != RawTag::Ident || keywords::lookup(ahead.slice(start, start + name.len)).is_some()
    {
        return false;
    }
    matches!(
        next_significant(&mut ahead).0.tag,
        RawTag::LeftParen | RawTag::Less
    )
}
