use java_lexer_core::{RawScanner, RawTag, RawToken, SourceBuffer};
use pretty_assertions::assert_eq;

use super::*;
use crate::token::TokenKind as K;

fn tracker_with_open_generics(count: usize) -> ContextTracker {
    let mut tracker = ContextTracker::new();
    tracker.observe(K::ClassName, "Map", false);
    for _ in 0..count {
        tracker.observe(K::GenericOpen, "<", false);
    }
    tracker
}

fn split(tag: RawTag, open: usize) -> Vec<(TokenKind, u32, TokenFlags)> {
    let raw = RawToken {
        tag,
        len: tag.closing_angle_count(),
    };
    let mut out = Pieces::new();
    closing_angles(raw, &tracker_with_open_generics(open), &mut out);
    out.iter().map(|p| (p.kind, p.len, p.flags)).collect()
}

/// Classify the first lexeme of `source` with an empty context.
fn classify_first(source: &str, line_mode: bool) -> (Piece, Classifier) {
    let buffer = SourceBuffer::new(source);
    let mut scanner = RawScanner::new(buffer.cursor());
    let raw = scanner.next_token();
    let mut classifier = Classifier::new(line_mode);
    let mut out = Pieces::new();
    classifier.classify(raw, 0, &scanner, &ContextTracker::new(), &mut out);
    assert_eq!(out.len(), 1);
    (out[0], classifier)
}

// === Closing angle runs ===

#[test]
fn single_close_is_not_split() {
    assert_eq!(
        split(RawTag::Greater, 1),
        vec![(K::GenericClose, 1, TokenFlags::empty())]
    );
}

#[test]
fn shift_run_splits_per_open_level() {
    assert_eq!(
        split(RawTag::Shr, 2),
        vec![
            (K::GenericClose, 1, TokenFlags::SPLIT),
            (K::GenericClose, 1, TokenFlags::SPLIT),
        ]
    );
    assert_eq!(split(RawTag::UShr, 3).len(), 3);
}

#[test]
fn surplus_angles_become_one_operator() {
    assert_eq!(
        split(RawTag::UShr, 1),
        vec![
            (K::GenericClose, 1, TokenFlags::SPLIT),
            (K::Operator, 2, TokenFlags::empty()),
        ]
    );
}

#[test]
fn run_outside_type_arguments_is_an_operator() {
    assert_eq!(
        split(RawTag::Shr, 0),
        vec![(K::Operator, 2, TokenFlags::empty())]
    );
}

// === Position predicates ===

#[test]
fn lambda_candidates() {
    assert!(lambda_candidate(None));
    assert!(lambda_candidate(Some(K::Operator)));
    assert!(lambda_candidate(Some(K::LParen)));
    assert!(!lambda_candidate(Some(K::FunctionName)));
    assert!(!lambda_candidate(Some(K::KeywordControl)));
}

#[test]
fn generic_positions() {
    assert!(generic_eligible(&ContextTracker::new()));

    let mut tracker = ContextTracker::new();
    tracker.observe(K::IntegerLiteral, "1", false);
    assert!(!generic_eligible(&tracker));

    tracker.observe(K::Keyword, "static", false);
    assert!(generic_eligible(&tracker));
}

// === Errors ===

#[test]
fn unterminated_comment_reports_outside_line_mode() {
    let (piece, classifier) = classify_first("/** open", false);
    assert_eq!(piece.kind, K::CommentJavadoc);
    assert!(piece.flags.contains(TokenFlags::HAS_ERROR));
    assert_eq!(classifier.carry(), Carry::None);
    assert_eq!(classifier.into_diagnostics().len(), 1);
}

#[test]
fn unterminated_comment_carries_in_line_mode() {
    let (piece, classifier) = classify_first("/* open", true);
    assert_eq!(piece.kind, K::CommentBlock);
    assert_eq!(piece.flags, TokenFlags::empty());
    assert_eq!(classifier.carry(), Carry::BlockComment);
    assert!(classifier.into_diagnostics().is_empty());
}

#[test]
fn open_text_block_carries_in_line_mode() {
    let (piece, classifier) = classify_first("\"\"\"\n", true);
    assert_eq!(piece.kind, K::TextBlock);
    assert_eq!(classifier.carry(), Carry::TextBlock);
}

#[test]
fn stray_at_sign_is_unknown() {
    let (piece, classifier) = classify_first("@ 1", false);
    assert_eq!(piece.kind, K::Unknown);
    assert_eq!(piece.len, 1);
    assert_eq!(classifier.into_diagnostics().len(), 1);
}
