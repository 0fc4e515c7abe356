//! Whole-file checks over the Java fixtures in `tests/fixtures/`.
//!
//! Every fixture must:
//! 1. tile: token texts concatenate back to the file
//! 2. be stable: tokenizing twice gives the same output
//! 3. balance: no brace diagnostics on well-formed code
//! 4. place every token at the line and column its span starts on
//!
//! Line-at-a-time tokenization must produce the same code tokens as the
//! whole buffer for every fixture. A few small fixtures also pin down the
//! kinds of their interesting tokens and agree token for token.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::fs;
use std::path::{Path, PathBuf};

use java_lexer::{
    tokenize, tokenize_batch, tokenize_line, DiagnosticKind, LineState, TokenFlags, TokenKind,
};
use pretty_assertions::assert_eq;

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Every `.java` file in the fixture directory, sorted by name.
fn fixtures() -> Vec<(PathBuf, String)> {
    let mut paths: Vec<PathBuf> = fs::read_dir(fixture_dir())
        .expect("fixture directory exists")
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "java"))
        .collect();
    paths.sort();
    assert!(!paths.is_empty(), "no fixtures found");

    paths
        .into_iter()
        .map(|path| {
            let source = fs::read_to_string(&path).expect("fixture is UTF-8");
            (path, source)
        })
        .collect()
}

fn fixture(name: &str) -> String {
    fs::read_to_string(fixture_dir().join(name)).expect("fixture exists")
}

/// Non-whitespace tokens as `(kind, text)`.
fn kinds(source: &str) -> Vec<(TokenKind, String)> {
    kept_tokens(source, |kind| kind != TokenKind::Whitespace)
}

/// Same as [`kinds`], but fed one line at a time.
fn kinds_by_line(source: &str) -> Vec<(TokenKind, String)> {
    kept_tokens_by_line(source, |kind| kind != TokenKind::Whitespace)
}

fn kept_tokens(source: &str, keep: fn(TokenKind) -> bool) -> Vec<(TokenKind, String)> {
    tokenize(source)
        .tokens
        .iter()
        .filter(|token| keep(token.kind))
        .map(|token| (token.kind, token.text(source).to_owned()))
        .collect()
}

fn kept_tokens_by_line(source: &str, keep: fn(TokenKind) -> bool) -> Vec<(TokenKind, String)> {
    let mut state = LineState::initial();
    let mut out = Vec::new();
    for line in source.split_inclusive('\n') {
        let result = tokenize_line(line, &state);
        out.extend(
            result
                .tokens
                .iter()
                .filter(|token| keep(token.kind))
                .map(|token| (token.kind, token.text(line).to_owned())),
        );
        state = result.state;
    }
    out
}

fn kind_of(tokens: &[(TokenKind, String)], text: &str) -> Option<TokenKind> {
    tokens.iter().find(|(_, t)| t == text).map(|(kind, _)| *kind)
}

// === Every fixture ===

#[test]
fn fixtures_tile_their_source() {
    for (path, source) in fixtures() {
        let output = tokenize(&source);
        let rebuilt: String = output.tokens.iter().map(|t| t.text(&source)).collect();
        assert!(rebuilt == source, "{} does not round-trip", path.display());

        let mut end = 0;
        for token in &output.tokens {
            assert_eq!(token.span.start, end, "gap in {}", path.display());
            assert!(!token.span.is_empty(), "empty token in {}", path.display());
            end = token.span.end;
        }
    }
}

#[test]
fn fixtures_tokenize_identically_twice() {
    for (path, source) in fixtures() {
        assert!(
            tokenize(&source) == tokenize(&source),
            "{} is not deterministic",
            path.display()
        );
    }
}

#[test]
fn fixtures_are_balanced() {
    for (path, source) in fixtures() {
        let output = tokenize(&source);
        let unbalanced: Vec<_> = output
            .diagnostics
            .iter()
            .filter(|d| matches!(d.kind, DiagnosticKind::UnbalancedBraces { .. }))
            .collect();
        assert!(
            unbalanced.is_empty(),
            "{}: {unbalanced:?}",
            path.display()
        );
    }
}

#[test]
fn fixture_positions_match_spans() {
    for (path, source) in fixtures() {
        let mut line = 1;
        let mut line_start = 0;
        let mut offset = 0;
        for token in tokenize(&source).tokens {
            // Advance the reference position to the token start.
            for ch in source[offset as usize..token.span.start as usize].chars() {
                offset += u32::try_from(ch.len_utf8()).unwrap();
                if ch == '\n' {
                    line += 1;
                    line_start = offset;
                }
            }
            assert_eq!(
                (token.line, token.column),
                (line, token.span.start - line_start + 1),
                "{} at {}",
                path.display(),
                token.span
            );
        }
    }
}

#[test]
fn batch_matches_sequential() {
    let files = fixtures();
    let sources: Vec<&str> = files.iter().map(|(_, source)| source.as_str()).collect();
    let batch = tokenize_batch(&sources);
    for (output, source) in batch.iter().zip(&sources) {
        assert!(output == &tokenize(source));
    }
}

// === Enums ===

#[test]
fn enum_with_class_body() {
    let tokens = kinds(&fixture("enums-with-class-body-1.java"));
    assert_eq!(kind_of(&tokens, "Colours"), Some(TokenKind::ClassName));
    for constant in ["RED", "GREEN", "BLUE"] {
        assert_eq!(kind_of(&tokens, constant), Some(TokenKind::EnumConstant));
    }
    assert_eq!(kind_of(&tokens, "\"red\""), Some(TokenKind::StringLiteral));
    assert_eq!(kind_of(&tokens, "1000L"), Some(TokenKind::IntegerLiteral));
    assert_eq!(kind_of(&tokens, "v"), Some(TokenKind::Identifier));
    assert_eq!(kind_of(&tokens, "func"), Some(TokenKind::FunctionName));
    assert_eq!(kind_of(&tokens, "return"), Some(TokenKind::KeywordReturn));
    assert_eq!(kind_of(&tokens, "this"), Some(TokenKind::KeywordThis));
}

#[test]
fn enum_with_constant_bodies() {
    let tokens = kinds(&fixture("enums-with-method-overrides-and-constructor-1.java"));
    let constants: Vec<&str> = tokens
        .iter()
        .filter(|(kind, _)| *kind == TokenKind::EnumConstant)
        .map(|(_, text)| text.as_str())
        .collect();
    assert_eq!(constants, vec!["TYPE_A", "TYPE_B", "TYPE_DEFAULT"]);

    let annotations = tokens
        .iter()
        .filter(|(kind, _)| *kind == TokenKind::Annotation)
        .count();
    // `@` and `Override`, twice.
    assert_eq!(annotations, 4);
    assert_eq!(kind_of(&tokens, "label"), Some(TokenKind::Identifier));
}

// === Modules ===

#[test]
fn module_directives() {
    let source = fixture("module-directive-with-requires-exports-opens-uses-and-provides.java");
    let output = tokenize(&source);
    let contextual: Vec<&str> = output
        .tokens
        .iter()
        .filter(|token| token.flags.contains(TokenFlags::CONTEXTUAL_KW))
        .map(|token| token.text(&source))
        .collect();
    assert_eq!(
        contextual,
        vec![
            "module",
            "requires",
            "requires",
            "requires",
            "transitive",
            "exports",
            "exports",
            "to",
            "opens",
            "opens",
            "to",
            "uses",
            "provides",
            "with",
        ]
    );
    assert!(output.diagnostics.is_empty());
}

// === Generics ===

#[test]
fn optional_generics_balance() {
    let source = fixture("user-super-gwt-emul-java-util-optional.java");
    let output = tokenize(&source);
    let opens = output
        .significant()
        .filter(|t| t.kind == TokenKind::GenericOpen)
        .count();
    let closes = output
        .significant()
        .filter(|t| t.kind == TokenKind::GenericClose)
        .count();
    assert!(opens > 0);
    assert_eq!(opens, closes);
}

// === Line-at-a-time ===

#[test]
fn line_mode_agrees_on_small_fixtures() {
    for name in [
        "enums-with-class-body-1.java",
        "enums-with-method-overrides-and-constructor-1.java",
        "module-directive-with-requires-exports-opens-uses-and-provides.java",
    ] {
        let source = fixture(name);
        assert_eq!(kinds_by_line(&source), kinds(&source), "{name}");
    }
}

#[test]
fn line_mode_agrees_on_code_in_every_fixture() {
    // Comments split at line ends; everything else must match exactly.
    let code = |kind: TokenKind| !kind.is_trivia();
    for (path, source) in fixtures() {
        assert_eq!(
            kept_tokens_by_line(&source, code),
            kept_tokens(&source, code),
            "{}",
            path.display()
        );
    }
}

#[test]
fn line_mode_keeps_comment_kinds() {
    // Multi-line Javadoc and block comments are split per line but keep
    // their kind on every line.
    let source = fixture("user-super-gwt-emul-java-util-optional.java");
    let whole: Vec<TokenKind> = kinds(&source)
        .into_iter()
        .map(|(kind, _)| kind)
        .filter(|kind| kind.is_comment())
        .collect();
    let mut by_line: Vec<TokenKind> = kinds_by_line(&source)
        .into_iter()
        .map(|(kind, _)| kind)
        .filter(|kind| kind.is_comment())
        .collect();
    by_line.dedup();
    let mut whole_dedup = whole;
    whole_dedup.dedup();
    assert_eq!(by_line, whole_dedup);
}
