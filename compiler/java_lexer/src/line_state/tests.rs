use pretty_assertions::assert_eq;

use super::*;
use crate::context::ContextFrame;
use crate::token::TokenKind as K;

/// Run `lines` through `tokenize_line`, threading the state.
fn run_lines(lines: &[&str]) -> Vec<LineTokens> {
    let mut state = LineState::initial();
    let mut out = Vec::new();
    for line in lines {
        let result = tokenize_line(line, &state);
        state = result.state.clone();
        out.push(result);
    }
    out
}

fn kinds(result: &LineTokens, line: &str) -> Vec<(TokenKind, String)> {
    result
        .tokens
        .iter()
        .filter(|token| token.kind != K::Whitespace)
        .map(|token| (token.kind, token.text(line).to_owned()))
        .collect()
}

// === Carried constructs ===

#[test]
fn block_comment_spans_lines() {
    let lines = ["int a; /* start\n", "   middle\n", "end */ int b;\n"];
    let results = run_lines(&lines);

    assert_eq!(results[0].state.carry(), Carry::BlockComment);
    assert!(results[0].diagnostics.is_empty());
    assert_eq!(
        kinds(&results[0], lines[0]).last(),
        Some(&(K::CommentBlock, "/* start\n".to_owned()))
    );

    assert_eq!(
        kinds(&results[1], lines[1]),
        vec![(K::CommentBlock, "   middle\n".to_owned())]
    );
    assert_eq!(results[1].state.carry(), Carry::BlockComment);

    assert_eq!(
        kinds(&results[2], lines[2]),
        vec![
            (K::CommentBlock, "end */".to_owned()),
            (K::Keyword, "int".to_owned()),
            (K::Identifier, "b".to_owned()),
            (K::Semicolon, ";".to_owned()),
        ]
    );
    assert_eq!(results[2].state.carry(), Carry::None);
}

#[test]
fn javadoc_carry_keeps_its_kind() {
    let results = run_lines(&["/**\n", " * docs\n", " */\n"]);
    assert_eq!(results[0].state.carry(), Carry::Javadoc);
    assert_eq!(results[1].tokens[0].kind, K::CommentJavadoc);
    assert_eq!(results[2].tokens[0].kind, K::CommentJavadoc);
    assert_eq!(results[2].state.carry(), Carry::None);
}

#[test]
fn text_block_spans_lines() {
    let lines = ["String s = \"\"\"\n", "    hello \\\"\"\" still\n", "    \"\"\";\n"];
    let results = run_lines(&lines);

    assert_eq!(results[0].state.carry(), Carry::TextBlock);
    assert_eq!(results[1].state.carry(), Carry::TextBlock);
    assert_eq!(
        kinds(&results[2], lines[2]),
        vec![
            (K::TextBlock, "    \"\"\"".to_owned()),
            (K::Semicolon, ";".to_owned()),
        ]
    );
    assert_eq!(results[2].state.carry(), Carry::None);
}

#[test]
fn empty_line_keeps_the_carry() {
    let results = run_lines(&["/*\n", "", "*/\n"]);
    assert!(results[1].tokens.is_empty());
    assert_eq!(results[1].state.carry(), Carry::BlockComment);
    assert_eq!(results[2].state.carry(), Carry::None);
}

#[test]
fn continuation_token_starts_the_line() {
    let results = run_lines(&["/*\n", "x */ y\n"]);
    let first = results[1].tokens[0];
    assert_eq!(first.span, Span::new(0, 4));
    assert_eq!((first.line, first.column), (1, 1));
}

// === Context across lines ===

#[test]
fn context_stack_carries_across_lines() {
    let results = run_lines(&["class A {\n", "  void f() {\n", "  }\n", "}\n"]);
    assert_eq!(results[0].state.tracker().top(), Some(ContextFrame::ClassBody));
    assert_eq!(results[1].state.tracker().depth(), 2);
    assert_eq!(results[2].state.tracker().top(), Some(ContextFrame::ClassBody));
    assert!(results[3].state.tracker().is_empty());
    assert!(results.iter().all(|r| r.diagnostics.is_empty()));
}

#[test]
fn open_context_is_not_reported_per_line() {
    let results = run_lines(&["class A {\n"]);
    assert!(results[0].diagnostics.is_empty());
}

#[test]
fn module_words_resolve_from_carried_frame() {
    let lines = ["module a.b {\n", "  requires c;\n", "}\n"];
    let results = run_lines(&lines);
    assert_eq!(
        kinds(&results[1], lines[1])[0],
        (K::ModuleKeyword, "requires".to_owned())
    );
}

#[test]
fn per_line_matches_whole_buffer() {
    let lines = [
        "enum Colours {\n",
        "  RED(\"red\"), GREEN(2);\n",
        "  private final Map<String, List<Integer>> cache;\n",
        "  int f(int x) { return x >> 1; }\n",
        "}\n",
    ];
    let source = lines.concat();

    let per_line: Vec<(TokenKind, String)> = run_lines(&lines)
        .iter()
        .zip(lines)
        .flat_map(|(result, line)| kinds(result, line))
        .collect();

    let whole = crate::tokenize(&source);
    let expected: Vec<(TokenKind, String)> = whole
        .tokens
        .iter()
        .filter(|token| token.kind != K::Whitespace)
        .map(|token| (token.kind, token.text(&source).to_owned()))
        .collect();

    assert_eq!(per_line, expected);
}

#[test]
fn default_state_is_initial() {
    assert_eq!(LineState::initial(), LineState::default());
    assert_eq!(LineState::initial().carry(), Carry::None);
}
