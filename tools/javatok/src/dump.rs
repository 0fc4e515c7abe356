//! Reading, tokenizing and printing.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use java_lexer::{
    tokenize_batch, tokenize_line, LexOutput, LineState, SourceBuffer, Span, TokenKind,
};
use rustc_hash::FxHashMap;

use crate::error::CliError;
use crate::Options;

#[tracing::instrument(level = "debug", skip_all, fields(files = options.paths.len()))]
pub(crate) fn run(options: &Options) -> Result<(), CliError> {
    let files = options
        .paths
        .iter()
        .map(|path| read_source(path).map(|source| (path.clone(), source)))
        .collect::<Result<Vec<(PathBuf, String)>, CliError>>()?;

    let outputs: Vec<LexOutput> = if options.lines {
        files.iter().map(|(_, source)| tokenize_by_line(source)).collect()
    } else {
        let sources: Vec<&str> = files.iter().map(|(_, source)| source.as_str()).collect();
        tokenize_batch(&sources)
    };

    let many = files.len() > 1;
    for ((path, source), output) in files.iter().zip(&outputs) {
        if many {
            println!("== {} ==", path.display());
        }
        if options.summary {
            print!("{}", render_summary(output));
        } else {
            print!("{}", render_tokens(source, output));
        }
        if !output.diagnostics.is_empty() {
            let buffer = SourceBuffer::new(source);
            eprint!("{}", render_diagnostics(path, &buffer, output));
        }
    }
    Ok(())
}

fn read_source(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_owned(),
        source,
    })
}

/// Tokenize line by line and lift every span back to file offsets.
///
/// Lines are cut at the same terminators the line index uses, so a lone
/// `\r` ends a line here too.
pub(crate) fn tokenize_by_line(source: &str) -> LexOutput {
    let buffer = SourceBuffer::new(source);
    let starts = buffer.line_starts();
    let mut output = LexOutput::default();
    let mut state = LineState::initial();
    tracing::debug!(lines = buffer.line_count(), "tokenizing by line");
    for (index, &base) in starts.iter().enumerate() {
        let end = starts.get(index + 1).copied().unwrap_or(buffer.len());
        let line = buffer.as_str().get(base as usize..end as usize).unwrap_or("");
        let result = tokenize_line(line, &state);
        let line_no = u32::try_from(index + 1).unwrap_or(u32::MAX);
        output.tokens.extend(result.tokens.into_iter().map(|mut token| {
            token.span = shift(token.span, base);
            token.line = line_no;
            token
        }));
        output
            .diagnostics
            .extend(result.diagnostics.into_iter().map(|mut diagnostic| {
                diagnostic.span = shift(diagnostic.span, base);
                diagnostic.offset = diagnostic.span.start;
                diagnostic
            }));
        state = result.state;
    }
    output
}

fn shift(span: Span, by: u32) -> Span {
    Span::new(span.start + by, span.end + by)
}

/// `line:col Kind "text"` for every non-whitespace token.
pub(crate) fn render_tokens(source: &str, output: &LexOutput) -> String {
    let mut out = String::new();
    for token in output
        .tokens
        .iter()
        .filter(|token| token.kind != TokenKind::Whitespace)
    {
        let _ = writeln!(
            out,
            "{}:{} {} {:?}",
            token.line,
            token.column,
            token.kind,
            token.text(source)
        );
    }
    out
}

/// Token counts per kind, in kind order, then totals.
pub(crate) fn render_summary(output: &LexOutput) -> String {
    let mut counts: FxHashMap<TokenKind, usize> = FxHashMap::default();
    for token in &output.tokens {
        *counts.entry(token.kind).or_default() += 1;
    }
    let mut counts: Vec<(TokenKind, usize)> = counts.into_iter().collect();
    counts.sort_unstable();

    let mut out = String::new();
    for (kind, count) in counts {
        let _ = writeln!(out, "{kind:<20} {count}");
    }
    let _ = writeln!(
        out,
        "{} tokens, {} diagnostics",
        output.tokens.len(),
        output.diagnostics.len()
    );
    out
}

/// `file:line:col: message` for every diagnostic.
pub(crate) fn render_diagnostics(path: &Path, buffer: &SourceBuffer, output: &LexOutput) -> String {
    let mut out = String::new();
    for diagnostic in &output.diagnostics {
        let position = buffer.line_col(diagnostic.offset);
        let _ = writeln!(
            out,
            "{}:{}:{}: {}",
            path.display(),
            position.line,
            position.column,
            diagnostic.message()
        );
    }
    out
}
