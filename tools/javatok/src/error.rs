use std::path::PathBuf;

/// Failures of the tool itself. Lexing problems are diagnostics, not errors.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("no input files")]
    NoInput,
    #[error("unknown flag '{0}'")]
    UnknownFlag(String),
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
