use std::path::PathBuf;

use thiserror::Error;

/// Errors of the command-line tool.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing `{0}=` line in input file")]
    MissingField(&'static str),
    #[error("invalid hex in `{field}`: {source}")]
    Hex {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },
    #[error("line {line}: expected `plaintext|key|iv`")]
    MalformedVectorLine { line: usize },
    #[error("line {line}: expected `name=value` or `---` in vector file")]
    MalformedVectorBlock { line: usize },
    #[error(transparent)]
    Cipher(#[from] sose::Error),
}

pub type CliResult<T> = Result<T, CliError>;
