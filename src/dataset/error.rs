//! Dataset load errors.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to load the backing file, naming the file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse '{}': {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("No header row found in '{}'", path.display())]
    NoHeader { path: PathBuf },
    #[error("'{}' line {line}: expected at most {expected} fields, found {found}", path.display())]
    RowWidth {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("'{}' ends inside an unterminated quoted field", path.display())]
    UnterminatedQuote { path: PathBuf },
}

/// Failure parsing delimited text that is not yet tied to a file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Read(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("no header row found")]
    NoHeader,
    #[error("line {line}: expected at most {expected} fields, found {found}")]
    RowWidth {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("input ends inside an unterminated quoted field")]
    UnterminatedQuote,
}

impl ParseError {
    /// Attach the file the text was read from.
    pub fn at(self, path: &Path) -> LoadError {
        let path = path.to_path_buf();
        match self {
            ParseError::Read(source) => LoadError::Io { path, source },
            ParseError::Csv(source) => LoadError::Csv { path, source },
            ParseError::NoHeader => LoadError::NoHeader { path },
            ParseError::RowWidth {
                line,
                expected,
                found,
            } => LoadError::RowWidth {
                path,
                line,
                expected,
                found,
            },
            ParseError::UnterminatedQuote => LoadError::UnterminatedQuote { path },
        }
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
