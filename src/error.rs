//! @ai:module:intent Define error types for tag rewriting
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for all easytags operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("Parse error at {file}:{line}: {message}")]
    Parse {
        file: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Invalid path pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("gofmt failed on {path}: {message}")]
    Gofmt { path: PathBuf, message: String },
}

impl Error {
    /// @ai:intent Attach a file path to a syntax error so it reads like a compiler diagnostic
    /// @ai:effects pure
    pub fn in_file(self, file: &std::path::Path) -> Self {
        match self {
            Error::Syntax { line, message } => Error::Parse {
                file: file.to_path_buf(),
                line,
                message,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
