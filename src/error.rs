//! Error taxonomy for extraction and rendering
//!
//! Extraction failures are scoped to one source file. Whether a failing file aborts a
//! whole directory run is decided by [`crate::extractors::FailurePolicy`], not here.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while turning one source file into a [`crate::Module`]
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A terminal node appeared where a token role is required but none applies
    #[error("unrecognized token kind '{kind}' at line {line}")]
    UnrecognizedTokenKind { kind: String, line: usize },

    /// An import construct contained a token the import extractor cannot place
    #[error("unexpected token in import at line {line}: {code}")]
    MalformedImport { line: usize, code: String },

    #[error("failed to read '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{}': {message}", path.display())]
    SyntaxParse { path: PathBuf, message: String },

    #[error("incompatible tree-sitter grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
}

/// Failure while loading a style or writing rendered output
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid style configuration '{}': {source}", path.display())]
    StyleConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type ExtractResult<T> = Result<T, ExtractError>;
