//! Error types for funcsearch.
//!
//! Only failures that stop a run live here: inputs that cannot be opened or
//! read, and output that cannot be written. Malformed rows and identifiers
//! missing from the function table are counted, never raised.

use std::{fmt, path::PathBuf};
use thiserror::Error;

/// Which input a file belongs to, used to make error messages specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Organism annotation table (`-O`).
    Organism,
    /// Function annotation table (`-F`).
    Function,
    /// Removal targets list (`-I`).
    RemovalTargets,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Organism => write!(f, "organism"),
            Self::Function => write!(f, "function"),
            Self::RemovalTargets => write!(f, "removal targets"),
        }
    }
}

/// Errors that abort a search.
#[derive(Debug, Error)]
pub enum FuncSearchError {
    /// An input file could not be opened.
    #[error("unable to open {kind} file '{path}': {source}")]
    FileOpen {
        kind: InputKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file failed part way through a scan.
    #[error("failed to read {kind} file '{path}': {source}")]
    Read {
        kind: InputKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The results file could not be created or written.
    #[error("failed to write results file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize JSON output.
    #[error("failed to serialize JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },
}

impl From<serde_json::Error> for FuncSearchError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json { source }
    }
}

/// Problems with the command-line flag combination, detected before any I/O.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither an organism name nor a removal list was given.
    #[error(
        "missing either:\n\t-N flag for organism of interest\n\t-I flag for list of organisms to remove"
    )]
    MissingSearchTarget,

    /// Both an organism name and a removal list were given.
    #[error("-N (organism of interest) and -I (organisms to remove) cannot be used together")]
    ConflictingSearchTargets,

    /// The organism name was empty, which would match every row.
    #[error("organism name given to -N must not be empty")]
    EmptyOrganismName,

    /// The organism annotation file was not given.
    #[error("missing -O flag for organism input file")]
    MissingOrganismFile,

    /// The function annotation file was not given.
    #[error("missing -F flag for function input file")]
    MissingFunctionFile,
}
