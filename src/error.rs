//! Error types for loading mapping and source files.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The mapping file could not be turned into a format. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read mapping file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid mapping file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A source document could not be read or parsed as a whole.
#[derive(Debug, Error)]
pub enum SourceLoadError {
    #[error("failed to read source file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid source file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
