use std::path::PathBuf;
use thiserror::Error;

/// Errors from resolving the query client's KEY=VALUE argument list.
#[derive(Debug, Error)]
pub enum ArgError {
    #[error("malformed argument '{0}': expected KEY=VALUE")]
    MissingSeparator(String),

    #[error("malformed argument '{0}': key must start with '-' or '--'")]
    MissingDashPrefix(String),
}

/// Errors from loading or validating the engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("incorrect configuration format, need a json file: {0}")]
    Format(#[from] serde_json::Error),

    #[error("incorrect ngram size: max length {max} is less than min length {min}")]
    NgramBounds { min: usize, max: usize },
}

/// Errors from building or writing an on-disk index.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("cannot write index at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("document {id} is {len} bytes, binary index documents are limited to {max} bytes")]
    DocumentTooLong { id: u64, len: usize, max: usize },

    #[error("malformed entry record in {path}")]
    MalformedEntry { path: PathBuf },
}

/// Errors surfaced by the search-engine boundary.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("missing required parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("cannot open index at {path}: {source}")]
    IndexUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("index contains no documents, nothing has been indexed")]
    EmptyIndex,

    #[error("binary index section '{0}' is missing")]
    MissingSection(String),

    #[error("truncated binary index while reading {0}")]
    TruncatedIndex(&'static str),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Index(#[from] IndexError),
}
