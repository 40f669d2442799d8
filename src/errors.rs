use thiserror::Error;

/// Errors that can occur while converting dumps into an LSIF graph.
#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("parse error: {message} (path: {path}, line: {line:?})")]
    Parse {
        message: String,
        path: String,
        line: Option<u32>,
    },

    #[error("lookup error: range '{key}' was never registered")]
    Lookup { key: String },

    #[error("no input files matched '{pattern}'")]
    EmptyInput { pattern: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("sink error: {0}")]
    Sink(#[source] std::io::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `IndexerError`.
pub type Result<T> = std::result::Result<T, IndexerError>;
