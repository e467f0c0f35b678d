use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocsyncError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Language not supported: {0}")]
    UnsupportedLanguage(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("All fields must be optional: {comment}")]
    MissingOptionalMarker { comment: String },

    #[error("Expected exactly one default_config table, found {found}")]
    DefaultConfigCardinality { found: usize },

    #[error("Expected exactly one code block containing {marker:?}, found {found}")]
    SampleBlockCardinality { marker: String, found: usize },

    #[error("{} generated file(s) out of date", .0.len())]
    Stale(Vec<PathBuf>),
}

impl DocsyncError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocsyncError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DocsyncError>;
