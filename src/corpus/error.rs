//! Corpus loading errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corpus is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level value was not an object of label -> phrase list.
    #[error("corpus must be a JSON object mapping labels to phrase lists")]
    NotAnObject,

    #[error("label '{label}' must map to a list of strings")]
    InvalidEntry { label: String },
}
