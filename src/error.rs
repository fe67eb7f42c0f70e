use std::path::PathBuf;

use thiserror::Error;

/// Result type for corpus-level operations.
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Errors raised at the file boundary.
///
/// Normalization and line parsing never fail; everything here comes from
/// reading transcripts, checking for companion files or writing outputs.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Failed to read a transcript file.
    #[error("Failed to read transcript '{path}': {source}")]
    ReadTranscript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed while walking a directory tree.
    #[error("Failed to walk directory '{path}': {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Directory '{0}' does not exist")]
    MissingDirectory(PathBuf),

    /// A corpus must hold at least one transcript.
    #[error("No transcripts found under '{0}'")]
    EmptyCorpus(PathBuf),

    #[error("Audio file '{0}' does not exist")]
    MissingAudio(PathBuf),

    #[error("RTTM file '{0}' does not exist")]
    MissingRttm(PathBuf),

    #[error("Manifest file '{0}' should end with .jsonl")]
    InvalidManifestPath(PathBuf),

    /// Failed to create a file or directory.
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid formatter configuration file.
    #[error("Invalid formatter config '{path}': {message}")]
    Config { path: PathBuf, message: String },

    #[error("Failed to serialize manifest entry: {0}")]
    Json(#[from] serde_json::Error),
}

impl CorpusError {
    /// Whether this error is a missing companion file that a lenient
    /// manifest build may skip over.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Self::MissingAudio(_) | Self::MissingRttm(_))
    }
}
