use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not read word list at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid word pair {word1}/{word2} split at {index}: {reason}")]
    InvalidPair {
        word1: String,
        word2: String,
        index: usize,
        reason: String,
    },

    /// A prompt group member that no position set can tell apart from the rest.
    #[error("No anchors found for word pair {pair}")]
    NoAnchor { pair: String },

    #[error("Progress bar template error: {0}")]
    ProgressTemplate(#[from] indicatif::style::TemplateError),
}

pub type Result<T> = std::result::Result<T, Error>;
