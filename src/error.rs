use thiserror::Error;
use std::io;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Corpus format error: {0}")]
    CorpusFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Range order error: start {start} comes after end {end}")]
    RangeOrder { start: String, end: String },

    #[error("Segmentation error: {0}")]
    Segmentation(String),

    #[error("Reduction error: {0}")]
    Reduction(String),

    #[error("Transliteration error: {0}")]
    Transliteration(String),

    #[error("Range integrity error: {0}")]
    RangeIntegrity(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// Type alias for Result
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error conversions
impl Error {
    pub fn corpus_format<S: Into<String>>(msg: S) -> Self {
        Error::CorpusFormat(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Error::NotFound(msg.into())
    }

    pub fn invalid_address<S: Into<String>>(msg: S) -> Self {
        Error::InvalidAddress(msg.into())
    }

    pub fn range_integrity<S: Into<String>>(msg: S) -> Self {
        Error::RangeIntegrity(msg.into())
    }

    /// True for the user-input error class, as opposed to corpus or table
    /// defects, which are internal.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_) | Error::InvalidAddress(_) | Error::RangeOrder { .. }
        )
    }
}

impl From<crate::script::ScriptError> for Error {
    fn from(err: crate::script::ScriptError) -> Self {
        match err {
            crate::script::ScriptError::Segmentation(e) => Error::Segmentation(e),
            crate::script::ScriptError::Reduction(e) => Error::Reduction(e),
            crate::script::ScriptError::Transliteration(e) => Error::Transliteration(e),
        }
    }
}
