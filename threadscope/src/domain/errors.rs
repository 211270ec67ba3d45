//! Structured error types for threadscope
//!
//! Using thiserror for automatic Display implementation and error chaining.
//! The parser itself is total and has no error type; these cover the layers
//! around it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Uploaded dump is empty")]
    EmptyInput,

    #[error("No threads found. Is this a valid Java thread dump?")]
    NoThreadsFound,

    #[error("Dump is {size} bytes, exceeding the {limit} byte limit")]
    InputTooLarge { size: u64, limit: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AnalyzeError {
    /// True for failures caused by the dump content rather than by I/O.
    ///
    /// A transport maps these to an input-validation response.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, AnalyzeError::Io(_))
    }
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write thread export: {0}")]
    WriteFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_threads_display() {
        let err = AnalyzeError::NoThreadsFound;
        assert_eq!(err.to_string(), "No threads found. Is this a valid Java thread dump?");
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_input_too_large_display() {
        let err = AnalyzeError::InputTooLarge { size: 2048, limit: 1024 };
        assert!(err.to_string().contains("2048"));
        assert!(err.to_string().contains("1024"));
    }

    #[test]
    fn test_io_is_not_invalid_input() {
        let err = AnalyzeError::from(std::io::Error::other("disk gone"));
        assert!(!err.is_invalid_input());
    }
}
