//! Error types for linelog

use thiserror::Error;

/// Errors raised while configuring a logger.
///
/// Writing log output never fails from the caller's point of view; these
/// only come from parsing options and levels.
#[derive(Error, Debug)]
pub enum LogError {
    /// Configuration token not in [`crate::CONFIGURATION_TOKENS`]
    #[error("Unknown configuration token: {0}")]
    UnknownToken(String),

    /// Level name that does not match any severity
    #[error("Unknown level: {0}")]
    UnknownLevel(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using LogError
pub type LogResult<T> = Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LogError::UnknownToken("sparkles".to_string());
        assert_eq!(format!("{}", err), "Unknown configuration token: sparkles");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: LogError = io_err.into();
        assert!(matches!(err, LogError::Io(_)));
        assert!(err.to_string().contains("pipe closed"));
    }
}
