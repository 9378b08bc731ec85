//! Error types for slideshow_assets

use std::time::Duration;
use thiserror::Error;

/// Main error type for preload and mixer operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreloadError {
    #[error("Duplicate asset name: {0}")]
    DuplicateAssetName(String),

    #[error("Preload timed out after {waited:?} ({loaded}/{total} ready, waiting on {pending:?})")]
    Timeout {
        waited: Duration,
        loaded: usize,
        total: usize,
        pending: Vec<String>,
    },

    #[error("Readiness signal for {0} was dropped before firing")]
    SignalDropped(String),

    #[error("No audio formats configured")]
    NoAudioFormats,

    #[error("Preload session was abandoned by the runtime")]
    Abandoned,

    #[error("Unknown track: {0}")]
    UnknownTrack(String),
}

impl PreloadError {
    /// Whether this error came from the deadline elapsing
    pub fn is_timeout(&self) -> bool {
        matches!(self, PreloadError::Timeout { .. })
    }
}

/// Result type alias for preload operations
pub type Result<T> = std::result::Result<T, PreloadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_lists_pending() {
        let err = PreloadError::Timeout {
            waited: Duration::from_secs(5),
            loaded: 1,
            total: 3,
            pending: vec!["asset:b".to_string(), "image:hero".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("1/3"));
        assert!(msg.contains("asset:b"));
        assert!(err.is_timeout());
    }

    #[test]
    fn test_duplicate_message() {
        let err = PreloadError::DuplicateAssetName("intro".to_string());
        assert_eq!(err.to_string(), "Duplicate asset name: intro");
        assert!(!err.is_timeout());
    }
}
