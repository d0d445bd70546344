use thiserror::Error;

/// Navigation-level failures. None of these are fatal: every variant maps to a
/// degraded but usable screen.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InterviewError {
    #[error("no session configuration; returning to setup")]
    MissingConfiguration,

    #[error("no completed session; returning to setup")]
    MissingResult,

    #[error("role must not be empty")]
    EmptyRole,

    #[error("duration must be one of 15, 30, 45 or 60 minutes (got {0})")]
    InvalidDuration(u32),

    #[error("question index {index} out of range for {len} questions")]
    OutOfRange { index: usize, len: usize },

    #[error("question script is empty")]
    EmptyScript,
}

/// Host capabilities the room can run without.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("camera/microphone unavailable: {0}")]
    MediaAccessDenied(String),

    #[error("speech recognition unavailable on this platform")]
    SpeechRecognitionUnavailable,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("question script `{0}` not found")]
    NotFound(String),

    #[error("failed to read question script: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse question script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] InterviewError),
}
