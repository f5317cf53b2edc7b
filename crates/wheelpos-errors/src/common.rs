//! Top-level error type, classification and severity levels.

use core::fmt;

use crate::{ChannelError, MoveError, ValidationError};

/// Top-level error type wrapping every wheelpos sub-error.
#[derive(Debug, thiserror::Error)]
pub enum WheelPosError {
    /// Device channel errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Positioning move errors
    #[error("Move error: {0}")]
    Move(#[from] MoveError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// I/O errors outside of a device channel (e.g. reading a config file)
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WheelPosError {
    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            WheelPosError::Channel(_) => ErrorCategory::Channel,
            WheelPosError::Move(_) => ErrorCategory::Motion,
            WheelPosError::Validation(_) => ErrorCategory::Validation,
            WheelPosError::Io(_) => ErrorCategory::IO,
            WheelPosError::Config(_) => ErrorCategory::Config,
        }
    }

    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            WheelPosError::Channel(e) => e.severity(),
            WheelPosError::Move(e) => e.severity(),
            WheelPosError::Validation(e) => e.severity(),
            WheelPosError::Io(_) | WheelPosError::Config(_) => ErrorSeverity::Error,
        }
    }

    /// Check if the caller can keep using the device after this error.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }

    /// Create a configuration error with a message.
    pub fn config(msg: impl Into<String>) -> Self {
        WheelPosError::Config(msg.into())
    }
}

impl From<std::io::Error> for WheelPosError {
    fn from(e: std::io::Error) -> Self {
        WheelPosError::Io(e)
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Device channel errors
    Channel = 0,
    /// Positioning move errors
    Motion = 1,
    /// Configuration errors
    Config = 2,
    /// I/O errors
    IO = 3,
    /// Validation errors
    Validation = 4,
}

impl ErrorCategory {
    /// Short name used as a log field value.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Channel => "Channel",
            ErrorCategory::Motion => "Motion",
            ErrorCategory::Config => "Config",
            ErrorCategory::IO => "IO",
            ErrorCategory::Validation => "Validation",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Nothing failed
    Info = 0,
    /// Cleanup or a best-effort step failed, or the caller cancelled
    Warning = 1,
    /// The move failed but the device is in a known state
    Error = 2,
    /// Critical, device state is unknown and no safe continuation exists
    Critical = 3,
}

impl ErrorSeverity {
    /// Upper-case level name, matching `tracing` level names where they overlap.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorSeverity::Info => "INFO",
            ErrorSeverity::Warning => "WARN",
            ErrorSeverity::Error => "ERROR",
            ErrorSeverity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
