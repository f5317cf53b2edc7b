//! Positioning move errors.
//!
//! Every variant records the [`MoveStage`] at which the move stopped so that
//! callers can tell an unregistered effect apart from a wheel that never
//! reached its target.

use core::fmt;
use std::time::Duration;

use crate::channel::ChannelError;
use crate::common::ErrorSeverity;
use crate::validation::ValidationError;

/// Stage of a positioning move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveStage {
    /// Priming reads and the starting sample
    WarmUp,
    /// Registering the constant-force effect
    Upload,
    /// Starting the effect
    Play,
    /// Polling with the caller's strength until inside the tolerance window
    CoarseApproach,
    /// Polling with the fine strength until inside the fine window
    FineApproach,
    /// Stopping the effect
    Stop,
    /// Sampling the position after the effect was released
    FinalRead,
}

impl fmt::Display for MoveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveStage::WarmUp => "warm-up",
            MoveStage::Upload => "upload",
            MoveStage::Play => "play",
            MoveStage::CoarseApproach => "coarse approach",
            MoveStage::FineApproach => "fine approach",
            MoveStage::Stop => "stop",
            MoveStage::FinalRead => "final read",
        };
        f.write_str(name)
    }
}

/// Errors that end a positioning move.
#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    /// The effect could not be registered, started or stopped.
    ///
    /// No safe continuation exists after this error.
    #[error("Fatal device failure during {stage}: {source}")]
    Fatal {
        /// Stage that failed
        stage: MoveStage,
        /// Underlying channel error
        #[source]
        source: ChannelError,
    },

    /// A position sample could not be read
    #[error("Position read failed during {stage}: {source}")]
    Read {
        /// Stage that failed
        stage: MoveStage,
        /// Underlying channel error
        #[source]
        source: ChannelError,
    },

    /// A bounded wait expired before the wheel entered its window
    #[error("Timed out during {stage} after {elapsed:?} (last position {last})")]
    Timeout {
        /// Stage that timed out
        stage: MoveStage,
        /// Time spent polling in this stage
        elapsed: Duration,
        /// Last sampled position
        last: u16,
    },

    /// The move was cancelled through its cancel token
    #[error("Cancelled during {stage} (last position {last})")]
    Cancelled {
        /// Stage that observed the cancellation
        stage: MoveStage,
        /// Last sampled position
        last: u16,
    },

    /// The controller configuration was rejected
    #[error("Invalid controller configuration: {0}")]
    InvalidConfig(#[from] ValidationError),
}

impl MoveError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MoveError::Fatal { .. } => ErrorSeverity::Critical,
            MoveError::Read { .. } => ErrorSeverity::Error,
            MoveError::Timeout { .. } => ErrorSeverity::Error,
            MoveError::Cancelled { .. } => ErrorSeverity::Warning,
            MoveError::InvalidConfig(_) => ErrorSeverity::Error,
        }
    }

    /// Check if this error leaves the device in an unknown state.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MoveError::Fatal { .. })
    }

    /// Stage at which the move ended, if it got that far.
    pub fn stage(&self) -> Option<MoveStage> {
        match self {
            MoveError::Fatal { stage, .. }
            | MoveError::Read { stage, .. }
            | MoveError::Timeout { stage, .. }
            | MoveError::Cancelled { stage, .. } => Some(*stage),
            MoveError::InvalidConfig(_) => None,
        }
    }

    /// Last position sampled before the move ended, when known.
    pub fn last_position(&self) -> Option<u16> {
        match self {
            MoveError::Timeout { last, .. } | MoveError::Cancelled { last, .. } => Some(*last),
            _ => None,
        }
    }

    /// Create a fatal error.
    pub fn fatal(stage: MoveStage, source: ChannelError) -> Self {
        MoveError::Fatal { stage, source }
    }

    /// Create a read error.
    pub fn read(stage: MoveStage, source: ChannelError) -> Self {
        MoveError::Read { stage, source }
    }

    /// Create a timeout error.
    pub fn timeout(stage: MoveStage, elapsed: Duration, last: u16) -> Self {
        MoveError::Timeout {
            stage,
            elapsed,
            last,
        }
    }

    /// Create a cancellation error.
    pub fn cancelled(stage: MoveStage, last: u16) -> Self {
        MoveError::Cancelled { stage, last }
    }
}
