//! Device channel error types.
//!
//! A channel is an already-open device handle exposing position reads and the
//! constant-force effect lifecycle. Each failed operation is reported once;
//! the channel never retries.

use core::fmt;

use crate::common::ErrorSeverity;

/// The channel operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelOp {
    /// Opening the device node
    Open,
    /// Querying device capabilities
    Query,
    /// Reading the absolute axis position
    ReadPosition,
    /// Registering a new effect
    Upload,
    /// Re-uploading an existing effect in place
    Update,
    /// Starting effect playback
    Play,
    /// Stopping effect playback
    Stop,
    /// Erasing an effect from the device
    Remove,
}

impl fmt::Display for ChannelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChannelOp::Open => "open",
            ChannelOp::Query => "query",
            ChannelOp::ReadPosition => "read position",
            ChannelOp::Upload => "upload effect",
            ChannelOp::Update => "update effect",
            ChannelOp::Play => "play effect",
            ChannelOp::Stop => "stop effect",
            ChannelOp::Remove => "erase effect",
        };
        f.write_str(name)
    }
}

/// Errors reported by a device channel.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The underlying read, write or ioctl failed
    #[error("{op} failed: {source}")]
    Io {
        /// Operation that failed
        op: ChannelOp,
        /// OS error
        #[source]
        source: std::io::Error,
    },

    /// The device lacks a capability the controller needs
    #[error("Device {device} does not support {feature}")]
    Unsupported {
        /// Device identifier
        device: String,
        /// Missing capability
        feature: String,
    },

    /// The handle does not name an effect owned by this channel
    #[error("Unknown effect handle {0}")]
    UnknownEffect(i16),
}

impl ChannelError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ChannelError::Io { op, .. } => match op {
                ChannelOp::Remove => ErrorSeverity::Warning,
                _ => ErrorSeverity::Error,
            },
            ChannelError::Unsupported { .. } => ErrorSeverity::Error,
            ChannelError::UnknownEffect(_) => ErrorSeverity::Error,
        }
    }

    /// The operation that failed, if the error came from an I/O call.
    pub fn op(&self) -> Option<ChannelOp> {
        match self {
            ChannelError::Io { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// Create an I/O error for the given operation.
    pub fn io(op: ChannelOp, source: std::io::Error) -> Self {
        ChannelError::Io { op, source }
    }

    /// Create an unsupported capability error.
    pub fn unsupported(device: impl Into<String>, feature: impl Into<String>) -> Self {
        ChannelError::Unsupported {
            device: device.into(),
            feature: feature.into(),
        }
    }
}
