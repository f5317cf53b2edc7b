//! Error types for wheelpos
//!
//! Every crate in the workspace reports failures through the types defined
//! here, so that an embedding application can classify a failed move without
//! knowing which backend produced it.
//!
//! # Architecture
//!
//! - [`common`]: top-level error, categories and severity levels
//! - [`channel`]: failures reported by a device channel (reads, effect writes)
//! - [`motion`]: failures of a single positioning move, tagged with the stage
//!   at which they happened
//! - [`validation`]: configuration validation errors
//!
//! # Fatal errors
//!
//! A [`MoveError::Fatal`] means the effect could not be registered, started or
//! stopped. No library code terminates the process on such an error; the
//! caller decides whether to halt.
//!
//! # Example
//!
//! ```
//! use wheelpos_errors::prelude::*;
//!
//! fn check_strength(value: u32) -> Result<u32> {
//!     if value > 0x7FFF {
//!         return Err(ValidationError::out_of_range("strength", value, 0, 0x7FFF).into());
//!     }
//!     Ok(value)
//! }
//!
//! assert!(check_strength(0x8000).is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod channel;
pub mod common;
pub mod motion;
pub mod prelude;
pub mod validation;

pub use channel::{ChannelError, ChannelOp};
pub use common::{ErrorCategory, ErrorSeverity, WheelPosError};
pub use motion::{MoveError, MoveStage};
pub use validation::ValidationError;

/// A specialized `Result` type for wheelpos operations.
pub type Result<T> = std::result::Result<T, WheelPosError>;

/// Result of a single device channel operation.
pub type ChannelResult<T = ()> = std::result::Result<T, ChannelError>;

/// Result of a positioning move.
pub type MoveResult<T> = std::result::Result<T, MoveError>;
