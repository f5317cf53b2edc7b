//! Prelude module for convenient error handling imports.
//!
//! # Example
//!
//! ```
//! use wheelpos_errors::prelude::*;
//!
//! fn check(tolerance: u32) -> Result<()> {
//!     validate!(tolerance > 0, ValidationError::constraint("tolerance must be > 0"));
//!     Ok(())
//! }
//!
//! assert!(check(0).is_err());
//! assert!(check(50).is_ok());
//! ```

pub use crate::{
    ChannelResult, MoveResult, Result,
    channel::{ChannelError, ChannelOp},
    common::{ErrorCategory, ErrorSeverity, WheelPosError},
    motion::{MoveError, MoveStage},
    validate, validate_range,
    validation::ValidationError,
};

/// Return early with `$error` when `$condition` does not hold.
#[macro_export]
macro_rules! validate {
    ($condition:expr, $error:expr) => {
        if !$condition {
            return Err($error.into());
        }
    };
}

/// Return early with an out of range error when `$value` is outside `[$min, $max]`.
#[macro_export]
macro_rules! validate_range {
    ($field:expr, $value:expr, $min:expr, $max:expr) => {
        if $value < $min || $value > $max {
            return Err($crate::ValidationError::out_of_range($field, $value, $min, $max).into());
        }
    };
}
