//! Convenience re-exports for common test utilities.
//!
//! ```rust,ignore
//! use wheelpos_test_helpers::prelude::*;
//! ```

pub use crate::must::{must, must_err, must_some, must_with};

#[cfg(feature = "scripted")]
pub use crate::scripted::{ChannelCall, ScriptedChannel};

#[cfg(feature = "logging")]
pub use crate::logging::init_test_tracing;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
