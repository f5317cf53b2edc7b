//! Closed-loop positioning of a force-feedback wheel
//!
//! The controller turns the wheel to an absolute axis position using nothing
//! but a single constant-force effect and repeated position samples. It is a
//! two-phase bang-bang loop: full strength until the axis enters the caller's
//! tolerance window, then a weaker fine strength until it enters a narrow
//! window around the target, then stop.
//!
//! # Example
//!
//! ```no_run
//! use wheelpos_controller::prelude::*;
//!
//! fn center(channel: &mut impl DeviceChannel) -> MoveResult<Position> {
//!     let controller = PositionController::default();
//!     controller.move_to(channel, 0x2000, 50, 20_000)
//! }
//! ```
//!
//! Device access goes through the [`DeviceChannel`] trait, so the loop runs
//! the same against real hardware and against scripted test channels.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod channel;
pub mod config;
pub mod controller;
pub mod effect;
pub mod poll;
pub mod prelude;

pub use channel::{DeviceChannel, EffectHandle};
pub use config::{ControllerConfig, ControllerConfigBuilder, PollConfig};
pub use controller::{MoveReport, MoveRequest, PositionController};
pub use effect::{ActiveEffect, EffectState};
pub use poll::CancelToken;
