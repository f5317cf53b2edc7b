//! Linux evdev device channel
//!
//! Binds [`DeviceChannel`](wheelpos_controller::DeviceChannel) to a
//! `/dev/input/event*` node: positions come from the `ABS_X` axis state and
//! the effect is an `FF_CONSTANT` force-feedback effect.
//!
//! ```no_run
//! # #[cfg(target_os = "linux")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use wheelpos_controller::PositionController;
//! use wheelpos_evdev::EvdevChannel;
//!
//! let mut wheel = EvdevChannel::open_event(5)?;
//! let reached = PositionController::default().move_to(&mut wheel, 8192, 50, 20_000)?;
//! println!("wheel is at {reached}");
//! # Ok(())
//! # }
//! # #[cfg(not(target_os = "linux"))]
//! # fn main() {}
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

#[cfg(target_os = "linux")]
mod channel;
#[cfg(target_os = "linux")]
pub mod convert;

#[cfg(target_os = "linux")]
pub use channel::EvdevChannel;

/// Device node for an input event index.
///
/// ```
/// assert_eq!(
///     wheelpos_evdev::event_node_path(5),
///     std::path::PathBuf::from("/dev/input/event5")
/// );
/// ```
pub fn event_node_path(index: u32) -> std::path::PathBuf {
    std::path::PathBuf::from(format!("/dev/input/event{index}"))
}
