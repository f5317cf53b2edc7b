//! Common imports for driving a wheel.

pub use crate::channel::{DeviceChannel, EffectHandle};
pub use crate::config::{ControllerConfig, PollConfig};
pub use crate::controller::{MoveReport, MoveRequest, PositionController};
pub use crate::poll::CancelToken;

pub use wheelpos_errors::{ChannelError, ChannelResult, MoveError, MoveResult, MoveStage};
pub use wheelpos_ffb::{ConstantForce, Direction, Position, Strength};
