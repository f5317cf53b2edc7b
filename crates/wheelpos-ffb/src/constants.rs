//! Axis ranges, effect limits and wheel-specific constants

/// Mask applied to requested targets (14-bit absolute axis)
pub const POSITION_MASK: u32 = 0x3FFF;

/// Largest absolute axis value
pub const MAX_POSITION: u16 = 0x3FFF;

/// Mask applied to requested strengths (15-bit constant-force level)
pub const STRENGTH_MASK: u32 = 0x7FFF;

/// Largest constant-force level
pub const MAX_STRENGTH: u16 = 0x7FFF;

/// Minimum force that keeps a G27 rotating once it is already moving.
pub const FINE_STRENGTH: u16 = 0x1930;

/// Half-width of the window in which a move is treated as already arrived
pub const DEFAULT_DEAD_BAND: u16 = 4;

/// Half-width of the window the fine phase settles into
pub const DEFAULT_FINE_WINDOW: u16 = 4;

/// Narrowest coarse tolerance that works reliably (advisory)
pub const RECOMMENDED_TOLERANCE_MIN: u32 = 20;

/// Widest coarse tolerance that still lands close to the target (advisory)
pub const RECOMMENDED_TOLERANCE_MAX: u32 = 500;

/// evdev direction word for clockwise rotation (270 degrees)
pub const DIRECTION_WORD_CLOCKWISE: u16 = 0xC000;

/// evdev direction word for counter-clockwise rotation (90 degrees)
pub const DIRECTION_WORD_COUNTER_CLOCKWISE: u16 = 0x4000;
