//! Force feedback primitives for wheel positioning
//!
//! This crate defines the values that flow between the position controller
//! and a device channel: absolute axis positions, constant-force strengths,
//! rotation directions and the constant-force effect itself.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod constants;
pub mod effects;

pub use constants::*;
pub use effects::*;

use core::fmt;

use serde::{Deserialize, Serialize};

/// Absolute axis position in `[0, 16383]`
///
/// # Examples
///
/// ```
/// use wheelpos_ffb::Position;
///
/// // Requested targets are masked to 14 bits
/// assert_eq!(Position::masked(0x4000 + 100).get(), 100);
///
/// // Device samples are clamped into range
/// assert_eq!(Position::from_axis(-3).get(), 0);
/// assert_eq!(Position::from_axis(70_000).get(), 16383);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct Position(u16);

impl Position {
    /// Centre of the axis.
    pub const CENTER: Position = Position(0x2000);

    /// Masks a requested value into the 14-bit axis range.
    pub fn masked(raw: u32) -> Self {
        Self(u16::try_from(raw & POSITION_MASK).unwrap_or(MAX_POSITION))
    }

    /// Clamps a raw axis sample into the 14-bit range.
    pub fn from_axis(value: i32) -> Self {
        Self(u16::try_from(value.clamp(0, i32::from(MAX_POSITION))).unwrap_or(MAX_POSITION))
    }

    /// Returns the axis value.
    pub fn get(self) -> u16 {
        self.0
    }

    /// Absolute distance to another position.
    pub fn distance(self, other: Position) -> u16 {
        self.0.abs_diff(other.0)
    }

}

impl From<Position> for u16 {
    fn from(p: Position) -> u16 {
        p.0
    }
}

impl TryFrom<u16> for Position {
    type Error = OutOfRange;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value > MAX_POSITION {
            return Err(OutOfRange {
                kind: "position",
                value,
                max: MAX_POSITION,
            });
        }
        Ok(Self(value))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A raw value that does not fit a [`Position`] or [`Strength`].
///
/// Only exact conversions fail; [`Position::masked`] and
/// [`Strength::masked`] never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind} {value} exceeds {max}")]
pub struct OutOfRange {
    pub kind: &'static str,
    pub value: u16,
    pub max: u16,
}

/// Closed interval of axis values around a target.
///
/// Bounds saturate instead of wrapping, so a half-width larger than the
/// target yields a window starting at 0.
///
/// # Examples
///
/// ```
/// use wheelpos_ffb::{Position, PositionWindow};
///
/// let window = PositionWindow::around(Position::masked(8192), 50);
/// assert_eq!((window.low, window.high), (8142, 8242));
/// assert!(window.contains(Position::masked(8242)));
/// assert!(!window.contains(Position::masked(8243)));
///
/// let near_zero = PositionWindow::around(Position::masked(10), 50);
/// assert_eq!(near_zero.low, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionWindow {
    /// Inclusive lower bound.
    pub low: u32,
    /// Inclusive upper bound.
    pub high: u32,
}

impl PositionWindow {
    /// Builds `[center - half_width, center + half_width]`.
    pub fn around(center: Position, half_width: u32) -> Self {
        let center = u32::from(center.0);
        Self {
            low: center.saturating_sub(half_width),
            high: center.saturating_add(half_width),
        }
    }

    /// Checks whether `position` lies inside the window.
    pub fn contains(&self, position: Position) -> bool {
        (self.low..=self.high).contains(&u32::from(position.0))
    }
}

/// Constant-force level in `[0, 32767]`
///
/// # Examples
///
/// ```
/// use wheelpos_ffb::Strength;
///
/// assert_eq!(Strength::masked(20_000).get(), 20_000);
/// assert_eq!(Strength::masked(0x8000 + 5).get(), 5);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct Strength(u16);

impl Strength {
    /// The fine-phase strength.
    pub const FINE: Strength = Strength(FINE_STRENGTH);

    /// Masks a requested value into the 15-bit level range.
    pub fn masked(raw: u32) -> Self {
        Self(u16::try_from(raw & STRENGTH_MASK).unwrap_or(MAX_STRENGTH))
    }

    /// Returns the level.
    pub fn get(self) -> u16 {
        self.0
    }

    /// Level as the signed value carried by a constant-force effect.
    pub fn level(self) -> i16 {
        i16::try_from(self.0).unwrap_or(i16::MAX)
    }
}

impl From<Strength> for u16 {
    fn from(s: Strength) -> u16 {
        s.0
    }
}

impl TryFrom<u16> for Strength {
    type Error = OutOfRange;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value > MAX_STRENGTH {
            return Err(OutOfRange {
                kind: "strength",
                value,
                max: MAX_STRENGTH,
            });
        }
        Ok(Self(value))
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rotation direction of a constant-force effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards larger axis values ("turning right").
    Clockwise,
    /// Towards smaller axis values ("turning left").
    CounterClockwise,
}

impl Direction {
    /// Picks the direction that moves `from` towards `target`.
    ///
    /// Returns `None` when `from` is within `dead_band` of `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wheelpos_ffb::{Direction, Position};
    ///
    /// let target = Position::masked(8192);
    /// assert_eq!(
    ///     Direction::between(Position::masked(4096), target, 4),
    ///     Some(Direction::Clockwise)
    /// );
    /// assert_eq!(
    ///     Direction::between(Position::masked(9000), target, 4),
    ///     Some(Direction::CounterClockwise)
    /// );
    /// assert_eq!(Direction::between(Position::masked(8196), target, 4), None);
    /// ```
    pub fn between(from: Position, target: Position, dead_band: u16) -> Option<Direction> {
        let from = u32::from(from.0);
        let target = u32::from(target.0);
        let dead_band = u32::from(dead_band);
        if from.saturating_add(dead_band) < target {
            Some(Direction::Clockwise)
        } else if from > target.saturating_add(dead_band) {
            Some(Direction::CounterClockwise)
        } else {
            None
        }
    }

    /// The evdev direction word for this rotation.
    pub fn direction_word(self) -> u16 {
        match self {
            Direction::Clockwise => DIRECTION_WORD_CLOCKWISE,
            Direction::CounterClockwise => DIRECTION_WORD_COUNTER_CLOCKWISE,
        }
    }

    /// Human-readable label used in logs.
    pub fn label(self) -> &'static str {
        match self {
            Direction::Clockwise => "turning right",
            Direction::CounterClockwise => "turning left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Clockwise => f.write_str("clockwise"),
            Direction::CounterClockwise => f.write_str("counter-clockwise"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_mask() {
        assert_eq!(Position::masked(16383).get(), 16383);
        assert_eq!(Position::masked(16384).get(), 0);
        assert_eq!(Position::masked(u32::MAX).get(), 16383);
    }

    #[test]
    fn test_position_distance() {
        let a = Position::masked(100);
        let b = Position::masked(96);
        assert_eq!(a.distance(b), 4);
        assert_eq!(b.distance(a), 4);
    }

    #[test]
    fn test_window_saturates_at_top() {
        let window = PositionWindow::around(Position::masked(16383), u32::MAX);
        assert_eq!(window.low, 0);
        assert_eq!(window.high, u32::MAX);
        assert!(window.contains(Position::masked(0)));
    }

    #[test]
    fn test_strength_mask() {
        assert_eq!(Strength::masked(32767).get(), 32767);
        assert_eq!(Strength::masked(32768).get(), 0);
        assert_eq!(Strength::masked(32767).level(), i16::MAX);
    }

    #[test]
    fn test_direction_dead_band_edges() {
        let target = Position::masked(100);
        assert_eq!(Direction::between(Position::masked(96), target, 4), None);
        assert_eq!(Direction::between(Position::masked(104), target, 4), None);
        assert_eq!(
            Direction::between(Position::masked(95), target, 4),
            Some(Direction::Clockwise)
        );
        assert_eq!(
            Direction::between(Position::masked(105), target, 4),
            Some(Direction::CounterClockwise)
        );
    }

    #[test]
    fn test_exact_conversion_rejects_wide_values() {
        assert_eq!(Position::try_from(16383).map(Position::get), Ok(16383));
        assert_eq!(
            Position::try_from(16384),
            Err(OutOfRange {
                kind: "position",
                value: 16384,
                max: MAX_POSITION
            })
        );
        assert_eq!(
            Strength::try_from(0x8000).map_err(|e| e.kind),
            Err("strength")
        );
        assert_eq!(u16::from(Strength::masked(20_000)), 20_000);
    }

    #[test]
    fn test_deserialize_enforces_axis_and_level_width() {
        assert_eq!(
            serde_json::from_str::<Position>("8192").map(Position::get).ok(),
            Some(8192)
        );
        for wide in ["16384", "65535"] {
            assert_eq!(serde_json::from_str::<Position>(wide).ok(), None);
        }
        assert_eq!(
            serde_json::from_str::<Strength>("32767").map(Strength::get).ok(),
            Some(32767)
        );
        let err = serde_json::from_str::<Strength>("32768")
            .map(Strength::get)
            .err()
            .map(|e| e.to_string());
        assert_eq!(err.as_deref(), Some("strength 32768 exceeds 32767"));
    }

    #[test]
    fn test_serialize_is_bare_integer() {
        assert_eq!(
            serde_json::to_string(&Position::masked(8192)).ok().as_deref(),
            Some("8192")
        );
        assert_eq!(
            serde_json::to_string(&Strength::FINE).ok().as_deref(),
            Some("6448")
        );
    }

    #[test]
    fn test_direction_labels() {
        assert_eq!(Direction::Clockwise.label(), "turning right");
        assert_eq!(Direction::CounterClockwise.label(), "turning left");
        assert_eq!(Direction::Clockwise.direction_word(), 0xC000);
    }
}
