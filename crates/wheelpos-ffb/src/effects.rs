//! Constant-force effect parameters

use serde::{Deserialize, Serialize};

use crate::{Direction, Strength};

/// Constant-force effect: a fixed torque in a fixed direction until stopped.
///
/// The direction is chosen once when the effect is created; only the
/// strength changes while the effect lives.
///
/// # Examples
///
/// ```
/// use wheelpos_ffb::{ConstantForce, Direction, Strength};
///
/// let coarse = ConstantForce::new(Direction::Clockwise, Strength::masked(20_000));
/// assert_eq!(coarse.direction_word(), 0xC000);
/// assert_eq!(coarse.level(), 20_000);
///
/// let fine = coarse.with_strength(Strength::FINE);
/// assert_eq!(fine.direction, Direction::Clockwise);
/// assert_eq!(fine.level(), 0x1930);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantForce {
    pub direction: Direction,
    pub strength: Strength,
}

impl ConstantForce {
    pub fn new(direction: Direction, strength: Strength) -> Self {
        Self {
            direction,
            strength,
        }
    }

    /// Same effect with a different strength.
    pub fn with_strength(self, strength: Strength) -> Self {
        Self { strength, ..self }
    }

    pub fn direction_word(&self) -> u16 {
        self.direction.direction_word()
    }

    pub fn level(&self) -> i16 {
        self.strength.level()
    }
}
