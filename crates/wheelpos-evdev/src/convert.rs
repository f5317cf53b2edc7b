//! Conversions between wheelpos values and evdev structures.

use evdev::{FFEffectData, FFEffectKind, FFEnvelope, FFReplay, FFTrigger};
use wheelpos_ffb::ConstantForce;

/// Constant-force effect data for `force`.
///
/// The effect has no trigger, no envelope and an infinite replay length; it
/// runs until stopped.
pub fn constant_effect(force: &ConstantForce) -> FFEffectData {
    FFEffectData {
        direction: force.direction_word(),
        trigger: FFTrigger {
            button: 0,
            interval: 0,
        },
        replay: FFReplay {
            length: 0,
            delay: 0,
        },
        kind: FFEffectKind::Constant {
            level: force.level(),
            envelope: FFEnvelope {
                attack_length: 0,
                attack_level: 0,
                fade_length: 0,
                fade_level: 0,
            },
        },
    }
}
