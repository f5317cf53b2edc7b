//! Device channel abstraction.
//!
//! A channel wraps an already-open device handle. It exposes the two
//! primitives the controller is built from: sampling the absolute axis and
//! driving the lifecycle of a constant-force effect.

use core::fmt;

use wheelpos_errors::ChannelResult;
use wheelpos_ffb::{ConstantForce, Position};

/// Opaque identifier of an effect registered with a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectHandle(i16);

impl EffectHandle {
    /// Wraps a device-assigned effect id.
    pub fn new(id: i16) -> Self {
        Self(id)
    }

    /// Device-assigned effect id.
    pub fn id(self) -> i16 {
        self.0
    }
}

impl fmt::Display for EffectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Operations the position controller needs from a device.
///
/// Implementations must not cache samples: every call to
/// [`read_position`](DeviceChannel::read_position) reports what the device
/// sees now. No operation is retried by the implementation.
pub trait DeviceChannel {
    /// Samples the absolute axis.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the underlying read fails.
    fn read_position(&mut self) -> ChannelResult<Position>;

    /// Registers a new constant-force effect.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the device rejects the effect.
    fn upload_constant_effect(&mut self, force: &ConstantForce) -> ChannelResult<EffectHandle>;

    /// Re-uploads an existing effect in place with new parameters.
    ///
    /// The handle stays valid and no second effect is created.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the device rejects the update, or
    /// [`UnknownEffect`](wheelpos_errors::ChannelError::UnknownEffect) for a
    /// handle this channel does not own.
    fn update_constant_effect(
        &mut self,
        handle: EffectHandle,
        force: &ConstantForce,
    ) -> ChannelResult<()>;

    /// Starts effect output.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the write fails.
    fn play(&mut self, handle: EffectHandle) -> ChannelResult<()>;

    /// Stops effect output.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the write fails.
    fn stop(&mut self, handle: EffectHandle) -> ChannelResult<()>;

    /// Erases the effect from the device.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the erase fails.
    fn remove_effect(&mut self, handle: EffectHandle) -> ChannelResult<()>;
}

impl<C: DeviceChannel + ?Sized> DeviceChannel for &mut C {
    fn read_position(&mut self) -> ChannelResult<Position> {
        (**self).read_position()
    }

    fn upload_constant_effect(&mut self, force: &ConstantForce) -> ChannelResult<EffectHandle> {
        (**self).upload_constant_effect(force)
    }

    fn update_constant_effect(
        &mut self,
        handle: EffectHandle,
        force: &ConstantForce,
    ) -> ChannelResult<()> {
        (**self).update_constant_effect(handle, force)
    }

    fn play(&mut self, handle: EffectHandle) -> ChannelResult<()> {
        (**self).play(handle)
    }

    fn stop(&mut self, handle: EffectHandle) -> ChannelResult<()> {
        (**self).stop(handle)
    }

    fn remove_effect(&mut self, handle: EffectHandle) -> ChannelResult<()> {
        (**self).remove_effect(handle)
    }
}

impl<C: DeviceChannel + ?Sized> DeviceChannel for Box<C> {
    fn read_position(&mut self) -> ChannelResult<Position> {
        (**self).read_position()
    }

    fn upload_constant_effect(&mut self, force: &ConstantForce) -> ChannelResult<EffectHandle> {
        (**self).upload_constant_effect(force)
    }

    fn update_constant_effect(
        &mut self,
        handle: EffectHandle,
        force: &ConstantForce,
    ) -> ChannelResult<()> {
        (**self).update_constant_effect(handle, force)
    }

    fn play(&mut self, handle: EffectHandle) -> ChannelResult<()> {
        (**self).play(handle)
    }

    fn stop(&mut self, handle: EffectHandle) -> ChannelResult<()> {
        (**self).stop(handle)
    }

    fn remove_effect(&mut self, handle: EffectHandle) -> ChannelResult<()> {
        (**self).remove_effect(handle)
    }
}
