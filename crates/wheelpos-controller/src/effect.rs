//! Ownership of the single constant-force effect used by a move.
//!
//! [`ActiveEffect`] borrows the channel for as long as the effect exists, so
//! nothing else can upload a second effect or read the axis behind its back.
//! The strength is a mutable field updated in place on the device; the
//! direction never changes.
//!
//! Lifecycle: `Uploaded -> Playing -> (strength updates)* -> Stopped -> Removed`.
//! Removal is attempted exactly once, either through
//! [`ActiveEffect::remove`] or, if the owner is dropped early, from `Drop`.

use tracing::{debug, warn};
use wheelpos_errors::ChannelResult;
use wheelpos_ffb::{ConstantForce, Strength};

use crate::channel::{DeviceChannel, EffectHandle};

/// Where the effect is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectState {
    /// Registered with the device, not yet started
    Uploaded,
    /// Producing torque
    Playing,
    /// Output stopped, still registered
    Stopped,
    /// Removal has been attempted
    Removed,
}

/// A constant-force effect registered on a borrowed channel.
#[derive(Debug)]
pub struct ActiveEffect<'c, C: DeviceChannel + ?Sized> {
    channel: &'c mut C,
    handle: EffectHandle,
    force: ConstantForce,
    state: EffectState,
    strength_updates: u32,
}

impl<'c, C: DeviceChannel + ?Sized> ActiveEffect<'c, C> {
    /// Registers `force` on `channel`.
    ///
    /// # Errors
    ///
    /// Returns the channel error if the upload fails; no effect exists then.
    pub fn upload(channel: &'c mut C, force: ConstantForce) -> ChannelResult<Self> {
        let handle = channel.upload_constant_effect(&force)?;
        debug!(%handle, level = force.level(), direction = force.direction_word(), "effect uploaded");
        Ok(Self {
            channel,
            handle,
            force,
            state: EffectState::Uploaded,
            strength_updates: 0,
        })
    }

    pub fn handle(&self) -> EffectHandle {
        self.handle
    }

    /// Parameters currently loaded on the device.
    pub fn force(&self) -> ConstantForce {
        self.force
    }

    pub fn state(&self) -> EffectState {
        self.state
    }

    /// Number of successful in-place strength updates.
    pub fn strength_updates(&self) -> u32 {
        self.strength_updates
    }

    /// The borrowed channel, for sampling while the effect plays.
    pub fn channel(&mut self) -> &mut C {
        self.channel
    }

    /// Starts the effect.
    ///
    /// # Errors
    ///
    /// Returns the channel error if the start write fails.
    pub fn play(&mut self) -> ChannelResult<()> {
        self.channel.play(self.handle)?;
        self.state = EffectState::Playing;
        debug!(handle = %self.handle, "effect playing");
        Ok(())
    }

    /// Re-uploads the effect with a new strength, keeping the same handle.
    ///
    /// The recorded force only changes if the device accepted the update.
    ///
    /// # Errors
    ///
    /// Returns the channel error if the re-upload fails.
    pub fn set_strength(&mut self, strength: Strength) -> ChannelResult<()> {
        let updated = self.force.with_strength(strength);
        self.channel.update_constant_effect(self.handle, &updated)?;
        self.force = updated;
        self.strength_updates = self.strength_updates.saturating_add(1);
        debug!(handle = %self.handle, level = updated.level(), "effect strength updated");
        Ok(())
    }

    /// Stops the effect.
    ///
    /// # Errors
    ///
    /// Returns the channel error if the stop write fails.
    pub fn stop(&mut self) -> ChannelResult<()> {
        self.channel.stop(self.handle)?;
        self.state = EffectState::Stopped;
        debug!(handle = %self.handle, "effect stopped");
        Ok(())
    }

    /// Erases the effect from the device.
    ///
    /// # Errors
    ///
    /// Returns the channel error if the erase fails. The effect counts as
    /// removed either way and `Drop` will not try again.
    pub fn remove(mut self) -> ChannelResult<()> {
        self.remove_once()
    }

    fn remove_once(&mut self) -> ChannelResult<()> {
        if self.state == EffectState::Removed {
            return Ok(());
        }
        self.state = EffectState::Removed;
        self.channel.remove_effect(self.handle)?;
        debug!(handle = %self.handle, "effect removed");
        Ok(())
    }
}

impl<C: DeviceChannel + ?Sized> Drop for ActiveEffect<'_, C> {
    fn drop(&mut self) {
        if self.state == EffectState::Removed {
            return;
        }
        if let Err(e) = self.remove_once() {
            warn!(handle = %self.handle, error = %e, "failed to erase effect");
        }
    }
}
