//! `/dev/input/event*` device channel.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use evdev::{AbsoluteAxisType, Device, FFEffect, FFEffectType};
use tracing::{debug, info, warn};
use wheelpos_controller::{DeviceChannel, EffectHandle};
use wheelpos_errors::{ChannelError, ChannelOp, ChannelResult};
use wheelpos_ffb::{ConstantForce, Position};

use crate::convert::constant_effect;

/// A force-feedback wheel opened through evdev.
///
/// Effects uploaded through this channel are owned by it. Removing an effect
/// drops the kernel handle, which erases it; the evdev crate swallows erase
/// errors, so [`remove_effect`](DeviceChannel::remove_effect) only fails for
/// unknown handles. Effects still registered when the channel is dropped are
/// erased the same way.
pub struct EvdevChannel {
    device: Device,
    path: PathBuf,
    effects: HashMap<i16, FFEffect>,
}

impl EvdevChannel {
    /// Opens the event node at `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the node cannot be opened, or
    /// [`ChannelError::Unsupported`] if the device lacks constant-force
    /// effects or an `ABS_X` axis.
    pub fn open(path: impl AsRef<Path>) -> ChannelResult<Self> {
        let path = path.as_ref();
        let device = Device::open(path).map_err(|e| ChannelError::io(ChannelOp::Open, e))?;
        Self::from_device(device, path)
    }

    /// Opens `/dev/input/event{index}`.
    ///
    /// # Errors
    ///
    /// See [`open`](Self::open).
    pub fn open_event(index: u32) -> ChannelResult<Self> {
        Self::open(crate::event_node_path(index))
    }

    /// Wraps an already-open device.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Unsupported`] if the device lacks
    /// constant-force effects or an `ABS_X` axis.
    pub fn from_device(device: Device, path: impl Into<PathBuf>) -> ChannelResult<Self> {
        let path = path.into();
        let name = device.name().unwrap_or("unknown device").to_string();

        let has_constant = device
            .supported_ff()
            .is_some_and(|ff| ff.contains(FFEffectType::FF_CONSTANT));
        if !has_constant {
            return Err(ChannelError::unsupported(name, "FF_CONSTANT"));
        }
        let has_abs_x = device
            .supported_absolute_axes()
            .is_some_and(|axes| axes.contains(AbsoluteAxisType::ABS_X));
        if !has_abs_x {
            return Err(ChannelError::unsupported(name, "ABS_X"));
        }

        info!(device = %name, path = %path.display(), "opened force-feedback device");
        Ok(Self {
            device,
            path,
            effects: HashMap::new(),
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.device.name()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of effects uploaded and not yet removed.
    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    fn effect_mut(&mut self, handle: EffectHandle) -> ChannelResult<&mut FFEffect> {
        self.effects
            .get_mut(&handle.id())
            .ok_or(ChannelError::UnknownEffect(handle.id()))
    }
}

impl DeviceChannel for EvdevChannel {
    fn read_position(&mut self) -> ChannelResult<Position> {
        let state = self
            .device
            .get_abs_state()
            .map_err(|e| ChannelError::io(ChannelOp::ReadPosition, e))?;
        let abs_x = state
            .get(usize::from(AbsoluteAxisType::ABS_X.0))
            .ok_or_else(|| {
                ChannelError::unsupported(self.device.name().unwrap_or("unknown device"), "ABS_X")
            })?;
        Ok(Position::from_axis(abs_x.value))
    }

    fn upload_constant_effect(&mut self, force: &ConstantForce) -> ChannelResult<EffectHandle> {
        let effect = self
            .device
            .upload_ff_effect(constant_effect(force))
            .map_err(|e| ChannelError::io(ChannelOp::Upload, e))?;
        let id = i16::try_from(effect.id()).map_err(|e| {
            ChannelError::io(ChannelOp::Upload, io::Error::new(io::ErrorKind::InvalidData, e))
        })?;
        debug!(id, path = %self.path.display(), "uploaded FF_CONSTANT effect");
        self.effects.insert(id, effect);
        Ok(EffectHandle::new(id))
    }

    fn update_constant_effect(
        &mut self,
        handle: EffectHandle,
        force: &ConstantForce,
    ) -> ChannelResult<()> {
        self.effect_mut(handle)?
            .update(constant_effect(force))
            .map_err(|e| ChannelError::io(ChannelOp::Update, e))
    }

    fn play(&mut self, handle: EffectHandle) -> ChannelResult<()> {
        self.effect_mut(handle)?
            .play(1)
            .map_err(|e| ChannelError::io(ChannelOp::Play, e))
    }

    fn stop(&mut self, handle: EffectHandle) -> ChannelResult<()> {
        self.effect_mut(handle)?
            .stop()
            .map_err(|e| ChannelError::io(ChannelOp::Stop, e))
    }

    fn remove_effect(&mut self, handle: EffectHandle) -> ChannelResult<()> {
        let effect = self
            .effects
            .remove(&handle.id())
            .ok_or(ChannelError::UnknownEffect(handle.id()))?;
        drop(effect);
        debug!(%handle, "erased effect");
        Ok(())
    }
}

impl fmt::Debug for EvdevChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvdevChannel")
            .field("name", &self.device.name())
            .field("path", &self.path)
            .field("effects", &self.effects.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Drop for EvdevChannel {
    fn drop(&mut self) {
        if !self.effects.is_empty() {
            warn!(
                path = %self.path.display(),
                count = self.effects.len(),
                "erasing effects left on device"
            );
        }
    }
}
