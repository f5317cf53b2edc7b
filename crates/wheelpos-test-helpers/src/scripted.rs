//! A scripted device channel.
//!
//! [`ScriptedChannel`] replays a fixed sequence of axis samples. Once the
//! script has one sample left, that sample is repeated forever, which models
//! a wheel that has come to rest. Every call is recorded so tests can assert
//! the exact device traffic of a move, and each operation can be made to fail.

use std::collections::{HashSet, VecDeque};
use std::io;

use wheelpos_controller::{CancelToken, DeviceChannel, EffectHandle};
use wheelpos_errors::{ChannelError, ChannelOp, ChannelResult};
use wheelpos_ffb::{ConstantForce, Position};

/// One recorded call on a [`ScriptedChannel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelCall {
    Read(u16),
    Upload { direction: u16, level: i16 },
    Update { handle: i16, level: i16 },
    Play(i16),
    Stop(i16),
    Remove(i16),
}

#[derive(Debug, Default)]
pub struct ScriptedChannel {
    positions: VecDeque<u16>,
    calls: Vec<ChannelCall>,
    failing: HashSet<ChannelOp>,
    fail_read_after: Option<usize>,
    cancel_after: Option<(usize, CancelToken)>,
    live: HashSet<i16>,
    max_live: usize,
    next_handle: i16,
    reads: usize,
}

impl ScriptedChannel {
    /// A channel that reports `positions` in order, then keeps reporting the
    /// last one.
    pub fn new(positions: impl IntoIterator<Item = u16>) -> Self {
        Self {
            positions: positions.into_iter().collect(),
            ..Self::default()
        }
    }

    /// A wheel that never moves.
    pub fn resting_at(position: u16) -> Self {
        Self::new([position])
    }

    /// Make every call of `op` fail with an I/O error.
    #[must_use]
    pub fn failing(mut self, op: ChannelOp) -> Self {
        self.failing.insert(op);
        self
    }

    /// Let `reads` reads succeed, then fail every later one.
    #[must_use]
    pub fn fail_reads_after(mut self, reads: usize) -> Self {
        self.fail_read_after = Some(reads);
        self
    }

    /// Cancel `token` once `reads` reads have been served.
    #[must_use]
    pub fn cancel_after(mut self, reads: usize, token: CancelToken) -> Self {
        self.cancel_after = Some((reads, token));
        self
    }

    pub fn calls(&self) -> &[ChannelCall] {
        &self.calls
    }

    /// Number of successful reads.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Effects uploaded and not yet removed.
    pub fn live_effects(&self) -> usize {
        self.live.len()
    }

    /// Highest number of effects that were registered at the same time.
    pub fn max_live_effects(&self) -> usize {
        self.max_live
    }

    pub fn count(&self, matches: impl Fn(&ChannelCall) -> bool) -> usize {
        self.calls.iter().filter(|call| matches(call)).count()
    }

    /// Calls other than reads, in order.
    pub fn effect_calls(&self) -> Vec<ChannelCall> {
        self.calls
            .iter()
            .copied()
            .filter(|call| !matches!(call, ChannelCall::Read(_)))
            .collect()
    }

    fn check(&self, op: ChannelOp) -> ChannelResult<()> {
        if self.failing.contains(&op) {
            return Err(ChannelError::io(op, io::Error::other("scripted failure")));
        }
        Ok(())
    }

    fn check_handle(&self, handle: EffectHandle) -> ChannelResult<()> {
        if self.live.contains(&handle.id()) {
            Ok(())
        } else {
            Err(ChannelError::UnknownEffect(handle.id()))
        }
    }

    fn next_position(&mut self) -> u16 {
        match self.positions.len() {
            0 => Position::CENTER.get(),
            1 => self.positions.front().copied().unwrap_or_default(),
            _ => self.positions.pop_front().unwrap_or_default(),
        }
    }
}

impl DeviceChannel for ScriptedChannel {
    fn read_position(&mut self) -> ChannelResult<Position> {
        self.check(ChannelOp::ReadPosition)?;
        if self.fail_read_after.is_some_and(|limit| self.reads >= limit) {
            return Err(ChannelError::io(
                ChannelOp::ReadPosition,
                io::Error::new(io::ErrorKind::BrokenPipe, "device unplugged"),
            ));
        }

        let position = self.next_position();
        self.reads += 1;
        self.calls.push(ChannelCall::Read(position));
        if let Some((limit, token)) = &self.cancel_after {
            if self.reads >= *limit {
                token.cancel();
            }
        }
        Ok(Position::masked(u32::from(position)))
    }

    fn upload_constant_effect(&mut self, force: &ConstantForce) -> ChannelResult<EffectHandle> {
        self.calls.push(ChannelCall::Upload {
            direction: force.direction_word(),
            level: force.level(),
        });
        self.check(ChannelOp::Upload)?;

        let handle = EffectHandle::new(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.live.insert(handle.id());
        self.max_live = self.max_live.max(self.live.len());
        Ok(handle)
    }

    fn update_constant_effect(
        &mut self,
        handle: EffectHandle,
        force: &ConstantForce,
    ) -> ChannelResult<()> {
        self.calls.push(ChannelCall::Update {
            handle: handle.id(),
            level: force.level(),
        });
        self.check_handle(handle)?;
        self.check(ChannelOp::Update)
    }

    fn play(&mut self, handle: EffectHandle) -> ChannelResult<()> {
        self.calls.push(ChannelCall::Play(handle.id()));
        self.check_handle(handle)?;
        self.check(ChannelOp::Play)
    }

    fn stop(&mut self, handle: EffectHandle) -> ChannelResult<()> {
        self.calls.push(ChannelCall::Stop(handle.id()));
        self.check_handle(handle)?;
        self.check(ChannelOp::Stop)
    }

    fn remove_effect(&mut self, handle: EffectHandle) -> ChannelResult<()> {
        self.calls.push(ChannelCall::Remove(handle.id()));
        self.check_handle(handle)?;
        self.check(ChannelOp::Remove)?;
        self.live.remove(&handle.id());
        Ok(())
    }
}
