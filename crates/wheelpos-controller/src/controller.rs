//! Two-phase bang-bang position controller.
//!
//! A move pushes the wheel with the caller's strength until it is inside the
//! tolerance window (coarse phase), drops to the fine strength so it does not
//! overshoot, and waits for the fine window before stopping the effect. The
//! direction is fixed when the move starts; an overshoot is never corrected by
//! reversing.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, error, info, info_span, warn};
use wheelpos_errors::{MoveError, MoveResult, MoveStage, ValidationError};
use wheelpos_ffb::{
    ConstantForce, Direction, Position, PositionWindow, RECOMMENDED_TOLERANCE_MAX,
    RECOMMENDED_TOLERANCE_MIN, Strength,
};

use crate::channel::DeviceChannel;
use crate::config::ControllerConfig;
use crate::effect::{ActiveEffect, EffectState};
use crate::poll::{CancelToken, Poller};

/// A single move request, already masked into device ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveRequest {
    /// Target axis position
    pub target: Position,
    /// Half-width of the coarse window
    pub tolerance: u32,
    /// Coarse-phase strength
    pub strength: Strength,
}

impl MoveRequest {
    /// Masks `target` to 14 bits and `strength` to 15 bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use wheelpos_controller::MoveRequest;
    ///
    /// let request = MoveRequest::new(0x4000 + 8192, 50, 0x8000 + 20_000);
    /// assert_eq!(request.target.get(), 8192);
    /// assert_eq!(request.strength.get(), 20_000);
    /// ```
    pub fn new(target: u32, tolerance: u32, strength: u32) -> Self {
        Self {
            target: Position::masked(target),
            tolerance,
            strength: Strength::masked(strength),
        }
    }

    /// Check if the tolerance is inside the advisory `[20, 500]` range.
    ///
    /// Out-of-range tolerances are still honoured; the controller only warns.
    pub fn tolerance_is_recommended(&self) -> bool {
        (RECOMMENDED_TOLERANCE_MIN..=RECOMMENDED_TOLERANCE_MAX).contains(&self.tolerance)
    }

    fn coarse_window(&self) -> PositionWindow {
        PositionWindow::around(self.target, self.tolerance)
    }
}

/// What a completed move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    /// Sample taken before any force was applied
    pub start: Position,
    /// Masked target
    pub target: Position,
    /// Direction of the effect, `None` for a no-op move
    pub direction: Option<Direction>,
    /// Sample taken after the effect was removed
    pub final_position: Position,
    /// Reads performed while waiting for the coarse window
    pub coarse_samples: u32,
    /// Reads performed while waiting for the fine window
    pub fine_samples: u32,
    /// Whether the device accepted the switch to the fine strength
    pub fine_strength_applied: bool,
    /// Wall-clock duration of the move
    pub elapsed: Duration,
}

impl MoveReport {
    /// Check if the move returned without creating an effect.
    pub fn is_no_op(&self) -> bool {
        self.direction.is_none()
    }
}

/// Drives a wheel to a target position over a [`DeviceChannel`].
///
/// One controller can serve many moves, but each move borrows the channel
/// mutably for its whole duration, so moves on one channel never overlap.
///
/// # Examples
///
/// ```no_run
/// # use wheelpos_controller::{DeviceChannel, PositionController};
/// # fn demo(channel: &mut impl DeviceChannel) -> wheelpos_errors::MoveResult<()> {
/// let controller = PositionController::default();
/// let reached = controller.move_to(channel, 8192, 50, 20_000)?;
/// println!("wheel is at {reached}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct PositionController {
    config: ControllerConfig,
    cancel: Option<CancelToken>,
}

impl PositionController {
    /// Create a controller with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the validation error if the configuration is invalid.
    pub fn new(config: ControllerConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self {
            config,
            cancel: None,
        })
    }

    /// Check the cancel token between samples.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Drives the wheel to `target` and returns the final observed position.
    ///
    /// `target` is masked to 14 bits and `strength` to 15 bits.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn move_to<C: DeviceChannel + ?Sized>(
        &self,
        channel: &mut C,
        target: u32,
        tolerance: u32,
        strength: u32,
    ) -> MoveResult<Position> {
        self.execute(channel, MoveRequest::new(target, tolerance, strength))
            .map(|report| report.final_position)
    }

    /// Runs one move and reports what happened.
    ///
    /// # Errors
    ///
    /// - [`MoveError::Fatal`] if the effect cannot be uploaded, started or
    ///   stopped. Removal is still attempted whenever an effect exists.
    /// - [`MoveError::Read`] if a position sample fails.
    /// - [`MoveError::Timeout`] / [`MoveError::Cancelled`] if a bounded wait
    ///   ends early. The effect is stopped and removed first.
    pub fn execute<C: DeviceChannel + ?Sized>(
        &self,
        channel: &mut C,
        request: MoveRequest,
    ) -> MoveResult<MoveReport> {
        let span = info_span!(
            "move_to",
            target = request.target.get(),
            tolerance = request.tolerance,
            strength = request.strength.get()
        );
        let _enter = span.enter();
        let started = Instant::now();

        let start = self.sample_start(channel)?;
        info!(position = start.get(), "current position");
        info!(position = request.target.get(), "rotating to position");

        let Some(direction) = Direction::between(start, request.target, self.config.dead_band)
        else {
            debug!("inside dead-band, no rotation necessary");
            return Ok(MoveReport {
                start,
                target: request.target,
                direction: None,
                final_position: start,
                coarse_samples: 0,
                fine_samples: 0,
                fine_strength_applied: false,
                elapsed: started.elapsed(),
            });
        };
        info!(%direction, "{}", direction.label());

        if !request.tolerance_is_recommended() {
            warn!(
                tolerance = request.tolerance,
                min = RECOMMENDED_TOLERANCE_MIN,
                max = RECOMMENDED_TOLERANCE_MAX,
                "tolerance outside the recommended range"
            );
        }
        if request.tolerance < u32::from(self.config.fine_window) {
            warn!(
                tolerance = request.tolerance,
                fine_window = self.config.fine_window,
                "tolerance is narrower than the fine window"
            );
        }

        let poller = Poller {
            interval: self.config.poll.interval(),
            timeout: self.config.poll.timeout(),
            cancel: self.cancel.as_ref(),
        };

        let force = ConstantForce::new(direction, request.strength);
        let mut effect = ActiveEffect::upload(channel, force).map_err(|e| {
            error!(error = %e, "upload effect");
            MoveError::fatal(MoveStage::Upload, e)
        })?;

        if let Err(e) = effect.play() {
            error!(error = %e, "play effect");
            release(effect);
            return Err(MoveError::fatal(MoveStage::Play, e));
        }

        let coarse = match poller.wait_until(
            effect.channel(),
            MoveStage::CoarseApproach,
            start,
            request.coarse_window(),
        ) {
            Ok(settled) => settled,
            Err(e) => return Err(abort(effect, e)),
        };
        debug!(
            position = coarse.position.get(),
            samples = coarse.samples,
            "coarse window reached"
        );

        // Never push harder in the fine phase than the caller asked for.
        let fine_strength = self.config.fine_strength().min(request.strength);
        let fine_strength_applied = match effect.set_strength(fine_strength) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "could not switch to fine strength, continuing");
                false
            }
        };

        let fine_window = PositionWindow::around(request.target, u32::from(self.config.fine_window));
        let fine = match poller.wait_until(
            effect.channel(),
            MoveStage::FineApproach,
            coarse.position,
            fine_window,
        ) {
            Ok(settled) => settled,
            Err(e) => return Err(abort(effect, e)),
        };
        debug!(
            position = fine.position.get(),
            samples = fine.samples,
            "fine window reached"
        );

        let settle = self.config.settle_delay();
        if !settle.is_zero() {
            std::thread::sleep(settle);
        }

        if let Err(e) = effect.stop() {
            error!(error = %e, "stop effect");
            release(effect);
            return Err(MoveError::fatal(MoveStage::Stop, e));
        }
        release(effect);

        let final_position = channel
            .read_position()
            .map_err(|e| MoveError::read(MoveStage::FinalRead, e))?;
        info!(position = final_position.get(), "wheel is at");

        Ok(MoveReport {
            start,
            target: request.target,
            direction: Some(direction),
            final_position,
            coarse_samples: coarse.samples,
            fine_samples: fine.samples,
            fine_strength_applied,
            elapsed: started.elapsed(),
        })
    }

    /// Discards the warm-up reads and returns the starting sample.
    fn sample_start<C: DeviceChannel + ?Sized>(&self, channel: &mut C) -> MoveResult<Position> {
        for _ in 0..self.config.warmup_reads {
            channel
                .read_position()
                .map_err(|e| MoveError::read(MoveStage::WarmUp, e))?;
        }
        channel
            .read_position()
            .map_err(|e| MoveError::read(MoveStage::WarmUp, e))
    }
}

/// Erases the effect; a failure is only logged.
fn release<C: DeviceChannel + ?Sized>(effect: ActiveEffect<'_, C>) {
    let handle = effect.handle();
    if let Err(e) = effect.remove() {
        warn!(%handle, error = %e, "erase effect");
    }
}

/// Stops and erases a playing effect after a wait ended early.
fn abort<C: DeviceChannel + ?Sized>(mut effect: ActiveEffect<'_, C>, cause: MoveError) -> MoveError {
    warn!(error = %cause, "aborting move");
    if effect.state() == EffectState::Playing {
        if let Err(e) = effect.stop() {
            warn!(error = %e, "stop effect during abort");
        }
    }
    release(effect);
    cause
}
