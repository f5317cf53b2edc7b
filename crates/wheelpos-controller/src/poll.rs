//! Polling the axis until it enters a window.
//!
//! With the default [`PollConfig`](crate::config::PollConfig) the wait is a
//! busy loop with no sleep and no deadline: it only returns once the device
//! reports a position inside the window, or when a read fails. A poll
//! interval, a timeout and a [`CancelToken`] can each bound the wait.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::trace;
use wheelpos_errors::{MoveError, MoveResult, MoveStage};
use wheelpos_ffb::{Position, PositionWindow};

use crate::channel::DeviceChannel;

/// Shared flag that ends an in-progress move.
///
/// Cloning yields a handle to the same flag, so another thread (or a signal
/// handler thread) can cancel a move that blocks the calling thread.
///
/// # Examples
///
/// ```
/// use wheelpos_controller::CancelToken;
///
/// let token = CancelToken::new();
/// let remote = token.clone();
/// remote.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Clears a previous cancellation so the token can guard another move.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Outcome of a successful wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Settled {
    /// First sample found inside the window
    pub position: Position,
    /// Number of reads performed during the wait
    pub samples: u32,
}

/// Waits for the axis to enter a window.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Poller<'a> {
    pub interval: Option<Duration>,
    pub timeout: Option<Duration>,
    pub cancel: Option<&'a CancelToken>,
}

impl Poller<'_> {
    /// Reads until a sample lies inside `window`, starting from `last`.
    ///
    /// `last` is checked before any read, so a move whose previous sample is
    /// already inside the window performs no reads here.
    pub fn wait_until<C: DeviceChannel + ?Sized>(
        &self,
        channel: &mut C,
        stage: MoveStage,
        last: Position,
        window: PositionWindow,
    ) -> MoveResult<Settled> {
        let started = Instant::now();
        let mut current = last;
        let mut samples: u32 = 0;

        loop {
            if window.contains(current) {
                trace!(%stage, position = current.get(), samples, "inside window");
                return Ok(Settled {
                    position: current,
                    samples,
                });
            }
            if self.cancel.is_some_and(CancelToken::is_cancelled) {
                return Err(MoveError::cancelled(stage, current.get()));
            }
            if let Some(timeout) = self.timeout {
                let elapsed = started.elapsed();
                if elapsed >= timeout {
                    return Err(MoveError::timeout(stage, elapsed, current.get()));
                }
            }
            if let Some(interval) = self.interval {
                std::thread::sleep(interval);
            }

            current = channel
                .read_position()
                .map_err(|e| MoveError::read(stage, e))?;
            samples = samples.saturating_add(1);
        }
    }
}
