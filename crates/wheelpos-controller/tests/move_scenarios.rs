//! End-to-end moves against a scripted wheel.

use std::time::{Duration, Instant};

use wheelpos_controller::prelude::*;
use wheelpos_errors::ChannelOp;
use wheelpos_ffb::{DIRECTION_WORD_CLOCKWISE, DIRECTION_WORD_COUNTER_CLOCKWISE, FINE_STRENGTH};
use wheelpos_test_helpers::prelude::*;

const FINE_LEVEL: i16 = FINE_STRENGTH as i16;

fn controller() -> PositionController {
    init_test_tracing();
    PositionController::default()
}

#[test]
fn test_clockwise_move_reaches_fine_window() -> TestResult {
    let mut channel =
        ScriptedChannel::new([4096, 4096, 6000, 8000, 8150, 8170, 8190, 8191]);

    let report = controller().execute(&mut channel, MoveRequest::new(8192, 50, 20_000))?;

    assert_eq!(report.start.get(), 4096);
    assert_eq!(report.direction, Some(Direction::Clockwise));
    assert_eq!(report.coarse_samples, 3);
    assert_eq!(report.fine_samples, 2);
    assert!(report.fine_strength_applied);
    assert_eq!(report.final_position.get(), 8191);
    assert_eq!(
        channel.effect_calls(),
        [
            ChannelCall::Upload {
                direction: DIRECTION_WORD_CLOCKWISE,
                level: 20_000
            },
            ChannelCall::Play(0),
            ChannelCall::Update {
                handle: 0,
                level: FINE_LEVEL
            },
            ChannelCall::Stop(0),
            ChannelCall::Remove(0),
        ]
    );
    assert_eq!(channel.live_effects(), 0);
    assert_eq!(channel.max_live_effects(), 1);
    Ok(())
}

#[test]
fn test_counter_clockwise_move() -> TestResult {
    let mut channel = ScriptedChannel::new([12_000, 12_000, 10_000, 8230, 8195]);

    let reached = controller().move_to(&mut channel, 8192, 50, 20_000)?;

    assert_eq!(reached.get(), 8195);
    assert_eq!(
        channel.effect_calls().first(),
        Some(&ChannelCall::Upload {
            direction: DIRECTION_WORD_COUNTER_CLOCKWISE,
            level: 20_000
        })
    );
    Ok(())
}

#[test]
fn test_already_at_target_is_no_op() -> TestResult {
    let mut channel = ScriptedChannel::resting_at(100);

    let report = controller().execute(&mut channel, MoveRequest::new(100, 50, 20_000))?;

    assert!(report.is_no_op());
    assert_eq!(report.final_position.get(), 100);
    assert!(channel.effect_calls().is_empty());
    assert_eq!(channel.reads(), 2);
    Ok(())
}

#[test]
fn test_dead_band_edges() -> TestResult {
    for from in [8188, 8196] {
        let mut channel = ScriptedChannel::resting_at(from);
        let reached = controller().move_to(&mut channel, 8192, 50, 20_000)?;
        assert_eq!(reached.get(), from);
        assert!(channel.effect_calls().is_empty());
    }

    let mut channel = ScriptedChannel::new([8187, 8187, 8192]);
    controller().move_to(&mut channel, 8192, 50, 20_000)?;
    assert_eq!(channel.count(|c| matches!(c, ChannelCall::Upload { .. })), 1);
    Ok(())
}

#[test]
fn test_warm_up_sample_is_discarded() -> TestResult {
    // The first sample would be a no-op; the second is the real start.
    let mut channel = ScriptedChannel::new([8192, 4096, 8192]);

    let report = controller().execute(&mut channel, MoveRequest::new(8192, 50, 20_000))?;

    assert_eq!(report.start.get(), 4096);
    assert_eq!(report.direction, Some(Direction::Clockwise));
    Ok(())
}

#[test]
fn test_without_warm_up_first_sample_is_start() -> TestResult {
    let config = ControllerConfig::builder().warmup_reads(0).build()?;
    let controller = PositionController::new(config)?;
    let mut channel = ScriptedChannel::new([8192, 4096]);

    let report = controller.execute(&mut channel, MoveRequest::new(8192, 50, 20_000))?;

    assert!(report.is_no_op());
    assert_eq!(channel.reads(), 1);
    Ok(())
}

#[test]
fn test_inputs_are_masked() -> TestResult {
    let mut channel = ScriptedChannel::new([4096, 4096, 8192]);

    let report = controller().execute(
        &mut channel,
        MoveRequest::new(0x4000 + 8192, 50, 0x8000 + 20_000),
    )?;

    assert_eq!(report.target.get(), 8192);
    assert_eq!(
        channel.effect_calls().first(),
        Some(&ChannelCall::Upload {
            direction: DIRECTION_WORD_CLOCKWISE,
            level: 20_000
        })
    );
    Ok(())
}

#[test]
fn test_weak_move_never_speeds_up_for_fine_phase() -> TestResult {
    let mut channel = ScriptedChannel::new([4096, 4096, 8192]);

    controller().move_to(&mut channel, 8192, 50, 1000)?;

    assert_eq!(
        channel.count(|c| matches!(c, ChannelCall::Update { level: 1000, .. })),
        1
    );
    Ok(())
}

#[test]
fn test_windows_saturate_near_zero() -> TestResult {
    let mut channel = ScriptedChannel::new([500, 500, 300, 40, 8]);

    let report = controller().execute(&mut channel, MoveRequest::new(10, 50, 20_000))?;

    assert_eq!(report.direction, Some(Direction::CounterClockwise));
    assert_eq!(report.coarse_samples, 2);
    assert_eq!(report.final_position.get(), 8);
    Ok(())
}

#[test]
fn test_tolerance_below_fine_window() -> TestResult {
    // Coarse window [8190, 8194] sits inside the fine window [8188, 8196].
    let mut channel = ScriptedChannel::new([4096, 4096, 8189, 8191]);

    let report = controller().execute(&mut channel, MoveRequest::new(8192, 2, 20_000))?;

    assert_eq!(report.coarse_samples, 2);
    assert_eq!(report.fine_samples, 0);
    assert_eq!(report.final_position.get(), 8191);
    Ok(())
}

#[test]
fn test_custom_fine_window_and_strength() -> TestResult {
    let config = ControllerConfig::builder()
        .fine_window(20)
        .fine_strength(3000)
        .settle_delay(std::time::Duration::ZERO)
        .build()?;
    let controller = PositionController::new(config)?;
    let mut channel = ScriptedChannel::new([0, 0, 8150, 8180]);

    let report = controller.execute(&mut channel, MoveRequest::new(8192, 50, 20_000))?;

    assert_eq!(report.fine_samples, 1);
    assert_eq!(report.final_position.get(), 8180);
    assert_eq!(
        channel.count(|c| matches!(c, ChannelCall::Update { level: 3000, .. })),
        1
    );
    Ok(())
}

#[test]
fn test_remove_failure_does_not_fail_move() -> TestResult {
    let mut channel = ScriptedChannel::new([4096, 4096, 8192]).failing(ChannelOp::Remove);

    let reached = controller().move_to(&mut channel, 8192, 50, 20_000)?;

    assert_eq!(reached.get(), 8192);
    assert_eq!(channel.count(|c| matches!(c, ChannelCall::Remove(_))), 1);
    Ok(())
}

#[test]
fn test_consecutive_moves_reuse_one_slot() -> TestResult {
    let controller = controller();
    let mut channel = ScriptedChannel::new([4096, 4096, 8192, 8192, 8192, 8192, 2000]);

    controller.move_to(&mut channel, 8192, 50, 20_000)?;
    let second = controller.execute(&mut channel, MoveRequest::new(2000, 50, 20_000))?;

    assert_eq!(second.start.get(), 8192);
    assert_eq!(second.direction, Some(Direction::CounterClockwise));
    assert_eq!(second.final_position.get(), 2000);
    assert_eq!(channel.count(|c| matches!(c, ChannelCall::Upload { .. })), 2);
    assert_eq!(channel.max_live_effects(), 1);
    assert_eq!(channel.live_effects(), 0);
    Ok(())
}

#[test]
fn test_boxed_channel() -> TestResult {
    let mut channel: Box<dyn DeviceChannel> = Box::new(ScriptedChannel::new([0, 0, 8192]));
    let reached = controller().move_to(&mut channel, 8192, 50, 20_000)?;
    assert_eq!(reached.get(), 8192);
    Ok(())
}

#[test]
fn test_recommended_tolerance_range() {
    assert!(MoveRequest::new(8192, 20, 20_000).tolerance_is_recommended());
    assert!(MoveRequest::new(8192, 500, 20_000).tolerance_is_recommended());
    assert!(!MoveRequest::new(8192, 19, 20_000).tolerance_is_recommended());
    assert!(!MoveRequest::new(8192, 501, 20_000).tolerance_is_recommended());
}

#[test]
fn test_tolerance_outside_recommended_range_still_moves() -> TestResult {
    let mut channel = ScriptedChannel::new([0, 0, 7000, 8192]);

    let report = controller().execute(&mut channel, MoveRequest::new(8192, 2000, 20_000))?;

    assert_eq!(report.coarse_samples, 1);
    assert_eq!(report.final_position.get(), 8192);
    Ok(())
}

/// Records when the last sample was taken and when the stop was written.
struct Timed {
    inner: ScriptedChannel,
    last_read: Option<Instant>,
    stopped: Option<Instant>,
}

impl DeviceChannel for Timed {
    fn read_position(&mut self) -> ChannelResult<Position> {
        if self.stopped.is_none() {
            self.last_read = Some(Instant::now());
        }
        self.inner.read_position()
    }

    fn upload_constant_effect(&mut self, force: &ConstantForce) -> ChannelResult<EffectHandle> {
        self.inner.upload_constant_effect(force)
    }

    fn update_constant_effect(
        &mut self,
        handle: EffectHandle,
        force: &ConstantForce,
    ) -> ChannelResult<()> {
        self.inner.update_constant_effect(handle, force)
    }

    fn play(&mut self, handle: EffectHandle) -> ChannelResult<()> {
        self.inner.play(handle)
    }

    fn stop(&mut self, handle: EffectHandle) -> ChannelResult<()> {
        self.stopped = Some(Instant::now());
        self.inner.stop(handle)
    }

    fn remove_effect(&mut self, handle: EffectHandle) -> ChannelResult<()> {
        self.inner.remove_effect(handle)
    }
}

#[test]
fn test_settle_delay_precedes_stop() -> TestResult {
    let settle = Duration::from_millis(5);
    let config = ControllerConfig::builder().settle_delay(settle).build()?;
    let controller = PositionController::new(config)?;
    let mut channel = Timed {
        inner: ScriptedChannel::new([0, 0, 8150, 8192]),
        last_read: None,
        stopped: None,
    };

    let report = controller.execute(&mut channel, MoveRequest::new(8192, 50, 20_000))?;

    assert!(report.elapsed >= settle);
    let (Some(last_read), Some(stopped)) = (channel.last_read, channel.stopped) else {
        return Err("no sample or stop recorded".into());
    };
    assert!(stopped.saturating_duration_since(last_read) >= settle);
    assert_eq!(channel.inner.count(|c| matches!(c, ChannelCall::Stop(_))), 1);
    Ok(())
}
