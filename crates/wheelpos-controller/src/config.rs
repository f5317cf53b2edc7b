//! Controller configuration.
//!
//! Defaults reproduce the behaviour the controller was tuned with on a G27:
//! a ±4 dead-band and fine window, a fine strength of `0x1930`, one warm-up
//! read, a 10 µs settle delay before stopping, and busy polling with no
//! deadline.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use wheelpos_errors::{Result, ValidationError, WheelPosError, validate, validate_range};
use wheelpos_ffb::{
    DEFAULT_DEAD_BAND, DEFAULT_FINE_WINDOW, FINE_STRENGTH, MAX_POSITION, MAX_STRENGTH, Strength,
};

/// How the controller waits for the axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Sleep between samples in microseconds. `0` polls without sleeping.
    pub interval_us: u64,
    /// Upper bound on each approach phase in milliseconds. `None` waits forever.
    pub timeout_ms: Option<u64>,
}

impl PollConfig {
    pub fn interval(&self) -> Option<Duration> {
        (self.interval_us > 0).then(|| Duration::from_micros(self.interval_us))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Position controller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Half-width of the window in which a move is a no-op.
    pub dead_band: u16,
    /// Half-width of the window the fine phase settles into.
    ///
    /// Independent of the per-move tolerance; a tolerance below this value
    /// makes the fine window wider than the coarse one.
    pub fine_window: u16,
    /// Strength used once the coarse window is reached.
    ///
    /// A move whose own strength is weaker keeps that strength instead, so
    /// the fine phase never pushes harder than the coarse phase.
    pub fine_strength: u16,
    /// Discarded reads before the starting sample.
    pub warmup_reads: u8,
    /// Delay between fine convergence and the stop write, in microseconds.
    pub settle_delay_us: u64,
    /// Sampling policy for both approach phases.
    pub poll: PollConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            dead_band: DEFAULT_DEAD_BAND,
            fine_window: DEFAULT_FINE_WINDOW,
            fine_strength: FINE_STRENGTH,
            warmup_reads: 1,
            settle_delay_us: 10,
            poll: PollConfig::default(),
        }
    }
}

impl ControllerConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate!(
            self.dead_band <= MAX_POSITION,
            ValidationError::out_of_range("dead_band", self.dead_band, 0, MAX_POSITION)
        );
        validate_range!("fine_window", self.fine_window, 1, MAX_POSITION);
        validate!(
            self.fine_strength <= MAX_STRENGTH,
            ValidationError::out_of_range("fine_strength", self.fine_strength, 0, MAX_STRENGTH)
        );
        validate!(
            self.poll.timeout_ms != Some(0),
            ValidationError::constraint("poll.timeout_ms must be greater than 0")
        );
        Ok(())
    }

    /// Configured fine-phase strength.
    ///
    /// The controller applies `min(fine_strength, request.strength)`.
    pub fn fine_strength(&self) -> Strength {
        Strength::masked(u32::from(self.fine_strength))
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_micros(self.settle_delay_us)
    }

    /// Parse and validate a JSON configuration.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the JSON is malformed, or a
    /// validation error if a value is out of range.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| WheelPosError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, otherwise the errors
    /// of [`from_json_str`](Self::from_json_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if serialization fails.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| WheelPosError::config(e.to_string()))
    }

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> ControllerConfigBuilder {
        ControllerConfigBuilder::default()
    }
}

/// Builder for `ControllerConfig`.
#[derive(Debug, Default)]
pub struct ControllerConfigBuilder {
    config: ControllerConfig,
}

impl ControllerConfigBuilder {
    #[must_use]
    pub fn dead_band(mut self, dead_band: u16) -> Self {
        self.config.dead_band = dead_band;
        self
    }

    #[must_use]
    pub fn fine_window(mut self, fine_window: u16) -> Self {
        self.config.fine_window = fine_window;
        self
    }

    #[must_use]
    pub fn fine_strength(mut self, strength: u16) -> Self {
        self.config.fine_strength = strength;
        self
    }

    #[must_use]
    pub fn warmup_reads(mut self, reads: u8) -> Self {
        self.config.warmup_reads = reads;
        self
    }

    #[must_use]
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.config.settle_delay_us = u64::try_from(delay.as_micros()).unwrap_or(u64::MAX);
        self
    }

    /// Sleep between samples instead of spinning.
    #[must_use]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll.interval_us = u64::try_from(interval.as_micros()).unwrap_or(u64::MAX);
        self
    }

    /// Bound each approach phase.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.poll.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<ControllerConfig, ValidationError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ControllerConfig::default();
        assert_eq!(config.dead_band, 4);
        assert_eq!(config.fine_window, 4);
        assert_eq!(config.fine_strength, 0x1930);
        assert_eq!(config.warmup_reads, 1);
        assert_eq!(config.settle_delay(), Duration::from_micros(10));
        assert_eq!(config.poll.interval(), None);
        assert_eq!(config.poll.timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_fine_window() {
        let result = ControllerConfig::builder().fine_window(0).build();
        assert!(matches!(result, Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn test_validation_rejects_strength_above_15_bits() {
        let result = ControllerConfig::builder().fine_strength(0x8000).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = ControllerConfig {
            poll: PollConfig {
                interval_us: 0,
                timeout_ms: Some(0),
            },
            ..ControllerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::ConstraintViolation(_))
        ));
    }

    #[test]
    fn test_builder_durations() -> std::result::Result<(), ValidationError> {
        let config = ControllerConfig::builder()
            .poll_interval(Duration::from_micros(250))
            .timeout(Duration::from_secs(2))
            .settle_delay(Duration::from_micros(50))
            .build()?;
        assert_eq!(config.poll.interval(), Some(Duration::from_micros(250)));
        assert_eq!(config.poll.timeout(), Some(Duration::from_secs(2)));
        assert_eq!(config.settle_delay_us, 50);
        Ok(())
    }

    #[test]
    fn test_partial_json_uses_defaults() -> Result<()> {
        let config = ControllerConfig::from_json_str(r#"{"fine_strength": 5000, "poll": {"timeout_ms": 3000}}"#)?;
        assert_eq!(config.fine_strength, 5000);
        assert_eq!(config.dead_band, 4);
        assert_eq!(config.poll.interval_us, 0);
        assert_eq!(config.poll.timeout(), Some(Duration::from_secs(3)));
        Ok(())
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let result = ControllerConfig::from_json_str("{not json");
        assert!(matches!(result, Err(WheelPosError::Config(_))));
    }

    #[test]
    fn test_out_of_range_json_is_validation_error() {
        let result = ControllerConfig::from_json_str(r#"{"fine_window": 0}"#);
        assert!(matches!(result, Err(WheelPosError::Validation(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ControllerConfig::load("/nonexistent/wheelpos/controller.json");
        assert!(matches!(result, Err(WheelPosError::Io(_))));
    }
}
