//! Snapshot tests for the persisted configuration format.

use insta::assert_snapshot;
use wheelpos_controller::ControllerConfig;
use wheelpos_test_helpers::prelude::*;

#[test]
fn test_default_config_json() -> TestResult {
    let json = ControllerConfig::default().to_json_string()?;
    assert_snapshot!(json, @r#"
    {
      "dead_band": 4,
      "fine_window": 4,
      "fine_strength": 6448,
      "warmup_reads": 1,
      "settle_delay_us": 10,
      "poll": {
        "interval_us": 0,
        "timeout_ms": null
      }
    }
    "#);
    Ok(())
}

#[test]
fn test_bounded_config_json() -> TestResult {
    let config = ControllerConfig::builder()
        .poll_interval(std::time::Duration::from_micros(500))
        .timeout(std::time::Duration::from_secs(5))
        .build()?;
    assert_snapshot!(config.to_json_string()?, @r#"
    {
      "dead_band": 4,
      "fine_window": 4,
      "fine_strength": 6448,
      "warmup_reads": 1,
      "settle_delay_us": 10,
      "poll": {
        "interval_us": 500,
        "timeout_ms": 5000
      }
    }
    "#);
    Ok(())
}

#[test]
fn test_config_survives_json() -> TestResult {
    let config = ControllerConfig::builder()
        .dead_band(8)
        .fine_window(6)
        .fine_strength(4000)
        .warmup_reads(2)
        .build()?;
    let parsed = ControllerConfig::from_json_str(&config.to_json_string()?)?;
    assert_eq!(parsed, config);
    Ok(())
}
