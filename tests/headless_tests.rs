//! Integration tests for headless match execution
//!
//! These tests verify that:
//! - JSON configs parse, default and validate
//! - Configs convert to CPU-vs-CPU settings
//! - Seeded matches produce identical results

use clashsim::headless::{simulate_match, HeadlessMatchConfig};
use clashsim::Team;

/// Short, fast match for tests
fn create_config(seed: Option<u64>) -> HeadlessMatchConfig {
    HeadlessMatchConfig {
        random_seed: seed,
        max_duration_secs: 20.0,
        time_step_secs: 0.05,
        ..HeadlessMatchConfig::default()
    }
}

#[test]
fn test_config_defaults_fill_missing_fields() {
    let config = HeadlessMatchConfig::from_json_str("{}").expect("empty object is a valid config");
    assert_eq!(config.random_seed, None);
    assert_eq!(config.max_duration_secs, 300.0);
    assert!((config.time_step_secs - 1.0 / 60.0).abs() < 1e-6);
    assert!(config.output_path.is_none());
}

#[test]
fn test_config_with_overrides() {
    let json = r#"{
        "random_seed": 42,
        "max_duration_secs": 120.0,
        "tower_health": 500.0,
        "respawn_delay_secs": 2.0
    }"#;
    let config = HeadlessMatchConfig::from_json_str(json).unwrap();
    assert_eq!(config.random_seed, Some(42));

    let settings = config.to_match_settings().unwrap();
    assert_eq!(settings.tower_health, 500.0);
    assert_eq!(settings.respawn_delay, 2.0);
    assert_eq!(settings.random_seed, Some(42));
    assert!(settings.is_auto(Team::Top) && settings.is_auto(Team::Bottom));
}

#[test]
fn test_invalid_configs_are_rejected() {
    assert!(HeadlessMatchConfig::from_json_str("not json").is_err());
    assert!(HeadlessMatchConfig::from_json_str(r#"{"max_duration_secs": 0}"#).is_err());
    assert!(HeadlessMatchConfig::from_json_str(r#"{"time_step_secs": 5.0}"#).is_err());
    assert!(HeadlessMatchConfig::from_json_str(r#"{"tower_health": -1.0}"#).is_err());
    assert!(HeadlessMatchConfig::from_json_str(r#"{"respawn_delay_secs": -0.5}"#).is_err());
}

#[test]
fn test_sample_config_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/config/sample_match.json");
    let config = HeadlessMatchConfig::load_from_file(&path).expect("sample config should load");
    assert_eq!(config.random_seed, Some(42));
}

#[test]
fn test_simulated_match_reports_both_teams() {
    let result = simulate_match(&create_config(Some(9))).expect("match should run");

    assert!(result.match_time > 0.0);
    assert!(result.match_time <= 20.0 + 0.05 + 1e-3);
    assert_eq!(result.random_seed, Some(9));
    assert!(result.top.buildings >= 1, "opening pick places a building");
    assert!(result.bottom.buildings >= 1, "opening pick places a building");
    if result.winner.is_none() {
        assert!(result.top.tower_health > 0.0 && result.bottom.tower_health > 0.0);
    }
}

#[test]
fn test_same_seed_same_result() {
    let a = simulate_match(&create_config(Some(12345))).unwrap();
    let b = simulate_match(&create_config(Some(12345))).unwrap();
    assert_eq!(a, b, "same seed should reproduce the match exactly");
}
