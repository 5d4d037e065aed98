//! Unit tests for power level profiles

use mre_domain::value_objects::{PowerLevel, PowerLevelProfile};

#[test]
fn test_power_level_round_trip() {
    for level in PowerLevel::ALL {
        let parsed: PowerLevel = level.as_str().parse().expect("parse own representation");
        assert_eq!(parsed, level);
    }
}

#[test]
fn test_unknown_power_level_rejected() {
    assert!("turbo".parse::<PowerLevel>().is_err());
}

#[test]
fn test_default_profiles_are_valid() {
    for level in PowerLevel::ALL {
        let profile = PowerLevelProfile::defaults_for(level);
        assert!(profile.validate().is_ok());
        assert!(profile.allowlist.is_empty());
    }
}

#[test]
fn test_eco_prefers_cost_precision_prefers_quality() {
    let eco = PowerLevelProfile::defaults_for(PowerLevel::Eco);
    let precision = PowerLevelProfile::defaults_for(PowerLevel::Precision);
    assert!(eco.weights.cost > eco.weights.quality);
    assert!(precision.weights.quality > precision.weights.cost);
}

#[test]
fn test_default_level_is_balanced() {
    assert_eq!(PowerLevel::default(), PowerLevel::Balanced);
}
