//! Unit tests for configuration loading and validation

use base64::Engine as _;
use mre_domain::value_objects::RoutingStrategy;
use mre_infrastructure::config::loader::{validate_app_config, ConfigBuilder, ConfigLoader};
use mre_infrastructure::config::types::app::AppConfig;
use mre_infrastructure::crypto::CryptoService;
use std::io::Write as _;

#[test]
fn test_default_config_is_valid() {
    let config = AppConfig::default();
    assert!(validate_app_config(&config).is_ok());
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = ConfigLoader::new()
        .with_config_path(dir.path().join("absent.toml"))
        .load()
        .expect("defaults load");
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.policy.max_retries, 2);
}

#[test]
fn test_toml_file_overrides_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("mre.toml");
    let mut file = std::fs::File::create(&path).expect("create config");
    writeln!(
        file,
        r#"
[logging]
level = "debug"

[policy]
max_retries = 5
retry_delay_ms = 250

[limits]
window_secs = 30
max_requests = 10

[catalog]
refresh_interval_secs = 60

[[catalog.providers]]
name = "openai-primary"
provider_type = "openai"
base_url = "https://api.openai.com/v1"
priority = 10

[[catalog.models]]
id = "gpt-test"
provider = "openai-primary"
input_cost_per_1k = 0.01
output_cost_per_1k = 0.03
context_length = 8192
avg_latency_ms = 900.0
quality = 0.8
"#
    )
    .expect("write config");

    let config = ConfigLoader::new()
        .with_config_path(&path)
        .load()
        .expect("file loads");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.policy.max_retries, 5);
    assert_eq!(config.limits.max_requests, 10);
    assert_eq!(config.catalog.providers.len(), 1);
    assert_eq!(config.catalog.models[0].id, "gpt-test");
    assert!(config.catalog.providers[0].enabled);
}

#[test]
fn test_custom_policy_with_bad_weight_sum_rejected() {
    let mut config = AppConfig::default();
    config.policy.strategy = RoutingStrategy::Custom;
    config.policy.cost_weight = 0.5;
    config.policy.latency_weight = 0.5;
    config.policy.quality_weight = 0.5;
    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_custom_policy_with_valid_weights_accepted() {
    let mut config = AppConfig::default();
    config.policy.strategy = RoutingStrategy::Custom;
    config.policy.cost_weight = 0.5;
    config.policy.latency_weight = 0.3;
    config.policy.quality_weight = 0.2;
    assert!(validate_app_config(&config).is_ok());
}

#[test]
fn test_power_level_with_bad_weights_rejected() {
    let mut config = AppConfig::default();
    config.power_levels.eco.cost_weight = 0.9;
    config.power_levels.eco.latency_weight = 0.9;
    config.power_levels.eco.quality_weight = 0.9;
    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_zero_rate_limit_window_rejected() {
    let mut config = AppConfig::default();
    config.limits.window_secs = 0;
    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_zero_refresh_interval_rejected() {
    let mut config = AppConfig::default();
    config.catalog.refresh_interval_secs = 0;
    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_malformed_master_key_rejected() {
    let mut config = AppConfig::default();
    config.crypto.master_key_b64 = Some("short".to_string());
    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_valid_master_key_accepted() {
    let key = CryptoService::generate_master_key();
    let config = ConfigBuilder::new()
        .with_master_key_b64(base64::engine::general_purpose::STANDARD.encode(key))
        .build();
    assert!(validate_app_config(&config).is_ok());
}

#[test]
fn test_malformed_operator_credential_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("mre.toml");
    std::fs::write(
        &path,
        r#"
[[catalog.providers]]
name = "p1"
provider_type = "openai"
base_url = "https://api.openai.com/v1"

[catalog.providers.operator_credential]
ciphertext_b64 = "!!! not base64 !!!"
nonce_b64 = "AAAA"
"#,
    )
    .expect("write config");

    assert!(ConfigLoader::new().with_config_path(&path).load().is_err());
}
