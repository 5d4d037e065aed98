//! Unit tests for model value objects

use mre_domain::value_objects::ModelSpec;

fn sample_model() -> ModelSpec {
    ModelSpec {
        id: "gpt-test".to_string(),
        provider: "openai-primary".to_string(),
        input_cost_per_1k: 0.01,
        output_cost_per_1k: 0.03,
        context_length: 8192,
        avg_latency_ms: 900.0,
        quality: 0.8,
        enabled: true,
    }
}

#[test]
fn test_valid_model_passes_validation() {
    assert!(sample_model().validate().is_ok());
}

#[test]
fn test_negative_cost_rejected() {
    let mut model = sample_model();
    model.input_cost_per_1k = -0.01;
    assert!(model.validate().is_err());
}

#[test]
fn test_negative_latency_rejected() {
    let mut model = sample_model();
    model.avg_latency_ms = -1.0;
    assert!(model.validate().is_err());
}

#[test]
fn test_quality_outside_unit_interval_rejected() {
    let mut model = sample_model();
    model.quality = 1.2;
    assert!(model.validate().is_err());
    model.quality = -0.1;
    assert!(model.validate().is_err());
}

#[test]
fn test_zero_context_length_rejected() {
    let mut model = sample_model();
    model.context_length = 0;
    assert!(model.validate().is_err());
}

#[test]
fn test_empty_id_rejected() {
    let mut model = sample_model();
    model.id = String::new();
    assert!(model.validate().is_err());
}

#[test]
fn test_scoring_cost_sums_both_directions() {
    let model = sample_model();
    assert!((model.scoring_cost() - 0.04).abs() < 1e-12);
}

#[test]
fn test_estimate_cost_per_thousand_tokens() {
    let model = sample_model();
    // 2000 input tokens at 0.01/1K plus 1000 output tokens at 0.03/1K
    let cost = model.estimate_cost(2000, 1000);
    assert!((cost - 0.05).abs() < 1e-12);
}

#[test]
fn test_fits_context_boundary() {
    let model = sample_model();
    assert!(model.fits_context(8192));
    assert!(!model.fits_context(8193));
}
