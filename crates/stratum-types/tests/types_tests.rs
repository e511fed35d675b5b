//! Integration tests for stratum-types.

use stratum_types::constants::{
    DEFAULT_INNER_ETA, DEFAULT_OUTER_ETA, LAYERS_PER_ESCALATION, LAYER_DT_FUDGE,
};
use stratum_types::StratumError;

// ─── Constant Tests ───────────────────────────────────────────

#[test]
fn default_margins_are_nested() {
    assert!(DEFAULT_INNER_ETA > 0.0);
    assert!(DEFAULT_OUTER_ETA > DEFAULT_INNER_ETA);
}

#[test]
fn escalation_batch_is_five() {
    assert_eq!(LAYERS_PER_ESCALATION, 5);
    assert!(LAYER_DT_FUDGE > 0.0 && LAYER_DT_FUDGE < 1e-2);
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn error_display() {
    let err = StratumError::InvalidMesh("face 3 references vertex 99".into());
    assert!(err.to_string().contains("vertex 99"));
}

#[test]
fn causality_violation_display() {
    let err = StratumError::CausalityViolation {
        fire_time: 0.25,
        earliest: 0.5,
    };
    let msg = err.to_string();
    assert!(msg.contains("2.500000e-1"));
    assert!(msg.contains("5.000000e-1"));
}

#[test]
fn fatal_classification() {
    assert!(StratumError::CausalityViolation { fire_time: 0.0, earliest: 1.0 }.is_fatal());
    assert!(StratumError::EarliestTimeRegression { new_time: 0.1, previous: 0.2 }.is_fatal());
    assert!(!StratumError::NotConverged { iterations: 8 }.is_fatal());
    assert!(!StratumError::InvalidConfig("x".into()).is_fatal());
}

#[test]
fn io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
    let err: StratumError = io.into();
    assert!(err.to_string().contains("missing.toml"));
}
