use super::common::*;
use crate::audit::rules::{EWS_INCOME_FACTOR, HIGH_INCOME_FACTOR};
use crate::audit::{AuditInput, AuditRubric, LocalAuditEngine, LoggingTransmitter};
use crate::audit::{GradientTransmitter, TransmissionStatus};
use serde_json::json;

const SMALL_FARMER_FACTOR: &str = "Landholding below 5 acres (Small Farmer criteria)";

#[test]
fn high_income_and_large_holding_is_ineligible() {
    let engine = engine();

    for (income, land_size) in [(250_000.0, 5.0), (1_200_000.0, 40.0), (250_000.5, 5.01)] {
        let result = engine.evaluate_at(&AuditInput::new(income, land_size), evaluated_at());

        assert_eq!(result.risk_score.value(), 0.45);
        assert!(!result.is_eligible);
        assert_eq!(result.factors, vec![HIGH_INCOME_FACTOR.to_string()]);
    }
}

#[test]
fn low_income_small_farmer_is_eligible_with_ordered_factors() {
    let engine = engine();

    for (income, land_size) in [(0.0, 0.0), (249_999.0, 4.99), (120_000.0, 2.0)] {
        let result = engine.evaluate_at(&AuditInput::new(income, land_size), evaluated_at());

        assert_eq!(result.risk_score.value(), 0.95);
        assert!(result.is_eligible);
        assert_eq!(
            result.factors,
            vec![
                EWS_INCOME_FACTOR.to_string(),
                SMALL_FARMER_FACTOR.to_string()
            ]
        );
    }
}

#[test]
fn high_income_small_farmer_keeps_both_factors() {
    let result = engine().evaluate_at(&AuditInput::new(300_000.0, 3.0), evaluated_at());

    assert_eq!(result.risk_score.value(), 0.65);
    assert!(result.is_eligible);
    assert_eq!(
        result.factors,
        vec![
            HIGH_INCOME_FACTOR.to_string(),
            SMALL_FARMER_FACTOR.to_string()
        ]
    );
}

#[test]
fn large_holding_penalty_records_no_factor() {
    let result = engine().evaluate_at(&AuditInput::new(100_000.0, 12.0), evaluated_at());

    assert_eq!(result.risk_score.value(), 0.75);
    assert!(result.is_eligible);
    assert_eq!(result.factors, vec![EWS_INCOME_FACTOR.to_string()]);
}

#[test]
fn missing_attributes_are_scored_as_zero() {
    let result = engine().evaluate_at(&AuditInput::default(), evaluated_at());
    let explicit = engine().evaluate_at(&AuditInput::new(0.0, 0.0), evaluated_at());

    assert_eq!(result, explicit);
}

#[test]
fn numeric_string_income_is_scored_as_its_value() {
    let input = AuditInput::from_attributes(&json!({ "income": "900000", "landSize": 3 }));

    let result = engine().evaluate_at(&input, evaluated_at());

    assert_eq!(result.risk_score.value(), 0.65);
    assert_eq!(
        result.factors,
        vec![
            HIGH_INCOME_FACTOR.to_string(),
            SMALL_FARMER_FACTOR.to_string()
        ]
    );
}

#[test]
fn unbounded_income_and_holding_exceed_every_ceiling() {
    let result = engine().evaluate_at(
        &AuditInput::new(f64::INFINITY, f64::INFINITY),
        evaluated_at(),
    );

    assert_eq!(result.risk_score.value(), 0.45);
    assert!(!result.is_eligible);
    assert_eq!(result.factors, vec![HIGH_INCOME_FACTOR.to_string()]);
}

#[test]
fn rubric_weights_round_to_hundredths() {
    let engine = LocalAuditEngine::new(AuditRubric {
        income_penalty: 0.125,
        ..AuditRubric::default()
    });

    let result = engine.evaluate_at(&AuditInput::new(400_000.0, 1.0), evaluated_at());

    assert_eq!(result.risk_score.value(), 0.82);
}

#[test]
fn score_never_drops_below_floor() {
    let engine = LocalAuditEngine::new(AuditRubric {
        income_penalty: 0.7,
        land_penalty: 0.6,
        ..AuditRubric::default()
    });

    let result = engine.evaluate_at(&AuditInput::new(900_000.0, 20.0), evaluated_at());

    assert_eq!(result.risk_score.value(), 0.1);
    assert!(!result.is_eligible);
}

#[test]
fn eligibility_threshold_is_strict() {
    let engine = LocalAuditEngine::new(AuditRubric {
        base_score: 0.8,
        ..AuditRubric::default()
    });

    let result = engine.evaluate_at(&AuditInput::new(260_000.0, 1.0), evaluated_at());

    assert_eq!(result.risk_score.value(), 0.5);
    assert!(!result.is_eligible);
}

#[test]
fn result_carries_evaluation_timestamp() {
    let result = engine().evaluate_at(&AuditInput::new(10.0, 1.0), evaluated_at());
    assert_eq!(result.local_timestamp, evaluated_at());
}

#[test]
fn summary_lists_factors() {
    let result = engine().evaluate_at(&AuditInput::new(300_000.0, 3.0), evaluated_at());
    let summary = result.summary();

    assert!(summary.starts_with("eligible (risk score 0.65)"));
    assert!(summary.contains(HIGH_INCOME_FACTOR));
}

#[test]
fn logging_transmitter_always_queues() {
    let receipt = LoggingTransmitter.transmit("audit-42");

    assert_eq!(receipt.audit_id, "audit-42");
    assert_eq!(receipt.status, TransmissionStatus::Queued);
}
