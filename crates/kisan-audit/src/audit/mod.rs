//! Local eligibility audit run entirely in-process.
//!
//! The scoring is a deterministic rule set standing in for on-device inference; nothing leaves
//! the process except the simulated gradient hand-off in [`transmit`].

pub mod domain;
mod rubric;
pub mod router;
mod rules;
pub mod transmit;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

pub use domain::{AuditInput, AuditResult, RiskScore};
pub use router::audit_router;
pub use rubric::AuditRubric;
pub use transmit::{GradientTransmitter, LoggingTransmitter, TransmissionReceipt, TransmissionStatus};

/// Stateless evaluator that applies the rubric to applicant attributes.
#[derive(Debug, Clone, Default)]
pub struct LocalAuditEngine {
    rubric: AuditRubric,
}

impl LocalAuditEngine {
    pub fn new(rubric: AuditRubric) -> Self {
        Self { rubric }
    }

    pub fn rubric(&self) -> &AuditRubric {
        &self.rubric
    }

    /// Score the input and stamp the result with the current time.
    pub fn evaluate(&self, input: &AuditInput) -> AuditResult {
        self.evaluate_at(input, Utc::now())
    }

    pub fn evaluate_at(&self, input: &AuditInput, evaluated_at: DateTime<Utc>) -> AuditResult {
        info!(
            income = input.income_or_default(),
            land_size = input.land_size_or_default(),
            "running simulated on-device eligibility audit"
        );

        let signals = rules::score_input(input, &self.rubric);
        let is_eligible = rules::is_eligible(signals.risk_score, &self.rubric);

        debug!(
            risk_score = %signals.risk_score,
            is_eligible,
            factors = signals.factors.len(),
            "local audit complete"
        );

        AuditResult {
            risk_score: signals.risk_score,
            factors: signals.factors,
            is_eligible,
            local_timestamp: evaluated_at,
        }
    }
}

/// Pairs the audit engine with the outbound gradient hook for the HTTP surface.
pub struct AuditService<T> {
    engine: LocalAuditEngine,
    transmitter: Arc<T>,
}

impl<T> AuditService<T>
where
    T: GradientTransmitter + 'static,
{
    pub fn new(engine: LocalAuditEngine, transmitter: Arc<T>) -> Self {
        Self {
            engine,
            transmitter,
        }
    }

    pub fn engine(&self) -> &LocalAuditEngine {
        &self.engine
    }

    pub fn run(&self, input: &AuditInput) -> AuditResult {
        self.engine.evaluate(input)
    }

    pub fn transmit(&self, audit_id: &str) -> TransmissionReceipt {
        self.transmitter.transmit(audit_id)
    }
}
