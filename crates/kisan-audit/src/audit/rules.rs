use super::domain::{AuditInput, RiskScore};
use super::rubric::AuditRubric;

pub(crate) const EWS_INCOME_FACTOR: &str = "Income within Economically Weaker Section (EWS) bounds";
pub(crate) const HIGH_INCOME_FACTOR: &str = "Income exceeds primary subsidy brackets";

pub(crate) struct ScoreSignals {
    pub risk_score: RiskScore,
    pub factors: Vec<String>,
}

pub(crate) fn score_input(input: &AuditInput, rubric: &AuditRubric) -> ScoreSignals {
    let income = input.income_or_default();
    let land_size = input.land_size_or_default();

    let mut risk_score = RiskScore::from_decimal(rubric.base_score);
    let mut factors = Vec::new();

    if income < rubric.ews_income_ceiling {
        factors.push(EWS_INCOME_FACTOR.to_string());
    } else {
        risk_score = risk_score.penalize(RiskScore::from_decimal(rubric.income_penalty));
        factors.push(HIGH_INCOME_FACTOR.to_string());
    }

    // Larger holdings are penalized without a recorded factor.
    if land_size < rubric.small_farmer_land_ceiling {
        factors.push(small_farmer_factor(rubric.small_farmer_land_ceiling));
    } else {
        risk_score = risk_score.penalize(RiskScore::from_decimal(rubric.land_penalty));
    }

    ScoreSignals {
        risk_score: risk_score.at_least(RiskScore::from_decimal(rubric.score_floor)),
        factors,
    }
}

pub(crate) fn is_eligible(risk_score: RiskScore, rubric: &AuditRubric) -> bool {
    risk_score > RiskScore::from_decimal(rubric.eligibility_threshold)
}

fn small_farmer_factor(ceiling: f64) -> String {
    format!("Landholding below {ceiling} acres (Small Farmer criteria)")
}
