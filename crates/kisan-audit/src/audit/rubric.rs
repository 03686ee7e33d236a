use serde::{Deserialize, Serialize};

/// Thresholds and weights applied by the local audit.
///
/// Score fields (`base_score`, both penalties, `score_floor`, `eligibility_threshold`) are
/// rounded to the nearest hundredth before use, so `0.125` applies as `0.13`. The income and
/// land ceilings are compared as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRubric {
    pub base_score: f64,
    pub ews_income_ceiling: f64,
    pub income_penalty: f64,
    pub small_farmer_land_ceiling: f64,
    pub land_penalty: f64,
    pub score_floor: f64,
    pub eligibility_threshold: f64,
}

impl Default for AuditRubric {
    fn default() -> Self {
        Self {
            base_score: 0.95,
            ews_income_ceiling: 250_000.0,
            income_penalty: 0.3,
            small_farmer_land_ceiling: 5.0,
            land_penalty: 0.2,
            score_floor: 0.1,
            eligibility_threshold: 0.5,
        }
    }
}
