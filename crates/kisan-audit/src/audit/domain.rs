use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Applicant attributes consulted by the local audit.
///
/// Both attributes are optional; an absent value is scored as zero. Use
/// [`AuditInput::from_attributes`] to read an arbitrary attribute bag where only `income` and
/// `landSize` matter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land_size: Option<f64>,
}

impl AuditInput {
    pub fn new(income: f64, land_size: f64) -> Self {
        Self {
            income: Some(income),
            land_size: Some(land_size),
        }
    }

    /// Pull the scored attributes out of a loosely typed payload.
    ///
    /// JSON numbers and numeric strings such as `"300000"` are read as values. Nulls and
    /// missing keys count as absent; see [`AuditInput::invalid_attributes`] for the rest.
    pub fn from_attributes(attributes: &Value) -> Self {
        Self {
            income: attributes.get(INCOME_KEY).and_then(numeric_attribute),
            land_size: attributes.get(LAND_SIZE_KEY).and_then(numeric_attribute),
        }
    }

    /// Scored attributes that are present but cannot be read as a number.
    pub fn invalid_attributes(attributes: &Value) -> Vec<&'static str> {
        [INCOME_KEY, LAND_SIZE_KEY]
            .into_iter()
            .filter(|key| match attributes.get(*key) {
                None | Some(Value::Null) => false,
                Some(value) => numeric_attribute(value).is_none(),
            })
            .collect()
    }

    /// Annual household income, zero when absent or NaN.
    pub fn income_or_default(&self) -> f64 {
        number_or_zero(self.income)
    }

    /// Landholding in acres, zero when absent or NaN.
    pub fn land_size_or_default(&self) -> f64 {
        number_or_zero(self.land_size)
    }
}

const INCOME_KEY: &str = "income";
const LAND_SIZE_KEY: &str = "landSize";

fn numeric_attribute(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok().filter(|value| !value.is_nan()),
        _ => None,
    }
}

// Infinities stay as given so an unbounded income still lands above every ceiling.
fn number_or_zero(value: Option<f64>) -> f64 {
    value.filter(|value| !value.is_nan()).unwrap_or(0.0)
}

/// Heuristic eligibility confidence stored in hundredths so rule arithmetic stays exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RiskScore(i32);

impl RiskScore {
    pub const fn from_hundredths(hundredths: i32) -> Self {
        Self(hundredths)
    }

    /// Round a decimal score such as `0.95` to the nearest hundredth.
    pub fn from_decimal(value: f64) -> Self {
        Self((value * 100.0).round() as i32)
    }

    pub fn hundredths(self) -> i32 {
        self.0
    }

    pub fn value(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    pub(crate) fn penalize(self, penalty: RiskScore) -> Self {
        Self(self.0 - penalty.0)
    }

    pub(crate) fn at_least(self, floor: RiskScore) -> Self {
        Self(self.0.max(floor.0))
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value())
    }
}

impl Serialize for RiskScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

impl<'de> Deserialize<'de> for RiskScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(serde::de::Error::custom("risk score must be a finite number"));
        }
        Ok(Self::from_decimal(value))
    }
}

/// Outcome of a single local audit. Built fresh on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub risk_score: RiskScore,
    /// Human readable justifications in the order the rules fired.
    pub factors: Vec<String>,
    pub is_eligible: bool,
    pub local_timestamp: DateTime<Utc>,
}

impl AuditResult {
    pub fn summary(&self) -> String {
        let verdict = if self.is_eligible {
            "eligible"
        } else {
            "not eligible"
        };
        if self.factors.is_empty() {
            format!("{verdict} (risk score {})", self.risk_score)
        } else {
            format!(
                "{verdict} (risk score {}): {}",
                self.risk_score,
                self.factors.join("; ")
            )
        }
    }
}
