use serde::{Deserialize, Serialize};
use tracing::info;

/// Outbound hook for sharing locally computed model updates.
///
/// Implementations must not fail the caller; the audit flow treats transmission as
/// fire-and-forget.
pub trait GradientTransmitter: Send + Sync {
    fn transmit(&self, audit_id: &str) -> TransmissionReceipt;
}

/// Acknowledgement returned to callers once a transmission has been handed off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransmissionReceipt {
    pub audit_id: String,
    pub status: TransmissionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransmissionStatus {
    Queued,
}

/// Simulated transmitter that only records the hand-off in the logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingTransmitter;

impl GradientTransmitter for LoggingTransmitter {
    fn transmit(&self, audit_id: &str) -> TransmissionReceipt {
        info!(audit_id, "simulated federated gradient transmission queued");
        TransmissionReceipt {
            audit_id: audit_id.to_string(),
            status: TransmissionStatus::Queued,
        }
    }
}
