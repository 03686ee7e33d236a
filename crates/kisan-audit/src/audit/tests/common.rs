use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::audit::transmit::{GradientTransmitter, TransmissionReceipt, TransmissionStatus};
use crate::audit::{AuditRubric, AuditService, LocalAuditEngine};

pub(super) fn evaluated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn engine() -> LocalAuditEngine {
    LocalAuditEngine::new(AuditRubric::default())
}

#[derive(Default)]
pub(super) struct RecordingTransmitter {
    sent: Mutex<Vec<String>>,
}

impl RecordingTransmitter {
    pub(super) fn sent(&self) -> Vec<String> {
        self.sent.lock().expect("transmitter mutex poisoned").clone()
    }
}

impl GradientTransmitter for RecordingTransmitter {
    fn transmit(&self, audit_id: &str) -> TransmissionReceipt {
        self.sent
            .lock()
            .expect("transmitter mutex poisoned")
            .push(audit_id.to_string());
        TransmissionReceipt {
            audit_id: audit_id.to_string(),
            status: TransmissionStatus::Queued,
        }
    }
}

pub(super) fn build_service() -> (
    Arc<AuditService<RecordingTransmitter>>,
    Arc<RecordingTransmitter>,
) {
    let transmitter = Arc::new(RecordingTransmitter::default());
    let service = Arc::new(AuditService::new(engine(), transmitter.clone()));
    (service, transmitter)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
