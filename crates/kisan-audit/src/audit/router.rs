use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::{json, Value};

use super::domain::AuditInput;
use super::transmit::GradientTransmitter;
use super::AuditService;

/// Router builder exposing the local audit and the simulated gradient hand-off.
pub fn audit_router<T>(service: Arc<AuditService<T>>) -> Router
where
    T: GradientTransmitter + 'static,
{
    Router::new()
        .route("/api/v1/audit/local", post(local_audit_handler::<T>))
        .route(
            "/api/v1/audit/:audit_id/transmit",
            post(transmit_handler::<T>),
        )
        .with_state(service)
}

pub(crate) async fn local_audit_handler<T>(
    State(service): State<Arc<AuditService<T>>>,
    axum::Json(attributes): axum::Json<Value>,
) -> Response
where
    T: GradientTransmitter + 'static,
{
    if !attributes.is_object() {
        let payload = json!({
            "error": "audit input must be a JSON object",
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    let invalid = AuditInput::invalid_attributes(&attributes);
    if !invalid.is_empty() {
        let payload = json!({
            "error": format!("audit attributes must be numeric: {}", invalid.join(", ")),
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    let input = AuditInput::from_attributes(&attributes);
    let result = service.run(&input);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn transmit_handler<T>(
    State(service): State<Arc<AuditService<T>>>,
    Path(audit_id): Path<String>,
) -> Response
where
    T: GradientTransmitter + 'static,
{
    let receipt = service.transmit(&audit_id);
    (StatusCode::ACCEPTED, axum::Json(receipt)).into_response()
}
