use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use kisan_audit::audit::{audit_router, AuditService, GradientTransmitter};
use kisan_audit::settings::{settings_router, KeyValueStore, SettingsSync};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_service_routes<T, S>(
    audits: Arc<AuditService<T>>,
    settings: Arc<SettingsSync<S>>,
) -> axum::Router
where
    T: GradientTransmitter + 'static,
    S: KeyValueStore + 'static,
{
    audit_router(audits)
        .merge(settings_router(settings))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use kisan_audit::audit::{LocalAuditEngine, LoggingTransmitter};
    use kisan_audit::settings::MemoryStore;
    use tower::ServiceExt;

    fn router() -> axum::Router {
        let audits = Arc::new(AuditService::new(
            LocalAuditEngine::default(),
            Arc::new(LoggingTransmitter),
        ));
        let settings = Arc::new(SettingsSync::open(Arc::new(MemoryStore::new())));
        with_service_routes(audits, settings)
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn merged_router_serves_audit_and_settings() {
        let response = router()
            .oneshot(
                Request::get("/api/v1/settings")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router()
            .oneshot(
                Request::post("/api/v1/audit/local")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"income\": 1000}"))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
