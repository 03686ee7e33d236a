use crate::cli::ServeArgs;
use crate::infra::{AppState, DeviceStore};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use kisan_audit::audit::{AuditService, LocalAuditEngine, LoggingTransmitter};
use kisan_audit::config::AppConfig;
use kisan_audit::error::AppError;
use kisan_audit::settings::{SettingsSync, SETTINGS_UPDATED_EVENT};
use kisan_audit::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = DeviceStore::from_config(&config.storage);
    let backend = store.describe();
    let settings = Arc::new(SettingsSync::open(Arc::new(store)));
    let observer = Arc::downgrade(&settings);
    settings.subscribe(move || {
        if let Some(settings) = observer.upgrade() {
            let current = settings.load();
            info!(
                event = SETTINGS_UPDATED_EVENT,
                language = %current.language,
                voice_enabled = current.voice_enabled,
                notifications = current.notifications,
                auto_translate = current.auto_translate,
                "device settings changed"
            );
        }
    });

    let audits = Arc::new(AuditService::new(
        LocalAuditEngine::default(),
        Arc::new(LoggingTransmitter),
    ));

    let app = with_service_routes(audits, settings)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, settings_backend = %backend, "kisan audit service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
