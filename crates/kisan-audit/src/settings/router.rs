use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use super::domain::{AppSettings, SettingsPatch};
use super::store::KeyValueStore;
use super::sync::SettingsSync;
use crate::error::AppError;

/// Router builder exposing the synchronized device settings.
pub fn settings_router<S>(sync: Arc<SettingsSync<S>>) -> Router
where
    S: KeyValueStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/settings",
            get(current_handler::<S>).patch(update_handler::<S>),
        )
        .route("/api/v1/settings/reset", post(reset_handler::<S>))
        .with_state(sync)
}

pub(crate) async fn current_handler<S>(State(sync): State<Arc<SettingsSync<S>>>) -> Response
where
    S: KeyValueStore + 'static,
{
    (StatusCode::OK, axum::Json(sync.current())).into_response()
}

pub(crate) async fn update_handler<S>(
    State(sync): State<Arc<SettingsSync<S>>>,
    axum::Json(patch): axum::Json<SettingsPatch>,
) -> Result<axum::Json<AppSettings>, AppError>
where
    S: KeyValueStore + 'static,
{
    let settings = sync.update(patch)?;
    Ok(axum::Json(settings))
}

pub(crate) async fn reset_handler<S>(
    State(sync): State<Arc<SettingsSync<S>>>,
) -> Result<axum::Json<AppSettings>, AppError>
where
    S: KeyValueStore + 'static,
{
    let settings = sync.reset()?;
    Ok(axum::Json(settings))
}
