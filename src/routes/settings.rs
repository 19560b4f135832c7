use axum::{
    Json, Router,
    extract::State,
    routing::{get, put},
};

use crate::{
    error::AppResult,
    middleware::auth::AdminSession,
    models::BotSettings,
    response::ApiResponse,
    services::settings_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_settings))
        .route("/", put(save_settings))
}

#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Bot settings", body = ApiResponse<BotSettings>)
    ),
    tag = "Settings"
)]
pub async fn get_settings(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
) -> AppResult<Json<ApiResponse<BotSettings>>> {
    let resp = settings_service::get_settings(&state, &session).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = BotSettings,
    responses(
        (status = 200, description = "Settings overwritten", body = ApiResponse<BotSettings>),
        (status = 409, description = "Save already in flight"),
    ),
    tag = "Settings"
)]
pub async fn save_settings(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Json(payload): Json<BotSettings>,
) -> AppResult<Json<ApiResponse<BotSettings>>> {
    let resp = settings_service::save_settings(&state, &session, payload).await?;
    Ok(Json(resp))
}
