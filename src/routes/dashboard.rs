use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::dashboard::DashboardView,
    error::AppResult,
    middleware::auth::AdminSession,
    response::ApiResponse,
    services::dashboard_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Statistics snapshot with recent orders", body = ApiResponse<DashboardView>)
    ),
    tag = "Dashboard"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
) -> AppResult<Json<ApiResponse<DashboardView>>> {
    let resp = dashboard_service::dashboard_view(&state, &session).await?;
    Ok(Json(resp))
}
