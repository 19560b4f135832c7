use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};

use crate::{
    dto::users::UserDirectory,
    error::AppResult,
    middleware::auth::AdminSession,
    models::User,
    response::ApiResponse,
    routes::params::UserListQuery,
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/{id}", get(get_user))
        .route("/{id}/block", patch(toggle_block))
}

#[utoipa::path(
    get,
    path = "/api/users",
    params(
        ("search" = Option<String>, Query, description = "Substring match on first name, username or telegram id"),
    ),
    responses(
        (status = 200, description = "User directory with aggregate summary", body = ApiResponse<UserDirectory>)
    ),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Query(query): Query<UserListQuery>,
) -> AppResult<Json<ApiResponse<UserDirectory>>> {
    let resp = user_service::list_users(&state, &session, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User", body = ApiResponse<User>),
        (status = 404, description = "User not found"),
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::get_user(&state, &session, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/users/{id}/block",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Block flag toggled, refetched directory", body = ApiResponse<UserDirectory>),
        (status = 409, description = "Update already in flight for this user"),
    ),
    tag = "Users"
)]
pub async fn toggle_block(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<UserDirectory>>> {
    let resp = user_service::toggle_block(&state, &session, &id).await?;
    Ok(Json(resp))
}
