use crate::{
    dto::auth::{LoginRequest, RegisterRequest, SessionToken},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    session::Session,
    state::AppState,
};

/// Forward credentials to the backend; on success mint an opaque session id
/// holding the backend token. A rejected login maps to a single invalid-
/// credentials message, but an unreachable or failing backend does not.
pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<ApiResponse<SessionToken>> {
    let username = payload.username.clone();
    let token = match state.client.login(&payload).await {
        Ok(token) => token,
        Err(AppError::Unauthorized(_)) | Err(AppError::Upstream { status: 400, .. }) => {
            return Err(AppError::Unauthorized("Invalid username or password".into()));
        }
        Err(err) => return Err(err),
    };

    let session = state.sessions.insert(token.access_token, username).await;
    tracing::info!(admin = %session.username, "admin logged in");

    Ok(ApiResponse::success(
        "Logged in",
        SessionToken {
            access_token: session.id.to_string(),
        },
        Some(Meta::empty()),
    ))
}

pub async fn register(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let created = state.client.register(&payload).await?;
    tracing::info!(admin = %payload.username, "admin account registered");
    Ok(ApiResponse::success(
        "Admin registered",
        created,
        Some(Meta::empty()),
    ))
}

pub async fn logout(
    state: &AppState,
    session: Session,
) -> AppResult<ApiResponse<serde_json::Value>> {
    state.sessions.remove(session.id).await;
    state
        .stats
        .drop_credential_if(&session.backend_token)
        .await;
    tracing::info!(admin = %session.username, "admin logged out");
    Ok(ApiResponse::success(
        "Logged out",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
