use axum::{extract::FromRequestParts, http::header};
use uuid::Uuid;

use crate::{error::AppError, session::Session, state::AppState};

/// Extractor resolving the bearer credential to an admin session. When the
/// session has not been validated recently, the stored backend token is
/// probed against the backend before the request proceeds.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Session);

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::BadRequest("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid Authorization header".into()))?;

        if !auth_str.starts_with("Bearer ") {
            return Err(AppError::BadRequest("Invalid Authorization scheme".into()));
        }
        let token = auth_str.trim_start_matches("Bearer ").trim();

        let id = Uuid::parse_str(token)
            .map_err(|_| AppError::Unauthorized("Unknown session".into()))?;
        let session = state
            .sessions
            .resolve(id)
            .await
            .ok_or_else(|| AppError::Unauthorized("Session expired or unknown".into()))?;

        if state.sessions.needs_revalidation(&session) {
            match state.client.get_statistics(&session.backend_token).await {
                Ok(_) => state.sessions.mark_validated(id).await,
                Err(AppError::Unauthorized(_)) => {
                    state.sessions.remove(id).await;
                    return Err(AppError::Unauthorized(
                        "Session rejected by backend".into(),
                    ));
                }
                // Backend unreachable: let the request itself surface it.
                Err(err) => {
                    tracing::debug!(error = %err, "session revalidation probe failed");
                }
            }
        }

        Ok(AdminSession(session))
    }
}
