use crate::{
    error::AppResult,
    models::BotSettings,
    response::{ApiResponse, Meta},
    session::Session,
    state::AppState,
};

pub async fn get_settings(
    state: &AppState,
    session: &Session,
) -> AppResult<ApiResponse<BotSettings>> {
    let settings = state.client.get_settings(&session.backend_token).await?;
    Ok(ApiResponse::success("Settings", settings, None))
}

/// Full overwrite of the singleton record, then a refetch. Field formats
/// (phone, email, ids) pass through unvalidated.
pub async fn save_settings(
    state: &AppState,
    session: &Session,
    payload: BotSettings,
) -> AppResult<ApiResponse<BotSettings>> {
    let _permit = state.guard.begin("settings")?;

    state
        .client
        .put_settings(&session.backend_token, &payload)
        .await?;
    tracing::info!(admin = %session.username, "bot settings saved");

    let settings = state.client.get_settings(&session.backend_token).await?;
    Ok(ApiResponse::success(
        "Settings saved",
        settings,
        Some(Meta::empty()),
    ))
}
