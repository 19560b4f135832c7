use crate::{
    dto::dashboard::DashboardView,
    error::AppResult,
    poller,
    response::{ApiResponse, Meta},
    session::Session,
    state::AppState,
};

/// Serve the dashboard: record the view (which arms the poller with this
/// session's backend token), return the cached snapshot when one exists,
/// and fetch the first one inline otherwise.
pub async fn dashboard_view(
    state: &AppState,
    session: &Session,
) -> AppResult<ApiResponse<DashboardView>> {
    state.stats.touch(&session.backend_token).await;

    if let Some(snapshot) = state.stats.snapshot().await {
        return Ok(ApiResponse::success(
            "Dashboard",
            DashboardView::from(snapshot),
            Some(Meta::empty()),
        ));
    }

    let snapshot = poller::refresh_snapshot(&state.client, &session.backend_token).await?;
    state.stats.store(snapshot.clone()).await;
    Ok(ApiResponse::success(
        "Dashboard",
        DashboardView::from(snapshot),
        Some(Meta::empty()),
    ))
}
