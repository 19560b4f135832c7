use crate::{
    dto::products::{CreateProductRequest, ProductList, ProductPatch},
    error::AppResult,
    response::{ApiResponse, Meta},
    session::Session,
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    session: &Session,
) -> AppResult<ApiResponse<ProductList>> {
    let items = state.client.list_products(&session.backend_token).await?;
    let meta = Meta::counts(items.len(), items.len());
    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn create_product(
    state: &AppState,
    session: &Session,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<ProductList>> {
    state
        .client
        .create_product(&session.backend_token, &payload)
        .await?;
    tracing::info!(admin = %session.username, product = %payload.name, "product created");

    let items = state.client.list_products(&session.backend_token).await?;
    let meta = Meta::counts(items.len(), items.len());
    Ok(ApiResponse::success(
        "Product created",
        ProductList { items },
        Some(meta),
    ))
}

/// Partial update (inline edit or activation toggle), then a full refetch.
/// No optimistic update: callers see the old list until the round trip
/// completes.
pub async fn update_product(
    state: &AppState,
    session: &Session,
    id: &str,
    patch: ProductPatch,
) -> AppResult<ApiResponse<ProductList>> {
    let _permit = state.guard.begin(format!("product:{id}"))?;

    state
        .client
        .update_product(&session.backend_token, id, &patch)
        .await?;
    tracing::info!(admin = %session.username, product_id = %id, "product updated");

    let items = state.client.list_products(&session.backend_token).await?;
    let meta = Meta::counts(items.len(), items.len());
    Ok(ApiResponse::success(
        "Product updated",
        ProductList { items },
        Some(meta),
    ))
}
