use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, post},
};

use crate::{
    dto::products::{CreateProductRequest, ProductList, ProductPatch},
    error::AppResult,
    middleware::auth::AdminSession,
    response::ApiResponse,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/", post(create_product))
        .route("/{id}", patch(update_product))
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Products", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state, &session).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Product created, refetched list", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::create_product(&state, &session, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = ProductPatch,
    responses(
        (status = 200, description = "Product updated, refetched list", body = ApiResponse<ProductList>),
        (status = 409, description = "Update already in flight for this product"),
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<ProductPatch>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::update_product(&state, &session, &id, payload).await?;
    Ok(Json(resp))
}
