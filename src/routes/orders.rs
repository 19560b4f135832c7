use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};

use crate::{
    dto::orders::{OrderActionRequest, OrderDetail, OrderList},
    error::AppResult,
    middleware::auth::AdminSession,
    response::ApiResponse,
    routes::params::OrderListQuery,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders))
        .route("/{id}", get(get_order))
        .route("/{id}", patch(apply_action))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    params(
        ("status" = Option<String>, Query, description = "Exact status filter; 'all' or absent keeps everything"),
        ("search" = Option<String>, Query, description = "Substring match on user name, transaction code or order id"),
    ),
    responses(
        (status = 200, description = "Filtered orders", body = ApiResponse<OrderList>)
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders(&state, &session, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order with available actions", body = ApiResponse<OrderDetail>),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp = order_service::get_order(&state, &session, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    request_body = OrderActionRequest,
    responses(
        (status = 200, description = "Order updated, refetched list", body = ApiResponse<OrderList>),
        (status = 409, description = "Update already in flight for this order"),
    ),
    tag = "Orders"
)]
pub async fn apply_action(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(id): Path<String>,
    Json(payload): Json<OrderActionRequest>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::apply_action(&state, &session, &id, payload).await?;
    Ok(Json(resp))
}
