use crate::{
    dto::orders::{OrderAction, OrderActionRequest, OrderDetail, OrderList, OrderPatch},
    error::AppResult,
    models::Order,
    response::{ApiResponse, Meta},
    routes::params::OrderListQuery,
    session::Session,
    state::AppState,
};

/// Client-side filter over the fetched set, preserving backend order.
/// A status of "all" (or none) means no status filter; the search matches
/// case-insensitively against user name, transaction code and order id.
pub fn filter_orders(orders: Vec<Order>, status: Option<&str>, search: Option<&str>) -> Vec<Order> {
    let status = status.filter(|s| !s.is_empty() && *s != "all");
    let needle = search.map(str::to_lowercase).filter(|s| !s.is_empty());

    orders
        .into_iter()
        .filter(|order| status.is_none_or(|wanted| order.status == wanted))
        .filter(|order| match &needle {
            Some(needle) => {
                order.user_name.to_lowercase().contains(needle)
                    || order.id.to_lowercase().contains(needle)
                    || order
                        .transaction_code
                        .as_deref()
                        .is_some_and(|code| code.to_lowercase().contains(needle))
            }
            None => true,
        })
        .collect()
}

/// Actions rendered for an order's current status. Terminal states, and
/// anything the backend may emit that we do not know, get none.
pub fn actions_for(status: &str) -> Vec<OrderAction> {
    match status {
        "pending" => vec![OrderAction::Confirm, OrderAction::Cancel],
        "confirmed" => vec![OrderAction::Complete],
        _ => Vec::new(),
    }
}

pub async fn list_orders(
    state: &AppState,
    session: &Session,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let orders = state.client.list_orders(&session.backend_token, None).await?;
    let total = orders.len();
    let items = filter_orders(orders, query.status.as_deref(), query.search.as_deref());
    let meta = Meta::counts(items.len(), total);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn get_order(
    state: &AppState,
    session: &Session,
    id: &str,
) -> AppResult<ApiResponse<OrderDetail>> {
    let order = state.client.get_order(&session.backend_token, id).await?;
    let actions = actions_for(&order.status);
    Ok(ApiResponse::success(
        "Order",
        OrderDetail { order, actions },
        None,
    ))
}

/// Apply an admin action: one backend PATCH with the target status and the
/// note (the action's fixed default unless overridden), then a full refetch.
/// The current status is not checked here; the backend owns the transition
/// rules.
pub async fn apply_action(
    state: &AppState,
    session: &Session,
    id: &str,
    payload: OrderActionRequest,
) -> AppResult<ApiResponse<OrderList>> {
    let _permit = state.guard.begin(format!("order:{id}"))?;

    let patch = OrderPatch {
        status: payload.action.target_status().to_string(),
        admin_notes: payload
            .note
            .unwrap_or_else(|| payload.action.default_note().to_string()),
    };
    state
        .client
        .update_order(&session.backend_token, id, &patch)
        .await?;
    tracing::info!(
        admin = %session.username,
        order_id = %id,
        status = %patch.status,
        "order status updated"
    );

    let items = state.client.list_orders(&session.backend_token, None).await?;
    let meta = Meta::counts(items.len(), items.len());
    Ok(ApiResponse::success("Order updated", OrderList { items }, Some(meta)))
}
