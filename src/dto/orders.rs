use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Order;

/// Admin actions on an order. The UI renders them per current status:
/// pending offers confirm/cancel, confirmed offers complete, terminal
/// states offer nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderAction {
    Confirm,
    Cancel,
    Complete,
}

impl OrderAction {
    pub fn target_status(self) -> &'static str {
        match self {
            OrderAction::Confirm => "confirmed",
            OrderAction::Cancel => "cancelled",
            OrderAction::Complete => "completed",
        }
    }

    /// The fixed note recorded when the admin does not supply one.
    pub fn default_note(self) -> &'static str {
        match self {
            OrderAction::Confirm => "تم تأكيد الطلب",
            OrderAction::Cancel => "تم إلغاء الطلب",
            OrderAction::Complete => "تم إكمال الطلب وتسليم المنتج",
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderActionRequest {
    pub action: OrderAction,
    pub note: Option<String>,
}

/// Wire payload of the backend `PATCH /orders/{id}` call.
#[derive(Debug, Serialize)]
pub struct OrderPatch {
    pub status: String,
    pub admin_notes: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetail {
    pub order: Order,
    /// Actions available for the order's current status.
    pub actions: Vec<OrderAction>,
}
