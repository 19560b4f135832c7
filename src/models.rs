use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// DTOs mirror the storefront backend wire format. They are consumed as-is:
// no normalization beyond defaulting fields the backend may omit.

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
    #[serde(default)]
    pub total_orders: i64,
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default)]
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: String,
    pub user_name: String,
    pub user_telegram_id: i64,
    pub product_type: String,
    pub quantity: i64,
    pub price: f64,
    pub currency_display: String,
    pub payment_method: String,
    pub payment_proof: Option<String>,
    // Raw backend value; "pending", "confirmed", "completed" and "cancelled"
    // are the known states but the dashboard never rejects others.
    pub status: String,
    pub admin_notes: Option<String>,
    pub transaction_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub price_usd: f64,
    pub price_syp: f64,
    pub is_active: bool,
}

/// Singleton bot configuration record; saved as a full overwrite.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BotSettings {
    pub bot_token: Option<String>,
    pub admin_telegram_id: Option<i64>,
    pub welcome_message: Option<String>,
    pub support_phone: Option<String>,
    pub support_email: Option<String>,
    pub support_whatsapp: Option<String>,
}

/// Server-computed aggregate; every field defaults so a partial payload
/// still renders as zeros.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Statistics {
    #[serde(default)]
    pub total_users: i64,
    #[serde(default)]
    pub total_orders: i64,
    #[serde(default)]
    pub pending_orders: i64,
    #[serde(default)]
    pub confirmed_orders: i64,
    #[serde(default)]
    pub completed_orders: i64,
    #[serde(default)]
    pub cancelled_orders: i64,
    #[serde(default)]
    pub total_revenue_usd: f64,
    #[serde(default)]
    pub total_revenue_syp: f64,
    #[serde(default)]
    pub today_orders: i64,
    #[serde(default)]
    pub today_revenue_usd: f64,
    #[serde(default)]
    pub today_revenue_syp: f64,
}
