use serde::Serialize;
use utoipa::ToSchema;

use crate::models::User;

/// Aggregate over the fetched user set. Always computed from the unfiltered
/// list, so the cards do not change while the admin types in the search box.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserSummary {
    pub total_users: i64,
    pub total_orders: i64,
    pub total_spent: f64,
    /// `total_spent` rendered to two decimals with a `$` prefix.
    pub total_spent_display: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserDirectory {
    pub items: Vec<User>,
    pub summary: UserSummary,
}
