use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    models::{Order, Statistics},
    poller::Snapshot,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardView {
    pub statistics: Statistics,
    pub recent_orders: Vec<Order>,
    pub refreshed_at: DateTime<Utc>,
}

impl From<Snapshot> for DashboardView {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            statistics: snapshot.statistics,
            recent_orders: snapshot.recent_orders,
            refreshed_at: snapshot.refreshed_at,
        }
    }
}
