use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderListQuery {
    /// Exact status to keep; "all", empty or absent keeps everything.
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UserListQuery {
    pub search: Option<String>,
}
