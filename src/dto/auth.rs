use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub telegram_id: i64,
}

/// What the storefront backend returns from `/auth/login`.
#[derive(Debug, Deserialize)]
pub struct BackendToken {
    pub access_token: String,
}

/// What the dashboard returns: an opaque session id under the same wire
/// field the SPA already persists.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionToken {
    pub access_token: String,
}
