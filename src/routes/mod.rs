use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod dashboard;
pub mod doc;
pub mod health;
pub mod orders;
pub mod params;
pub mod products;
pub mod settings;
pub mod users;

// Build the API router without binding state; it is provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/dashboard", dashboard::router())
        .nest("/orders", orders::router())
        .nest("/products", products::router())
        .nest("/settings", settings::router())
        .nest("/users", users::router())
}
