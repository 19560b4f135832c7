// Settings has no view model of its own; the page reads and overwrites
// `models::BotSettings` directly.
pub mod auth;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod users;
