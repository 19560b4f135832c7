pub mod client;
pub mod config;
pub mod dto;
pub mod error;
pub mod guard;
pub mod middleware;
pub mod models;
pub mod poller;
pub mod response;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
