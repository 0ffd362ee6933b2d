pub mod actions;
pub mod auth;
pub mod cookies;
pub mod lists;
pub mod middleware;
pub mod pages;
pub mod responses;
pub mod rest;
pub mod router;
pub mod state;
pub mod support;
pub mod uploads;
pub mod views;

// Re-export the router builder so the binary and the tests can reach it directly.
pub use router::build_router;
pub use state::{AppState, SessionStore, ViewStore};
