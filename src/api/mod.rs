//! HTTP surface: middleware, route handlers and shared state

pub mod middleware;
pub mod services;
pub mod state;

pub use state::AppState;
