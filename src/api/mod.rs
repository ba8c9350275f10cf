//! HTTP API layer

pub mod handlers;
pub mod health;
pub mod middleware;
mod router;
pub mod state;
pub mod types;

pub use router::create_router;
pub use state::AppState;
