//! Infrastructure layer - External service implementations

pub mod assistant;
pub mod cache;
pub mod http;
pub mod logging;
pub mod observability;
pub mod services;
pub mod sources;
