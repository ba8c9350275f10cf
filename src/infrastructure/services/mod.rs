//! Infrastructure services

pub(crate) mod dashboard_service;
mod refresher;

pub use dashboard_service::{DashboardService, EntryStatus};
pub use refresher::Refresher;
