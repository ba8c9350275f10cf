//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::assistant::AssistantService;
use crate::infrastructure::services::DashboardService;

/// Shared by every handler; cloning is cheap
#[derive(Debug, Clone)]
pub struct AppState {
    pub dashboard: Arc<DashboardService>,
    pub assistant: Arc<AssistantService>,
}

impl AppState {
    pub fn new(dashboard: Arc<DashboardService>, assistant: AssistantService) -> Self {
        Self {
            dashboard,
            assistant: Arc::new(assistant),
        }
    }
}
