//! Refresh command - one full cycle, then the status report on stdout

use crate::domain::KeyOutcome;
use crate::infrastructure::logging::init_logging;

pub async fn run() -> anyhow::Result<()> {
    let config = super::load_config()?;
    init_logging(&config.logging);

    let services = crate::create_services(&config)?;
    let cycle = services.refresher.run_full_cycle().await;
    let status = services.dashboard.status().await;

    println!("{}", serde_json::to_string_pretty(&status)?);

    if cycle.count(KeyOutcome::Success) == 0 {
        tracing::warn!("No upstream answered during the refresh cycle");
    }

    Ok(())
}
