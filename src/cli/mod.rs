//! CLI module for the rural info gateway
//!
//! - `serve`: warm the cache, start the refresher and the HTTP server
//! - `refresh`: run one refresh cycle and print the cache status

pub mod refresh;
pub mod serve;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;

/// Rural info gateway - cached news, prices, weather and facilities for rural towns
#[derive(Parser)]
#[command(name = "rural-info-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server with the background refresher
    Serve,

    /// Refresh every tracked key once and print the cache status as JSON
    Refresh,
}

/// `.env` first, then the config layers
fn load_config() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();
    AppConfig::load().context("Failed to load configuration")
}
