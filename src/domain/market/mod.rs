//! Market domain - price points and the deterministic simulator

mod price;
mod simulator;

pub use price::{PricePoint, PriceUnit, Trend};
pub use simulator::{Commodity, PriceSimulator, SeedKey, COMMODITIES};
