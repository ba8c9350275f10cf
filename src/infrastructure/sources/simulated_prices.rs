//! Deterministic price simulator as a chain step

use async_trait::async_trait;

use crate::domain::market::{PricePoint, PriceSimulator, SeedKey};
use crate::domain::{DomainError, Producer};

const NAME: &str = "price-simulator";

/// Produces the simulated price list for one location and day
#[derive(Debug, Clone)]
pub struct SimulatedPrices {
    simulator: PriceSimulator,
    key: SeedKey,
}

impl SimulatedPrices {
    pub fn new(simulator: PriceSimulator, key: SeedKey) -> Self {
        Self { simulator, key }
    }
}

#[async_trait]
impl Producer<PricePoint> for SimulatedPrices {
    fn name(&self) -> &str {
        NAME
    }

    async fn produce(&self) -> Result<Vec<PricePoint>, DomainError> {
        Ok(self.simulator.generate(&self.key))
    }
}
