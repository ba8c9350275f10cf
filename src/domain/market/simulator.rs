//! Deterministic market price simulator

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

use super::price::{PricePoint, PriceUnit};

/// Static description of a simulated commodity
#[derive(Debug, Clone, Copy)]
pub struct Commodity {
    pub name: &'static str,
    pub base_price: f64,
    pub unit: PriceUnit,
    /// Maximum daily deviation from base, in percent
    pub volatility: f64,
}

pub const COMMODITIES: &[Commodity] = &[
    Commodity { name: "Onion", base_price: 35.0, unit: PriceUnit::Kg, volatility: 8.0 },
    Commodity { name: "Tomato", base_price: 28.0, unit: PriceUnit::Kg, volatility: 12.0 },
    Commodity { name: "Potato", base_price: 22.0, unit: PriceUnit::Kg, volatility: 5.0 },
    Commodity { name: "Rice", base_price: 45.0, unit: PriceUnit::Kg, volatility: 2.0 },
    Commodity { name: "Lentils (Dal)", base_price: 85.0, unit: PriceUnit::Kg, volatility: 5.0 },
    Commodity { name: "Milk", base_price: 55.0, unit: PriceUnit::Liter, volatility: 3.0 },
    Commodity { name: "Eggs", base_price: 84.0, unit: PriceUnit::Dozen, volatility: 5.0 },
];

const CHANGE_RANGE: std::ops::RangeInclusive<f64> = -5.0..=8.0;

/// Stable input of one simulation: the calendar day and the market it is for
#[derive(Debug, Clone, PartialEq)]
pub struct SeedKey {
    day: NaiveDate,
    scope: String,
    modifier: f64,
}

impl SeedKey {
    pub fn new(day: NaiveDate, scope: impl Into<String>, modifier: f64) -> Self {
        Self {
            day,
            scope: scope.into(),
            modifier,
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// 64-bit seed from SHA-256 of `"<scope>_<YYYY-MM-DD>"`
    pub fn seed(&self) -> u64 {
        let digest = Sha256::digest(format!("{}_{}", self.scope, self.day.format("%Y-%m-%d")));
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        u64::from_be_bytes(bytes)
    }
}

/// Produces reproducible synthetic prices; a pure function of the seed key
#[derive(Debug, Clone, Copy)]
pub struct PriceSimulator {
    commodities: &'static [Commodity],
}

impl Default for PriceSimulator {
    fn default() -> Self {
        Self::new(COMMODITIES)
    }
}

impl PriceSimulator {
    pub fn new(commodities: &'static [Commodity]) -> Self {
        Self { commodities }
    }

    pub fn generate(&self, key: &SeedKey) -> Vec<PricePoint> {
        // Generator is local to the call; nothing outside observes its state.
        let mut rng = StdRng::seed_from_u64(key.seed());

        self.commodities
            .iter()
            .map(|c| {
                let fluctuation = rng.gen_range(-c.volatility..=c.volatility) / 100.0;
                let price = (c.base_price * key.modifier * (1.0 + fluctuation)).round() as i64;
                let change = round_to_tenths(rng.gen_range(CHANGE_RANGE));

                PricePoint::new(c.name, price, c.unit, change)
            })
            .collect()
    }

    /// Base prices with no movement, used when simulation is unavailable
    pub fn baseline(&self) -> Vec<PricePoint> {
        self.commodities
            .iter()
            .map(|c| PricePoint::new(c.name, c.base_price.round() as i64, c.unit, 0.0))
            .collect()
    }
}

fn round_to_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::Trend;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn test_same_key_same_output() {
        let simulator = PriceSimulator::default();
        let key = SeedKey::new(day(19), "vijayawada", 1.05);

        let first = serde_json::to_string(&simulator.generate(&key)).unwrap();
        let second = serde_json::to_string(&PriceSimulator::default().generate(&key)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_seed_is_stable_value() {
        let a = SeedKey::new(day(19), "vijayawada", 1.05);
        let b = SeedKey::new(day(19), "vijayawada", 0.5);

        // modifier scales prices but is not part of the seed
        assert_eq!(a.seed(), b.seed());
        assert_ne!(a.seed(), SeedKey::new(day(19), "guntur", 1.05).seed());
    }

    #[test]
    fn test_different_day_changes_output() {
        let simulator = PriceSimulator::default();
        let today = simulator.generate(&SeedKey::new(day(19), "vijayawada", 1.05));
        let tomorrow = simulator.generate(&SeedKey::new(day(20), "vijayawada", 1.05));

        assert_ne!(today, tomorrow);
    }

    #[test]
    fn test_prices_stay_within_volatility_band() {
        let simulator = PriceSimulator::default();

        for d in 1..=28 {
            let points = simulator.generate(&SeedKey::new(day(d), "hyderabad", 1.12));

            for (point, commodity) in points.iter().zip(COMMODITIES) {
                let centre = commodity.base_price * 1.12;
                let band = centre * commodity.volatility / 100.0 + 1.0;
                assert!((point.unit_price() as f64 - centre).abs() <= band);
                assert!(CHANGE_RANGE.contains(&point.change_percent()));
                assert_eq!(point.trend(), Trend::from_change(point.change_percent()));
            }
        }
    }

    #[test]
    fn test_baseline_is_stable() {
        let baseline = PriceSimulator::default().baseline();

        assert_eq!(baseline.len(), COMMODITIES.len());
        assert!(baseline.iter().all(|p| p.trend() == Trend::Stable));
        assert_eq!(baseline[0].unit_price(), 35);
    }
}
