use serde::Serialize;

/// Unit a commodity price is quoted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceUnit {
    /// per kilogram
    Kg,
    /// per liter
    Liter,
    /// per dozen
    Dozen,
}

impl PriceUnit {
    pub fn measure(&self) -> &'static str {
        match self {
            PriceUnit::Kg => "weight",
            PriceUnit::Liter => "volume",
            PriceUnit::Dozen => "count",
        }
    }
}

/// Direction of a price movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn from_change(change_percent: f64) -> Self {
        if change_percent > 0.0 {
            Trend::Up
        } else if change_percent < 0.0 {
            Trend::Down
        } else {
            Trend::Stable
        }
    }
}

/// Price of one commodity at one market.
///
/// Fields are private so `trend` can only ever come from `change_percent`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    commodity_name: String,
    unit_price: i64,
    unit: PriceUnit,
    change_percent: f64,
    trend: Trend,
}

impl PricePoint {
    pub fn new(
        commodity_name: impl Into<String>,
        unit_price: i64,
        unit: PriceUnit,
        change_percent: f64,
    ) -> Self {
        Self {
            commodity_name: commodity_name.into(),
            unit_price,
            unit,
            change_percent,
            trend: Trend::from_change(change_percent),
        }
    }

    pub fn commodity_name(&self) -> &str {
        &self.commodity_name
    }

    pub fn unit_price(&self) -> i64 {
        self.unit_price
    }

    pub fn unit(&self) -> PriceUnit {
        self.unit
    }

    pub fn change_percent(&self) -> f64 {
        self.change_percent
    }

    pub fn trend(&self) -> Trend {
        self.trend
    }
}
