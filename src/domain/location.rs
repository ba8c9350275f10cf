//! Static catalog of served locations

use serde::Serialize;

use super::geo::Coordinates;

/// Slug of the location used when a request names an unknown place
pub const DEFAULT_LOCATION: &str = "vijayawada";

/// A town the dashboard serves
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub slug: &'static str,
    pub name: &'static str,
    pub state: &'static str,
    pub coordinates: Coordinates,
    /// Multiplier applied to simulated base prices for this market
    #[serde(skip)]
    pub price_modifier: f64,
}

const fn location(
    slug: &'static str,
    name: &'static str,
    state: &'static str,
    lat: f64,
    lon: f64,
    price_modifier: f64,
) -> Location {
    Location {
        slug,
        name,
        state,
        coordinates: Coordinates::new(lat, lon),
        price_modifier,
    }
}

static LOCATIONS: [Location; 14] = [
    location("visakhapatnam", "Visakhapatnam", "Andhra Pradesh", 17.6868, 83.2185, 1.08),
    location("vijayawada", "Vijayawada", "Andhra Pradesh", 16.5062, 80.6480, 1.05),
    location("guntur", "Guntur", "Andhra Pradesh", 16.3067, 80.4365, 1.02),
    location("nellore", "Nellore", "Andhra Pradesh", 14.4426, 79.9865, 1.03),
    location("kurnool", "Kurnool", "Andhra Pradesh", 15.8281, 78.0373, 0.98),
    location("tirupati", "Tirupati", "Andhra Pradesh", 13.6288, 79.4192, 1.04),
    location("kakinada", "Kakinada", "Andhra Pradesh", 16.9891, 82.2475, 1.01),
    location("rajahmundry", "Rajahmundry", "Andhra Pradesh", 17.0005, 81.8040, 1.02),
    location("kadapa", "Kadapa", "Andhra Pradesh", 14.4673, 78.8242, 0.99),
    location("anantapur", "Anantapur", "Andhra Pradesh", 14.6819, 77.6006, 0.97),
    location("hyderabad", "Hyderabad", "Telangana", 17.3850, 78.4867, 1.12),
    location("warangal", "Warangal", "Telangana", 17.9689, 79.5941, 1.03),
    location("nizamabad", "Nizamabad", "Telangana", 18.6725, 78.0941, 1.00),
    location("karimnagar", "Karimnagar", "Telangana", 18.4386, 79.1288, 1.01),
];

/// Read-only lookup over the served locations
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationCatalog;

impl LocationCatalog {
    pub fn all() -> &'static [Location] {
        &LOCATIONS
    }

    /// Finds a location by slug or display name, case-insensitively
    pub fn find(input: &str) -> Option<&'static Location> {
        let wanted = input.trim().to_lowercase().replace(' ', "-");

        LOCATIONS
            .iter()
            .find(|loc| loc.slug == wanted || loc.name.to_lowercase() == wanted)
    }

    /// Like [`find`](Self::find) but never fails: unknown input maps to the default location
    pub fn resolve(input: &str) -> &'static Location {
        Self::find(input).unwrap_or_else(Self::default_location)
    }

    pub fn default_location() -> &'static Location {
        &LOCATIONS[1]
    }
}
