//! Great-circle distance and distance ranking

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default number of ranked results kept
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine distance to `other` in kilometres
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let phi1 = self.lat.to_radians();
        let phi2 = other.lat.to_radians();
        let d_phi = (other.lat - self.lat).to_radians();
        let d_lambda = (other.lon - self.lon).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);

        2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
    }
}

/// Anything that sits at a point and can carry its distance from an origin
pub trait Located {
    fn coordinates(&self) -> Coordinates;

    fn set_distance_km(&mut self, distance_km: f64);
}

/// Sorts located records by distance from an origin and keeps the nearest ones
#[derive(Debug, Clone, Copy)]
pub struct GeoRanker {
    max_results: usize,
}

impl Default for GeoRanker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESULTS)
    }
}

impl GeoRanker {
    pub fn new(max_results: usize) -> Self {
        Self { max_results }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Attaches `distance_km` to every record, sorts ascending and truncates.
    ///
    /// The sort is stable: equal distances keep their input order.
    pub fn rank<T: Located>(&self, origin: Coordinates, records: Vec<T>) -> Vec<T> {
        let mut measured: Vec<(f64, T)> = records
            .into_iter()
            .map(|record| (origin.distance_km(&record.coordinates()), record))
            .collect();

        measured.sort_by(|a, b| a.0.total_cmp(&b.0));
        measured.truncate(self.max_results);

        measured
            .into_iter()
            .map(|(distance, mut record)| {
                record.set_distance_km(round_to_hundredths(distance));
                record
            })
            .collect()
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Pin {
        id: u32,
        at: Coordinates,
        distance_km: f64,
    }

    impl Located for Pin {
        fn coordinates(&self) -> Coordinates {
            self.at
        }

        fn set_distance_km(&mut self, distance_km: f64) {
            self.distance_km = distance_km;
        }
    }

    fn pin_north_of(origin: Coordinates, id: u32, km: f64) -> Pin {
        let km_per_degree = EARTH_RADIUS_KM.to_radians();
        Pin {
            id,
            at: Coordinates::new(origin.lat + km / km_per_degree, origin.lon),
            distance_km: -1.0,
        }
    }

    #[test]
    fn test_haversine_known_distance() {
        let hyderabad = Coordinates::new(17.3850, 78.4867);
        let vijayawada = Coordinates::new(16.5062, 80.6480);

        let distance = hyderabad.distance_km(&vijayawada);
        assert!((distance - 249.79).abs() < 0.05, "got {distance}");
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.0, 1.0);
        assert!((a.distance_km(&b) - 111.19).abs() < 0.01);
    }

    #[test]
    fn test_rank_orders_by_distance() {
        let origin = Coordinates::new(17.3850, 78.4867);
        let pins = vec![
            pin_north_of(origin, 1, 5.2),
            pin_north_of(origin, 2, 1.1),
            pin_north_of(origin, 3, 3.4),
        ];

        let ranked = GeoRanker::default().rank(origin, pins);
        let distances: Vec<f64> = ranked.iter().map(|p| p.distance_km).collect();
        let ids: Vec<u32> = ranked.iter().map(|p| p.id).collect();

        assert_eq!(distances, vec![1.1, 3.4, 5.2]);
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_rank_is_monotonic_and_capped() {
        let origin = Coordinates::new(16.5062, 80.6480);
        let pins: Vec<Pin> = (0..25)
            .map(|i| pin_north_of(origin, i, ((i * 7) % 13) as f64 + 0.5))
            .collect();

        let ranked = GeoRanker::new(8).rank(origin, pins);

        assert_eq!(ranked.len(), 8);
        assert!(ranked.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let origin = Coordinates::new(16.5062, 80.6480);
        let pins = vec![
            pin_north_of(origin, 10, 2.0),
            pin_north_of(origin, 11, 2.0),
            pin_north_of(origin, 12, 1.0),
            pin_north_of(origin, 13, 2.0),
        ];

        let ids: Vec<u32> = GeoRanker::default()
            .rank(origin, pins)
            .iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(ids, vec![12, 10, 11, 13]);
    }

    #[test]
    fn test_rank_empty_input() {
        let ranked: Vec<Pin> = GeoRanker::default().rank(Coordinates::new(0.0, 0.0), Vec::new());
        assert!(ranked.is_empty());
    }
}
