//! OpenStreetMap Overpass facility adapter and the ranked facility producer

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::facility::{FacilityAttributes, FacilityKind, LocatedPoi};
use crate::domain::{Coordinates, DomainError, GeoRanker, Producer, SourceAdapter};
use crate::infrastructure::http::HttpClientTrait;

pub const DEFAULT_INTERPRETER_URL: &str = "https://overpass-api.de/api/interpreter";

const PROVIDER: &str = "overpass";

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Element {
    #[serde(rename = "type")]
    kind: String,
    id: u64,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<Center>,
    #[serde(default)]
    tags: std::collections::HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct Center {
    lat: f64,
    lon: f64,
}

/// Tag filter selecting one facility kind
fn tag_filter(kind: FacilityKind) -> &'static str {
    match kind {
        FacilityKind::Hospital => r#"["amenity"~"^(hospital|clinic)$"]"#,
        FacilityKind::Pharmacy => r#"["amenity"="pharmacy"]"#,
        FacilityKind::BloodBank => r#"["healthcare"~"^(blood_donation|blood_bank)$"]"#,
    }
}

/// Overpass QL for nodes and ways of `kind` within `radius_m` of `origin`
pub fn build_query(kind: FacilityKind, origin: Coordinates, radius_m: u32, timeout: Duration) -> String {
    let filter = tag_filter(kind);
    let around = format!("(around:{},{},{})", radius_m, origin.lat, origin.lon);

    format!(
        "[out:json][timeout:{}];(node{filter}{around};way{filter}{around};);out center tags;",
        timeout.as_secs().max(1),
    )
}

/// Facilities of one kind around one location
#[derive(Debug, Clone)]
pub struct OverpassAdapter {
    client: Arc<dyn HttpClientTrait>,
    endpoint: String,
    kind: FacilityKind,
    origin: Coordinates,
    radius_m: u32,
    timeout: Duration,
}

impl OverpassAdapter {
    pub fn new(
        client: Arc<dyn HttpClientTrait>,
        endpoint: impl Into<String>,
        kind: FacilityKind,
        origin: Coordinates,
        radius_m: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            kind,
            origin,
            radius_m,
            timeout,
        }
    }

    pub fn origin(&self) -> Coordinates {
        self.origin
    }
}

#[async_trait]
impl SourceAdapter<LocatedPoi> for OverpassAdapter {
    fn provider(&self) -> &str {
        PROVIDER
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn try_fetch(&self) -> Result<Vec<LocatedPoi>, DomainError> {
        let query = build_query(self.kind, self.origin, self.radius_m, self.timeout);
        let body = self
            .client
            .get_json(&self.endpoint, &[("data", query)], Vec::new())
            .await?;

        parse_elements(body)
    }
}

/// Convert Overpass elements into facilities, skipping malformed, unnamed or unplaced ones
pub fn parse_elements(body: serde_json::Value) -> Result<Vec<LocatedPoi>, DomainError> {
    let response: OverpassResponse = serde_json::from_value(body)
        .map_err(|e| DomainError::parse(PROVIDER, format!("unexpected response shape: {}", e)))?;

    Ok(response
        .elements
        .into_iter()
        .filter_map(|value| serde_json::from_value::<Element>(value).ok())
        .filter_map(to_poi)
        .collect())
}

fn to_poi(element: Element) -> Option<LocatedPoi> {
    let name = element
        .tags
        .get("name")
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())?
        .to_string();

    let coordinates = match (element.lat, element.lon, &element.center) {
        (Some(lat), Some(lon), _) => Coordinates::new(lat, lon),
        (_, _, Some(center)) => Coordinates::new(center.lat, center.lon),
        _ => return None,
    };

    let attributes = FacilityAttributes {
        opening_hours: element.tags.get("opening_hours").cloned(),
        phone: element
            .tags
            .get("phone")
            .or_else(|| element.tags.get("contact:phone"))
            .cloned(),
        emergency: element.tags.get("emergency").is_some_and(|v| v == "yes"),
    };

    Some(LocatedPoi::new(
        format!("{}/{}", element.kind, element.id),
        name,
        coordinates,
        attributes,
    ))
}

/// Chain step: Overpass results ranked by distance from the location
#[derive(Debug)]
pub struct RankedFacilities {
    adapter: OverpassAdapter,
    ranker: GeoRanker,
}

impl RankedFacilities {
    pub fn new(adapter: OverpassAdapter, ranker: GeoRanker) -> Self {
        Self { adapter, ranker }
    }
}

#[async_trait]
impl Producer<LocatedPoi> for RankedFacilities {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn produce(&self) -> Result<Vec<LocatedPoi>, DomainError> {
        let found = self.adapter.fetch().await;
        Ok(self.ranker.rank(self.adapter.origin(), found))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::EARTH_RADIUS_KM;
    use crate::infrastructure::http::mock::MockHttpClient;
    use serde_json::json;

    const ORIGIN: Coordinates = Coordinates::new(16.5062, 80.6480);

    fn node_north_of_origin(id: u64, name: &str, km: f64) -> serde_json::Value {
        let degrees = km / EARTH_RADIUS_KM.to_radians();
        json!({
            "type": "node",
            "id": id,
            "lat": ORIGIN.lat + degrees,
            "lon": ORIGIN.lon,
            "tags": {"name": name, "amenity": "hospital"}
        })
    }

    fn adapter(client: Arc<MockHttpClient>) -> OverpassAdapter {
        OverpassAdapter::new(
            client,
            DEFAULT_INTERPRETER_URL,
            FacilityKind::Hospital,
            ORIGIN,
            5_000,
            Duration::from_secs(1),
        )
    }

    #[test]
    fn test_build_query() {
        let query = build_query(FacilityKind::Pharmacy, ORIGIN, 5000, Duration::from_secs(25));

        assert!(query.starts_with("[out:json][timeout:25];"));
        assert!(query.contains(r#"node["amenity"="pharmacy"](around:5000,16.5062,80.648);"#));
        assert!(query.ends_with("out center tags;"));
    }

    #[test]
    fn test_parse_elements() {
        let body = json!({
            "elements": [
                {
                    "type": "way", "id": 7, "center": {"lat": 16.51, "lon": 80.64},
                    "tags": {"name": "Government General Hospital", "emergency": "yes",
                             "contact:phone": "0866-2570300", "opening_hours": "24/7"}
                },
                {"type": "node", "id": 8, "lat": 16.5, "lon": 80.6, "tags": {"amenity": "clinic"}},
                {"type": "way", "id": 9, "tags": {"name": "No Geometry Clinic"}}
            ]
        });

        let pois = parse_elements(body).unwrap();

        assert_eq!(pois.len(), 1);
        assert_eq!(pois[0].id, "way/7");
        assert_eq!(pois[0].coordinates, Coordinates::new(16.51, 80.64));
        assert_eq!(pois[0].attributes.phone.as_deref(), Some("0866-2570300"));
        assert!(pois[0].attributes.emergency);
    }

    #[test]
    fn test_parse_elements_skips_malformed_records() {
        let body = json!({
            "elements": [
                node_north_of_origin(1, "Area Hospital", 1.0),
                {"type": "node", "id": "bad", "lat": 16.5, "lon": 80.6, "tags": {"name": "Bad Id"}},
                {"type": "node", "id": 3, "lat": "x", "lon": 80.6, "tags": {"name": "Bad Lat"}}
            ]
        });

        let pois = parse_elements(body).unwrap();

        assert_eq!(pois.len(), 1);
        assert_eq!(pois[0].id, "node/1");
        assert_eq!(pois[0].name, "Area Hospital");
    }

    #[tokio::test]
    async fn test_ranked_facilities_sorted_by_distance() {
        let body = json!({
            "elements": [
                node_north_of_origin(1, "Far Hospital", 5.2),
                node_north_of_origin(2, "Near Clinic", 1.1),
                node_north_of_origin(3, "Mid Hospital", 3.4),
            ]
        });
        let client = Arc::new(MockHttpClient::new().with_json(DEFAULT_INTERPRETER_URL, body));

        let ranked = RankedFacilities::new(adapter(client), GeoRanker::default())
            .produce()
            .await
            .unwrap();

        let distances: Vec<f64> = ranked.iter().map(|poi| poi.distance_km).collect();
        assert_eq!(distances, vec![1.1, 3.4, 5.2]);
        assert_eq!(ranked[0].name, "Near Clinic");
    }

    #[tokio::test]
    async fn test_upstream_failure_yields_empty() {
        let client = Arc::new(MockHttpClient::new().with_error(DEFAULT_INTERPRETER_URL, "429"));

        let ranked = RankedFacilities::new(adapter(client), GeoRanker::default())
            .produce()
            .await
            .unwrap();

        assert!(ranked.is_empty());
    }
}
