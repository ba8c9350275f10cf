//! Health facilities located around a served town

use serde::{Deserialize, Serialize};

use super::geo::{Coordinates, Located};

/// Kind of facility a list is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FacilityKind {
    Hospital,
    Pharmacy,
    BloodBank,
}

impl FacilityKind {
    pub const ALL: [FacilityKind; 3] = [
        FacilityKind::Hospital,
        FacilityKind::Pharmacy,
        FacilityKind::BloodBank,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FacilityKind::Hospital => "hospitals",
            FacilityKind::Pharmacy => "pharmacies",
            FacilityKind::BloodBank => "blood-banks",
        }
    }

    /// Helpline listed when no upstream data is available
    fn helpline(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            FacilityKind::Hospital => ("helpline-108", "108 Emergency Ambulance Service", "108"),
            FacilityKind::Pharmacy => (
                "helpline-janaushadhi",
                "Pradhan Mantri Bhartiya Janaushadhi Kendra Helpline",
                "1800-180-8080",
            ),
            FacilityKind::BloodBank => (
                "helpline-blood",
                "National Blood Transfusion Helpline",
                "1910",
            ),
        }
    }
}

/// Extra details of a facility, as far as the upstream knows them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Whether the facility advertises emergency service
    pub emergency: bool,
}

/// A facility with its distance from the requested location.
///
/// `distance_km` is only ever assigned by the geo ranker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatedPoi {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
    pub distance_km: f64,
    pub attributes: FacilityAttributes,
}

impl LocatedPoi {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        coordinates: Coordinates,
        attributes: FacilityAttributes,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinates,
            distance_km: 0.0,
            attributes,
        }
    }
}

impl Located for LocatedPoi {
    fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    fn set_distance_km(&mut self, distance_km: f64) {
        self.distance_km = distance_km;
    }
}

/// Static list served when no facility source produced anything
pub fn helpline_defaults(kind: FacilityKind, origin: Coordinates) -> Vec<LocatedPoi> {
    let (id, name, phone) = kind.helpline();

    vec![LocatedPoi::new(
        id,
        name,
        origin,
        FacilityAttributes {
            opening_hours: Some("24/7".to_string()),
            phone: Some(phone.to_string()),
            emergency: matches!(kind, FacilityKind::Hospital),
        },
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpline_defaults_sit_at_origin() {
        let origin = Coordinates::new(17.385, 78.4867);

        for kind in FacilityKind::ALL {
            let defaults = helpline_defaults(kind, origin);
            assert_eq!(defaults.len(), 1);
            assert_eq!(defaults[0].distance_km, 0.0);
            assert_eq!(defaults[0].coordinates, origin);
            assert!(defaults[0].attributes.phone.is_some());
        }
    }

    #[test]
    fn test_serialization_skips_unknown_attributes() {
        let poi = LocatedPoi::new(
            "node/1",
            "Area Hospital",
            Coordinates::new(16.5, 80.6),
            FacilityAttributes::default(),
        );
        let json = serde_json::to_string(&poi).unwrap();

        assert!(json.contains("\"distanceKm\":0.0"));
        assert!(!json.contains("openingHours"));
    }
}
