use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SiteId(pub u32);

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "site-{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonnelId(pub u32);

impl fmt::Display for PersonnelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "personnel-{}", self.0)
    }
}

/// Survey site parsed from a boundary document.
///
/// `coordinate` is the centroid of `boundary`; the vertex order is the
/// document order and is kept for boundary rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    pub coordinate: Coordinate,
    #[serde(default)]
    pub boundary: Vec<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct District {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl District {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Station {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// Roster row as entered on the form. The subsistence rate is not stored
/// here; it is resolved on every recompute and reported in [`PersonnelLine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonnelEntry {
    pub id: PersonnelId,
    pub role: String,
    pub officers: u32,
    pub days: u32,
}

impl PersonnelEntry {
    pub fn new(id: PersonnelId, role: impl Into<String>, officers: u32, days: u32) -> Self {
        Self {
            id,
            role: role.into(),
            officers: officers.max(1),
            days: days.max(1),
        }
    }
}

/// Consistent snapshot of everything an estimate is derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionInputs {
    pub station: String,
    pub sites: Vec<Site>,
    #[serde(default)]
    pub manual_district: String,
    #[serde(default)]
    pub custom_override: Option<Coordinate>,
    pub personnel: Vec<PersonnelEntry>,
    pub fuel_price: f64,
    pub fleet_count: u32,
}

impl MissionInputs {
    pub fn new(station: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            sites: Vec::new(),
            manual_district: String::new(),
            custom_override: None,
            personnel: Vec::new(),
            fuel_price: 0.0,
            fleet_count: 1,
        }
    }

    /// Longest assignment on the roster, never below one day.
    pub fn max_days(&self) -> u32 {
        self.personnel
            .iter()
            .map(|entry| entry.days)
            .max()
            .unwrap_or(1)
            .max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurthestSite {
    pub id: SiteId,
    pub name: String,
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MissionMetrics {
    pub furthest_site: Option<FurthestSite>,
    pub station_to_site_km: f64,
    pub nearest_district: Option<String>,
    pub district_distance_km: f64,
    pub working_radius_km: f64,
    pub total_distance_km: f64,
}

impl MissionMetrics {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_sites(&self) -> bool {
        self.furthest_site.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonnelLine {
    pub id: PersonnelId,
    pub role: String,
    pub officers: u32,
    pub days: u32,
    pub rate: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub personnel_total: f64,
    pub fuel_total: f64,
    pub cumulative_total: f64,
    pub contingency: f64,
    pub grand_total: f64,
}

/// One atomic result of the recompute pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub station: String,
    pub metrics: MissionMetrics,
    pub rate_district: String,
    pub personnel: Vec<PersonnelLine>,
    pub totals: Totals,
    pub fingerprint: u64,
}

impl Estimate {
    pub fn rate_for(&self, id: PersonnelId) -> Option<f64> {
        self.personnel
            .iter()
            .find(|line| line.id == id)
            .map(|line| line.rate)
    }
}

/// Free-text fields printed on the invoice document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DocumentDetails {
    pub attention: String,
    pub work_description: String,
    pub prepared_by: String,
    pub prepared_title: String,
    pub checked_by: String,
    pub checked_title: String,
}
