//! Static reference data for the estimator.
//!
//! Loaded from `catalog.json` with support for an environment variable
//! override. Stations, districts and rate groups are required; the remaining
//! sections fall back to their defaults when omitted.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use estimate_runtime::{District, Station};

pub const BUILTIN_CATALOG: &str = include_str!("data/catalog.json");

pub const CATALOG_PATH_ENV: &str = "ESTIMATE_CATALOG_PATH";

/// Root of the reference data.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_station_name")]
    pub default_station: String,
    #[serde(default = "default_station_name")]
    pub default_rate_district: String,
    pub stations: Vec<Station>,
    /// Catalog order is the tie-break order for nearest-district searches.
    pub districts: Vec<District>,
    pub rate_groups: RateGroups,
    #[serde(default = "default_roles")]
    pub roles: Vec<RoleSpec>,
    #[serde(default)]
    pub rate_table: RateTable,
    #[serde(default)]
    pub policy: EstimatePolicy,
    #[serde(default)]
    pub bank: BankDetails,
}

fn default_station_name() -> String {
    "Lusaka".to_string()
}

fn default_roles() -> Vec<RoleSpec> {
    [
        ("Manager Survey", Division::I),
        ("Senior Mine Surveyor", Division::I),
        ("Mine Surveyor", Division::I),
        ("Assistant Mine Surveyor", Division::II),
        ("Driver", Division::III),
    ]
    .into_iter()
    .map(|(label, division)| RoleSpec {
        label: label.to_string(),
        division,
    })
    .collect()
}

impl Catalog {
    pub fn builtin() -> Arc<Self> {
        Arc::new(
            serde_json::from_str(BUILTIN_CATALOG).expect("builtin catalog should parse"),
        )
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| CatalogConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Catalog::from_json_str(&contents)?;
        Ok(catalog)
    }

    /// Station by exact key, as selected on the form.
    pub fn station(&self, key: &str) -> Option<&Station> {
        self.stations.iter().find(|station| station.name == key)
    }

    /// District by case-insensitive name.
    pub fn district_named(&self, name: &str) -> Option<&District> {
        let wanted = name.to_lowercase();
        self.districts
            .iter()
            .find(|district| district.name.to_lowercase() == wanted)
    }

    pub fn role(&self, label: &str) -> Option<&RoleSpec> {
        self.roles.iter().find(|role| role.label == label)
    }

    pub fn role_labels(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(|role| role.label.as_str())
    }
}

/// District names partitioned into the two priced tiers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RateGroups {
    #[serde(default)]
    pub group_a: Vec<String>,
    #[serde(default)]
    pub group_b: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Division {
    I,
    II,
    III,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleSpec {
    pub label: String,
    pub division: Division,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TierRates {
    pub group_a: f64,
    pub group_b: f64,
    pub other: f64,
}

/// Daily subsistence allowance per division and district tier.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateTable {
    pub division_i: TierRates,
    pub division_ii: TierRates,
    pub division_iii: TierRates,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            division_i: TierRates {
                group_a: 1250.0,
                group_b: 1150.0,
                other: 1050.0,
            },
            division_ii: TierRates {
                group_a: 1100.0,
                group_b: 1000.0,
                other: 950.0,
            },
            division_iii: TierRates {
                group_a: 900.0,
                group_b: 800.0,
                other: 770.0,
            },
        }
    }
}

impl RateTable {
    pub fn for_division(&self, division: Division) -> &TierRates {
        match division {
            Division::I => &self.division_i,
            Division::II => &self.division_ii,
            Division::III => &self.division_iii,
        }
    }
}

/// Tuning constants of the distance and cost model.
///
/// The override radius is a labelling policy, not a physical bound. The fuel
/// factors are kept exactly as issued by the survey office.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EstimatePolicy {
    pub override_label_radius_km: f64,
    pub override_fallback_label: String,
    pub fuel_buffer_factor: f64,
    pub fuel_round_trip_factor: f64,
    pub fuel_efficiency_km_per_unit: f64,
    pub contingency_rate: f64,
}

impl Default for EstimatePolicy {
    fn default() -> Self {
        Self {
            override_label_radius_km: 5.0,
            override_fallback_label: "Other Areas".to_string(),
            fuel_buffer_factor: 1.15,
            fuel_round_trip_factor: 2.0,
            fuel_efficiency_km_per_unit: 6.5,
            contingency_rate: 0.10,
        }
    }
}

/// Settlement account printed at the foot of the invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankDetails {
    pub account_name: String,
    pub bank_name: String,
    pub branch: String,
    pub account_number: String,
    pub swift_code: String,
}

#[derive(Debug, Error)]
pub enum CatalogConfigError {
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read catalog from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where the active catalog came from.
#[derive(Debug, Clone)]
pub struct CatalogMetadata {
    path: Option<PathBuf>,
}

impl CatalogMetadata {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    pub fn is_builtin(&self) -> bool {
        self.path.is_none()
    }
}

/// Load the catalog from `path`, falling back to the builtin on failure.
pub fn load_catalog(path: Option<&Path>) -> (Arc<Catalog>, CatalogMetadata) {
    if let Some(path) = path {
        match Catalog::from_file(path) {
            Ok(catalog) => {
                tracing::info!(
                    target: "survey_estimate::config",
                    path = %path.display(),
                    stations = catalog.stations.len(),
                    districts = catalog.districts.len(),
                    "catalog.loaded=file"
                );
                return (
                    Arc::new(catalog),
                    CatalogMetadata::new(Some(path.to_path_buf())),
                );
            }
            Err(err) => {
                tracing::warn!(
                    target: "survey_estimate::config",
                    path = %path.display(),
                    error = %err,
                    "catalog.load_failed"
                );
            }
        }
    }

    let catalog = Catalog::builtin();
    tracing::info!(target: "survey_estimate::config", "catalog.loaded=builtin");
    (catalog, CatalogMetadata::new(None))
}

/// Load the catalog named by `ESTIMATE_CATALOG_PATH`, or the builtin.
pub fn load_catalog_from_env() -> (Arc<Catalog>, CatalogMetadata) {
    let override_path = env::var(CATALOG_PATH_ENV).ok().map(PathBuf::from);
    load_catalog(override_path.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.stations.len(), 7);
        assert_eq!(catalog.districts.len(), 26);
        assert_eq!(catalog.default_station, "Lusaka");
        assert_eq!(catalog.roles.len(), 5);
    }

    #[test]
    fn district_lookup_ignores_case() {
        let catalog = Catalog::builtin();
        let district = catalog.district_named("kAbWe").expect("kabwe in catalog");
        assert_eq!(district.name, "Kabwe");
        assert!(catalog.district_named("Nowhereville").is_none());
    }

    #[test]
    fn station_lookup_is_exact() {
        let catalog = Catalog::builtin();
        assert!(catalog.station("Kitwe").is_some());
        assert!(catalog.station("kitwe").is_none());
    }

    #[test]
    fn optional_sections_default() {
        let json = r#"{
            "stations": [ { "name": "Base", "lat": 0.0, "lng": 0.0 } ],
            "districts": [ { "name": "Near", "lat": 0.1, "lng": 0.1 } ],
            "rate_groups": { "group_a": ["Near"] }
        }"#;
        let catalog = Catalog::from_json_str(json).expect("minimal catalog parses");
        assert_eq!(catalog.policy.override_label_radius_km, 5.0);
        assert_eq!(catalog.policy.fuel_efficiency_km_per_unit, 6.5);
        assert_eq!(catalog.rate_table.division_iii.other, 770.0);
        assert_eq!(catalog.roles.len(), 5);
        assert!(catalog.rate_groups.group_b.is_empty());
    }

    #[test]
    fn missing_file_falls_back_to_builtin() {
        let (catalog, metadata) =
            load_catalog(Some(Path::new("/definitely/not/here/catalog.json")));
        assert!(metadata.is_builtin());
        assert_eq!(catalog.stations.len(), 7);
    }

    #[test]
    fn builtin_policy_matches_defaults() {
        let catalog = Catalog::builtin();
        let defaults = EstimatePolicy::default();
        assert_eq!(catalog.policy.fuel_buffer_factor, defaults.fuel_buffer_factor);
        assert_eq!(catalog.policy.contingency_rate, defaults.contingency_rate);
        assert_eq!(
            catalog.policy.override_fallback_label,
            defaults.override_fallback_label
        );
    }
}
