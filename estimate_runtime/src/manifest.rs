use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Coordinate, DocumentDetails};

/// Mission description read by the harness and other file based front ends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct MissionManifest {
    #[serde(default)]
    /// Station key from the catalog. The catalog default is used when absent.
    pub station: Option<String>,
    #[serde(default)]
    pub manual_district: Option<String>,
    #[serde(default)]
    /// Repositioned district marker; overrides `manual_district`.
    pub custom_override: Option<Coordinate>,
    #[serde(default)]
    pub personnel: Vec<ManifestPersonnel>,
    #[serde(default)]
    pub fuel_price: f64,
    #[serde(default = "default_fleet_count")]
    pub fleet_count: f64,
    #[serde(default)]
    /// Boundary document paths, relative to the manifest file.
    pub boundaries: Vec<String>,
    #[serde(default)]
    pub document: DocumentDetails,
}

fn default_fleet_count() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ManifestPersonnel {
    pub role: String,
    #[serde(default = "default_count")]
    pub officers: f64,
    #[serde(default = "default_count")]
    pub days: f64,
}

fn default_count() -> f64 {
    1.0
}

impl MissionManifest {
    pub fn parse_str(contents: &str) -> Result<Self, ManifestValidationError> {
        let manifest: MissionManifest = serde_json::from_str(contents).map_err(|err| {
            ManifestValidationError::single(format!("failed to parse manifest JSON: {err}"))
        })?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<(), ManifestValidationError> {
        let mut errors = Vec::new();

        if let Some(station) = &self.station {
            if station.trim().is_empty() {
                errors.push("station cannot be blank".to_string());
            }
        }
        if let Some(point) = &self.custom_override {
            if !point.is_finite() || !point.in_range() {
                errors.push(format!(
                    "custom_override ({}, {}) is outside lat [-90, 90] / lng [-180, 180]",
                    point.lat, point.lng
                ));
            }
        }
        for (index, entry) in self.personnel.iter().enumerate() {
            if entry.role.trim().is_empty() {
                errors.push(format!("personnel[{index}] role cannot be blank"));
            }
        }
        for (index, path) in self.boundaries.iter().enumerate() {
            if path.trim().is_empty() {
                errors.push(format!("boundaries[{index}] cannot be blank"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ManifestValidationError::new(errors))
        }
    }
}

#[derive(Debug, Clone)]
pub struct ManifestValidationError {
    errors: Vec<String>,
}

impl ManifestValidationError {
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }

    pub fn single(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl fmt::Display for ManifestValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.errors.join("; "))
    }
}

impl std::error::Error for ManifestValidationError {}

pub fn manifest_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(MissionManifest)
}
