//! Distance model: furthest site, target district, working radius.

use estimate_runtime::{Coordinate, FurthestSite, MissionInputs, MissionMetrics};

use crate::catalog::Catalog;
use crate::geodesy::{distance_km, furthest, nearest};

/// How the district used for the working radius is chosen, in priority order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistrictTarget<'a> {
    /// Marker dragged on the map.
    Override(Coordinate),
    /// Name typed on the form.
    Manual(&'a str),
    /// Closest catalog district to the furthest site.
    Nearest,
}

impl<'a> DistrictTarget<'a> {
    pub fn from_inputs(inputs: &'a MissionInputs) -> Self {
        if let Some(point) = inputs.custom_override {
            DistrictTarget::Override(point)
        } else if !inputs.manual_district.is_empty() {
            DistrictTarget::Manual(&inputs.manual_district)
        } else {
            DistrictTarget::Nearest
        }
    }
}

/// Label and distance (from the furthest site) of the resolved target.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDistrict {
    pub label: String,
    pub distance_km: f64,
}

pub fn resolve_district(
    target: DistrictTarget<'_>,
    site: Coordinate,
    catalog: &Catalog,
) -> ResolvedDistrict {
    match target {
        DistrictTarget::Override(point) => {
            let policy = &catalog.policy;
            let label = match nearest(point, &catalog.districts, |d| d.coordinate()) {
                Some((district, d)) if d < policy.override_label_radius_km => {
                    district.name.clone()
                }
                _ => policy.override_fallback_label.clone(),
            };
            ResolvedDistrict {
                label,
                distance_km: distance_km(site, point),
            }
        }
        DistrictTarget::Manual(text) => match catalog.district_named(text) {
            Some(district) => ResolvedDistrict {
                label: district.name.clone(),
                distance_km: distance_km(site, district.coordinate()),
            },
            None => {
                tracing::debug!(
                    target: "survey_estimate::metrics",
                    district = text,
                    "district.unresolved"
                );
                ResolvedDistrict {
                    label: text.to_string(),
                    distance_km: 0.0,
                }
            }
        },
        DistrictTarget::Nearest => match nearest(site, &catalog.districts, |d| d.coordinate()) {
            Some((district, d)) => ResolvedDistrict {
                label: district.name.clone(),
                distance_km: d,
            },
            None => ResolvedDistrict {
                label: catalog.policy.override_fallback_label.clone(),
                distance_km: 0.0,
            },
        },
    }
}

/// Recompute the mission metrics from scratch.
///
/// An empty site collection is not an error; it yields [`MissionMetrics::empty`].
pub fn compute_metrics(
    station: Coordinate,
    inputs: &MissionInputs,
    catalog: &Catalog,
) -> MissionMetrics {
    let Some((site, station_to_site_km)) = furthest(station, &inputs.sites, |s| s.coordinate)
    else {
        return MissionMetrics::empty();
    };

    let district = resolve_district(DistrictTarget::from_inputs(inputs), site.coordinate, catalog);
    let working_radius_km = district.distance_km * 2.0 * f64::from(inputs.max_days());

    MissionMetrics {
        furthest_site: Some(FurthestSite {
            id: site.id,
            name: site.name.clone(),
            coordinate: site.coordinate,
        }),
        station_to_site_km,
        nearest_district: Some(district.label),
        district_distance_km: district.distance_km,
        working_radius_km,
        total_distance_km: station_to_site_km + working_radius_km,
    }
}
