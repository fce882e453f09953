use estimate_runtime::{Estimate, MissionInputs};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::costs::{aggregate, personnel_lines};
use crate::hashing::fingerprint_inputs;
use crate::metrics::compute_metrics;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EstimateError {
    #[error("unknown station '{0}'")]
    UnknownStation(String),
}

/// Rebuild the whole estimate from one input snapshot.
///
/// Runs metrics, then rate resolution against the resulting district, then
/// cost aggregation. Nothing is carried over from earlier runs.
pub fn recompute(inputs: &MissionInputs, catalog: &Catalog) -> Result<Estimate, EstimateError> {
    let station = catalog
        .station(&inputs.station)
        .ok_or_else(|| EstimateError::UnknownStation(inputs.station.clone()))?;

    let metrics = compute_metrics(station.coordinate(), inputs, catalog);
    let rate_district = metrics
        .nearest_district
        .clone()
        .unwrap_or_else(|| catalog.default_rate_district.clone());
    let personnel = personnel_lines(&inputs.personnel, &rate_district, catalog);
    let totals = aggregate(
        &personnel,
        metrics.total_distance_km,
        inputs.fuel_price,
        inputs.fleet_count,
        &catalog.policy,
    );

    tracing::debug!(
        target: "survey_estimate::pipeline",
        station = %inputs.station,
        sites = inputs.sites.len(),
        district = %rate_district,
        total_km = metrics.total_distance_km,
        grand_total = totals.grand_total,
        "estimate.recomputed"
    );

    Ok(Estimate {
        station: station.name.clone(),
        metrics,
        rate_district,
        personnel,
        totals,
        fingerprint: fingerprint_inputs(inputs),
    })
}
