use estimate_runtime::{PersonnelEntry, PersonnelLine, Totals};

use crate::catalog::{Catalog, EstimatePolicy};

/// Price every roster entry against the rate district.
pub fn personnel_lines(
    entries: &[PersonnelEntry],
    rate_district: &str,
    catalog: &Catalog,
) -> Vec<PersonnelLine> {
    entries
        .iter()
        .map(|entry| {
            let rate = catalog.resolve_rate(&entry.role, rate_district);
            PersonnelLine {
                id: entry.id,
                role: entry.role.clone(),
                officers: entry.officers,
                days: entry.days,
                rate,
                cost: f64::from(entry.officers) * f64::from(entry.days) * rate,
            }
        })
        .collect()
}

/// Fuel for the whole fleet over `total_distance_km`, with the round trip and
/// buffer applied.
pub fn fuel_cost(
    total_distance_km: f64,
    fuel_price: f64,
    fleet_count: u32,
    policy: &EstimatePolicy,
) -> f64 {
    (total_distance_km * fuel_price * policy.fuel_buffer_factor * policy.fuel_round_trip_factor
        / policy.fuel_efficiency_km_per_unit)
        * f64::from(fleet_count)
}

/// Combine personnel and fuel into one consistent set of totals.
pub fn aggregate(
    lines: &[PersonnelLine],
    total_distance_km: f64,
    fuel_price: f64,
    fleet_count: u32,
    policy: &EstimatePolicy,
) -> Totals {
    let personnel_total: f64 = lines.iter().map(|line| line.cost).sum();
    let fuel_total = fuel_cost(total_distance_km, fuel_price, fleet_count, policy);
    let cumulative_total = personnel_total + fuel_total;
    let contingency = cumulative_total * policy.contingency_rate;

    Totals {
        personnel_total,
        fuel_total,
        cumulative_total,
        contingency,
        grand_total: cumulative_total + contingency,
    }
}
