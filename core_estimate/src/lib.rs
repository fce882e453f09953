//! Cost estimation engine for survey field missions.
//!
//! Turns a base station, parsed survey sites and a personnel roster into
//! travel metrics and a priced estimate when [`recompute`] is invoked.
//! [`MissionSession`] wraps the same pipeline for form-style editing.

pub mod catalog;
mod costs;
pub mod geodesy;
mod hashing;
pub mod invoice;
pub mod metrics;
mod pipeline;
mod rates;
mod session;

pub use catalog::{
    load_catalog, load_catalog_from_env, BankDetails, Catalog, CatalogConfigError,
    CatalogMetadata, Division, EstimatePolicy, RateGroups, RateTable, RoleSpec, TierRates,
    BUILTIN_CATALOG, CATALOG_PATH_ENV,
};
pub use costs::{aggregate, fuel_cost, personnel_lines};
pub use geodesy::{distance_km, EARTH_RADIUS_KM};
pub use hashing::{fingerprint_inputs, FnvHasher};
pub use invoice::{format_amount, format_currency, InvoiceLine, InvoiceSummary, LineKind};
pub use metrics::{compute_metrics, resolve_district, DistrictTarget, ResolvedDistrict};
pub use pipeline::{recompute, EstimateError};
pub use rates::{resolve_rate, RateTier};
pub use session::{MissionSession, SessionError, DEFAULT_ROLE};

pub use estimate_runtime::{
    Coordinate, DocumentDetails, Estimate, FurthestSite, MissionInputs, MissionMetrics,
    PersonnelEntry, PersonnelId, PersonnelLine, Site, SiteId, Totals,
};
