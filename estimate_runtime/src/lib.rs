//! Shared runtime utilities for the survey mission estimator.
//!
//! This crate re-exports the data contracts from `estimate_schema` and adds
//! the helpers that turn collaborator input into those types (boundary
//! document parsing, numeric normalisation, mission manifests) without
//! depending on the estimation engine in `core_estimate`.

pub use estimate_schema::*;

pub mod boundary;
pub mod manifest;
pub mod normalize;

pub use boundary::{
    parse_boundary_document, parse_vertex_list, BoundaryParseError, ParsedBoundary,
};
pub use manifest::{
    manifest_schema, ManifestPersonnel, ManifestValidationError, MissionManifest,
};
pub use normalize::{normalize_amount, normalize_count, normalize_fleet, parse_amount};
