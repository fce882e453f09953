//! Mutable mission state behind the estimate form.
//!
//! Every successful mutation re-runs [`recompute`] and swaps in the new
//! [`Estimate`] as a whole, so readers never see a mix of old and new inputs.

use std::sync::Arc;

use estimate_runtime::{
    normalize_amount, normalize_count, normalize_fleet, parse_boundary_document,
    BoundaryParseError, Coordinate, Estimate, MissionInputs, MissionManifest, PersonnelEntry,
    PersonnelId, Site, SiteId,
};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::pipeline::{recompute, EstimateError};

pub const DEFAULT_ROLE: &str = "Mine Surveyor";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Estimate(#[from] EstimateError),
    #[error("personnel entry {0} not found")]
    UnknownPersonnel(PersonnelId),
    #[error("the last personnel entry cannot be removed")]
    LastPersonnel,
    #[error("boundary document '{name}' rejected: {source}")]
    Boundary {
        name: String,
        #[source]
        source: BoundaryParseError,
    },
}

#[derive(Debug, Clone)]
pub struct MissionSession {
    catalog: Arc<Catalog>,
    inputs: MissionInputs,
    next_site: u32,
    next_personnel: u32,
    estimate: Estimate,
}

impl MissionSession {
    /// Fresh mission at the catalog's default station with one surveyor.
    pub fn new(catalog: Arc<Catalog>) -> Result<Self, SessionError> {
        let mut inputs = MissionInputs::new(catalog.default_station.clone());
        inputs
            .personnel
            .push(PersonnelEntry::new(PersonnelId(0), DEFAULT_ROLE, 1, 1));
        let estimate = recompute(&inputs, &catalog)?;
        Ok(Self {
            catalog,
            inputs,
            next_site: 0,
            next_personnel: 1,
            estimate,
        })
    }

    /// Build a session from a manifest and the already-read boundary documents
    /// (`(name, contents)` pairs).
    pub fn from_manifest(
        catalog: Arc<Catalog>,
        manifest: &MissionManifest,
        documents: &[(String, String)],
    ) -> Result<Self, SessionError> {
        let mut session = Self::new(catalog)?;

        if let Some(station) = &manifest.station {
            session.set_station(station)?;
        }
        if let Some(district) = &manifest.manual_district {
            session.set_manual_district(district.clone());
        }

        let mut roster = manifest.personnel.iter();
        if let Some(first) = roster.next() {
            let id = PersonnelId(0);
            session.set_role(id, first.role.clone())?;
            session.set_officers(id, normalize_count(first.officers))?;
            session.set_days(id, normalize_count(first.days))?;
        }
        for entry in roster {
            let id = session.add_personnel(entry.role.clone());
            session.set_officers(id, normalize_count(entry.officers))?;
            session.set_days(id, normalize_count(entry.days))?;
        }

        session.set_fuel_price(manifest.fuel_price);
        session.set_fleet_count(manifest.fleet_count);

        for (name, contents) in documents {
            session
                .add_boundary_document(name, contents)
                .map_err(|source| SessionError::Boundary {
                    name: name.clone(),
                    source,
                })?;
        }

        // Adding boundaries clears the marker, so it goes last.
        if manifest.custom_override.is_some() {
            session.set_custom_override(manifest.custom_override);
        }

        Ok(session)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn inputs(&self) -> &MissionInputs {
        &self.inputs
    }

    pub fn estimate(&self) -> &Estimate {
        &self.estimate
    }

    pub fn sites(&self) -> &[Site] {
        &self.inputs.sites
    }

    pub fn personnel(&self) -> &[PersonnelEntry] {
        &self.inputs.personnel
    }

    /// Parse a boundary document and add every site it describes.
    ///
    /// A rejected document leaves the session untouched.
    pub fn add_boundary_document(
        &mut self,
        name: &str,
        document: &str,
    ) -> Result<Vec<SiteId>, BoundaryParseError> {
        let parsed = parse_boundary_document(document)?;
        let mut added = Vec::with_capacity(parsed.len());
        for (index, boundary) in parsed.into_iter().enumerate() {
            let id = SiteId(self.next_site);
            self.next_site = self.next_site.wrapping_add(1);
            let site_name = if index == 0 {
                name.to_string()
            } else {
                format!("{name} #{}", index + 1)
            };
            self.inputs.sites.push(boundary.into_site(id, site_name));
            added.push(id);
        }
        self.inputs.custom_override = None;

        tracing::info!(
            target: "survey_estimate::session",
            document = name,
            sites = added.len(),
            "sites.added"
        );
        self.refresh();
        Ok(added)
    }

    pub fn remove_site(&mut self, id: SiteId) -> bool {
        let before = self.inputs.sites.len();
        self.inputs.sites.retain(|site| site.id != id);
        let removed = self.inputs.sites.len() != before;
        if removed {
            tracing::info!(target: "survey_estimate::session", %id, "sites.removed");
            self.refresh();
        }
        removed
    }

    /// Switch base station. Unknown keys are rejected without changing anything.
    pub fn set_station(&mut self, key: &str) -> Result<(), SessionError> {
        if self.catalog.station(key).is_none() {
            return Err(EstimateError::UnknownStation(key.to_string()).into());
        }
        self.inputs.station = key.to_string();
        self.inputs.custom_override = None;
        self.refresh();
        Ok(())
    }

    pub fn set_manual_district(&mut self, text: impl Into<String>) {
        self.inputs.manual_district = text.into();
        self.inputs.custom_override = None;
        self.refresh();
    }

    /// Place (or clear) the repositioned district marker. A marker that is not
    /// a finite, in-range coordinate clears the override.
    pub fn set_custom_override(&mut self, point: Option<Coordinate>) {
        self.inputs.custom_override = point.filter(|point| {
            let valid = point.is_finite() && point.in_range();
            if !valid {
                tracing::warn!(
                    target: "survey_estimate::session",
                    lat = point.lat,
                    lng = point.lng,
                    "override.rejected"
                );
            }
            valid
        });
        self.refresh();
    }

    pub fn add_personnel(&mut self, role: impl Into<String>) -> PersonnelId {
        let id = PersonnelId(self.next_personnel);
        self.next_personnel = self.next_personnel.wrapping_add(1);
        self.inputs
            .personnel
            .push(PersonnelEntry::new(id, role, 1, 1));
        self.refresh();
        id
    }

    pub fn remove_personnel(&mut self, id: PersonnelId) -> Result<(), SessionError> {
        let index = self.personnel_index(id)?;
        if self.inputs.personnel.len() <= 1 {
            return Err(SessionError::LastPersonnel);
        }
        self.inputs.personnel.remove(index);
        self.refresh();
        Ok(())
    }

    pub fn set_role(&mut self, id: PersonnelId, role: impl Into<String>) -> Result<(), SessionError> {
        let index = self.personnel_index(id)?;
        self.inputs.personnel[index].role = role.into();
        self.refresh();
        Ok(())
    }

    pub fn set_officers(&mut self, id: PersonnelId, officers: u32) -> Result<(), SessionError> {
        let index = self.personnel_index(id)?;
        self.inputs.personnel[index].officers = officers.max(1);
        self.refresh();
        Ok(())
    }

    pub fn set_days(&mut self, id: PersonnelId, days: u32) -> Result<(), SessionError> {
        let index = self.personnel_index(id)?;
        self.inputs.personnel[index].days = days.max(1);
        self.refresh();
        Ok(())
    }

    pub fn set_fuel_price(&mut self, price: f64) {
        self.inputs.fuel_price = normalize_amount(price);
        self.refresh();
    }

    pub fn set_fleet_count(&mut self, count: f64) {
        self.inputs.fleet_count = normalize_fleet(count);
        self.refresh();
    }

    /// Rate a role would get against the current rate district, for display
    /// before the role change is committed.
    pub fn preview_rate(&self, role: &str) -> f64 {
        self.catalog.resolve_rate(role, &self.estimate.rate_district)
    }

    fn personnel_index(&self, id: PersonnelId) -> Result<usize, SessionError> {
        self.inputs
            .personnel
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(SessionError::UnknownPersonnel(id))
    }

    fn refresh(&mut self) {
        match recompute(&self.inputs, &self.catalog) {
            Ok(estimate) => self.estimate = estimate,
            Err(err) => {
                tracing::warn!(
                    target: "survey_estimate::session",
                    error = %err,
                    "estimate.recompute_failed"
                );
            }
        }
    }
}
