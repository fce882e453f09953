use crate::catalog::{Catalog, Division};

/// Priced tier a district falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateTier {
    GroupA,
    GroupB,
    Other,
}

impl Catalog {
    /// Division of a role label. Unknown roles are paid as Division I.
    pub fn division_for(&self, role: &str) -> Division {
        self.role(role)
            .map(|spec| spec.division)
            .unwrap_or(Division::I)
    }

    /// Tier of a district name, trimmed and compared case-insensitively.
    pub fn tier_for(&self, district: &str) -> RateTier {
        let wanted = district.trim().to_lowercase();
        let listed = |names: &[String]| names.iter().any(|name| name.to_lowercase() == wanted);
        if listed(self.rate_groups.group_a.as_slice()) {
            RateTier::GroupA
        } else if listed(self.rate_groups.group_b.as_slice()) {
            RateTier::GroupB
        } else {
            RateTier::Other
        }
    }

    pub fn resolve_rate(&self, role: &str, district: &str) -> f64 {
        resolve_rate(self, role, district)
    }
}

/// Daily subsistence rate for `role` working out of `district`.
pub fn resolve_rate(catalog: &Catalog, role: &str, district: &str) -> f64 {
    let rates = catalog.rate_table.for_division(catalog.division_for(role));
    match catalog.tier_for(district) {
        RateTier::GroupA => rates.group_a,
        RateTier::GroupB => rates.group_b,
        RateTier::Other => rates.other,
    }
}
