//! Invoice line items handed to the document renderer.

use std::fmt::Write as _;

use estimate_runtime::{DocumentDetails, Estimate, MissionInputs};
use serde::Serialize;

use crate::catalog::{BankDetails, Catalog};

const LABEL_WIDTH: usize = 48;
const AMOUNT_WIDTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Personnel,
    Fuel,
    Subtotal,
    Contingency,
    Total,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceLine {
    pub kind: LineKind,
    pub label: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceSummary {
    pub station: String,
    pub rate_district: String,
    pub furthest_site: Option<String>,
    pub total_distance_km: f64,
    pub fleet_count: u32,
    pub details: DocumentDetails,
    pub lines: Vec<InvoiceLine>,
    pub bank: BankDetails,
}

impl InvoiceSummary {
    pub fn build(
        estimate: &Estimate,
        inputs: &MissionInputs,
        catalog: &Catalog,
        details: &DocumentDetails,
    ) -> Self {
        let totals = &estimate.totals;
        let mut lines: Vec<InvoiceLine> = estimate
            .personnel
            .iter()
            .map(|line| InvoiceLine {
                kind: LineKind::Personnel,
                label: format!(
                    "{} (qty:{} x days:{})",
                    line.role, line.officers, line.days
                ),
                amount: line.cost,
            })
            .collect();

        lines.push(InvoiceLine {
            kind: LineKind::Fuel,
            label: format!(
                "Logistics & Fuel ({:.1}km, {} Unit/s)",
                estimate.metrics.total_distance_km, inputs.fleet_count
            ),
            amount: totals.fuel_total,
        });
        lines.push(InvoiceLine {
            kind: LineKind::Subtotal,
            label: "Sub-total".to_string(),
            amount: totals.cumulative_total,
        });
        lines.push(InvoiceLine {
            kind: LineKind::Contingency,
            label: format!(
                "{}% Contingency",
                (catalog.policy.contingency_rate * 100.0).round()
            ),
            amount: totals.contingency,
        });
        lines.push(InvoiceLine {
            kind: LineKind::Total,
            label: "TOTAL DUE (ZMW)".to_string(),
            amount: totals.grand_total,
        });

        Self {
            station: estimate.station.clone(),
            rate_district: estimate.rate_district.clone(),
            furthest_site: estimate
                .metrics
                .furthest_site
                .as_ref()
                .map(|site| site.name.clone()),
            total_distance_km: estimate.metrics.total_distance_km,
            fleet_count: inputs.fleet_count,
            details: details.clone(),
            lines,
            bank: catalog.bank.clone(),
        }
    }

    pub fn total_due(&self) -> f64 {
        self.lines
            .iter()
            .find(|line| line.kind == LineKind::Total)
            .map(|line| line.amount)
            .unwrap_or(0.0)
    }

    /// Plain-text rendering of the invoice.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let details = &self.details;

        let _ = writeln!(out, "SURVEY MISSION ESTIMATE");
        if !details.attention.is_empty() {
            let _ = writeln!(out, "Attention: {}", details.attention);
        }
        let _ = writeln!(out, "Base station: {}", self.station);
        let _ = writeln!(out, "Rate district: {}", self.rate_district);
        let _ = writeln!(
            out,
            "Furthest site: {}",
            self.furthest_site.as_deref().unwrap_or("none")
        );
        let _ = writeln!(out, "Total distance: {:.1} km", self.total_distance_km);
        let description = if details.work_description.is_empty() {
            "No description provided."
        } else {
            details.work_description.as_str()
        };
        let _ = writeln!(out, "Work: {description}");
        let _ = writeln!(out);

        let _ = writeln!(
            out,
            "{:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}",
            "Particulars", "Amount (ZMW)"
        );
        let _ = writeln!(out, "{}", "-".repeat(LABEL_WIDTH + AMOUNT_WIDTH));
        for line in &self.lines {
            if line.kind == LineKind::Subtotal || line.kind == LineKind::Total {
                let _ = writeln!(out, "{}", "-".repeat(LABEL_WIDTH + AMOUNT_WIDTH));
            }
            let _ = writeln!(
                out,
                "{:<LABEL_WIDTH$}{:>AMOUNT_WIDTH$}",
                line.label,
                format_amount(line.amount)
            );
        }
        let _ = writeln!(out);

        if !details.prepared_by.is_empty() {
            let _ = writeln!(
                out,
                "Prepared by: {} ({})",
                details.prepared_by, details.prepared_title
            );
        }
        if !details.checked_by.is_empty() {
            let _ = writeln!(
                out,
                "Checked by: {} ({})",
                details.checked_by, details.checked_title
            );
        }

        let bank = &self.bank;
        let _ = writeln!(out, "SETTLEMENT TO: {}", bank.account_name);
        let _ = writeln!(out, "BANK: {} | BRANCH: {}", bank.bank_name, bank.branch);
        let _ = write!(
            out,
            "ACC: {} | SWIFT: {}",
            bank.account_number, bank.swift_code
        );
        out
    }
}

/// Two decimals with thousands separators, e.g. `12,345.60`.
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

pub fn format_currency(amount: f64) -> String {
    format!("ZMW {}", format_amount(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MissionSession;
    use estimate_runtime::PersonnelId;

    #[test]
    fn amounts_are_grouped() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(-4500.5), "-4,500.50");
        assert_eq!(format_currency(11220.0), "ZMW 11,220.00");
    }

    fn two_person_session() -> MissionSession {
        let mut session = MissionSession::new(Catalog::builtin()).expect("session");
        session.set_officers(PersonnelId(0), 2).expect("entry");
        session.set_days(PersonnelId(0), 3).expect("entry");
        let driver = session.add_personnel("Driver");
        session.set_days(driver, 3).expect("entry");
        session.set_fuel_price(27.0);
        session
    }

    #[test]
    fn lines_follow_the_estimate() {
        let session = two_person_session();
        let invoice = InvoiceSummary::build(
            session.estimate(),
            session.inputs(),
            session.catalog(),
            &DocumentDetails::default(),
        );
        let kinds: Vec<LineKind> = invoice.lines.iter().map(|line| line.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::Personnel,
                LineKind::Personnel,
                LineKind::Fuel,
                LineKind::Subtotal,
                LineKind::Contingency,
                LineKind::Total,
            ]
        );
        assert_eq!(invoice.lines[0].label, "Mine Surveyor (qty:2 x days:3)");
        assert_eq!(invoice.total_due(), session.estimate().totals.grand_total);
    }

    #[test]
    fn text_rendering() {
        let session = two_person_session();
        let invoice = InvoiceSummary::build(
            session.estimate(),
            session.inputs(),
            session.catalog(),
            &DocumentDetails::default(),
        );
        insta::assert_snapshot!(invoice.render_text(), @r###"
        SURVEY MISSION ESTIMATE
        Base station: Lusaka
        Rate district: Lusaka
        Furthest site: none
        Total distance: 0.0 km
        Work: No description provided.

        Particulars                                         Amount (ZMW)
        ----------------------------------------------------------------
        Mine Surveyor (qty:2 x days:3)                          7,500.00
        Driver (qty:1 x days:3)                                 2,700.00
        Logistics & Fuel (0.0km, 1 Unit/s)                          0.00
        ----------------------------------------------------------------
        Sub-total                                              10,200.00
        10% Contingency                                         1,020.00
        ----------------------------------------------------------------
        TOTAL DUE (ZMW)                                        11,220.00

        SETTLEMENT TO: MAP PRODUCTION FUNDS
        BANK: ZAMBIA NATIONAL COMMERCIAL BANK | BRANCH: CIVIC CENTRE
        ACC: 0020756300173 | SWIFT: ZNCOZMLU
        "###);
    }
}
