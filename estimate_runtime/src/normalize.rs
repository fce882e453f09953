//! Normalisation of form values before they reach the estimator.
//!
//! The engine assumes well formed numbers; anything typed into a form goes
//! through one of these first.

/// Officer and day counts: whole numbers, never below one.
pub fn normalize_count(value: f64) -> u32 {
    if !value.is_finite() || value < 1.0 {
        return 1;
    }
    value.floor().min(u32::MAX as f64) as u32
}

/// Prices and other money amounts: finite and non-negative, zero otherwise.
pub fn normalize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Vehicle count: whole number, zero when missing or invalid.
pub fn normalize_fleet(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.floor().min(u32::MAX as f64) as u32
}

/// Parse a typed amount, treating anything unparseable as zero.
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .map(normalize_amount)
        .unwrap_or(0.0)
}
