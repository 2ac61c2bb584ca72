// Payment amount validation
//
// The claimed amount is checked against the authoritative offer price
// before any charge is attempted.

use thiserror::Error;

/// Minimum excess of the claimed amount over the listed price, in major
/// currency units. Charges below `price + MIN_MARGIN` are refused.
pub const MIN_MARGIN: f64 = 3.0;

/// The claimed amount does not cover the listed price plus margin
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("price mismatch: claimed {claimed}, listed {listed}")]
pub struct PriceMismatch {
    pub claimed: f64,
    pub listed: f64,
}

/// Validate a client-declared amount against the listed price.
/// Passes iff `claimed - listed >= MIN_MARGIN`.
pub fn validate_claimed_amount(listed: f64, claimed: f64) -> Result<(), PriceMismatch> {
    if claimed - listed >= MIN_MARGIN {
        Ok(())
    } else {
        Err(PriceMismatch { claimed, listed })
    }
}

/// Convert a major-unit amount to the smallest currency unit,
/// rounded to the nearest integer.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}
