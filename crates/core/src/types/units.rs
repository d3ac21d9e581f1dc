//! Mass unit conversions.
//!
//! Everything in the kitchen is tracked in grams; vendors quote in pounds.
//! Conversions use the precise factor 453.592 rather than the rounded 454 -
//! across multi-batch aggregates the rounding error would otherwise compound
//! into visible discrepancies on purchase orders.

/// Grams per pound. Precise constant; do not round to 454.
pub const GRAMS_PER_POUND: f64 = 453.592;

/// Grams per kilogram.
pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;

/// Convert a mass in grams to pounds.
#[must_use]
pub fn grams_to_pounds(grams: f64) -> f64 {
    grams / GRAMS_PER_POUND
}

/// Convert a mass in grams to kilograms.
#[must_use]
pub fn grams_to_kilograms(grams: f64) -> f64 {
    grams / GRAMS_PER_KILOGRAM
}
