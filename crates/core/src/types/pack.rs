//! Pack and portion math shared by checkout and batch planning.
//!
//! A subscription is sold in fixed-size packs. Checkout quotes a customer
//! packs-per-day and packs-per-month from their dog's daily caloric need;
//! batch planning reconciles subscription sizes against production totals
//! with the same arithmetic. Keeping both on this one implementation is what
//! guarantees the storefront quote and the kitchen plan agree.

use serde::{Deserialize, Serialize};

/// The standard pack size: 12 oz in grams.
pub const DEFAULT_PACK_SIZE_GRAMS: f64 = 340.19;

/// Days in a billing month. Deliberately not calendar-accurate: existing
/// subscriptions were priced on a 30-day convention and changing it would
/// silently reprice them.
pub const DAYS_PER_BILLING_MONTH: u32 = 30;

/// Days covered by one bi-weekly delivery.
pub const DAYS_PER_DELIVERY: u32 = 14;

/// Pack counts derived from a dog's daily mass requirement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackPortionInfo {
    /// Size of a single pack in grams.
    pub pack_size_grams: f64,
    /// Whole packs needed per day.
    pub packs_per_day: u32,
    /// Whole packs needed per 30-day billing month.
    pub packs_per_month: u32,
    /// Whole packs shipped in one bi-weekly delivery.
    pub packs_per_delivery: u32,
}

impl PackPortionInfo {
    /// Compute pack counts for a daily requirement in grams.
    ///
    /// `packs_per_delivery` is derived from the monthly rate
    /// (`ceil(packs_per_month / 30 * 14)`) rather than recomputed from the
    /// daily figure, so the two stay consistent by construction.
    #[must_use]
    pub fn for_daily_grams(daily_grams: f64, pack_size_grams: f64) -> Self {
        let packs_per_day = ceil_div(daily_grams, pack_size_grams);
        let packs_per_month = packs_per_day * DAYS_PER_BILLING_MONTH;
        let packs_per_delivery = (f64::from(packs_per_month)
            / f64::from(DAYS_PER_BILLING_MONTH)
            * f64::from(DAYS_PER_DELIVERY))
        .ceil() as u32;

        Self {
            pack_size_grams,
            packs_per_day,
            packs_per_month,
            packs_per_delivery,
        }
    }
}

/// Whole packs needed to cover `grams` at `pack_size_grams` per pack.
///
/// Zero or negative demand needs zero packs.
#[must_use]
pub fn ceil_div(grams: f64, pack_size_grams: f64) -> u32 {
    if grams <= 0.0 || pack_size_grams <= 0.0 {
        return 0;
    }
    (grams / pack_size_grams).ceil() as u32
}
