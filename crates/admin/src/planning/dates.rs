//! Cook-date arithmetic.
//!
//! Invariant: every cook date is anchored to 12:00 UTC before any lead-time
//! math. Anchoring at local midnight caused order-by and pickup dates to
//! drift a day for operators west of UTC; noon keeps the calendar date
//! stable across every timezone the team works from.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};

/// Anchor a calendar date at noon UTC.
///
/// # Panics
///
/// Never panics: 12:00:00 is valid on every calendar date.
#[must_use]
pub fn noon_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(12, 0, 0)
        .expect("12:00:00 is valid on every date")
        .and_utc()
}

/// Last day to place vendor orders for a cook date.
#[must_use]
pub fn order_by_date(cook_date: NaiveDate, lead_time_days: u32) -> NaiveDate {
    (noon_utc(cook_date) - Duration::days(i64::from(lead_time_days))).date_naive()
}

/// Day the ingredients must be on hand: cook date minus the vendor's lead
/// time.
#[must_use]
pub fn needed_by_date(cook_date: NaiveDate, vendor_lead_time_days: u32) -> NaiveDate {
    (noon_utc(cook_date) - Duration::days(i64::from(vendor_lead_time_days))).date_naive()
}

/// The vendor's scheduled pickup day nearest to, but not after, `needed_by`.
///
/// If `needed_by` itself falls on the pickup weekday, pickup is that day.
#[must_use]
pub fn pickup_date(needed_by: NaiveDate, pickup_weekday: Weekday) -> NaiveDate {
    let days_back = (needed_by.weekday().num_days_from_monday() + 7
        - pickup_weekday.num_days_from_monday())
        % 7;
    (noon_utc(needed_by) - Duration::days(i64::from(days_back))).date_naive()
}
