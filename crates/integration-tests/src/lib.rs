//! Shared helpers for Freshpaw integration tests.
//!
//! The tests exercise the batch-planning engine end-to-end against the
//! shipped formulation and vendor configuration, without a database or a
//! running server - the engine is pure computation over a subscription
//! snapshot.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::NaiveDate;

use freshpaw_admin::models::{DogSubscription, FormulationTable, VendorTable};
use freshpaw_core::SubscriptionId;

/// Load the formulation table shipped in `crates/admin/config/`.
///
/// # Panics
///
/// Panics if the shipped configuration is missing or invalid - that is
/// itself a test failure.
#[must_use]
pub fn shipped_formulations() -> FormulationTable {
    let path = admin_config_path("formulations.json");
    FormulationTable::load(&path).expect("shipped formulations.json must load")
}

/// Load the vendor catalog shipped in `crates/admin/config/`.
///
/// # Panics
///
/// Panics if the shipped configuration is missing or invalid.
#[must_use]
pub fn shipped_vendors() -> VendorTable {
    let path = admin_config_path("vendors.json");
    VendorTable::load(&path).expect("shipped vendors.json must load")
}

fn admin_config_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../admin/config")
        .join(file)
}

/// Build a subscription snapshot row for tests.
#[must_use]
pub fn subscription(
    id: i32,
    dog_name: &str,
    recipes: &[&str],
    daily_grams: f64,
    is_test: bool,
) -> DogSubscription {
    DogSubscription {
        subscription_id: SubscriptionId::new(id),
        dog_name: dog_name.to_string(),
        customer_email: format!("{}@example.com", dog_name.to_lowercase()),
        is_test,
        recipes: recipes.iter().map(ToString::to_string).collect(),
        daily_grams,
        meals_per_day: 2,
        active_from: NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date"),
        active_until: None,
    }
}
