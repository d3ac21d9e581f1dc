//! Batch production planning engine.
//!
//! A planning request runs end-to-end in one pass over a read-only snapshot
//! of subscription data: aggregation ([`aggregator`]) -> batch scaling
//! ([`scaler`]) -> ingredient consolidation ([`consolidator`]) -> optional
//! purchase-order generation ([`po_generator`]). Everything here is
//! synchronous, stateless between invocations, and free of I/O; the route
//! layer owns all database and email calls.

pub mod aggregator;
pub mod consolidator;
pub mod csv_export;
pub mod dates;
pub mod po_generator;
pub mod scaler;

use chrono::NaiveDate;

use freshpaw_core::CustomerFilter;

use crate::models::{BatchPlan, DogSubscription, FormulationTable};

/// Named planning constants.
///
/// These were easy to lose as scattered literals; keeping them in one struct
/// makes them testable and overridable per deployment.
#[derive(Debug, Clone, Copy)]
pub struct PlanningConfig {
    /// Safety margin applied to raw demand before batch scaling. Covers
    /// cooking loss, spillage, and QA samples - not extra packs sold.
    pub buffer_fraction: f64,
    /// Days before the cook date vendor orders must be placed.
    pub order_lead_time_days: u32,
    /// Days of food shipped per delivery (bi-weekly cadence).
    pub delivery_cadence_days: u32,
    /// Standard pack size in grams.
    pub pack_size_grams: f64,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            buffer_fraction: 0.10,
            order_lead_time_days: 14,
            delivery_cadence_days: 14,
            pack_size_grams: freshpaw_core::pack::DEFAULT_PACK_SIZE_GRAMS,
        }
    }
}

/// Errors from purchase-order computation.
///
/// Data-lookup failures during plan computation are warnings, not errors
/// (the rest of the plan still computes); these are the genuinely fatal
/// cases on the purchase-order path.
#[derive(Debug, thiserror::Error)]
pub enum PlanningError {
    /// A purchase order named a recipe with no formulation.
    #[error("no formulation for recipe {0:?}")]
    UnknownRecipe(String),

    /// A purchase order named a vendor that is not configured.
    #[error("unknown vendor {0:?}")]
    UnknownVendor(String),

    /// The vendor has no contact email; the order could never be sent.
    #[error("vendor {0:?} has no contact email configured")]
    MissingVendorContact(String),

    /// An operator-edited quantity was negative or not a number. The edit is
    /// rejected outright; the computed value stays in effect.
    #[error("invalid quantity override for {ingredient:?}: {value}")]
    InvalidQuantityOverride { ingredient: String, value: f64 },

    /// An operator override named an ingredient that is not on the order.
    #[error("quantity override for unknown ingredient {0:?}")]
    UnknownOverrideIngredient(String),

    /// A purchase order was requested with no recipes.
    #[error("purchase order requires at least one recipe")]
    NoRecipes,
}

/// Compute the full batch plan for a cook date.
///
/// This is the pipeline the batch-planning query runs: filter and aggregate
/// subscriptions, scale each demanded recipe to whole base batches, and
/// consolidate the scaled ingredient lists into one shopping list. Recipes
/// with zero demand are omitted; recipes without formulations are skipped
/// with a warning and do not abort the rest.
#[must_use]
pub fn build_plan(
    cook_date: NaiveDate,
    filter: CustomerFilter,
    subscriptions: &[DogSubscription],
    formulations: &FormulationTable,
    config: &PlanningConfig,
) -> BatchPlan {
    let aggregation = aggregator::aggregate(subscriptions, filter, config);
    let mut warnings = aggregation.warnings;

    let recipe_requirements = scaler::scale_recipes(
        &aggregation.recipe_totals,
        formulations,
        config,
        &mut warnings,
    );
    let consolidated_ingredients = consolidator::consolidate(&recipe_requirements);
    let total_packs = recipe_requirements.iter().map(|r| r.number_of_packs).sum();

    BatchPlan {
        batch_date: cook_date,
        order_by_date: dates::order_by_date(cook_date, config.order_lead_time_days),
        total_packs,
        dog_subscriptions: aggregation.dog_views,
        recipe_requirements,
        consolidated_ingredients,
        warnings,
    }
}
