//! Batch-planning computation outputs.
//!
//! These are the shapes the planning engine produces and the admin API
//! returns; the persisted plan snapshot stores the same structures as JSONB.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use freshpaw_core::SubscriptionId;

use super::formulation::IngredientCategory;
use super::subscription::DogSubscriptionView;

/// One recipe's share of one subscription's delivery, flattened for
/// aggregation. Ephemeral - computed per planning request, never persisted
/// on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandLineItem {
    pub recipe_name: String,
    pub mass_grams: f64,
    pub source_subscription_id: SubscriptionId,
}

/// A single ingredient's purchase requirement within one recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientRequirement {
    pub ingredient_name: String,
    pub category: IngredientCategory,
    /// Base amount x the rounded-up batch count. Production cooks whole
    /// batches, so purchasing must cover the rounded-up amount, not the
    /// continuous scale factor.
    pub grams: f64,
}

/// Production requirement for one recipe on a cook date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRequirement {
    pub recipe: String,
    /// Raw demand, no buffer.
    pub total_grams_needed: f64,
    /// Demand with the safety buffer applied.
    pub total_grams_with_buffer: f64,
    /// Raw demand in pounds, for operator reference.
    pub total_pounds_needed: f64,
    /// Continuous ratio of buffered demand to base-batch yield. Exposed so
    /// operators can see how close they are to a whole-batch boundary.
    pub batch_scale_factor: f64,
    /// `ceil(batch_scale_factor)` - kitchens cannot cook a fractional batch.
    pub number_of_batches_to_cook: u32,
    /// Packs from unbuffered demand; the buffer covers waste, not extra
    /// packs sold.
    pub number_of_packs: u32,
    pub ingredient_requirements: Vec<IngredientRequirement>,
}

/// Cross-recipe shopping list entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedIngredient {
    pub ingredient_name: String,
    pub category: IngredientCategory,
    pub total_grams: f64,
    pub pounds: f64,
    pub kilograms: f64,
}

/// Why part of a plan was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    /// A dog had no recipe selected and contributed nothing.
    NoRecipeSelected,
    /// A demanded recipe has no formulation; it was skipped.
    MissingFormulation,
}

/// A non-fatal problem encountered while computing a plan.
///
/// Warnings let the UI distinguish "partially computed, some recipes
/// skipped" from both the empty and the error states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanWarning {
    pub code: WarningCode,
    pub message: String,
}

/// The full computed batch plan for one cook date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPlan {
    pub batch_date: NaiveDate,
    /// Last day to place vendor orders: `batch_date` minus the order lead
    /// time (two weeks by default).
    pub order_by_date: NaiveDate,
    /// Sum of per-recipe pack counts.
    pub total_packs: u32,
    pub dog_subscriptions: Vec<DogSubscriptionView>,
    pub recipe_requirements: Vec<RecipeRequirement>,
    pub consolidated_ingredients: Vec<ConsolidatedIngredient>,
    pub warnings: Vec<PlanWarning>,
}

impl BatchPlan {
    /// Whether there is anything to cook at all. An empty plan is a valid
    /// outcome (the UI's empty state), distinct from a failed computation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipe_requirements.is_empty()
    }
}
