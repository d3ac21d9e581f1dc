//! Purchase-order generation.
//!
//! Maps batch counts onto a vendor's catalog: per-ingredient pound
//! requirements, minimum-order-quantity case rounding, and pickup/needed-by
//! date arithmetic relative to the cook date.
//!
//! Ordering invariant: when one order covers several recipes, raw pound
//! requirements for the same ingredient are summed BEFORE the vendor's MOQ
//! rounding is applied. Rounding per recipe and then summing would
//! systematically over-order - two recipes each needing 2 lbs of eggs against
//! a 5 lb case must order 5 lbs, not 10.

use std::collections::HashMap;

use freshpaw_core::GRAMS_PER_POUND;

use crate::models::{
    FormulationTable, PurchaseOrderDraft, PurchaseOrderLineItem, RecipeBatchInput, Vendor,
};

use super::{PlanningError, dates};

/// Round a requirement up to the vendor's case increment.
///
/// A non-positive increment means the vendor sells loose quantities; the
/// requirement passes through unchanged. The small tolerance keeps float
/// error from bumping an exact case multiple up a whole extra case.
#[must_use]
pub fn round_up_to_case(required_lbs: f64, increment_lbs: f64) -> f64 {
    if increment_lbs <= 0.0 || required_lbs <= 0.0 {
        return required_lbs.max(0.0);
    }
    let cases = (required_lbs / increment_lbs - 1e-9).ceil().max(1.0);
    cases * increment_lbs
}

/// Generate one purchase order covering the given recipes.
///
/// Line items are the union of the recipes' formulations: raw requirements
/// (`base_grams x batches / 453.592`) merged by exact ingredient name first,
/// MOQ rounding applied once to each merged total. All recipes must share
/// `cook_date` semantics - the earliest cook date given anchors the
/// needed-by/pickup arithmetic so ingredients are on hand for the first run.
///
/// # Errors
///
/// Returns `PlanningError::NoRecipes` for an empty request and
/// `PlanningError::UnknownRecipe` if any recipe has no formulation.
pub fn generate(
    recipes: &[RecipeBatchInput],
    vendor: &Vendor,
    formulations: &FormulationTable,
) -> Result<PurchaseOrderDraft, PlanningError> {
    let Some(first) = recipes.first() else {
        return Err(PlanningError::NoRecipes);
    };
    let cook_date = recipes
        .iter()
        .map(|r| r.cook_date)
        .min()
        .unwrap_or(first.cook_date);

    // Merge raw pound requirements by exact ingredient name across recipes.
    // Insertion order is preserved so the order reads like the formulations.
    let mut order: Vec<String> = Vec::new();
    let mut required: HashMap<String, f64> = HashMap::new();

    for recipe in recipes {
        let formulation = formulations
            .get(&recipe.recipe_name)
            .ok_or_else(|| PlanningError::UnknownRecipe(recipe.recipe_name.clone()))?;

        for spec in &formulation.ingredients {
            let lbs =
                spec.base_grams * f64::from(recipe.batch_multiplier) / GRAMS_PER_POUND;
            match required.get_mut(&spec.name) {
                Some(total) => *total += lbs,
                None => {
                    order.push(spec.name.clone());
                    required.insert(spec.name.clone(), lbs);
                }
            }
        }
    }

    // MOQ rounding happens here, once, after consolidation.
    let line_items = order
        .into_iter()
        .map(|name| {
            let required_lbs = required.get(&name).copied().unwrap_or(0.0);
            let order_quantity_lbs = round_up_to_case(required_lbs, vendor.moq_for(&name));
            PurchaseOrderLineItem {
                ingredient_name: name,
                required_lbs,
                order_quantity_lbs,
            }
        })
        .collect();

    let needed_by = dates::needed_by_date(cook_date, vendor.lead_time_days);

    Ok(PurchaseOrderDraft {
        vendor_name: vendor.name.clone(),
        recipes: recipes.iter().map(|r| r.recipe_name.clone()).collect(),
        cook_date,
        needed_by_date: needed_by,
        pickup_date: dates::pickup_date(needed_by, vendor.pickup_weekday),
        line_items,
    })
}

/// Combine independently generated purchase orders into one.
///
/// Raw `required_lbs` for identical ingredient names are summed before the
/// vendor's MOQ rounding is reapplied to the combined totals, so combining
/// never orders more than the per-order roundings would have. Dates follow
/// the earliest constituent order.
///
/// # Errors
///
/// Returns `PlanningError::NoRecipes` when given no orders.
pub fn combine(
    drafts: &[PurchaseOrderDraft],
    vendor: &Vendor,
) -> Result<PurchaseOrderDraft, PlanningError> {
    let Some(first) = drafts.first() else {
        return Err(PlanningError::NoRecipes);
    };

    let mut order: Vec<String> = Vec::new();
    let mut required: HashMap<String, f64> = HashMap::new();
    let mut recipes = Vec::new();
    let mut cook_date = first.cook_date;

    for draft in drafts {
        cook_date = cook_date.min(draft.cook_date);
        recipes.extend(draft.recipes.iter().cloned());
        for line in &draft.line_items {
            match required.get_mut(&line.ingredient_name) {
                Some(total) => *total += line.required_lbs,
                None => {
                    order.push(line.ingredient_name.clone());
                    required.insert(line.ingredient_name.clone(), line.required_lbs);
                }
            }
        }
    }

    let line_items = order
        .into_iter()
        .map(|name| {
            let required_lbs = required.get(&name).copied().unwrap_or(0.0);
            let order_quantity_lbs = round_up_to_case(required_lbs, vendor.moq_for(&name));
            PurchaseOrderLineItem {
                ingredient_name: name,
                required_lbs,
                order_quantity_lbs,
            }
        })
        .collect();

    let needed_by = dates::needed_by_date(cook_date, vendor.lead_time_days);

    Ok(PurchaseOrderDraft {
        vendor_name: vendor.name.clone(),
        recipes,
        cook_date,
        needed_by_date: needed_by,
        pickup_date: dates::pickup_date(needed_by, vendor.pickup_weekday),
        line_items,
    })
}

/// Apply operator quantity overrides to a draft's line items.
///
/// The generated quantities are defaults, not an immutable result; the
/// persisted order carries whatever the operator settled on. Invalid edits
/// (negative, NaN, infinite) and overrides naming ingredients not on the
/// order are rejected whole - the draft keeps its previous valid values.
///
/// # Errors
///
/// Returns `PlanningError::InvalidQuantityOverride` or
/// `PlanningError::UnknownOverrideIngredient`; the draft is unchanged on
/// error.
pub fn apply_overrides(
    draft: &mut PurchaseOrderDraft,
    overrides: &HashMap<String, f64>,
) -> Result<(), PlanningError> {
    for (ingredient, &value) in overrides {
        if !value.is_finite() || value < 0.0 {
            return Err(PlanningError::InvalidQuantityOverride {
                ingredient: ingredient.clone(),
                value,
            });
        }
        if !draft
            .line_items
            .iter()
            .any(|l| l.ingredient_name == *ingredient)
        {
            return Err(PlanningError::UnknownOverrideIngredient(ingredient.clone()));
        }
    }

    for line in &mut draft.line_items {
        if let Some(&value) = overrides.get(&line.ingredient_name) {
            line.order_quantity_lbs = value;
        }
    }

    Ok(())
}

/// Validate a vendor can actually receive purchase orders.
///
/// # Errors
///
/// Returns `PlanningError::MissingVendorContact` when the vendor has no
/// contact email; persistence refuses to create an unsendable order.
pub fn validate_vendor(vendor: &Vendor) -> Result<(), PlanningError> {
    if vendor.contact_email.is_none() {
        return Err(PlanningError::MissingVendorContact(vendor.name.clone()));
    }
    Ok(())
}
