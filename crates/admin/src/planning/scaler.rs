//! Batch scaling.
//!
//! Turns aggregated per-recipe demand into whole-base-batch production
//! requirements. The continuous scale factor is kept alongside the rounded
//! batch count: the factor tells operators how close they are to a batch
//! boundary, the ceiling is what the kitchen actually cooks.

use std::collections::BTreeMap;

use freshpaw_core::{grams_to_pounds, pack};

use crate::models::{
    FormulationTable, IngredientRequirement, PlanWarning, RecipeRequirement, WarningCode,
};

use super::PlanningConfig;

/// Scale each demanded recipe to whole base batches.
///
/// Recipes with zero (or negative) demand are omitted entirely - a
/// zero-batch line is never emitted. A recipe without a formulation is
/// skipped with a warning; it must not abort the other recipes.
#[must_use]
pub fn scale_recipes(
    recipe_totals: &BTreeMap<String, f64>,
    formulations: &FormulationTable,
    config: &PlanningConfig,
    warnings: &mut Vec<PlanWarning>,
) -> Vec<RecipeRequirement> {
    let mut requirements = Vec::with_capacity(recipe_totals.len());

    for (recipe_name, &total_grams_needed) in recipe_totals {
        if total_grams_needed <= 0.0 {
            continue;
        }

        let Some(formulation) = formulations.get(recipe_name) else {
            tracing::warn!(
                recipe = %recipe_name,
                demand_grams = total_grams_needed,
                "no formulation for demanded recipe; skipping"
            );
            warnings.push(PlanWarning {
                code: WarningCode::MissingFormulation,
                message: format!("no formulation for recipe {recipe_name}; skipped"),
            });
            continue;
        };

        requirements.push(scale_recipe(recipe_name, total_grams_needed, formulation, config));
    }

    requirements
}

fn scale_recipe(
    recipe_name: &str,
    total_grams_needed: f64,
    formulation: &crate::models::RecipeFormulation,
    config: &PlanningConfig,
) -> RecipeRequirement {
    let total_grams_with_buffer = total_grams_needed * (1.0 + config.buffer_fraction);
    let batch_scale_factor = total_grams_with_buffer / formulation.base_batch_mass_grams;
    let number_of_batches_to_cook = batch_scale_factor.ceil() as u32;

    // Packs come from unbuffered demand: the buffer absorbs cooking loss and
    // QA samples, it is not extra packs sold.
    let number_of_packs = pack::ceil_div(total_grams_needed, config.pack_size_grams);

    // Ingredient purchasing covers the rounded-up batch count, not the
    // continuous factor: the kitchen cooks whole batches.
    let ingredient_requirements = formulation
        .ingredients
        .iter()
        .map(|spec| IngredientRequirement {
            ingredient_name: spec.name.clone(),
            category: spec.category,
            grams: spec.base_grams * f64::from(number_of_batches_to_cook),
        })
        .collect();

    RecipeRequirement {
        recipe: recipe_name.to_string(),
        total_grams_needed,
        total_grams_with_buffer,
        total_pounds_needed: grams_to_pounds(total_grams_needed),
        batch_scale_factor,
        number_of_batches_to_cook,
        number_of_packs,
        ingredient_requirements,
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{IngredientCategory, IngredientSpec, RecipeFormulation};

    use super::*;

    fn beef_table() -> FormulationTable {
        FormulationTable::from_recipes(vec![RecipeFormulation {
            recipe_name: "Beef & Quinoa Harvest".to_string(),
            base_batch_mass_grams: 22_696.86,
            kcal_per_kg: 1520.0,
            estimated: false,
            ingredients: vec![IngredientSpec {
                name: "Ground beef (90% lean/10% fat)".to_string(),
                base_grams: 10_205.82,
                category: IngredientCategory::Protein,
            }],
        }])
        .expect("table")
    }

    fn totals(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries
            .iter()
            .map(|(name, grams)| ((*name).to_string(), *grams))
            .collect()
    }

    #[test]
    fn test_worked_beef_example() {
        // 45kg demand -> 49.5kg buffered -> factor ~2.1805 -> 3 batches
        let mut warnings = Vec::new();
        let requirements = scale_recipes(
            &totals(&[("Beef & Quinoa Harvest", 45_000.0)]),
            &beef_table(),
            &PlanningConfig::default(),
            &mut warnings,
        );

        assert_eq!(requirements.len(), 1);
        let req = &requirements[0];
        assert!((req.total_grams_with_buffer - 49_500.0).abs() < 1e-9);
        assert!((req.batch_scale_factor - 2.1809).abs() < 0.001);
        assert_eq!(req.number_of_batches_to_cook, 3);

        // Beef at 3 batches: 10205.82 x 3 = 30617.46g (~67.5 lbs)
        let beef = &req.ingredient_requirements[0];
        assert!((beef.grams - 30_617.46).abs() < 1e-9);
        assert!((grams_to_pounds(beef.grams) - 67.5).abs() < 0.01);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_batch_count_is_ceiling_of_scale_factor() {
        let table = beef_table();
        let config = PlanningConfig::default();
        let mut warnings = Vec::new();

        for demand in [1.0, 5_000.0, 20_633.5, 22_696.86, 45_000.0, 100_000.0] {
            let requirements = scale_recipes(
                &totals(&[("Beef & Quinoa Harvest", demand)]),
                &table,
                &config,
                &mut warnings,
            );
            let req = &requirements[0];
            assert_eq!(
                req.number_of_batches_to_cook,
                req.batch_scale_factor.ceil() as u32
            );
            assert!(f64::from(req.number_of_batches_to_cook) >= req.batch_scale_factor);
        }
    }

    #[test]
    fn test_zero_demand_recipe_is_omitted() {
        let mut warnings = Vec::new();
        let requirements = scale_recipes(
            &totals(&[("Beef & Quinoa Harvest", 0.0)]),
            &beef_table(),
            &PlanningConfig::default(),
            &mut warnings,
        );
        assert!(requirements.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_missing_formulation_skips_without_aborting_others() {
        let mut warnings = Vec::new();
        let requirements = scale_recipes(
            &totals(&[
                ("Beef & Quinoa Harvest", 10_000.0),
                ("Lamb & Lentil Feast", 8_000.0),
            ]),
            &beef_table(),
            &PlanningConfig::default(),
            &mut warnings,
        );

        assert_eq!(requirements.len(), 1);
        assert_eq!(requirements[0].recipe, "Beef & Quinoa Harvest");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, WarningCode::MissingFormulation);
        assert!(warnings[0].message.contains("Lamb & Lentil Feast"));
    }

    #[test]
    fn test_packs_computed_from_unbuffered_demand() {
        let mut warnings = Vec::new();
        let requirements = scale_recipes(
            &totals(&[("Beef & Quinoa Harvest", 3400.0)]),
            &beef_table(),
            &PlanningConfig::default(),
            &mut warnings,
        );
        // 3400 / 340.19 -> 10 packs; buffering first (3740g) would wrongly
        // give 11
        assert_eq!(requirements[0].number_of_packs, 10);
    }

    #[test]
    fn test_batches_round_up_only_past_the_boundary() {
        let table = beef_table();
        let config = PlanningConfig::default();
        let mut warnings = Vec::new();

        // Buffered demand just under one base batch stays at one batch
        let just_under = scale_recipes(
            &totals(&[("Beef & Quinoa Harvest", 20_600.0)]),
            &table,
            &config,
            &mut warnings,
        );
        assert!(just_under[0].batch_scale_factor < 1.0);
        assert_eq!(just_under[0].number_of_batches_to_cook, 1);

        // Just over the boundary needs a second batch
        let just_over = scale_recipes(
            &totals(&[("Beef & Quinoa Harvest", 20_700.0)]),
            &table,
            &config,
            &mut warnings,
        );
        assert!(just_over[0].batch_scale_factor > 1.0);
        assert_eq!(just_over[0].number_of_batches_to_cook, 2);
    }
}
