//! Cross-recipe ingredient consolidation.
//!
//! Merges every recipe's scaled ingredient requirements into one shopping
//! list. The merge key is the ingredient's exact name string: differently
//! spelled entries for the same real-world ingredient stay separate lines.
//! That is deliberate - fuzzy merging would silently change purchase-order
//! totals.

use std::collections::HashMap;

use freshpaw_core::{grams_to_kilograms, grams_to_pounds};

use crate::models::{ConsolidatedIngredient, IngredientCategory, RecipeRequirement};

/// Consolidate ingredient requirements across recipes.
///
/// Output is sorted by the fixed category display order (protein, vegetable,
/// grain, oil, supplement, uncategorized), then by name within a category.
/// Summation order does not affect totals, so consolidating recipes in any
/// order yields the same list.
#[must_use]
pub fn consolidate(requirements: &[RecipeRequirement]) -> Vec<ConsolidatedIngredient> {
    let mut merged: HashMap<&str, (IngredientCategory, f64)> = HashMap::new();

    for requirement in requirements {
        for ingredient in &requirement.ingredient_requirements {
            let entry = merged
                .entry(ingredient.ingredient_name.as_str())
                .or_insert((ingredient.category, 0.0));
            entry.1 += ingredient.grams;
        }
    }

    let mut consolidated: Vec<ConsolidatedIngredient> = merged
        .into_iter()
        .map(|(name, (category, total_grams))| ConsolidatedIngredient {
            ingredient_name: name.to_string(),
            category,
            total_grams,
            pounds: grams_to_pounds(total_grams),
            kilograms: grams_to_kilograms(total_grams),
        })
        .collect();

    consolidated.sort_by(|a, b| {
        a.category
            .display_order()
            .cmp(&b.category.display_order())
            .then_with(|| a.ingredient_name.cmp(&b.ingredient_name))
    });

    consolidated
}

#[cfg(test)]
mod tests {
    use crate::models::IngredientRequirement;

    use super::*;

    fn requirement(recipe: &str, ingredients: &[(&str, IngredientCategory, f64)]) -> RecipeRequirement {
        RecipeRequirement {
            recipe: recipe.to_string(),
            total_grams_needed: 0.0,
            total_grams_with_buffer: 0.0,
            total_pounds_needed: 0.0,
            batch_scale_factor: 1.0,
            number_of_batches_to_cook: 1,
            number_of_packs: 0,
            ingredient_requirements: ingredients
                .iter()
                .map(|(name, category, grams)| IngredientRequirement {
                    ingredient_name: (*name).to_string(),
                    category: *category,
                    grams: *grams,
                })
                .collect(),
        }
    }

    #[test]
    fn test_shared_ingredients_merge_on_exact_name() {
        let beef = requirement(
            "Beef & Quinoa Harvest",
            &[
                ("Carrots, diced", IngredientCategory::Vegetable, 2000.0),
                ("Ground beef (90% lean/10% fat)", IngredientCategory::Protein, 10_000.0),
            ],
        );
        let chicken = requirement(
            "Chicken & Garden Veggie",
            &[
                ("Carrots, diced", IngredientCategory::Vegetable, 1500.0),
                ("Chicken breast, diced", IngredientCategory::Protein, 9000.0),
            ],
        );

        let list = consolidate(&[beef, chicken]);
        let carrots = list
            .iter()
            .find(|i| i.ingredient_name == "Carrots, diced")
            .expect("merged carrots");
        assert!((carrots.total_grams - 3500.0).abs() < 1e-9);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_different_spellings_do_not_merge() {
        let a = requirement("A", &[("Cod Liver Oil", IngredientCategory::Oil, 100.0)]);
        let b = requirement("B", &[("cod liver oil, refined", IngredientCategory::Oil, 50.0)]);

        let list = consolidate(&[a, b]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_consolidation_is_order_independent() {
        let a = requirement(
            "A",
            &[
                ("Eggs, Liquid whole", IngredientCategory::Protein, 907.184),
                ("Spinach, chopped", IngredientCategory::Vegetable, 300.0),
            ],
        );
        let b = requirement(
            "B",
            &[
                ("Eggs, Liquid whole", IngredientCategory::Protein, 907.184),
                ("Brown rice, cooked", IngredientCategory::Grain, 4000.0),
            ],
        );

        let forward = consolidate(&[a.clone(), b.clone()]);
        let backward = consolidate(&[b, a]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_category_grouping_order() {
        let req = requirement(
            "Mixed",
            &[
                ("Vitamin premix", IngredientCategory::Supplement, 50.0),
                ("Salmon oil", IngredientCategory::Oil, 120.0),
                ("Chicken breast, diced", IngredientCategory::Protein, 9000.0),
                ("Bone meal powder", IngredientCategory::Uncategorized, 80.0),
                ("Quinoa, cooked", IngredientCategory::Grain, 5000.0),
                ("Carrots, diced", IngredientCategory::Vegetable, 2000.0),
            ],
        );

        let categories: Vec<IngredientCategory> =
            consolidate(&[req]).iter().map(|i| i.category).collect();
        assert_eq!(
            categories,
            vec![
                IngredientCategory::Protein,
                IngredientCategory::Vegetable,
                IngredientCategory::Grain,
                IngredientCategory::Oil,
                IngredientCategory::Supplement,
                IngredientCategory::Uncategorized,
            ]
        );
    }

    #[test]
    fn test_unit_conversions_are_exact_ratios() {
        let req = requirement(
            "A",
            &[("Ground beef (90% lean/10% fat)", IngredientCategory::Protein, 30_617.46)],
        );
        let list = consolidate(&[req]);
        let beef = &list[0];
        assert!((beef.pounds - beef.total_grams / 453.592).abs() < f64::EPSILON);
        assert!((beef.kilograms - beef.total_grams / 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_input_gives_empty_list() {
        assert!(consolidate(&[]).is_empty());
    }
}
