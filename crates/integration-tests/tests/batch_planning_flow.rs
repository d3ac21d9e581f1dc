//! End-to-end batch-planning tests against the shipped configuration.

use chrono::NaiveDate;

use freshpaw_admin::planning::{self, PlanningConfig, csv_export};
use freshpaw_core::CustomerFilter;
use freshpaw_integration_tests::{shipped_formulations, subscription};

fn cook_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 8).expect("valid date")
}

#[test]
fn test_single_recipe_plan_matches_worked_example() {
    // ~45kg of beef demand over the cycle: 15 dogs at 214.285714g/day x 14
    // days = 3000g each
    let subs: Vec<_> = (1..=15)
        .map(|i| {
            subscription(
                i,
                &format!("Dog{i}"),
                &["Beef & Quinoa Harvest"],
                3000.0 / 14.0,
                false,
            )
        })
        .collect();

    let plan = planning::build_plan(
        cook_date(),
        CustomerFilter::Production,
        &subs,
        &shipped_formulations(),
        &PlanningConfig::default(),
    );

    assert_eq!(plan.recipe_requirements.len(), 1);
    let beef = &plan.recipe_requirements[0];
    assert!((beef.total_grams_needed - 45_000.0).abs() < 0.01);
    assert!((beef.total_grams_with_buffer - 49_500.0).abs() < 0.01);
    assert!((beef.batch_scale_factor - 2.1809).abs() < 0.001);
    assert_eq!(beef.number_of_batches_to_cook, 3);

    let ground_beef = beef
        .ingredient_requirements
        .iter()
        .find(|i| i.ingredient_name == "Ground beef (90% lean/10% fat)")
        .expect("beef requirement");
    assert!((ground_beef.grams - 30_617.46).abs() < 0.01);

    // order-by date is two weeks ahead of the cook date
    assert_eq!(
        plan.order_by_date,
        NaiveDate::from_ymd_opt(2025, 12, 25).expect("valid date")
    );
}

#[test]
fn test_batch_count_dominates_scale_factor_for_any_demand() {
    let formulations = shipped_formulations();
    let config = PlanningConfig::default();

    for daily_grams in [57.0, 113.0, 320.0, 540.0, 1021.0] {
        let subs = vec![subscription(1, "Sim", &["Beef & Quinoa Harvest"], daily_grams, false)];
        let plan = planning::build_plan(
            cook_date(),
            CustomerFilter::Production,
            &subs,
            &formulations,
            &config,
        );
        for requirement in &plan.recipe_requirements {
            assert_eq!(
                requirement.number_of_batches_to_cook,
                requirement.batch_scale_factor.ceil() as u32,
            );
            assert!(
                f64::from(requirement.number_of_batches_to_cook)
                    >= requirement.batch_scale_factor
            );
        }
    }
}

#[test]
fn test_undemanded_recipes_are_absent() {
    let subs = vec![subscription(1, "Biscuit", &["Beef & Quinoa Harvest"], 320.0, false)];
    let plan = planning::build_plan(
        cook_date(),
        CustomerFilter::Production,
        &subs,
        &shipped_formulations(),
        &PlanningConfig::default(),
    );

    assert_eq!(plan.recipe_requirements.len(), 1);
    assert!(
        !plan
            .recipe_requirements
            .iter()
            .any(|r| r.recipe == "Turkey & Brown Rice Comfort")
    );
}

#[test]
fn test_empty_demand_is_an_empty_plan_not_an_error() {
    let plan = planning::build_plan(
        cook_date(),
        CustomerFilter::Production,
        &[],
        &shipped_formulations(),
        &PlanningConfig::default(),
    );

    assert!(plan.is_empty());
    assert_eq!(plan.total_packs, 0);
    assert!(plan.warnings.is_empty());
    assert!(plan.consolidated_ingredients.is_empty());
}

#[test]
fn test_unknown_recipe_demand_becomes_a_warning() {
    let subs = vec![
        subscription(1, "Biscuit", &["Beef & Quinoa Harvest"], 320.0, false),
        subscription(2, "Ghost", &["Discontinued Duck Dinner"], 400.0, false),
    ];
    let plan = planning::build_plan(
        cook_date(),
        CustomerFilter::Production,
        &subs,
        &shipped_formulations(),
        &PlanningConfig::default(),
    );

    // The beef plan still computes; the unknown recipe is a warning
    assert_eq!(plan.recipe_requirements.len(), 1);
    assert_eq!(plan.warnings.len(), 1);
    assert!(plan.warnings[0].message.contains("Discontinued Duck Dinner"));
    // Both dogs appear in the per-dog view; only the demand was skipped
    assert_eq!(plan.dog_subscriptions.len(), 2);
}

#[test]
fn test_shared_ingredients_consolidate_across_recipes() {
    // Beef and chicken recipes both use carrots and liquid eggs
    let subs = vec![
        subscription(1, "Biscuit", &["Beef & Quinoa Harvest"], 600.0, false),
        subscription(2, "Peanut", &["Chicken & Garden Veggie"], 600.0, false),
    ];
    let plan = planning::build_plan(
        cook_date(),
        CustomerFilter::Production,
        &subs,
        &shipped_formulations(),
        &PlanningConfig::default(),
    );

    let carrots = plan
        .consolidated_ingredients
        .iter()
        .filter(|i| i.ingredient_name == "Carrots, diced")
        .count();
    assert_eq!(carrots, 1, "shared ingredient must be one consolidated line");

    let eggs = plan
        .consolidated_ingredients
        .iter()
        .find(|i| i.ingredient_name == "Eggs, Liquid whole")
        .expect("eggs");
    let expected = 907.184
        * f64::from(
            plan.recipe_requirements
                .iter()
                .map(|r| r.number_of_batches_to_cook)
                .sum::<u32>(),
        );
    assert!((eggs.total_grams - expected).abs() < 0.01);
}

#[test]
fn test_total_packs_sums_per_recipe_counts() {
    let subs = vec![
        subscription(1, "Biscuit", &["Beef & Quinoa Harvest"], 320.0, false),
        subscription(2, "Luna", &["Turkey & Brown Rice Comfort"], 260.0, false),
    ];
    let plan = planning::build_plan(
        cook_date(),
        CustomerFilter::Production,
        &subs,
        &shipped_formulations(),
        &PlanningConfig::default(),
    );

    let sum: u32 = plan.recipe_requirements.iter().map(|r| r.number_of_packs).sum();
    assert_eq!(plan.total_packs, sum);
    assert!(plan.total_packs > 0);
}

#[test]
fn test_csv_export_round_trips_the_shopping_list() {
    let subs = vec![
        subscription(1, "Biscuit", &["Beef & Quinoa Harvest"], 500.0, false),
        subscription(2, "Peanut", &["Chicken & Garden Veggie"], 400.0, false),
    ];
    let plan = planning::build_plan(
        cook_date(),
        CustomerFilter::Production,
        &subs,
        &shipped_formulations(),
        &PlanningConfig::default(),
    );

    let csv_text =
        csv_export::shopping_list_csv(&plan.consolidated_ingredients).expect("csv renders");

    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let rows: Vec<csv::StringRecord> =
        reader.records().collect::<Result<_, _>>().expect("csv parses");

    assert_eq!(rows.len(), plan.consolidated_ingredients.len());
    for (row, ingredient) in rows.iter().zip(&plan.consolidated_ingredients) {
        assert_eq!(row.get(0), Some(ingredient.ingredient_name.as_str()));
        let grams: f64 = row.get(1).expect("grams").parse().expect("number");
        let pounds: f64 = row.get(2).expect("pounds").parse().expect("number");
        let kilograms: f64 = row.get(3).expect("kg").parse().expect("number");
        assert!((grams - ingredient.total_grams).abs() < 0.01);
        assert!((pounds - ingredient.pounds).abs() < 0.01);
        assert!((kilograms - ingredient.kilograms).abs() < 0.01);
        assert_eq!(row.get(4), Some(ingredient.category.label()));
    }
}

#[test]
fn test_untagged_shipped_ingredient_lands_in_uncategorized() {
    use freshpaw_admin::models::IngredientCategory;

    let subs = vec![subscription(1, "Luna", &["Turkey & Brown Rice Comfort"], 300.0, false)];
    let plan = planning::build_plan(
        cook_date(),
        CustomerFilter::Production,
        &subs,
        &shipped_formulations(),
        &PlanningConfig::default(),
    );

    let bone_meal = plan
        .consolidated_ingredients
        .iter()
        .find(|i| i.ingredient_name == "Bone meal powder")
        .expect("bone meal");
    assert_eq!(bone_meal.category, IngredientCategory::Uncategorized);
    // Uncategorized sorts after every tagged category
    assert_eq!(
        plan.consolidated_ingredients
            .last()
            .map(|i| i.ingredient_name.as_str()),
        Some("Bone meal powder")
    );
}
