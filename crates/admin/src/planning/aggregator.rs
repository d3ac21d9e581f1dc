//! Subscription demand aggregation.
//!
//! Flattens every active dog subscription into per-recipe demand line items
//! for one cook cycle and sums them per recipe. Multi-recipe dogs split
//! their delivery mass evenly across their selected recipes, each share
//! contributing an independent line item.

use std::collections::BTreeMap;

use freshpaw_core::{CustomerFilter, PackPortionInfo};

use crate::models::{
    DemandLineItem, DogSubscription, DogSubscriptionView, PlanWarning, WarningCode,
};

use super::PlanningConfig;

/// Output of the aggregation pass.
#[derive(Debug, Clone)]
pub struct AggregationResult {
    /// Flattened demand, one entry per (dog, recipe) pair.
    pub line_items: Vec<DemandLineItem>,
    /// Total grams demanded per recipe. `BTreeMap` keeps recipe order
    /// deterministic for display and tests.
    pub recipe_totals: BTreeMap<String, f64>,
    /// Per-dog breakdown for the operator view.
    pub dog_views: Vec<DogSubscriptionView>,
    /// Dogs skipped because they had no recipe selected.
    pub warnings: Vec<PlanWarning>,
}

/// Aggregate subscriptions into per-recipe demand for one cook cycle.
///
/// Subscriptions failing the customer filter are excluded entirely (they do
/// not appear in the dog views either). A dog with no recipe selected is
/// skipped with a warning rather than failing the whole aggregation.
#[must_use]
pub fn aggregate(
    subscriptions: &[DogSubscription],
    filter: CustomerFilter,
    config: &PlanningConfig,
) -> AggregationResult {
    let mut line_items = Vec::new();
    let mut recipe_totals: BTreeMap<String, f64> = BTreeMap::new();
    let mut dog_views = Vec::new();
    let mut warnings = Vec::new();

    for subscription in subscriptions {
        if !filter.includes(subscription.is_test) {
            continue;
        }

        if subscription.recipes.is_empty() {
            tracing::warn!(
                dog = %subscription.dog_name,
                subscription_id = %subscription.subscription_id,
                "dog has no recipe selected; skipping"
            );
            warnings.push(PlanWarning {
                code: WarningCode::NoRecipeSelected,
                message: format!(
                    "{} ({}) has no recipe selected and was skipped",
                    subscription.dog_name, subscription.customer_email
                ),
            });
            continue;
        }

        let delivery_grams =
            subscription.daily_grams * f64::from(config.delivery_cadence_days);
        let per_recipe_grams = delivery_grams / subscription.recipes.len() as f64;

        for recipe_name in &subscription.recipes {
            line_items.push(DemandLineItem {
                recipe_name: recipe_name.clone(),
                mass_grams: per_recipe_grams,
                source_subscription_id: subscription.subscription_id,
            });
            *recipe_totals.entry(recipe_name.clone()).or_insert(0.0) += per_recipe_grams;
        }

        dog_views.push(DogSubscriptionView {
            subscription_id: subscription.subscription_id,
            dog_name: subscription.dog_name.clone(),
            customer_email: subscription.customer_email.clone(),
            is_test: subscription.is_test,
            recipes: subscription.recipes.clone(),
            daily_grams: subscription.daily_grams,
            delivery_grams,
            packs: PackPortionInfo::for_daily_grams(
                subscription.daily_grams,
                config.pack_size_grams,
            ),
        });
    }

    AggregationResult {
        line_items,
        recipe_totals,
        dog_views,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use freshpaw_core::SubscriptionId;

    use super::*;

    fn subscription(
        id: i32,
        dog: &str,
        recipes: &[&str],
        daily_grams: f64,
        is_test: bool,
    ) -> DogSubscription {
        DogSubscription {
            subscription_id: SubscriptionId::new(id),
            dog_name: dog.to_string(),
            customer_email: format!("{}@example.com", dog.to_lowercase()),
            is_test,
            recipes: recipes.iter().map(ToString::to_string).collect(),
            daily_grams,
            meals_per_day: 2,
            active_from: NaiveDate::from_ymd_opt(2026, 1, 1).expect("date"),
            active_until: None,
        }
    }

    #[test]
    fn test_demand_covers_one_delivery_cycle() {
        let subs = vec![subscription(1, "Biscuit", &["Beef & Quinoa Harvest"], 300.0, false)];
        let result = aggregate(&subs, CustomerFilter::Production, &PlanningConfig::default());

        // 300g/day x 14 days
        let total = result.recipe_totals["Beef & Quinoa Harvest"];
        assert!((total - 4200.0).abs() < 1e-9);
        assert_eq!(result.line_items.len(), 1);
        assert_eq!(result.dog_views.len(), 1);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_multi_recipe_dog_splits_evenly() {
        let subs = vec![subscription(
            1,
            "Rex",
            &["Beef & Quinoa Harvest", "Chicken & Garden Veggie"],
            400.0,
            false,
        )];
        let result = aggregate(&subs, CustomerFilter::Production, &PlanningConfig::default());

        // 400 x 14 = 5600, split 2800/2800; each share is its own line item
        assert!((result.recipe_totals["Beef & Quinoa Harvest"] - 2800.0).abs() < 1e-9);
        assert!((result.recipe_totals["Chicken & Garden Veggie"] - 2800.0).abs() < 1e-9);
        assert_eq!(result.line_items.len(), 2);
    }

    #[test]
    fn test_customer_filter_excludes_test_accounts() {
        let subs = vec![
            subscription(1, "Biscuit", &["Beef & Quinoa Harvest"], 300.0, false),
            subscription(2, "QaDog", &["Beef & Quinoa Harvest"], 1000.0, true),
        ];

        let production =
            aggregate(&subs, CustomerFilter::Production, &PlanningConfig::default());
        assert!((production.recipe_totals["Beef & Quinoa Harvest"] - 4200.0).abs() < 1e-9);
        assert_eq!(production.dog_views.len(), 1);

        let test_only = aggregate(&subs, CustomerFilter::Test, &PlanningConfig::default());
        assert!((test_only.recipe_totals["Beef & Quinoa Harvest"] - 14000.0).abs() < 1e-9);

        let all = aggregate(&subs, CustomerFilter::All, &PlanningConfig::default());
        assert!((all.recipe_totals["Beef & Quinoa Harvest"] - 18200.0).abs() < 1e-9);
        assert_eq!(all.dog_views.len(), 2);
    }

    #[test]
    fn test_dog_without_recipe_is_skipped_with_warning() {
        let subs = vec![
            subscription(1, "Biscuit", &["Beef & Quinoa Harvest"], 300.0, false),
            subscription(2, "Mystery", &[], 500.0, false),
        ];
        let result = aggregate(&subs, CustomerFilter::Production, &PlanningConfig::default());

        assert_eq!(result.dog_views.len(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, WarningCode::NoRecipeSelected);
        assert!(result.warnings[0].message.contains("Mystery"));
        // The skipped dog contributes no demand
        assert!((result.recipe_totals["Beef & Quinoa Harvest"] - 4200.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_subscriptions_is_an_empty_result_not_an_error() {
        let result = aggregate(&[], CustomerFilter::Production, &PlanningConfig::default());
        assert!(result.line_items.is_empty());
        assert!(result.recipe_totals.is_empty());
        assert!(result.dog_views.is_empty());
        assert!(result.warnings.is_empty());
    }
}
