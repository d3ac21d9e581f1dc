//! End-to-end purchase-order tests against the shipped configuration.

use std::collections::HashMap;

use chrono::NaiveDate;

use freshpaw_admin::models::RecipeBatchInput;
use freshpaw_admin::planning::po_generator;
use freshpaw_integration_tests::{shipped_formulations, shipped_vendors};

fn cook_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 8).expect("valid date")
}

fn input(recipe: &str, batches: u32) -> RecipeBatchInput {
    RecipeBatchInput {
        recipe_name: recipe.to_string(),
        batch_multiplier: batches,
        cook_date: cook_date(),
    }
}

#[test]
fn test_po_for_three_beef_batches() {
    let vendors = shipped_vendors();
    let vendor = vendors.resolve(None).expect("primary vendor");
    let draft = po_generator::generate(
        &[input("Beef & Quinoa Harvest", 3)],
        vendor,
        &shipped_formulations(),
    )
    .expect("draft");

    let beef = draft
        .line_items
        .iter()
        .find(|l| l.ingredient_name == "Ground beef (90% lean/10% fat)")
        .expect("beef line");
    // 10205.82g x 3 / 453.592 = 67.5 lbs, rounded up to a 70 lb order
    assert!((beef.required_lbs - 67.5).abs() < 0.01);
    assert!((beef.order_quantity_lbs - 70.0).abs() < 1e-9);

    // Oils carry a 1 lb per-ingredient MOQ instead of the 5 lb default
    let salmon_oil = draft
        .line_items
        .iter()
        .find(|l| l.ingredient_name == "Salmon oil")
        .expect("salmon oil line");
    assert!((salmon_oil.required_lbs - 1.5).abs() < 0.01);
    assert!((salmon_oil.order_quantity_lbs - 2.0).abs() < 1e-9);

    // Cook Thursday 2026-01-08, 3-day lead -> Monday 2026-01-05, which is
    // the Monday pickup itself
    assert_eq!(
        draft.needed_by_date,
        NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date")
    );
    assert_eq!(draft.pickup_date, draft.needed_by_date);
}

#[test]
fn test_combining_orders_never_over_orders() {
    let vendors = shipped_vendors();
    let vendor = vendors.resolve(None).expect("primary vendor");
    let formulations = shipped_formulations();

    let beef = po_generator::generate(&[input("Beef & Quinoa Harvest", 1)], vendor, &formulations)
        .expect("beef");
    let chicken =
        po_generator::generate(&[input("Chicken & Garden Veggie", 1)], vendor, &formulations)
            .expect("chicken");
    let turkey = po_generator::generate(
        &[input("Turkey & Brown Rice Comfort", 1)],
        vendor,
        &formulations,
    )
    .expect("turkey");

    let naive_total: f64 = beef.total_order_lbs() + chicken.total_order_lbs() + turkey.total_order_lbs();
    let combined =
        po_generator::combine(&[beef, chicken, turkey], vendor).expect("combined");

    assert!(combined.total_order_lbs() <= naive_total + 1e-9);

    // Eggs appear in all three recipes at 2 lbs per batch: 6 lbs raw,
    // one 10 lb order combined instead of three 5 lb orders
    let eggs = combined
        .line_items
        .iter()
        .find(|l| l.ingredient_name == "Eggs, Liquid whole")
        .expect("eggs line");
    assert!((eggs.required_lbs - 6.0).abs() < 0.01);
    assert!((eggs.order_quantity_lbs - 10.0).abs() < 1e-9);
}

#[test]
fn test_operator_overrides_flow_through_to_the_order() {
    let vendors = shipped_vendors();
    let vendor = vendors.resolve(None).expect("primary vendor");
    let mut draft = po_generator::generate(
        &[input("Beef & Quinoa Harvest", 3)],
        vendor,
        &shipped_formulations(),
    )
    .expect("draft");

    let overrides = HashMap::from([
        ("Ground beef (90% lean/10% fat)".to_string(), 68.0),
        ("Quinoa, cooked".to_string(), 30.0),
    ]);
    po_generator::apply_overrides(&mut draft, &overrides).expect("apply");

    let beef = draft
        .line_items
        .iter()
        .find(|l| l.ingredient_name == "Ground beef (90% lean/10% fat)")
        .expect("beef line");
    assert!((beef.order_quantity_lbs - 68.0).abs() < 1e-9);
    // Untouched lines keep their computed quantities
    let premix = draft
        .line_items
        .iter()
        .find(|l| l.ingredient_name == "Vitamin & mineral premix")
        .expect("premix line");
    assert!((premix.order_quantity_lbs - 2.0).abs() < 1e-9);
}

#[test]
fn test_invalid_override_is_rejected_whole() {
    let vendors = shipped_vendors();
    let vendor = vendors.resolve(None).expect("primary vendor");
    let mut draft = po_generator::generate(
        &[input("Beef & Quinoa Harvest", 1)],
        vendor,
        &shipped_formulations(),
    )
    .expect("draft");
    let before = draft.line_items.clone();

    // One valid and one invalid override: nothing may be applied
    let overrides = HashMap::from([
        ("Ground beef (90% lean/10% fat)".to_string(), 25.0),
        ("Quinoa, cooked".to_string(), -3.0),
    ]);
    assert!(po_generator::apply_overrides(&mut draft, &overrides).is_err());
    assert_eq!(draft.line_items, before);
}

#[test]
fn test_secondary_vendor_uses_its_own_schedule_and_moq() {
    let vendors = shipped_vendors();
    let coop = vendors
        .resolve(Some("Pacific Provisions Co-op"))
        .expect("co-op vendor");
    let draft = po_generator::generate(
        &[input("Beef & Quinoa Harvest", 1)],
        coop,
        &shipped_formulations(),
    )
    .expect("draft");

    // 5-day lead from Thursday 2026-01-08 -> Saturday 2026-01-03; Thursday
    // pickup steps back to 2026-01-01
    assert_eq!(
        draft.needed_by_date,
        NaiveDate::from_ymd_opt(2026, 1, 3).expect("valid date")
    );
    assert_eq!(
        draft.pickup_date,
        NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date")
    );

    // No per-ingredient overrides here: everything rounds to 10 lb cases
    for line in &draft.line_items {
        let cases = line.order_quantity_lbs / 10.0;
        assert!((cases - cases.round()).abs() < 1e-9, "{} not in 10 lb cases", line.ingredient_name);
    }
}
