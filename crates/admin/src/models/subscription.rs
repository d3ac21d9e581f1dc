//! Dog subscription read model.
//!
//! The aggregator consumes a denormalized snapshot of active subscriptions:
//! one row per dog with its selected recipes and daily feeding amount. The
//! snapshot is read-only for the duration of a planning request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use freshpaw_core::{PackPortionInfo, SubscriptionId};

/// An active dog subscription due for a cook date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DogSubscription {
    /// Subscription this dog's plan belongs to.
    pub subscription_id: SubscriptionId,
    /// Dog's display name.
    pub dog_name: String,
    /// Owning customer's email, for operator reference.
    pub customer_email: String,
    /// Test-account flag; filtered by `CustomerFilter`.
    pub is_test: bool,
    /// Selected recipe names. May be empty (dog skipped with a warning).
    pub recipes: Vec<String>,
    /// Daily feeding amount in grams (per-meal grams x meals per day).
    pub daily_grams: f64,
    /// Meals per day, informational.
    pub meals_per_day: i32,
    /// First cook date this subscription is active for.
    pub active_from: NaiveDate,
    /// Last cook date this subscription is active for, if paused/cancelled.
    pub active_until: Option<NaiveDate>,
}

/// Per-dog breakdown returned by the batch-planning query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DogSubscriptionView {
    pub subscription_id: SubscriptionId,
    pub dog_name: String,
    pub customer_email: String,
    pub is_test: bool,
    pub recipes: Vec<String>,
    pub daily_grams: f64,
    /// Mass due for this cook cycle (one bi-weekly delivery's worth).
    pub delivery_grams: f64,
    /// Pack counts at the standard pack size.
    pub packs: PackPortionInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_serializes_with_snake_case_fields() {
        let sub = DogSubscription {
            subscription_id: SubscriptionId::new(1),
            dog_name: "Biscuit".to_string(),
            customer_email: "owner@example.com".to_string(),
            is_test: false,
            recipes: vec!["Beef & Quinoa Harvest".to_string()],
            daily_grams: 320.0,
            meals_per_day: 2,
            active_from: NaiveDate::from_ymd_opt(2026, 1, 1).expect("date"),
            active_until: None,
        };

        let value = serde_json::to_value(&sub).expect("serialize");
        assert_eq!(value["dog_name"], "Biscuit");
        assert_eq!(value["daily_grams"], 320.0);
        assert!(value["active_until"].is_null());
    }
}
