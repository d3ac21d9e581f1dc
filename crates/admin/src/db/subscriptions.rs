//! Read model of dog subscriptions.
//!
//! The planning core never writes here: subscription state is owned by the
//! checkout/billing side and this repository reads a snapshot of what is
//! active for a cook date.

use chrono::NaiveDate;
use sqlx::PgPool;
use sqlx::types::Json;

use freshpaw_core::SubscriptionId;

use super::RepositoryError;
use crate::models::DogSubscription;

/// Internal row type for subscription queries.
#[derive(Debug, sqlx::FromRow)]
struct DogSubscriptionRow {
    id: i32,
    dog_name: String,
    customer_email: String,
    is_test: bool,
    recipes: Json<Vec<String>>,
    daily_grams: f64,
    meals_per_day: i32,
    active_from: NaiveDate,
    active_until: Option<NaiveDate>,
}

impl From<DogSubscriptionRow> for DogSubscription {
    fn from(row: DogSubscriptionRow) -> Self {
        Self {
            subscription_id: SubscriptionId::new(row.id),
            dog_name: row.dog_name,
            customer_email: row.customer_email,
            is_test: row.is_test,
            recipes: row.recipes.0,
            daily_grams: row.daily_grams,
            meals_per_day: row.meals_per_day,
            active_from: row.active_from,
            active_until: row.active_until,
        }
    }
}

/// Repository for subscription reads.
pub struct SubscriptionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubscriptionRepository<'a> {
    /// Create a new subscription repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All subscriptions active on the given cook date, every customer kind
    /// included - the aggregator applies the production/test filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn active_on(
        &self,
        cook_date: NaiveDate,
    ) -> Result<Vec<DogSubscription>, RepositoryError> {
        let rows = sqlx::query_as::<_, DogSubscriptionRow>(
            r"
            SELECT
                id, dog_name, customer_email, is_test, recipes,
                daily_grams, meals_per_day, active_from, active_until
            FROM dog_subscriptions
            WHERE active_from <= $1
              AND (active_until IS NULL OR active_until >= $1)
            ORDER BY dog_name, id
            ",
        )
        .bind(cook_date)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
