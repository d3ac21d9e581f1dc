//! Saved batch-plan snapshots.
//!
//! A plan is recomputed on demand; saving one freezes the computed
//! requirements and shopping list (as JSONB) plus the operator's notes,
//! keyed by cook date. Saving the same date again replaces the snapshot.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use sqlx::types::Json;

use freshpaw_core::BatchPlanId;

use super::RepositoryError;
use crate::models::{ConsolidatedIngredient, RecipeRequirement};

/// A persisted batch-plan snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedBatchPlan {
    pub id: BatchPlanId,
    pub batch_date: NaiveDate,
    pub recipe_requirements: Vec<RecipeRequirement>,
    pub consolidated_ingredients: Vec<ConsolidatedIngredient>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Internal row type for batch-plan queries.
#[derive(Debug, sqlx::FromRow)]
struct BatchPlanRow {
    id: i32,
    batch_date: NaiveDate,
    recipe_requirements: Json<Vec<RecipeRequirement>>,
    consolidated_ingredients: Json<Vec<ConsolidatedIngredient>>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BatchPlanRow> for SavedBatchPlan {
    fn from(row: BatchPlanRow) -> Self {
        Self {
            id: BatchPlanId::new(row.id),
            batch_date: row.batch_date,
            recipe_requirements: row.recipe_requirements.0,
            consolidated_ingredients: row.consolidated_ingredients.0,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for batch-plan persistence.
pub struct BatchPlanRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BatchPlanRepository<'a> {
    /// Create a new batch-plan repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Upsert the snapshot for a cook date.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails. No partial
    /// state is possible - the snapshot is a single row.
    pub async fn upsert(
        &self,
        batch_date: NaiveDate,
        recipe_requirements: &[RecipeRequirement],
        consolidated_ingredients: &[ConsolidatedIngredient],
        notes: Option<&str>,
    ) -> Result<SavedBatchPlan, RepositoryError> {
        let row = sqlx::query_as::<_, BatchPlanRow>(
            r"
            INSERT INTO batch_plans (
                batch_date, recipe_requirements, consolidated_ingredients, notes
            )
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (batch_date) DO UPDATE
            SET recipe_requirements = EXCLUDED.recipe_requirements,
                consolidated_ingredients = EXCLUDED.consolidated_ingredients,
                notes = EXCLUDED.notes,
                updated_at = now()
            RETURNING
                id, batch_date, recipe_requirements, consolidated_ingredients,
                notes, created_at, updated_at
            ",
        )
        .bind(batch_date)
        .bind(Json(recipe_requirements))
        .bind(Json(consolidated_ingredients))
        .bind(notes)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Fetch the snapshot for a cook date.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        batch_date: NaiveDate,
    ) -> Result<Option<SavedBatchPlan>, RepositoryError> {
        let row = sqlx::query_as::<_, BatchPlanRow>(
            r"
            SELECT
                id, batch_date, recipe_requirements, consolidated_ingredients,
                notes, created_at, updated_at
            FROM batch_plans
            WHERE batch_date = $1
            ",
        )
        .bind(batch_date)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}
