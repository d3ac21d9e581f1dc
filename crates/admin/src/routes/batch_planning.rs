//! Batch-planning route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::instrument;

use freshpaw_core::CustomerFilter;

use crate::{
    db::{BatchPlanRepository, SavedBatchPlan, SubscriptionRepository},
    error::AppError,
    models::{BatchPlan, ConsolidatedIngredient, RecipeRequirement},
    planning::{self, csv_export},
    state::AppState,
};

/// Query parameters for the batch-planning computation.
#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    /// Cook date the plan targets.
    pub cook_date: NaiveDate,
    /// Which customers to include; production-only when omitted.
    #[serde(default)]
    pub customer_filter: CustomerFilter,
}

/// Request body for saving a plan snapshot.
#[derive(Debug, Deserialize)]
pub struct SavePlanRequest {
    pub batch_date: NaiveDate,
    pub recipe_requirements: Vec<RecipeRequirement>,
    pub consolidated_ingredients: Vec<ConsolidatedIngredient>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Compute the batch plan for a cook date.
///
/// An empty plan (nothing to cook) is a successful response with empty
/// arrays; skipped dogs/recipes surface in `warnings`, never as an HTTP
/// error.
#[instrument(skip(state))]
pub async fn plan(
    State(state): State<AppState>,
    Query(query): Query<PlanQuery>,
) -> Result<Json<BatchPlan>, AppError> {
    let subscriptions = SubscriptionRepository::new(state.pool())
        .active_on(query.cook_date)
        .await?;

    let plan = planning::build_plan(
        query.cook_date,
        query.customer_filter,
        &subscriptions,
        state.formulations(),
        &state.config().planning,
    );

    tracing::info!(
        cook_date = %query.cook_date,
        customer_filter = %query.customer_filter,
        recipes = plan.recipe_requirements.len(),
        total_packs = plan.total_packs,
        warnings = plan.warnings.len(),
        "Batch plan computed"
    );

    Ok(Json(plan))
}

/// Save (upsert) a plan snapshot keyed by its batch date.
#[instrument(skip(state, request))]
pub async fn save(
    State(state): State<AppState>,
    Json(request): Json<SavePlanRequest>,
) -> Result<Json<SavedBatchPlan>, AppError> {
    let saved = BatchPlanRepository::new(state.pool())
        .upsert(
            request.batch_date,
            &request.recipe_requirements,
            &request.consolidated_ingredients,
            request.notes.as_deref(),
        )
        .await?;

    tracing::info!(batch_date = %saved.batch_date, "Batch plan saved");
    Ok(Json(saved))
}

/// Fetch a previously saved plan snapshot.
#[instrument(skip(state))]
pub async fn get_saved(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<SavedBatchPlan>, AppError> {
    BatchPlanRepository::new(state.pool())
        .get(date)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no saved plan for {date}")))
}

/// Export the consolidated shopping list as CSV.
#[instrument(skip(state))]
pub async fn shopping_list_csv(
    State(state): State<AppState>,
    Query(query): Query<PlanQuery>,
) -> Result<impl IntoResponse, AppError> {
    let subscriptions = SubscriptionRepository::new(state.pool())
        .active_on(query.cook_date)
        .await?;

    let plan = planning::build_plan(
        query.cook_date,
        query.customer_filter,
        &subscriptions,
        state.formulations(),
        &state.config().planning,
    );

    let csv = csv_export::shopping_list_csv(&plan.consolidated_ingredients)
        .map_err(|e| AppError::Internal(format!("CSV export failed: {e}")))?;

    let filename = format!("shopping-list-{}.csv", query.cook_date);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}
