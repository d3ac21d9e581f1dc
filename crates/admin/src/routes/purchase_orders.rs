//! Purchase-order route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use freshpaw_core::PurchaseOrderStatus;

use crate::{
    db::PurchaseOrderRepository,
    error::AppError,
    models::{CreatePurchaseOrderInput, PurchaseOrder, PurchaseOrderDraft, RecipeBatchInput, Vendor},
    planning::{PlanningError, po_generator},
    services::po_document,
    state::AppState,
};

/// Request body for the preview endpoint.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub recipes: Vec<RecipeBatchInput>,
    /// Vendor to order from; the primary supplier when omitted.
    #[serde(default)]
    pub vendor: Option<String>,
    /// Merge all recipes into one order (the default) or keep one preview
    /// per recipe.
    #[serde(default = "default_combine")]
    pub combine: bool,
}

const fn default_combine() -> bool {
    true
}

/// Preview response: the editable drafts.
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub purchase_orders: Vec<PurchaseOrderDraft>,
}

/// Summary of a created purchase order.
#[derive(Debug, Serialize)]
pub struct PurchaseOrderSummary {
    pub po_number: String,
    pub status: PurchaseOrderStatus,
}

/// Response for purchase-order creation.
#[derive(Debug, Serialize)]
pub struct CreatePurchaseOrderResponse {
    pub purchase_order: PurchaseOrderSummary,
    /// Set when the order was created but the vendor email could not be
    /// sent. The draft is intact; sending can be retried.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_error: Option<String>,
}

/// Query parameters for listing purchase orders.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

const fn default_limit() -> i64 {
    50
}

fn resolve_vendor<'a>(state: &'a AppState, name: Option<&str>) -> Result<&'a Vendor, AppError> {
    state.vendors().resolve(name).ok_or_else(|| {
        AppError::Planning(PlanningError::UnknownVendor(
            name.unwrap_or("(primary)").to_string(),
        ))
    })
}

/// Compute an editable purchase-order preview without persisting anything.
#[instrument(skip(state, request))]
pub async fn preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    let vendor = resolve_vendor(&state, request.vendor.as_deref())?;

    let purchase_orders = if request.combine {
        vec![po_generator::generate(
            &request.recipes,
            vendor,
            state.formulations(),
        )?]
    } else {
        request
            .recipes
            .iter()
            .map(|recipe| {
                po_generator::generate(
                    std::slice::from_ref(recipe),
                    vendor,
                    state.formulations(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(Json(PreviewResponse { purchase_orders }))
}

/// Create a purchase order, optionally dispatching the vendor email.
///
/// Creation is transactional: vendor validation or a persistence failure
/// leaves nothing behind. Email dispatch is a separate side effect - its
/// failure is reported in `email_error` and never rolls back the draft.
#[instrument(skip(state, input))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePurchaseOrderInput>,
) -> Result<Json<CreatePurchaseOrderResponse>, AppError> {
    let vendor = resolve_vendor(&state, input.vendor.as_deref())?;
    po_generator::validate_vendor(vendor)?;

    let mut draft = po_generator::generate(&input.recipes, vendor, state.formulations())?;
    po_generator::apply_overrides(&mut draft, &input.custom_quantities)?;

    let repo = PurchaseOrderRepository::new(state.pool());
    let order = repo
        .create(&draft, input.notes.as_deref(), Utc::now().date_naive())
        .await?;

    tracing::info!(
        po_number = %order.po_number,
        vendor = %order.vendor_name,
        lines = order.line_items.len(),
        "Purchase order created"
    );

    let (status, email_error) = if input.auto_send_email {
        send_vendor_email(&state, &repo, vendor, &order).await
    } else {
        (PurchaseOrderStatus::Draft, None)
    };

    Ok(Json(CreatePurchaseOrderResponse {
        purchase_order: PurchaseOrderSummary {
            po_number: order.po_number,
            status,
        },
        email_error,
    }))
}

/// Dispatch the vendor email for a freshly created order.
///
/// Returns the resulting status and, when sending failed, the reason. The
/// order stays a draft on any failure.
async fn send_vendor_email(
    state: &AppState,
    repo: &PurchaseOrderRepository<'_>,
    vendor: &Vendor,
    order: &PurchaseOrder,
) -> (PurchaseOrderStatus, Option<String>) {
    let Some(email_service) = state.email() else {
        return (
            PurchaseOrderStatus::Draft,
            Some("email sending is not configured".to_string()),
        );
    };
    // validate_vendor ran before creation, so a contact address exists
    let Some(contact) = vendor.contact_email.as_deref() else {
        return (
            PurchaseOrderStatus::Draft,
            Some("vendor has no contact email".to_string()),
        );
    };

    if let Err(e) = email_service.send_purchase_order(contact, order).await {
        tracing::error!(po_number = %order.po_number, error = %e, "Vendor email failed");
        return (PurchaseOrderStatus::Draft, Some(e.to_string()));
    }

    match repo.mark_sent(order.id).await {
        Ok(()) => (PurchaseOrderStatus::Sent, None),
        Err(e) => {
            tracing::error!(
                po_number = %order.po_number,
                error = %e,
                "Email sent but status update failed"
            );
            (
                PurchaseOrderStatus::Draft,
                Some(format!("email sent but status update failed: {e}")),
            )
        }
    }
}

/// List purchase orders, newest first.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PurchaseOrder>>, AppError> {
    let orders = PurchaseOrderRepository::new(state.pool())
        .list(query.limit.clamp(1, 500))
        .await?;
    Ok(Json(orders))
}

/// Fetch a purchase order by number.
#[instrument(skip(state))]
pub async fn get_by_number(
    State(state): State<AppState>,
    Path(po_number): Path<String>,
) -> Result<Json<PurchaseOrder>, AppError> {
    PurchaseOrderRepository::new(state.pool())
        .get(&po_number)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound(po_number))
}

/// Render the print-ready document for a purchase order.
///
/// Always rendered from the persisted line items, so the document and the
/// stored record cannot disagree.
#[instrument(skip(state))]
pub async fn document(
    State(state): State<AppState>,
    Path(po_number): Path<String>,
) -> Result<Html<String>, AppError> {
    let order = PurchaseOrderRepository::new(state.pool())
        .get(&po_number)
        .await?
        .ok_or(AppError::NotFound(po_number))?;

    Ok(Html(po_document::render(&order)?))
}
