//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                          - Liveness check
//! GET  /health/ready                                    - Readiness check
//!
//! # Batch planning
//! GET  /api/admin/batch-planning                        - Compute plan for a cook date
//! POST /api/admin/batch-planning                        - Save a plan snapshot
//! GET  /api/admin/batch-planning/shopping-list.csv      - Shopping list CSV export
//! GET  /api/admin/batch-planning/{date}                 - Fetch a saved plan
//!
//! # Purchase orders
//! POST /api/admin/purchase-orders/preview               - Compute editable PO preview
//! POST /api/admin/purchase-orders                       - Create (and optionally send) a PO
//! GET  /api/admin/purchase-orders                       - List POs, newest first
//! GET  /api/admin/purchase-orders/{po_number}           - Structured PO record
//! GET  /api/admin/purchase-orders/{po_number}/document  - Print-ready PO document
//! ```

pub mod batch_planning;
pub mod purchase_orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the admin API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/batch-planning",
            get(batch_planning::plan).post(batch_planning::save),
        )
        .route(
            "/api/admin/batch-planning/shopping-list.csv",
            get(batch_planning::shopping_list_csv),
        )
        .route(
            "/api/admin/batch-planning/{date}",
            get(batch_planning::get_saved),
        )
        .route(
            "/api/admin/purchase-orders/preview",
            post(purchase_orders::preview),
        )
        .route(
            "/api/admin/purchase-orders",
            get(purchase_orders::list).post(purchase_orders::create),
        )
        .route(
            "/api/admin/purchase-orders/{po_number}",
            get(purchase_orders::get_by_number),
        )
        .route(
            "/api/admin/purchase-orders/{po_number}/document",
            get(purchase_orders::document),
        )
}
