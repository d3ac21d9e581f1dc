//! Purchase order domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use freshpaw_core::{PurchaseOrderId, PurchaseOrderStatus};

/// One ingredient line on a purchase order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderLineItem {
    pub ingredient_name: String,
    /// Precise requirement from the scaled formulations.
    pub required_lbs: f64,
    /// What actually gets ordered: `required_lbs` rounded up to the vendor's
    /// case size, or an operator-edited override.
    pub order_quantity_lbs: f64,
}

/// A computed purchase order before persistence.
///
/// This is the editable preview: the operator may override any line's
/// `order_quantity_lbs` before the draft is persisted. The computed values
/// are defaults, not an immutable result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderDraft {
    pub vendor_name: String,
    /// Recipes this order covers.
    pub recipes: Vec<String>,
    pub cook_date: NaiveDate,
    /// `cook_date` minus the vendor lead time.
    pub needed_by_date: NaiveDate,
    /// The vendor's scheduled pickup day nearest to, but not after,
    /// `needed_by_date`.
    pub pickup_date: NaiveDate,
    pub line_items: Vec<PurchaseOrderLineItem>,
}

impl PurchaseOrderDraft {
    /// Total ordered pounds across all lines.
    #[must_use]
    pub fn total_order_lbs(&self) -> f64 {
        self.line_items.iter().map(|l| l.order_quantity_lbs).sum()
    }
}

/// A persisted purchase order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    /// Human-facing order number, e.g. `PO-20260108-01`.
    pub po_number: String,
    pub vendor_name: String,
    pub status: PurchaseOrderStatus,
    /// Recipes this order covers.
    pub recipes: Vec<String>,
    /// Day the order was generated.
    pub order_date: NaiveDate,
    pub cook_date: NaiveDate,
    pub needed_by_date: NaiveDate,
    pub pickup_date: NaiveDate,
    /// Free-text operator annotation.
    pub notes: Option<String>,
    pub line_items: Vec<PurchaseOrderLineItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PurchaseOrder {
    /// Total ordered pounds across all lines.
    #[must_use]
    pub fn total_order_lbs(&self) -> f64 {
        self.line_items.iter().map(|l| l.order_quantity_lbs).sum()
    }
}

/// One recipe's batch count feeding a purchase order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeBatchInput {
    pub recipe_name: String,
    /// Number of base batches to cook (`number_of_batches_to_cook` from the
    /// plan, or an operator-chosen multiple).
    pub batch_multiplier: u32,
    pub cook_date: NaiveDate,
}

/// Input for creating (persisting) a purchase order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePurchaseOrderInput {
    pub recipes: Vec<RecipeBatchInput>,
    /// Vendor to order from; the primary supplier when omitted.
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Dispatch the vendor email immediately after creating the draft.
    #[serde(default)]
    pub auto_send_email: bool,
    /// Operator overrides of `order_quantity_lbs`, keyed by ingredient name.
    #[serde(default)]
    pub custom_quantities: HashMap<String, f64>,
}
