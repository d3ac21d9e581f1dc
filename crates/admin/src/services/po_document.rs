//! Print-ready purchase-order document.
//!
//! Renders the persisted order as a standalone HTML document the operator
//! prints or hands to the PDF pipeline. The document is built from the same
//! stored line items as the record it accompanies - quantities are never
//! recomputed here, so the paper and the database cannot disagree.

use askama::Template;

use crate::filters;
use crate::models::PurchaseOrder;

/// Line item view for the document table.
struct DocumentLineView<'a> {
    ingredient_name: &'a str,
    required_lbs: String,
    order_quantity_lbs: String,
}

/// The purchase-order document template.
#[derive(Template)]
#[template(path = "purchase_order.html")]
struct PurchaseOrderDocument<'a> {
    po_number: &'a str,
    status: String,
    vendor_name: &'a str,
    recipes: &'a [String],
    order_date: String,
    needed_by_date: String,
    pickup_date: String,
    line_items: Vec<DocumentLineView<'a>>,
    total_lbs: String,
    notes: Option<&'a str>,
}

/// Render a persisted purchase order as a print-ready HTML document.
///
/// # Errors
///
/// Returns `askama::Error` if template rendering fails.
pub fn render(order: &PurchaseOrder) -> Result<String, askama::Error> {
    let line_items = order
        .line_items
        .iter()
        .map(|l| DocumentLineView {
            ingredient_name: &l.ingredient_name,
            required_lbs: format!("{:.2}", l.required_lbs),
            order_quantity_lbs: format!("{:.1}", l.order_quantity_lbs),
        })
        .collect();

    PurchaseOrderDocument {
        po_number: &order.po_number,
        status: order.status.to_string(),
        vendor_name: &order.vendor_name,
        recipes: &order.recipes,
        order_date: order.order_date.format("%B %-d, %Y").to_string(),
        needed_by_date: order.needed_by_date.format("%B %-d, %Y").to_string(),
        pickup_date: order.pickup_date.format("%B %-d, %Y").to_string(),
        line_items,
        total_lbs: format!("{:.1}", order.total_order_lbs()),
        notes: order.notes.as_deref(),
    }
    .render()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use freshpaw_core::{PurchaseOrderId, PurchaseOrderStatus};

    use crate::models::PurchaseOrderLineItem;

    use super::*;

    fn order() -> PurchaseOrder {
        PurchaseOrder {
            id: PurchaseOrderId::new(1),
            po_number: "PO-20251225-01".to_string(),
            vendor_name: "Acme Restaurant Supply".to_string(),
            status: PurchaseOrderStatus::Draft,
            recipes: vec!["Beef & Quinoa Harvest".to_string()],
            order_date: NaiveDate::from_ymd_opt(2025, 12, 25).expect("date"),
            cook_date: NaiveDate::from_ymd_opt(2026, 1, 8).expect("date"),
            needed_by_date: NaiveDate::from_ymd_opt(2026, 1, 5).expect("date"),
            pickup_date: NaiveDate::from_ymd_opt(2026, 1, 5).expect("date"),
            notes: Some("Call ahead for dock 3".to_string()),
            line_items: vec![PurchaseOrderLineItem {
                ingredient_name: "Ground beef (90% lean/10% fat)".to_string(),
                required_lbs: 67.5,
                order_quantity_lbs: 65.0, // operator-edited below the default
            }],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_document_reflects_edited_quantities() {
        let html = render(&order()).expect("render");
        assert!(html.contains("PO-20251225-01"));
        assert!(html.contains("Acme Restaurant Supply"));
        // The edited 65.0, not the computed 70.0 default
        assert!(html.contains("65.0"));
        assert!(html.contains("67.50"));
        assert!(html.contains("Call ahead for dock 3"));
    }

    #[test]
    fn test_document_total_matches_line_items() {
        let html = render(&order()).expect("render");
        assert!(html.contains("65.0 lbs"));
    }
}
