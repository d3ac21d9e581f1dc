//! Purchase order persistence.
//!
//! A purchase order and its line items are written in one transaction: a
//! failed write leaves nothing behind, never a half-formed order. Write
//! conflicts (two operators numbering an order for the same day) surface as
//! `Conflict` for the caller to retry manually - this layer does not retry
//! silently, which could double-order from the vendor.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use freshpaw_core::{PurchaseOrderId, PurchaseOrderStatus};

use super::RepositoryError;
use crate::models::{PurchaseOrder, PurchaseOrderDraft, PurchaseOrderLineItem};

/// Internal row type for purchase-order headers.
#[derive(Debug, sqlx::FromRow)]
struct PurchaseOrderRow {
    id: i32,
    po_number: String,
    vendor_name: String,
    status: String,
    recipes: Json<Vec<String>>,
    order_date: NaiveDate,
    cook_date: NaiveDate,
    needed_by_date: NaiveDate,
    pickup_date: NaiveDate,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PurchaseOrderRow {
    fn into_order(
        self,
        line_items: Vec<PurchaseOrderLineItem>,
    ) -> Result<PurchaseOrder, RepositoryError> {
        let status = self.status.parse::<PurchaseOrderStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("purchase order {}: {e}", self.po_number))
        })?;

        Ok(PurchaseOrder {
            id: PurchaseOrderId::new(self.id),
            po_number: self.po_number,
            vendor_name: self.vendor_name,
            status,
            recipes: self.recipes.0,
            order_date: self.order_date,
            cook_date: self.cook_date,
            needed_by_date: self.needed_by_date,
            pickup_date: self.pickup_date,
            notes: self.notes,
            line_items,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Internal row type for line items.
#[derive(Debug, sqlx::FromRow)]
struct LineItemRow {
    purchase_order_id: i32,
    ingredient_name: String,
    required_lbs: f64,
    order_quantity_lbs: f64,
}

impl From<LineItemRow> for PurchaseOrderLineItem {
    fn from(row: LineItemRow) -> Self {
        Self {
            ingredient_name: row.ingredient_name,
            required_lbs: row.required_lbs,
            order_quantity_lbs: row.order_quantity_lbs,
        }
    }
}

/// Repository for purchase-order persistence.
pub struct PurchaseOrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PurchaseOrderRepository<'a> {
    /// Create a new purchase-order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a draft as a new purchase order.
    ///
    /// The PO number is `PO-YYYYMMDD-NN`, numbered per order date. Header
    /// and line items are written in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the generated PO number
    /// collides (concurrent creation for the same day - retry manually).
    /// Returns `RepositoryError::Database` for other failures; nothing is
    /// written in that case.
    pub async fn create(
        &self,
        draft: &PurchaseOrderDraft,
        notes: Option<&str>,
        order_date: NaiveDate,
    ) -> Result<PurchaseOrder, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let existing: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM purchase_orders WHERE order_date = $1",
        )
        .bind(order_date)
        .fetch_one(&mut *tx)
        .await?;

        let po_number = format!(
            "PO-{:04}{:02}{:02}-{:02}",
            order_date.year(),
            order_date.month(),
            order_date.day(),
            existing + 1
        );

        let row = sqlx::query_as::<_, PurchaseOrderRow>(
            r"
            INSERT INTO purchase_orders (
                po_number, vendor_name, status, recipes,
                order_date, cook_date, needed_by_date, pickup_date, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING
                id, po_number, vendor_name, status, recipes,
                order_date, cook_date, needed_by_date, pickup_date, notes,
                created_at, updated_at
            ",
        )
        .bind(&po_number)
        .bind(&draft.vendor_name)
        .bind(PurchaseOrderStatus::Draft.to_string())
        .bind(Json(&draft.recipes))
        .bind(order_date)
        .bind(draft.cook_date)
        .bind(draft.needed_by_date)
        .bind(draft.pickup_date)
        .bind(notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some("purchase_orders_po_number_key")
            {
                return RepositoryError::Conflict(format!(
                    "purchase order number {po_number} already exists"
                ));
            }
            RepositoryError::Database(e)
        })?;

        for (position, line) in draft.line_items.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO purchase_order_line_items (
                    purchase_order_id, position, ingredient_name,
                    required_lbs, order_quantity_lbs
                )
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(row.id)
            .bind(i32::try_from(position).unwrap_or(i32::MAX))
            .bind(&line.ingredient_name)
            .bind(line.required_lbs)
            .bind(line.order_quantity_lbs)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        row.into_order(draft.line_items.clone())
    }

    /// Mark a purchase order as sent after a successful vendor email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist,
    /// `RepositoryError::Database` for other failures.
    pub async fn mark_sent(&self, id: PurchaseOrderId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE purchase_orders
            SET status = $2, updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .bind(PurchaseOrderStatus::Sent.to_string())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Fetch a purchase order with its line items by PO number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` on an unparseable stored status.
    pub async fn get(&self, po_number: &str) -> Result<Option<PurchaseOrder>, RepositoryError> {
        let row = sqlx::query_as::<_, PurchaseOrderRow>(
            r"
            SELECT
                id, po_number, vendor_name, status, recipes,
                order_date, cook_date, needed_by_date, pickup_date, notes,
                created_at, updated_at
            FROM purchase_orders
            WHERE po_number = $1
            ",
        )
        .bind(po_number)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, LineItemRow>(
            r"
            SELECT purchase_order_id, ingredient_name, required_lbs, order_quantity_lbs
            FROM purchase_order_line_items
            WHERE purchase_order_id = $1
            ORDER BY position
            ",
        )
        .bind(row.id)
        .fetch_all(self.pool)
        .await?;

        Ok(Some(
            row.into_order(lines.into_iter().map(Into::into).collect())?,
        ))
    }

    /// List purchase orders, most recent first, line items included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` on an unparseable stored status.
    pub async fn list(&self, limit: i64) -> Result<Vec<PurchaseOrder>, RepositoryError> {
        let rows = sqlx::query_as::<_, PurchaseOrderRow>(
            r"
            SELECT
                id, po_number, vendor_name, status, recipes,
                order_date, cook_date, needed_by_date, pickup_date, notes,
                created_at, updated_at
            FROM purchase_orders
            ORDER BY created_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let lines = sqlx::query_as::<_, LineItemRow>(
            r"
            SELECT purchase_order_id, ingredient_name, required_lbs, order_quantity_lbs
            FROM purchase_order_line_items
            WHERE purchase_order_id = ANY($1)
            ORDER BY purchase_order_id, position
            ",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        let mut by_order: std::collections::HashMap<i32, Vec<PurchaseOrderLineItem>> =
            std::collections::HashMap::new();
        for line in lines {
            by_order
                .entry(line.purchase_order_id)
                .or_default()
                .push(line.into());
        }

        rows.into_iter()
            .map(|row| {
                let items = by_order.remove(&row.id).unwrap_or_default();
                row.into_order(items)
            })
            .collect()
    }
}
