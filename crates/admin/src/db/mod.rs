//! Database operations for admin `PostgreSQL`.
//!
//! # Tables
//!
//! - `dog_subscriptions` - Denormalized read model of active subscriptions
//! - `batch_plans` - Saved batch-plan snapshots, one per cook date
//! - `purchase_orders` / `purchase_order_line_items` - Vendor orders
//!
//! Queries use the runtime-checked sqlx API (`query_as` over `FromRow` row
//! types) so the workspace builds without a live database.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p freshpaw-cli -- migrate admin
//! ```

pub mod batch_plans;
pub mod purchase_orders;
pub mod subscriptions;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use batch_plans::{BatchPlanRepository, SavedBatchPlan};
pub use purchase_orders::PurchaseOrderRepository;
pub use subscriptions::SubscriptionRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate PO number).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
