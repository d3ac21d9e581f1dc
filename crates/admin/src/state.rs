//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::models::{FormulationTable, VendorTable};
use crate::services::email::EmailService;

/// Application state shared across all handlers.
///
/// The formulation and vendor tables are loaded once at startup and never
/// mutated afterwards; handlers read them lock-free through the shared `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    formulations: FormulationTable,
    vendors: VendorTable,
    email: Option<EmailService>,
}

impl AppState {
    /// Assemble the application state.
    #[must_use]
    pub fn new(
        config: AdminConfig,
        pool: PgPool,
        formulations: FormulationTable,
        vendors: VendorTable,
        email: Option<EmailService>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                formulations,
                vendors,
                email,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    #[must_use]
    pub fn formulations(&self) -> &FormulationTable {
        &self.inner.formulations
    }

    #[must_use]
    pub fn vendors(&self) -> &VendorTable {
        &self.inner.vendors
    }

    /// The email service, when SMTP is configured.
    #[must_use]
    pub fn email(&self) -> Option<&EmailService> {
        self.inner.email.as_ref()
    }
}
