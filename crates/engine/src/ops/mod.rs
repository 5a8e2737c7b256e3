use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, cases, invoices};

mod balances;
mod intake;
mod ledger;
mod payments;
mod summary;

pub use payments::PaymentOutcome;
pub use summary::{BudgetSummary, Consumption};

/// Run a block inside a DB transaction, committing on success and rolling
/// back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// The reconciliation engine.
///
/// Sole writer of the payment and retainer-fund ledgers: every mutation
/// runs as one database transaction, and every derived number (balances,
/// consumption, invoice status) is recomputed from the ledger rows rather
/// than read from a counter that could drift.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Load a case, scoped to the caller's organization.
    ///
    /// Rows owned by another organization are indistinguishable from
    /// missing rows.
    pub(crate) async fn require_case<C: ConnectionTrait>(
        &self,
        conn: &C,
        case_id: Uuid,
        org_id: &str,
    ) -> ResultEngine<cases::Model> {
        let model = cases::Entity::find_by_id(case_id.to_string())
            .one(conn)
            .await?
            .filter(|case| case.org_id == org_id)
            .ok_or_else(|| EngineError::KeyNotFound("case not exists".to_string()))?;
        Ok(model)
    }

    /// Load an invoice, scoped to the caller's organization.
    pub(crate) async fn require_invoice<C: ConnectionTrait>(
        &self,
        conn: &C,
        invoice_id: Uuid,
        org_id: &str,
    ) -> ResultEngine<invoices::Model> {
        let model = invoices::Entity::find_by_id(invoice_id.to_string())
            .one(conn)
            .await?
            .filter(|invoice| invoice.org_id == org_id)
            .ok_or_else(|| EngineError::KeyNotFound("invoice not exists".to_string()))?;
        Ok(model)
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
