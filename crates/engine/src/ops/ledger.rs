//! Ledger read queries for audit screens.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    Case, Invoice, InvoicePayment, ResultEngine, RetainerFundEntry, invoice_payments,
    retainer_entries,
};

use super::Engine;

impl Engine {
    /// Returns a case record, scoped to the caller's organization.
    pub async fn case(&self, case_id: Uuid, org_id: &str) -> ResultEngine<Case> {
        let model = self.require_case(&self.database, case_id, org_id).await?;
        Case::try_from(model)
    }

    /// Returns an invoice with its persisted (ledger-derived) status.
    pub async fn invoice(&self, invoice_id: Uuid, org_id: &str) -> ResultEngine<Invoice> {
        let model = self
            .require_invoice(&self.database, invoice_id, org_id)
            .await?;
        Invoice::try_from(model)
    }

    /// Lists payments recorded against an invoice, newest first.
    pub async fn payments_for_invoice(
        &self,
        invoice_id: Uuid,
        org_id: &str,
    ) -> ResultEngine<Vec<InvoicePayment>> {
        let invoice = self
            .require_invoice(&self.database, invoice_id, org_id)
            .await?;

        let models = invoice_payments::Entity::find()
            .filter(invoice_payments::Column::InvoiceId.eq(invoice.id))
            .order_by_desc(invoice_payments::Column::PaidOn)
            .order_by_desc(invoice_payments::Column::Id)
            .all(&self.database)
            .await?;

        models.into_iter().map(InvoicePayment::try_from).collect()
    }

    /// Lists retainer fund movements for a case, newest first.
    pub async fn retainer_entries_for_case(
        &self,
        case_id: Uuid,
        org_id: &str,
    ) -> ResultEngine<Vec<RetainerFundEntry>> {
        let case = self.require_case(&self.database, case_id, org_id).await?;

        let models = retainer_entries::Entity::find()
            .filter(retainer_entries::Column::CaseId.eq(case.id))
            .order_by_desc(retainer_entries::Column::RecordedAt)
            .order_by_desc(retainer_entries::Column::Id)
            .all(&self.database)
            .await?;

        models
            .into_iter()
            .map(RetainerFundEntry::try_from)
            .collect()
    }
}
