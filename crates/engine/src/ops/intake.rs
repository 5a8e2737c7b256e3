//! Intake of upstream records.
//!
//! Cases, invoices and finance entries are owned by case-management and
//! time/expense workflows; the engine only needs them to exist so budgets
//! and payments have something to reconcile against. These operations do
//! plain validated inserts and never touch the ledgers.

use sea_orm::ActiveModelTrait;
use uuid::Uuid;

use crate::{
    Case, CreateCaseCmd, CreateInvoiceCmd, EngineError, FinanceEntry, FinanceEntryCmd,
    FinanceEntryKind, Invoice, ResultEngine, cases, finance_entries, invoices,
    util::{normalize_optional_text, normalize_required_text},
};

use super::Engine;

impl Engine {
    /// Opens a new case with optional authorized budget ceilings.
    pub async fn create_case(&self, cmd: CreateCaseCmd) -> ResultEngine<Uuid> {
        let title = normalize_required_text(&cmd.title, "case title")?;
        if let Some(hours) = cmd.budget_hours
            && !hours.is_positive()
        {
            return Err(EngineError::InvalidAmount(
                "budget hours must be > 0 when set".to_string(),
            ));
        }
        if let Some(dollars) = cmd.budget_dollars
            && !dollars.is_positive()
        {
            return Err(EngineError::InvalidAmount(
                "budget dollars must be > 0 when set".to_string(),
            ));
        }

        let case = Case::new(
            cmd.org_id,
            title,
            cmd.budget_hours,
            cmd.budget_dollars,
            cmd.created_by,
        );
        cases::ActiveModel::from(&case).insert(&self.database).await?;
        Ok(case.id)
    }

    /// Issues a new invoice against a case, starting unpaid.
    pub async fn create_invoice(&self, cmd: CreateInvoiceCmd) -> ResultEngine<Uuid> {
        if !cmd.total.is_positive() {
            return Err(EngineError::InvalidAmount(
                "invoice total must be > 0".to_string(),
            ));
        }
        let case = self
            .require_case(&self.database, cmd.case_id, &cmd.org_id)
            .await?;

        let invoice = Invoice::new(
            cmd.case_id,
            cmd.total,
            cmd.issued_on,
            cmd.created_by,
            case.org_id,
        );
        invoices::ActiveModel::from(&invoice)
            .insert(&self.database)
            .await?;
        Ok(invoice.id)
    }

    /// Records a billable time entry or expense against a case.
    ///
    /// Time entries must carry positive hours; expenses must not carry
    /// hours at all.
    pub async fn record_finance_entry(&self, cmd: FinanceEntryCmd) -> ResultEngine<Uuid> {
        if !cmd.amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "entry amount must be > 0".to_string(),
            ));
        }
        match (cmd.kind, cmd.hours) {
            (FinanceEntryKind::Time, Some(hours)) if hours.is_positive() => {}
            (FinanceEntryKind::Time, _) => {
                return Err(EngineError::InvalidAmount(
                    "time entries require hours > 0".to_string(),
                ));
            }
            (FinanceEntryKind::Expense, Some(_)) => {
                return Err(EngineError::InvalidAmount(
                    "expense entries must not carry hours".to_string(),
                ));
            }
            (FinanceEntryKind::Expense, None) => {}
        }

        let case = self
            .require_case(&self.database, cmd.case_id, &cmd.org_id)
            .await?;

        let entry = FinanceEntry {
            id: Uuid::new_v4(),
            case_id: cmd.case_id,
            kind: cmd.kind,
            amount: cmd.amount,
            hours: cmd.hours,
            occurred_on: cmd.occurred_on,
            note: normalize_optional_text(cmd.note.as_deref()),
            created_by: cmd.created_by,
            org_id: case.org_id,
        };
        finance_entries::ActiveModel::from(&entry)
            .insert(&self.database)
            .await?;
        Ok(entry.id)
    }
}
