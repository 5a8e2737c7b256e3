//! Command structs for engine write operations.
//!
//! These types group parameters for the payment allocator and intake
//! operations, keeping call sites readable and avoiding long argument
//! lists.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{FinanceEntryKind, HoursCenti, MoneyCents};

/// Record a payment against an invoice, optionally drawing on the case's
/// retainer fund.
#[derive(Clone, Debug)]
pub struct RecordPaymentCmd {
    pub invoice_id: Uuid,
    /// Portion drawn from the case retainer fund (>= 0).
    pub retainer_amount: MoneyCents,
    /// Portion paid directly by the client (>= 0).
    pub manual_amount: MoneyCents,
    pub paid_on: NaiveDate,
    pub note: Option<String>,
    /// Client-generated key making retries safe after a timeout.
    pub idempotency_key: Option<String>,
    pub recorded_by: String,
    pub org_id: String,
}

impl RecordPaymentCmd {
    #[must_use]
    pub fn new(
        invoice_id: Uuid,
        recorded_by: impl Into<String>,
        org_id: impl Into<String>,
        paid_on: NaiveDate,
    ) -> Self {
        Self {
            invoice_id,
            retainer_amount: MoneyCents::ZERO,
            manual_amount: MoneyCents::ZERO,
            paid_on,
            note: None,
            idempotency_key: None,
            recorded_by: recorded_by.into(),
            org_id: org_id.into(),
        }
    }

    #[must_use]
    pub fn retainer_amount(mut self, amount: MoneyCents) -> Self {
        self.retainer_amount = amount;
        self
    }

    #[must_use]
    pub fn manual_amount(mut self, amount: MoneyCents) -> Self {
        self.manual_amount = amount;
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }
}

/// Deposit pre-paid funds into a case's retainer ledger.
#[derive(Clone, Debug)]
pub struct DepositRetainerCmd {
    pub case_id: Uuid,
    /// Must be > 0.
    pub amount: MoneyCents,
    pub note: Option<String>,
    pub recorded_at: DateTime<Utc>,
    pub created_by: String,
    pub org_id: String,
}

impl DepositRetainerCmd {
    #[must_use]
    pub fn new(
        case_id: Uuid,
        amount: MoneyCents,
        created_by: impl Into<String>,
        org_id: impl Into<String>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            case_id,
            amount,
            note: None,
            recorded_at,
            created_by: created_by.into(),
            org_id: org_id.into(),
        }
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Open a new case with optional authorized budget ceilings.
#[derive(Clone, Debug)]
pub struct CreateCaseCmd {
    pub title: String,
    pub budget_hours: Option<HoursCenti>,
    pub budget_dollars: Option<MoneyCents>,
    pub created_by: String,
    pub org_id: String,
}

/// Issue a new invoice against a case.
#[derive(Clone, Debug)]
pub struct CreateInvoiceCmd {
    pub case_id: Uuid,
    pub total: MoneyCents,
    pub issued_on: NaiveDate,
    pub created_by: String,
    pub org_id: String,
}

/// Record a billable time entry or expense against a case.
#[derive(Clone, Debug)]
pub struct FinanceEntryCmd {
    pub case_id: Uuid,
    pub kind: FinanceEntryKind,
    pub amount: MoneyCents,
    /// Required for time entries, rejected for expenses.
    pub hours: Option<HoursCenti>,
    pub occurred_on: NaiveDate,
    pub note: Option<String>,
    pub created_by: String,
    pub org_id: String,
}
