use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Budget utilization band, mirroring the engine classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Normal,
    Warning,
    Critical,
    Over,
}

/// Payment state of an invoice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
}

pub mod case {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CaseNew {
        pub title: String,
        /// Authorized hour ceiling, in hundredths of an hour.
        pub budget_hours_centi: Option<i64>,
        /// Authorized dollar ceiling, in cents.
        pub budget_cents: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CaseCreated {
        pub id: Uuid,
    }
}

pub mod invoice {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvoiceNew {
        pub case_id: Uuid,
        pub total_cents: i64,
        pub issued_on: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvoiceCreated {
        pub id: Uuid,
    }

    /// Ledger-derived view of an invoice's payment state.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvoiceBalanceResponse {
        pub invoice_id: Uuid,
        pub total_cents: i64,
        pub total_paid_cents: i64,
        pub balance_due_cents: i64,
        pub status: PaymentStatus,
        pub payments: Vec<super::payment::PaymentView>,
    }
}

pub mod finance_entry {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum FinanceEntryKind {
        Time,
        Expense,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FinanceEntryNew {
        pub case_id: Uuid,
        pub kind: FinanceEntryKind,
        pub amount_cents: i64,
        /// Required for time entries, omitted for expenses.
        pub hours_centi: Option<i64>,
        pub occurred_on: NaiveDate,
        pub note: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FinanceEntryCreated {
        pub id: Uuid,
    }
}

pub mod payment {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentNew {
        /// Portion drawn from the case retainer fund, in cents (>= 0).
        pub retainer_cents: i64,
        /// Portion paid directly, in cents (>= 0).
        pub manual_cents: i64,
        pub paid_on: NaiveDate,
        pub note: Option<String>,
        /// Optional idempotency key for safely retrying the same request.
        pub idempotency_key: Option<String>,
    }

    /// Applies retainer funds only (no direct portion).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RetainerApplication {
        pub amount_cents: i64,
        pub paid_on: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentRecorded {
        pub payment_id: Uuid,
        pub amount_cents: i64,
        pub invoice_status: PaymentStatus,
        pub total_paid_cents: i64,
        pub balance_due_cents: i64,
        /// True when an idempotency key matched an earlier commit and no
        /// new rows were written.
        pub replayed: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentView {
        pub id: Uuid,
        pub amount_cents: i64,
        pub paid_on: NaiveDate,
        pub note: Option<String>,
        pub recorded_by: String,
    }
}

pub mod retainer {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DepositNew {
        pub amount_cents: i64,
        pub note: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DepositCreated {
        pub id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RetainerEntryView {
        pub id: Uuid,
        /// Signed: positive = deposit, negative = application.
        pub amount_cents: i64,
        pub invoice_id: Option<Uuid>,
        pub note: Option<String>,
        pub created_by: String,
        /// RFC3339 timestamp, including timezone offset.
        pub recorded_at: DateTime<FixedOffset>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RetainerLedgerResponse {
        pub case_id: Uuid,
        pub balance_cents: i64,
        pub entries: Vec<RetainerEntryView>,
    }
}

pub mod budget {
    use super::*;

    /// Reporting window bounds; both ends optional and inclusive.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct WindowQuery {
        pub from: Option<NaiveDate>,
        pub to: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetSummaryResponse {
        pub case_id: Uuid,
        pub authorized_hours_centi: Option<i64>,
        pub authorized_cents: Option<i64>,
        pub consumed_hours_centi: i64,
        pub consumed_cents: i64,
        pub remaining_hours_centi: Option<i64>,
        pub remaining_cents: Option<i64>,
        pub hours_utilization_pct: Option<f64>,
        pub dollars_utilization_pct: Option<f64>,
        pub status: BudgetStatus,
    }
}

pub mod classify {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetClassifyQuery {
        pub utilization_pct: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetClassifyResponse {
        pub status: BudgetStatus,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentClassifyQuery {
        pub total_cents: i64,
        pub paid_cents: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentClassifyResponse {
        pub status: PaymentStatus,
    }
}
