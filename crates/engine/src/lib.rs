//! Budget & billing reconciliation engine.
//!
//! Tracks consumption of a case's authorized budget (hours and dollars),
//! keeps an append-only retainer-fund ledger per case, allocates payments
//! against invoices, and derives budget/payment status labels. Every
//! derived number is recomputed from the ledger rows; the only persisted
//! aggregate is the invoice `status` field, rewritten inside the same
//! transaction as the ledger append that changed it.

pub use cases::Case;
pub use classify::{
    BudgetStatus, BudgetThresholds, PaymentStatus, classify_budget_status,
    classify_payment_status,
};
pub use commands::{
    CreateCaseCmd, CreateInvoiceCmd, DepositRetainerCmd, FinanceEntryCmd, RecordPaymentCmd,
};
pub use error::EngineError;
pub use finance_entries::{FinanceEntry, FinanceEntryKind, Window};
pub use hours::HoursCenti;
pub use invoice_payments::InvoicePayment;
pub use invoices::Invoice;
pub use money::MoneyCents;
pub use ops::{BudgetSummary, Consumption, Engine, EngineBuilder, PaymentOutcome};
pub use retainer_entries::RetainerFundEntry;

pub mod cases;
mod classify;
mod commands;
mod error;
pub mod finance_entries;
mod hours;
pub mod invoice_payments;
pub mod invoices;
mod money;
mod ops;
pub mod retainer_entries;
pub mod staff;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
