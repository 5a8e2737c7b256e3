//! The module contains the errors the engine can raise.
//!
//! Validation failures (`InvalidAmount`) and business-rule violations
//! (`InsufficientRetainerFunds`, `PaymentExceedsBalance`) are surfaced to the
//! caller as-is and must not be retried. `Database` wraps a storage failure
//! and is safe to retry with the same idempotency key: the failed transaction
//! was rolled back, nothing was partially written. `ConcurrentModification`
//! means the pre-commit re-check caught a racing writer; the caller should
//! reload balances and retry once.
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Insufficient retainer funds: {0}")]
    InsufficientRetainerFunds(String),
    #[error("Payment exceeds balance due: {0}")]
    PaymentExceedsBalance(String),
    #[error("Concurrent modification: {0}")]
    ConcurrentModification(String),
    #[error("\"{0}\" not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InsufficientRetainerFunds(a), Self::InsufficientRetainerFunds(b)) => a == b,
            (Self::PaymentExceedsBalance(a), Self::PaymentExceedsBalance(b)) => a == b,
            (Self::ConcurrentModification(a), Self::ConcurrentModification(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
