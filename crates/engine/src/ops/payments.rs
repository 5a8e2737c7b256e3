//! Payment allocator: the only writer of the two ledgers.
//!
//! `record_payment` validates amounts against ledger-derived balances,
//! appends the payment row (plus the offsetting retainer entry when
//! retainer funds are used), re-checks the summed ledgers, and persists the
//! invoice's derived status, all inside one database transaction. Any error
//! rolls the whole thing back; there is no partially-applied outcome.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    DepositRetainerCmd, EngineError, InvoicePayment, MoneyCents, PaymentStatus, RecordPaymentCmd,
    ResultEngine, RetainerFundEntry, classify_payment_status, invoice_payments, invoices,
    retainer_entries,
    util::normalize_optional_text,
};

use super::{
    Engine,
    balances::{sum_payments_for_invoice, sum_retainer_for_case},
    with_tx,
};

/// What a successful (or replayed) `record_payment` committed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub payment_id: Uuid,
    /// Combined retainer + manual amount of the payment row.
    pub amount: MoneyCents,
    /// Invoice status as persisted at commit time.
    pub invoice_status: PaymentStatus,
    pub total_paid: MoneyCents,
    pub balance_due: MoneyCents,
    /// True when an idempotency key matched a previously committed payment
    /// and no new rows were written.
    pub replayed: bool,
}

impl Engine {
    /// Records a payment against an invoice as one atomic transaction.
    ///
    /// Validation, in order:
    /// - both amounts must be >= 0 and their sum > 0 (`InvalidAmount`)
    /// - the retainer portion must not exceed the case's current retainer
    ///   balance (`InsufficientRetainerFunds`)
    /// - the combined amount must not exceed the invoice's balance due
    ///   (`PaymentExceedsBalance`)
    ///
    /// After the inserts, the payment and retainer sums are re-read inside
    /// the same transaction; if a racing writer pushed either past its
    /// invariant the transaction aborts with `ConcurrentModification`.
    pub async fn record_payment(&self, cmd: RecordPaymentCmd) -> ResultEngine<PaymentOutcome> {
        if cmd.retainer_amount.is_negative() || cmd.manual_amount.is_negative() {
            return Err(EngineError::InvalidAmount(
                "payment amounts must be >= 0".to_string(),
            ));
        }
        let amount = cmd
            .retainer_amount
            .checked_add(cmd.manual_amount)
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))?;
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "payment amount must be > 0".to_string(),
            ));
        }

        with_tx!(self, |db_tx| self.record_payment_in(&db_tx, &cmd, amount).await)
    }

    /// Applies retainer funds to an invoice: a `record_payment` with no
    /// manual portion.
    pub async fn apply_retainer_funds(
        &self,
        invoice_id: Uuid,
        amount: MoneyCents,
        paid_on: NaiveDate,
        recorded_by: &str,
        org_id: &str,
    ) -> ResultEngine<PaymentOutcome> {
        self.record_payment(
            RecordPaymentCmd::new(invoice_id, recorded_by, org_id, paid_on)
                .retainer_amount(amount),
        )
        .await
    }

    /// Deposits pre-paid funds into a case's retainer ledger.
    pub async fn deposit_retainer(&self, cmd: DepositRetainerCmd) -> ResultEngine<Uuid> {
        if !cmd.amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "deposit amount must be > 0".to_string(),
            ));
        }

        let case = self
            .require_case(&self.database, cmd.case_id, &cmd.org_id)
            .await?;

        let entry = RetainerFundEntry {
            id: Uuid::new_v4(),
            case_id: cmd.case_id,
            amount: cmd.amount,
            invoice_id: None,
            note: normalize_optional_text(cmd.note.as_deref()),
            created_by: cmd.created_by.clone(),
            org_id: case.org_id,
            recorded_at: cmd.recorded_at,
        };
        retainer_entries::ActiveModel::from(&entry)
            .insert(&self.database)
            .await?;
        Ok(entry.id)
    }

    async fn record_payment_in(
        &self,
        db_tx: &DatabaseTransaction,
        cmd: &RecordPaymentCmd,
        amount: MoneyCents,
    ) -> ResultEngine<PaymentOutcome> {
        // A retry with the same key returns the committed outcome without
        // writing anything.
        if let Some(key) = &cmd.idempotency_key
            && let Some(existing) = invoice_payments::Entity::find()
                .filter(invoice_payments::Column::InvoiceId.eq(cmd.invoice_id.to_string()))
                .filter(invoice_payments::Column::RecordedBy.eq(cmd.recorded_by.clone()))
                .filter(invoice_payments::Column::IdempotencyKey.eq(key.clone()))
                .one(db_tx)
                .await?
        {
            let invoice = self
                .require_invoice(db_tx, cmd.invoice_id, &cmd.org_id)
                .await?;
            let total = MoneyCents::new(invoice.total_cents);
            let paid = sum_payments_for_invoice(db_tx, &invoice.id).await?;
            let payment = InvoicePayment::try_from(existing)?;
            return Ok(PaymentOutcome {
                payment_id: payment.id,
                amount: payment.amount,
                invoice_status: classify_payment_status(total, paid),
                total_paid: paid,
                balance_due: total - paid,
                replayed: true,
            });
        }

        let invoice = self
            .require_invoice(db_tx, cmd.invoice_id, &cmd.org_id)
            .await?;
        let total = MoneyCents::new(invoice.total_cents);

        let paid_before = sum_payments_for_invoice(db_tx, &invoice.id).await?;
        if amount > total - paid_before {
            return Err(EngineError::PaymentExceedsBalance(format!(
                "payment of {amount} exceeds balance due of {}",
                total - paid_before
            )));
        }

        if cmd.retainer_amount.is_positive() {
            let balance = sum_retainer_for_case(db_tx, &invoice.case_id).await?;
            if cmd.retainer_amount > balance {
                return Err(EngineError::InsufficientRetainerFunds(format!(
                    "requested {} but retainer balance is {balance}",
                    cmd.retainer_amount
                )));
            }
        }

        // Audit note always carries the retainer/manual split.
        let breakdown = format!(
            "retainer {} / direct {}",
            cmd.retainer_amount, cmd.manual_amount
        );
        let note = match normalize_optional_text(cmd.note.as_deref()) {
            Some(user_note) => format!("{user_note} ({breakdown})"),
            None => breakdown,
        };

        let payment = InvoicePayment {
            id: Uuid::new_v4(),
            invoice_id: cmd.invoice_id,
            amount,
            paid_on: cmd.paid_on,
            note: Some(note),
            recorded_by: cmd.recorded_by.clone(),
            org_id: cmd.org_id.clone(),
            idempotency_key: cmd.idempotency_key.clone(),
        };
        invoice_payments::ActiveModel::from(&payment)
            .insert(db_tx)
            .await?;

        if cmd.retainer_amount.is_positive() {
            let entry = RetainerFundEntry {
                id: Uuid::new_v4(),
                case_id: crate::util::parse_uuid(&invoice.case_id, "case")?,
                amount: -cmd.retainer_amount,
                invoice_id: Some(cmd.invoice_id),
                note: Some(format!("applied to invoice #{}", invoice.id)),
                created_by: cmd.recorded_by.clone(),
                org_id: cmd.org_id.clone(),
                recorded_at: Utc::now(),
            };
            retainer_entries::ActiveModel::from(&entry)
                .insert(db_tx)
                .await?;
        }

        // Re-check from the ledger, not from the just-written delta: if a
        // concurrent writer committed between our first read and here, the
        // sums tell us and the transaction aborts.
        let total_paid = sum_payments_for_invoice(db_tx, &invoice.id).await?;
        if total_paid > total {
            return Err(EngineError::ConcurrentModification(format!(
                "payments of {total_paid} exceed invoice total {total}"
            )));
        }
        if cmd.retainer_amount.is_positive() {
            let balance_after = sum_retainer_for_case(db_tx, &invoice.case_id).await?;
            if balance_after.is_negative() {
                return Err(EngineError::ConcurrentModification(
                    "retainer balance would go negative".to_string(),
                ));
            }
        }

        let status = classify_payment_status(total, total_paid);
        let invoice_model = invoices::ActiveModel {
            id: ActiveValue::Set(invoice.id.clone()),
            status: ActiveValue::Set(status.as_str().to_string()),
            ..Default::default()
        };
        invoice_model.update(db_tx).await?;

        Ok(PaymentOutcome {
            payment_id: payment.id,
            amount,
            invoice_status: status,
            total_paid,
            balance_due: total - total_paid,
            replayed: false,
        })
    }
}
