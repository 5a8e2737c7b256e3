//! Payment allocation endpoints.

use api_types::payment::{PaymentNew, PaymentRecorded, PaymentView, RetainerApplication};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use uuid::Uuid;

use engine::{InvoicePayment, MoneyCents, PaymentOutcome, RecordPaymentCmd, staff};

use crate::{ServerError, server::ServerState};

pub(crate) fn map_payment_status(status: engine::PaymentStatus) -> api_types::PaymentStatus {
    match status {
        engine::PaymentStatus::Unpaid => api_types::PaymentStatus::Unpaid,
        engine::PaymentStatus::Partial => api_types::PaymentStatus::Partial,
        engine::PaymentStatus::Paid => api_types::PaymentStatus::Paid,
    }
}

fn map_outcome(outcome: PaymentOutcome) -> PaymentRecorded {
    PaymentRecorded {
        payment_id: outcome.payment_id,
        amount_cents: outcome.amount.cents(),
        invoice_status: map_payment_status(outcome.invoice_status),
        total_paid_cents: outcome.total_paid.cents(),
        balance_due_cents: outcome.balance_due.cents(),
        replayed: outcome.replayed,
    }
}

fn map_payment_view(payment: InvoicePayment) -> PaymentView {
    PaymentView {
        id: payment.id,
        amount_cents: payment.amount.cents(),
        paid_on: payment.paid_on,
        note: payment.note,
        recorded_by: payment.recorded_by,
    }
}

pub async fn record(
    Extension(user): Extension<staff::Model>,
    State(state): State<ServerState>,
    Path(invoice_id): Path<Uuid>,
    Json(payload): Json<PaymentNew>,
) -> Result<Json<PaymentRecorded>, ServerError> {
    let mut cmd = RecordPaymentCmd::new(invoice_id, &user.username, &user.org_id, payload.paid_on)
        .retainer_amount(MoneyCents::new(payload.retainer_cents))
        .manual_amount(MoneyCents::new(payload.manual_cents));
    if let Some(note) = payload.note {
        cmd = cmd.note(note);
    }
    if let Some(key) = payload.idempotency_key {
        cmd = cmd.idempotency_key(key);
    }

    let outcome = state.engine.record_payment(cmd).await?;
    Ok(Json(map_outcome(outcome)))
}

pub async fn apply_retainer(
    Extension(user): Extension<staff::Model>,
    State(state): State<ServerState>,
    Path(invoice_id): Path<Uuid>,
    Json(payload): Json<RetainerApplication>,
) -> Result<Json<PaymentRecorded>, ServerError> {
    let outcome = state
        .engine
        .apply_retainer_funds(
            invoice_id,
            MoneyCents::new(payload.amount_cents),
            payload.paid_on,
            &user.username,
            &user.org_id,
        )
        .await?;
    Ok(Json(map_outcome(outcome)))
}

pub async fn balance(
    Extension(user): Extension<staff::Model>,
    State(state): State<ServerState>,
    Path(invoice_id): Path<Uuid>,
) -> Result<Json<api_types::invoice::InvoiceBalanceResponse>, ServerError> {
    let engine = &state.engine;

    let invoice = engine.invoice(invoice_id, &user.org_id).await?;
    let balance_due = engine.invoice_balance_due(invoice_id, &user.org_id).await?;
    let payments = engine.payments_for_invoice(invoice_id, &user.org_id).await?;

    Ok(Json(api_types::invoice::InvoiceBalanceResponse {
        invoice_id,
        total_cents: invoice.total.cents(),
        total_paid_cents: (invoice.total - balance_due).cents(),
        balance_due_cents: balance_due.cents(),
        status: map_payment_status(invoice.status),
        payments: payments.into_iter().map(map_payment_view).collect(),
    }))
}
