//! Retainer fund endpoints: deposits and the ledger view.

use api_types::retainer::{
    DepositCreated, DepositNew, RetainerEntryView, RetainerLedgerResponse,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use chrono::Utc;
use uuid::Uuid;

use engine::{DepositRetainerCmd, MoneyCents, staff};

use crate::{ServerError, server::ServerState};

pub async fn deposit(
    Extension(user): Extension<staff::Model>,
    State(state): State<ServerState>,
    Path(case_id): Path<Uuid>,
    Json(payload): Json<DepositNew>,
) -> Result<Json<DepositCreated>, ServerError> {
    let mut cmd = DepositRetainerCmd::new(
        case_id,
        MoneyCents::new(payload.amount_cents),
        &user.username,
        &user.org_id,
        Utc::now(),
    );
    if let Some(note) = payload.note {
        cmd = cmd.note(note);
    }

    let id = state.engine.deposit_retainer(cmd).await?;
    Ok(Json(DepositCreated { id }))
}

pub async fn ledger(
    Extension(user): Extension<staff::Model>,
    State(state): State<ServerState>,
    Path(case_id): Path<Uuid>,
) -> Result<Json<RetainerLedgerResponse>, ServerError> {
    let engine = &state.engine;

    let balance = engine.retainer_balance(case_id, &user.org_id).await?;
    let entries = engine
        .retainer_entries_for_case(case_id, &user.org_id)
        .await?;

    Ok(Json(RetainerLedgerResponse {
        case_id,
        balance_cents: balance.cents(),
        entries: entries
            .into_iter()
            .map(|entry| RetainerEntryView {
                id: entry.id,
                amount_cents: entry.amount.cents(),
                invoice_id: entry.invoice_id,
                note: entry.note,
                created_by: entry.created_by,
                recorded_at: entry.recorded_at.fixed_offset(),
            })
            .collect(),
    }))
}
