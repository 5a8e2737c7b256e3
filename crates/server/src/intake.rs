//! Intake endpoints for cases, invoices and finance entries.

use api_types::case::{CaseCreated, CaseNew};
use api_types::finance_entry::{FinanceEntryCreated, FinanceEntryKind, FinanceEntryNew};
use api_types::invoice::{InvoiceCreated, InvoiceNew};
use axum::{Extension, Json, extract::State};

use engine::{
    CreateCaseCmd, CreateInvoiceCmd, FinanceEntryCmd, HoursCenti, MoneyCents, staff,
};

use crate::{ServerError, server::ServerState};

pub async fn case_new(
    Extension(user): Extension<staff::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<CaseNew>,
) -> Result<Json<CaseCreated>, ServerError> {
    let id = state
        .engine
        .create_case(CreateCaseCmd {
            title: payload.title,
            budget_hours: payload.budget_hours_centi.map(HoursCenti::new),
            budget_dollars: payload.budget_cents.map(MoneyCents::new),
            created_by: user.username,
            org_id: user.org_id,
        })
        .await?;
    Ok(Json(CaseCreated { id }))
}

pub async fn invoice_new(
    Extension(user): Extension<staff::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<InvoiceNew>,
) -> Result<Json<InvoiceCreated>, ServerError> {
    let id = state
        .engine
        .create_invoice(CreateInvoiceCmd {
            case_id: payload.case_id,
            total: MoneyCents::new(payload.total_cents),
            issued_on: payload.issued_on,
            created_by: user.username,
            org_id: user.org_id,
        })
        .await?;
    Ok(Json(InvoiceCreated { id }))
}

pub async fn finance_entry_new(
    Extension(user): Extension<staff::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<FinanceEntryNew>,
) -> Result<Json<FinanceEntryCreated>, ServerError> {
    let kind = match payload.kind {
        FinanceEntryKind::Time => engine::FinanceEntryKind::Time,
        FinanceEntryKind::Expense => engine::FinanceEntryKind::Expense,
    };
    let id = state
        .engine
        .record_finance_entry(FinanceEntryCmd {
            case_id: payload.case_id,
            kind,
            amount: MoneyCents::new(payload.amount_cents),
            hours: payload.hours_centi.map(HoursCenti::new),
            occurred_on: payload.occurred_on,
            note: payload.note,
            created_by: user.username,
            org_id: user.org_id,
        })
        .await?;
    Ok(Json(FinanceEntryCreated { id }))
}
