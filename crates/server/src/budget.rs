//! Budget summary and stateless classification endpoints.

use api_types::budget::{BudgetSummaryResponse, WindowQuery};
use api_types::classify::{
    BudgetClassifyQuery, BudgetClassifyResponse, PaymentClassifyQuery, PaymentClassifyResponse,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use engine::{
    BudgetThresholds, MoneyCents, Window, classify_budget_status, classify_payment_status, staff,
};

use crate::{ServerError, payments::map_payment_status, server::ServerState};

pub(crate) fn map_budget_status(status: engine::BudgetStatus) -> api_types::BudgetStatus {
    match status {
        engine::BudgetStatus::Normal => api_types::BudgetStatus::Normal,
        engine::BudgetStatus::Warning => api_types::BudgetStatus::Warning,
        engine::BudgetStatus::Critical => api_types::BudgetStatus::Critical,
        engine::BudgetStatus::Over => api_types::BudgetStatus::Over,
    }
}

pub async fn summary(
    Extension(user): Extension<staff::Model>,
    State(state): State<ServerState>,
    Path(case_id): Path<Uuid>,
    Query(query): Query<WindowQuery>,
) -> Result<Json<BudgetSummaryResponse>, ServerError> {
    let window = Window {
        from: query.from,
        to: query.to,
    };
    let summary = state
        .engine
        .budget_summary(case_id, window, &user.org_id)
        .await?;

    Ok(Json(BudgetSummaryResponse {
        case_id,
        authorized_hours_centi: summary.authorized_hours.map(|h| h.centi()),
        authorized_cents: summary.authorized_dollars.map(|d| d.cents()),
        consumed_hours_centi: summary.consumed_hours.centi(),
        consumed_cents: summary.consumed_dollars.cents(),
        remaining_hours_centi: summary.remaining_hours.map(|h| h.centi()),
        remaining_cents: summary.remaining_dollars.map(|d| d.cents()),
        hours_utilization_pct: summary.hours_utilization_pct,
        dollars_utilization_pct: summary.dollars_utilization_pct,
        status: map_budget_status(summary.status),
    }))
}

pub async fn classify_budget(
    Query(query): Query<BudgetClassifyQuery>,
) -> Json<BudgetClassifyResponse> {
    let status = classify_budget_status(query.utilization_pct, &BudgetThresholds::V1);
    Json(BudgetClassifyResponse {
        status: map_budget_status(status),
    })
}

pub async fn classify_payment(
    Query(query): Query<PaymentClassifyQuery>,
) -> Json<PaymentClassifyResponse> {
    let status = classify_payment_status(
        MoneyCents::new(query.total_cents),
        MoneyCents::new(query.paid_cents),
    );
    Json(PaymentClassifyResponse {
        status: map_payment_status(status),
    })
}
