//! Budget summary service.
//!
//! Aggregates ledger-derived consumption against a case's authorized
//! ceilings for a reporting window.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    BudgetStatus, BudgetThresholds, HoursCenti, MoneyCents, ResultEngine, Window,
    classify_budget_status,
};

use super::{Engine, balances::sum_consumption_for_case};

/// Hours and dollars consumed within a window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumption {
    pub hours: HoursCenti,
    pub dollars: MoneyCents,
}

/// Consumption measured against a case's authorized budget.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub authorized_hours: Option<HoursCenti>,
    pub authorized_dollars: Option<MoneyCents>,
    pub consumed_hours: HoursCenti,
    pub consumed_dollars: MoneyCents,
    /// Remaining ceilings; negative when over budget, `None` when nothing
    /// is authorized.
    pub remaining_hours: Option<HoursCenti>,
    pub remaining_dollars: Option<MoneyCents>,
    pub hours_utilization_pct: Option<f64>,
    pub dollars_utilization_pct: Option<f64>,
    pub status: BudgetStatus,
}

impl BudgetSummary {
    /// The single utilization number consumers should classify by.
    ///
    /// Dollars take priority over hours whenever a dollar ceiling is
    /// authorized and non-zero; hours are the fallback. Status aggregation
    /// (distribution charts, per-case reports) must preserve this ordering.
    #[must_use]
    pub fn primary_utilization_pct(&self) -> Option<f64> {
        self.dollars_utilization_pct.or(self.hours_utilization_pct)
    }
}

impl Engine {
    /// Builds the budget summary for a case over a reporting window.
    ///
    /// Ceilings come from the case record; consumption is folded from the
    /// finance entries in the window; the status classifies the primary
    /// utilization with the v1 threshold table.
    pub async fn budget_summary(
        &self,
        case_id: Uuid,
        window: Window,
        org_id: &str,
    ) -> ResultEngine<BudgetSummary> {
        let case = self.require_case(&self.database, case_id, org_id).await?;
        let consumed = sum_consumption_for_case(&self.database, &case.id, window).await?;

        let authorized_hours = case.budget_hours_centi.map(HoursCenti::new);
        let authorized_dollars = case.budget_cents.map(MoneyCents::new);

        let hours_utilization_pct =
            authorized_hours.and_then(|budget| consumed.hours.percent_of(budget));
        let dollars_utilization_pct =
            authorized_dollars.and_then(|budget| consumed.dollars.percent_of(budget));

        let summary = BudgetSummary {
            authorized_hours,
            authorized_dollars,
            consumed_hours: consumed.hours,
            consumed_dollars: consumed.dollars,
            remaining_hours: authorized_hours.map(|budget| budget - consumed.hours),
            remaining_dollars: authorized_dollars.map(|budget| budget - consumed.dollars),
            hours_utilization_pct,
            dollars_utilization_pct,
            status: BudgetStatus::Normal,
        };

        Ok(BudgetSummary {
            status: classify_budget_status(
                summary.primary_utilization_pct(),
                &BudgetThresholds::V1,
            ),
            ..summary
        })
    }
}
