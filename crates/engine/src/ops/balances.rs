//! Balance calculator: pure folds over the ledgers.
//!
//! Nothing here trusts a stored total. Retainer balances, invoice balances
//! due and budget consumption are summed from the append-only rows at read
//! time; the same folds run inside the payment allocator's open transaction
//! so its pre-commit re-checks see exactly what would be committed.

use sea_orm::{ConnectionTrait, Statement, Value};
use uuid::Uuid;

use crate::{FinanceEntryKind, MoneyCents, ResultEngine, Window};

use super::{Consumption, Engine};

/// Σ `retainer_entries.amount_cents` for one case.
pub(crate) async fn sum_retainer_for_case<C: ConnectionTrait>(
    conn: &C,
    case_id: &str,
) -> ResultEngine<MoneyCents> {
    let stmt = Statement::from_sql_and_values(
        conn.get_database_backend(),
        "SELECT COALESCE(SUM(amount_cents), 0) AS sum \
         FROM retainer_entries \
         WHERE case_id = ?",
        vec![case_id.into()],
    );
    let row = conn.query_one(stmt).await?;
    let sum: i64 = row.and_then(|r| r.try_get("", "sum").ok()).unwrap_or(0);
    Ok(MoneyCents::new(sum))
}

/// Σ `invoice_payments.amount_cents` for one invoice.
pub(crate) async fn sum_payments_for_invoice<C: ConnectionTrait>(
    conn: &C,
    invoice_id: &str,
) -> ResultEngine<MoneyCents> {
    let stmt = Statement::from_sql_and_values(
        conn.get_database_backend(),
        "SELECT COALESCE(SUM(amount_cents), 0) AS sum \
         FROM invoice_payments \
         WHERE invoice_id = ?",
        vec![invoice_id.into()],
    );
    let row = conn.query_one(stmt).await?;
    let sum: i64 = row.and_then(|r| r.try_get("", "sum").ok()).unwrap_or(0);
    Ok(MoneyCents::new(sum))
}

/// Folds hours and dollars consumed by finance entries in a window.
///
/// Hours count only `time` entries; dollars count both `time` and `expense`
/// entries. Window bounds are inclusive.
pub(crate) async fn sum_consumption_for_case<C: ConnectionTrait>(
    conn: &C,
    case_id: &str,
    window: Window,
) -> ResultEngine<Consumption> {
    let mut window_cond = String::new();
    let mut window_args: Vec<Value> = Vec::new();
    if let Some(from) = window.from {
        window_cond.push_str(" AND occurred_on >= ?");
        window_args.push(from.into());
    }
    if let Some(to) = window.to {
        window_cond.push_str(" AND occurred_on <= ?");
        window_args.push(to.into());
    }

    let backend = conn.get_database_backend();

    let hours_centi: i64 = {
        let stmt = Statement::from_sql_and_values(
            backend,
            format!(
                "SELECT COALESCE(SUM(hours_centi), 0) AS sum \
                 FROM finance_entries \
                 WHERE case_id = ? AND kind = ?{window_cond}"
            ),
            {
                let mut v: Vec<Value> = vec![case_id.into(), FinanceEntryKind::Time.as_str().into()];
                v.extend(window_args.iter().cloned());
                v
            },
        );
        let row = conn.query_one(stmt).await?;
        row.and_then(|r| r.try_get("", "sum").ok()).unwrap_or(0)
    };

    let amount_cents: i64 = {
        let stmt = Statement::from_sql_and_values(
            backend,
            format!(
                "SELECT COALESCE(SUM(amount_cents), 0) AS sum \
                 FROM finance_entries \
                 WHERE case_id = ?{window_cond}"
            ),
            {
                let mut v: Vec<Value> = vec![case_id.into()];
                v.extend(window_args);
                v
            },
        );
        let row = conn.query_one(stmt).await?;
        row.and_then(|r| r.try_get("", "sum").ok()).unwrap_or(0)
    };

    Ok(Consumption {
        hours: hours_centi.into(),
        dollars: MoneyCents::new(amount_cents),
    })
}

impl Engine {
    /// Current retainer balance for a case: Σ signed fund movements.
    pub async fn retainer_balance(&self, case_id: Uuid, org_id: &str) -> ResultEngine<MoneyCents> {
        let case = self.require_case(&self.database, case_id, org_id).await?;
        sum_retainer_for_case(&self.database, &case.id).await
    }

    /// Balance due on an invoice: total minus the summed payment ledger.
    pub async fn invoice_balance_due(
        &self,
        invoice_id: Uuid,
        org_id: &str,
    ) -> ResultEngine<MoneyCents> {
        let invoice = self
            .require_invoice(&self.database, invoice_id, org_id)
            .await?;
        let paid = sum_payments_for_invoice(&self.database, &invoice.id).await?;
        Ok(MoneyCents::new(invoice.total_cents) - paid)
    }

    /// Hours and dollars consumed by a case within a window.
    pub async fn budget_consumption(
        &self,
        case_id: Uuid,
        window: Window,
        org_id: &str,
    ) -> ResultEngine<Consumption> {
        let case = self.require_case(&self.database, case_id, org_id).await?;
        sum_consumption_for_case(&self.database, &case.id, window).await
    }
}
