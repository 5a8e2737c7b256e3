//! Status classification for budgets and invoices.
//!
//! This is the single place thresholds live. Every consumer (summary
//! service, dashboards, distribution reports) classifies through these
//! functions with an explicit [`BudgetThresholds`] table, so divergent
//! band definitions cannot accumulate at call sites.

use serde::{Deserialize, Serialize};

use crate::{EngineError, MoneyCents};

/// How far a case has eaten into its authorized budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Normal,
    Warning,
    Critical,
    Over,
}

impl BudgetStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Critical => "critical",
            Self::Over => "over",
        }
    }
}

/// Payment state of an invoice, derived from the payment ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Partial => "partial",
            Self::Paid => "paid",
        }
    }
}

impl TryFrom<&str> for PaymentStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "unpaid" => Ok(Self::Unpaid),
            "partial" => Ok(Self::Partial),
            "paid" => Ok(Self::Paid),
            other => Err(EngineError::InvalidAmount(format!(
                "invalid payment status: {other}"
            ))),
        }
    }
}

/// Ordered, contiguous utilization bands, in percent.
///
/// A utilization `r` classifies as the highest band whose lower bound it
/// reaches: `r >= over_pct` is over, `r >= critical_pct` is critical,
/// `r >= warning_pct` is warning, anything below is normal. Ties at a
/// boundary therefore always land in the higher-severity band.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetThresholds {
    pub warning_pct: f64,
    pub critical_pct: f64,
    pub over_pct: f64,
}

impl BudgetThresholds {
    /// The v1 band table: normal < 80 <= warning < 95 <= critical < 100 <= over.
    pub const V1: BudgetThresholds = BudgetThresholds {
        warning_pct: 80.0,
        critical_pct: 95.0,
        over_pct: 100.0,
    };
}

impl Default for BudgetThresholds {
    fn default() -> Self {
        Self::V1
    }
}

/// Classifies a utilization percentage into a budget band.
///
/// `None` means utilization is undefined (nothing authorized, or an
/// authorization of zero) and classifies as `Normal`.
#[must_use]
pub fn classify_budget_status(
    utilization_pct: Option<f64>,
    bands: &BudgetThresholds,
) -> BudgetStatus {
    let Some(pct) = utilization_pct else {
        return BudgetStatus::Normal;
    };
    if pct >= bands.over_pct {
        BudgetStatus::Over
    } else if pct >= bands.critical_pct {
        BudgetStatus::Critical
    } else if pct >= bands.warning_pct {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Normal
    }
}

/// Classifies an invoice from its total and the summed payment ledger.
///
/// With integer cents there is no rounding epsilon to absorb: zero payments
/// against a positive total is unpaid, a remainder of zero or less is paid,
/// anything in between is partial. A zero-total invoice has nothing owed
/// and classifies as paid.
#[must_use]
pub fn classify_payment_status(total: MoneyCents, paid: MoneyCents) -> PaymentStatus {
    if paid >= total {
        PaymentStatus::Paid
    } else if paid.is_zero() {
        PaymentStatus::Unpaid
    } else {
        PaymentStatus::Partial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_classifies_to_higher_severity() {
        let bands = BudgetThresholds::V1;
        assert_eq!(
            classify_budget_status(Some(79.99), &bands),
            BudgetStatus::Normal
        );
        assert_eq!(
            classify_budget_status(Some(80.0), &bands),
            BudgetStatus::Warning
        );
        assert_eq!(
            classify_budget_status(Some(95.0), &bands),
            BudgetStatus::Critical
        );
        assert_eq!(
            classify_budget_status(Some(100.0), &bands),
            BudgetStatus::Over
        );
        assert_eq!(
            classify_budget_status(Some(140.0), &bands),
            BudgetStatus::Over
        );
    }

    #[test]
    fn undefined_utilization_is_normal() {
        assert_eq!(
            classify_budget_status(None, &BudgetThresholds::V1),
            BudgetStatus::Normal
        );
    }

    #[test]
    fn payment_status_from_ledger_sums() {
        let total = MoneyCents::new(100_000);
        assert_eq!(
            classify_payment_status(total, MoneyCents::ZERO),
            PaymentStatus::Unpaid
        );
        assert_eq!(
            classify_payment_status(total, MoneyCents::new(50_000)),
            PaymentStatus::Partial
        );
        assert_eq!(
            classify_payment_status(total, MoneyCents::new(100_000)),
            PaymentStatus::Paid
        );
    }

    #[test]
    fn zero_total_invoice_is_paid() {
        assert_eq!(
            classify_payment_status(MoneyCents::ZERO, MoneyCents::ZERO),
            PaymentStatus::Paid
        );
    }
}
