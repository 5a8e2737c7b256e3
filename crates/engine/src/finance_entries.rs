//! Finance entries: the consumption side of a case budget.
//!
//! One row per billable time entry or expense. Entries are immutable once
//! written; budget consumption is always a fold over these rows, never a
//! stored running total.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, HoursCenti, MoneyCents, util::parse_uuid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinanceEntryKind {
    Time,
    Expense,
}

impl FinanceEntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for FinanceEntryKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "time" => Ok(Self::Time),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidAmount(format!(
                "invalid finance entry kind: {other}"
            ))),
        }
    }
}

/// Inclusive date window restricting which entries count.
///
/// `None` on either end leaves that end open; `Window::default()` covers the
/// whole case lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl Window {
    #[must_use]
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceEntry {
    pub id: Uuid,
    pub case_id: Uuid,
    pub kind: FinanceEntryKind,
    pub amount: MoneyCents,
    pub hours: Option<HoursCenti>,
    pub occurred_on: NaiveDate,
    pub note: Option<String>,
    pub created_by: String,
    pub org_id: String,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "finance_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub case_id: String,
    pub kind: String,
    pub amount_cents: i64,
    pub hours_centi: Option<i64>,
    pub occurred_on: Date,
    pub note: Option<String>,
    pub created_by: String,
    pub org_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cases::Entity",
        from = "Column::CaseId",
        to = "super::cases::Column::Id"
    )]
    Cases,
}

impl Related<super::cases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cases.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&FinanceEntry> for ActiveModel {
    fn from(entry: &FinanceEntry) -> Self {
        Self {
            id: ActiveValue::Set(entry.id.to_string()),
            case_id: ActiveValue::Set(entry.case_id.to_string()),
            kind: ActiveValue::Set(entry.kind.as_str().to_string()),
            amount_cents: ActiveValue::Set(entry.amount.cents()),
            hours_centi: ActiveValue::Set(entry.hours.map(HoursCenti::centi)),
            occurred_on: ActiveValue::Set(entry.occurred_on),
            note: ActiveValue::Set(entry.note.clone()),
            created_by: ActiveValue::Set(entry.created_by.clone()),
            org_id: ActiveValue::Set(entry.org_id.clone()),
        }
    }
}

impl TryFrom<Model> for FinanceEntry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "finance entry")?,
            case_id: parse_uuid(&model.case_id, "case")?,
            kind: FinanceEntryKind::try_from(model.kind.as_str())?,
            amount: MoneyCents::new(model.amount_cents),
            hours: model.hours_centi.map(HoursCenti::new),
            occurred_on: model.occurred_on,
            note: model.note,
            created_by: model.created_by,
            org_id: model.org_id,
        })
    }
}
