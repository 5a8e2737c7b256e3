//! Retainer fund ledger.
//!
//! Signed movements of pre-paid funds held against a case: positive rows are
//! deposits, negative rows are applications to an invoice (which then link
//! the invoice id). The current balance is always the fold of these rows,
//! and no committed transaction may leave that fold negative.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetainerFundEntry {
    pub id: Uuid,
    pub case_id: Uuid,
    pub amount: MoneyCents,
    pub invoice_id: Option<Uuid>,
    pub note: Option<String>,
    pub created_by: String,
    pub org_id: String,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "retainer_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub case_id: String,
    pub amount_cents: i64,
    pub invoice_id: Option<String>,
    pub note: Option<String>,
    pub created_by: String,
    pub org_id: String,
    pub recorded_at: DateTimeUtc,
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

impl From<&RetainerFundEntry> for ActiveModel {
    fn from(entry: &RetainerFundEntry) -> Self {
        Self {
            id: ActiveValue::Set(entry.id.to_string()),
            case_id: ActiveValue::Set(entry.case_id.to_string()),
            amount_cents: ActiveValue::Set(entry.amount.cents()),
            invoice_id: ActiveValue::Set(entry.invoice_id.map(|id| id.to_string())),
            note: ActiveValue::Set(entry.note.clone()),
            created_by: ActiveValue::Set(entry.created_by.clone()),
            org_id: ActiveValue::Set(entry.org_id.clone()),
            recorded_at: ActiveValue::Set(entry.recorded_at),
        }
    }
}

impl TryFrom<Model> for RetainerFundEntry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "retainer entry")?,
            case_id: parse_uuid(&model.case_id, "case")?,
            amount: MoneyCents::new(model.amount_cents),
            invoice_id: model
                .invoice_id
                .as_deref()
                .map(|id| parse_uuid(id, "invoice"))
                .transpose()?,
            note: model.note,
            created_by: model.created_by,
            org_id: model.org_id,
            recorded_at: model.recorded_at,
        })
    }
}
