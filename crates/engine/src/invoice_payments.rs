//! Invoice payment ledger.
//!
//! Append-only: a payment row is never edited or deleted. A correction is a
//! new entry through an explicit reversal workflow, never an update of
//! history. The optional `idempotency_key` is unique per
//! `(invoice_id, recorded_by, key)` so a retried request cannot double-apply.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoicePayment {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub amount: MoneyCents,
    pub paid_on: NaiveDate,
    pub note: Option<String>,
    pub recorded_by: String,
    pub org_id: String,
    pub idempotency_key: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "invoice_payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub invoice_id: String,
    pub amount_cents: i64,
    pub paid_on: Date,
    pub note: Option<String>,
    pub recorded_by: String,
    pub org_id: String,
    pub idempotency_key: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::invoices::Entity",
        from = "Column::InvoiceId",
        to = "super::invoices::Column::Id"
    )]
    Invoices,
}

impl Related<super::invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&InvoicePayment> for ActiveModel {
    fn from(payment: &InvoicePayment) -> Self {
        Self {
            id: ActiveValue::Set(payment.id.to_string()),
            invoice_id: ActiveValue::Set(payment.invoice_id.to_string()),
            amount_cents: ActiveValue::Set(payment.amount.cents()),
            paid_on: ActiveValue::Set(payment.paid_on),
            note: ActiveValue::Set(payment.note.clone()),
            recorded_by: ActiveValue::Set(payment.recorded_by.clone()),
            org_id: ActiveValue::Set(payment.org_id.clone()),
            idempotency_key: ActiveValue::Set(payment.idempotency_key.clone()),
        }
    }
}

impl TryFrom<Model> for InvoicePayment {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "payment")?,
            invoice_id: parse_uuid(&model.invoice_id, "invoice")?,
            amount: MoneyCents::new(model.amount_cents),
            paid_on: model.paid_on,
            note: model.note,
            recorded_by: model.recorded_by,
            org_id: model.org_id,
            idempotency_key: model.idempotency_key,
        })
    }
}
