//! Invoices.
//!
//! Invoices are created by upstream billing workflows. The reconciliation
//! engine owns exactly one field here: `status`, which is re-derived from
//! the payment ledger inside every payment transaction. `balance_due` is
//! never stored; it is always `total - Σ payments`.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, PaymentStatus, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub case_id: Uuid,
    pub total: MoneyCents,
    pub issued_on: NaiveDate,
    pub status: PaymentStatus,
    pub created_by: String,
    pub org_id: String,
}

impl Invoice {
    /// A freshly issued invoice with no payments yet.
    pub fn new(
        case_id: Uuid,
        total: MoneyCents,
        issued_on: NaiveDate,
        created_by: String,
        org_id: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            case_id,
            total,
            issued_on,
            status: PaymentStatus::Unpaid,
            created_by,
            org_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub case_id: String,
    pub total_cents: i64,
    pub issued_on: Date,
    pub status: String,
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
    #[sea_orm(has_many = "super::invoice_payments::Entity")]
    InvoicePayments,
}

impl Related<super::cases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cases.def()
    }
}

impl Related<super::invoice_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InvoicePayments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Invoice> for ActiveModel {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: ActiveValue::Set(invoice.id.to_string()),
            case_id: ActiveValue::Set(invoice.case_id.to_string()),
            total_cents: ActiveValue::Set(invoice.total.cents()),
            issued_on: ActiveValue::Set(invoice.issued_on),
            status: ActiveValue::Set(invoice.status.as_str().to_string()),
            created_by: ActiveValue::Set(invoice.created_by.clone()),
            org_id: ActiveValue::Set(invoice.org_id.clone()),
        }
    }
}

impl TryFrom<Model> for Invoice {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "invoice")?,
            case_id: parse_uuid(&model.case_id, "case")?,
            total: MoneyCents::new(model.total_cents),
            issued_on: model.issued_on,
            status: PaymentStatus::try_from(model.status.as_str())?,
            created_by: model.created_by,
            org_id: model.org_id,
        })
    }
}
