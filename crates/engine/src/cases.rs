//! Cases and their authorized budgets.
//!
//! A case carries optional authorized ceilings for hours and dollars. The
//! ceilings apply to the whole case lifetime; a reporting window only
//! restricts which consumption entries count against them.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, HoursCenti, MoneyCents, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub id: Uuid,
    pub org_id: String,
    pub title: String,
    pub budget_hours: Option<HoursCenti>,
    pub budget_dollars: Option<MoneyCents>,
    pub created_by: String,
}

impl Case {
    pub fn new(
        org_id: String,
        title: String,
        budget_hours: Option<HoursCenti>,
        budget_dollars: Option<MoneyCents>,
        created_by: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            org_id,
            title,
            budget_hours,
            budget_dollars,
            created_by,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub org_id: String,
    pub title: String,
    pub budget_hours_centi: Option<i64>,
    pub budget_cents: Option<i64>,
    pub created_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::finance_entries::Entity")]
    FinanceEntries,
    #[sea_orm(has_many = "super::invoices::Entity")]
    Invoices,
    #[sea_orm(has_many = "super::retainer_entries::Entity")]
    RetainerEntries,
}

impl Related<super::finance_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinanceEntries.def()
    }
}

impl Related<super::invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoices.def()
    }
}

impl Related<super::retainer_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RetainerEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Case> for ActiveModel {
    fn from(case: &Case) -> Self {
        Self {
            id: ActiveValue::Set(case.id.to_string()),
            org_id: ActiveValue::Set(case.org_id.clone()),
            title: ActiveValue::Set(case.title.clone()),
            budget_hours_centi: ActiveValue::Set(case.budget_hours.map(HoursCenti::centi)),
            budget_cents: ActiveValue::Set(case.budget_dollars.map(MoneyCents::cents)),
            created_by: ActiveValue::Set(case.created_by.clone()),
        }
    }
}

impl TryFrom<Model> for Case {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "case")?,
            org_id: model.org_id,
            title: model.title,
            budget_hours: model.budget_hours_centi.map(HoursCenti::new),
            budget_dollars: model.budget_cents.map(MoneyCents::new),
            created_by: model.created_by,
        })
    }
}
