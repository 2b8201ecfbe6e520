use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "committee")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub difficulty: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::committee_country::Entity")]
    CommitteeCountry,
}

impl Related<super::committee_country::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CommitteeCountry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
