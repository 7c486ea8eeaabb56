use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "apps")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::app_tags::Entity")]
    AppTags,
}

impl Related<super::app_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppTags.def()
    }
}

impl Related<super::tags::Entity> for Entity {
    fn to() -> RelationDef {
        super::app_tags::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::app_tags::Relation::App.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
