use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "samples")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: ChronoDateTimeUtc,
    pub created_by: Option<String>,
    pub updated_at: ChronoDateTimeUtc,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sample_tags::Entity")]
    SampleTags,
}

impl Related<super::sample_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SampleTags.def()
    }
}

impl Related<super::tags::Entity> for Entity {
    fn to() -> RelationDef {
        super::sample_tags::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::sample_tags::Relation::Sample.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
