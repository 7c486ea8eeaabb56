use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "repositories")]
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
    #[sea_orm(has_many = "super::repository_tags::Entity")]
    RepositoryTags,
}

impl Related<super::repository_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RepositoryTags.def()
    }
}

impl Related<super::tags::Entity> for Entity {
    fn to() -> RelationDef {
        super::repository_tags::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::repository_tags::Relation::Repository.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
