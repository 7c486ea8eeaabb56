use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sample_tags::Entity")]
    SampleTags,
    #[sea_orm(has_many = "super::feature_tags::Entity")]
    FeatureTags,
    #[sea_orm(has_many = "super::repository_tags::Entity")]
    RepositoryTags,
    #[sea_orm(has_many = "super::app_tags::Entity")]
    AppTags,
}

impl Related<super::sample_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SampleTags.def()
    }
}

impl Related<super::samples::Entity> for Entity {
    fn to() -> RelationDef {
        super::sample_tags::Relation::Sample.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::sample_tags::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
