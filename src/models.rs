use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::database::entities::{apps, features, repositories, samples, tags};

pub const NAME_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 500;

/// Truncate a string to `max` characters, respecting char boundaries.
pub fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SampleModel {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<String>,
    pub tags: Vec<String>,
}

impl SampleModel {
    pub fn from_entity(sample: samples::Model, tags: Vec<tags::Model>) -> Self {
        Self {
            id: sample.id,
            name: sample.name,
            description: sample.description,
            active: sample.active,
            created_at: sample.created_at,
            created_by: sample.created_by,
            updated_at: sample.updated_at,
            updated_by: sample.updated_by,
            tags: tags.into_iter().map(|t| t.name).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagModel {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<tags::Model> for TagModel {
    fn from(tag: tags::Model) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            description: tag.description,
        }
    }
}

/// Shared response shape for features, repositories and apps.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemModel {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

impl CatalogItemModel {
    pub fn from_feature(feature: features::Model, tags: Vec<tags::Model>) -> Self {
        Self {
            id: feature.id,
            name: feature.name,
            description: feature.description,
            created_at: feature.created_at,
            updated_at: feature.updated_at,
            tags: tags.into_iter().map(|t| t.name).collect(),
        }
    }

    pub fn from_repository(repo: repositories::Model, tags: Vec<tags::Model>) -> Self {
        Self {
            id: repo.id,
            name: repo.name,
            description: repo.description,
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            tags: tags.into_iter().map(|t| t.name).collect(),
        }
    }

    pub fn from_app(app: apps::Model, tags: Vec<tags::Model>) -> Self {
        Self {
            id: app.id,
            name: app.name,
            description: app.description,
            created_at: app.created_at,
            updated_at: app.updated_at,
            tags: tags.into_iter().map(|t| t.name).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSampleRequest {
    pub name: String,
    pub description: Option<String>,
    pub active: Option<bool>,
    pub created_by: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSampleRequest {
    pub name: String,
    pub description: Option<String>,
    pub active: Option<bool>,
    pub updated_by: Option<String>,
    /// When omitted the existing tag assignments are kept.
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCatalogItemRequest {
    pub name: String,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("ok", 10), "ok");
    }

    #[test]
    fn sample_model_camel_case_serialization() {
        let model = SampleModel {
            id: 1,
            name: "Alpha".to_string(),
            description: None,
            active: true,
            created_at: Utc::now(),
            created_by: Some("tester".to_string()),
            updated_at: Utc::now(),
            updated_by: None,
            tags: vec!["blue".to_string()],
        };
        let json = serde_json::to_value(&model).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("createdBy").is_some());
        assert!(json.get("created_at").is_none());
    }
}
