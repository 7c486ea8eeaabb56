use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::database::entities::{sample_tags, samples, tags};
use crate::errors::{SampleError, SampleResult};
use crate::models::{
    CreateSampleRequest, SampleModel, UpdateSampleRequest, DESCRIPTION_MAX_LEN, NAME_MAX_LEN,
};
use crate::services::TagService;

#[derive(Clone)]
pub struct SampleService {
    db: DatabaseConnection,
    tag_service: TagService,
}

impl SampleService {
    pub fn new(db: DatabaseConnection) -> Self {
        let tag_service = TagService::new(db.clone());
        Self { db, tag_service }
    }

    pub async fn get(&self, id: i32) -> SampleResult<SampleModel> {
        let sample = samples::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(SampleError::NotFound(id))?;
        let tags = sample.find_related(tags::Entity).all(&self.db).await?;
        Ok(SampleModel::from_entity(sample, tags))
    }

    pub async fn find_by_name(&self, name: &str) -> SampleResult<Option<samples::Model>> {
        let found = samples::Entity::find()
            .filter(samples::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(found)
    }

    pub async fn list_all(&self) -> SampleResult<Vec<SampleModel>> {
        let rows = samples::Entity::find()
            .order_by_asc(samples::Column::Id)
            .all(&self.db)
            .await?;
        let mut models = Vec::with_capacity(rows.len());
        for sample in rows {
            let tags = sample.find_related(tags::Entity).all(&self.db).await?;
            models.push(SampleModel::from_entity(sample, tags));
        }
        Ok(models)
    }

    pub async fn create(&self, request: CreateSampleRequest) -> SampleResult<SampleModel> {
        let name = validate_name(&request.name)?;
        let description = validate_description(request.description)?;

        if self.find_by_name(&name).await?.is_some() {
            return Err(SampleError::Validation(format!(
                "Sample with name '{}' already exists",
                name
            )));
        }

        let now = Utc::now();
        let sample = samples::ActiveModel {
            name: Set(name),
            description: Set(description),
            active: Set(request.active.unwrap_or(true)),
            created_at: Set(now),
            created_by: Set(request.created_by.clone()),
            updated_at: Set(now),
            updated_by: Set(request.created_by),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        let tags = match request.tags {
            Some(names) => self.set_tags(sample.id, &names).await?,
            None => Vec::new(),
        };

        Ok(SampleModel::from_entity(sample, tags))
    }

    pub async fn update(&self, id: i32, request: UpdateSampleRequest) -> SampleResult<SampleModel> {
        let existing = samples::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(SampleError::NotFound(id))?;

        let name = validate_name(&request.name)?;
        let description = validate_description(request.description)?;

        if let Some(other) = self.find_by_name(&name).await? {
            if other.id != id {
                return Err(SampleError::Validation(format!(
                    "Sample with name '{}' already exists",
                    name
                )));
            }
        }

        let mut active_sample: samples::ActiveModel = existing.into();
        active_sample.name = Set(name);
        active_sample.description = Set(description);
        if let Some(active) = request.active {
            active_sample.active = Set(active);
        }
        active_sample.updated_at = Set(Utc::now());
        active_sample.updated_by = Set(request.updated_by);

        let updated = active_sample.update(&self.db).await?;

        let tags = match request.tags {
            Some(names) => self.set_tags(updated.id, &names).await?,
            None => updated.find_related(tags::Entity).all(&self.db).await?,
        };

        Ok(SampleModel::from_entity(updated, tags))
    }

    pub async fn delete(&self, id: i32) -> SampleResult<()> {
        let result = samples::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(SampleError::NotFound(id));
        }
        Ok(())
    }

    /// Replace a sample's tag assignments with the given names.
    async fn set_tags(&self, sample_id: i32, names: &[String]) -> SampleResult<Vec<tags::Model>> {
        let resolved = self.tag_service.resolve_names(names).await?;

        sample_tags::Entity::delete_many()
            .filter(sample_tags::Column::SampleId.eq(sample_id))
            .exec(&self.db)
            .await?;

        for tag in &resolved {
            sample_tags::ActiveModel {
                sample_id: Set(sample_id),
                tag_id: Set(tag.id),
            }
            .insert(&self.db)
            .await?;
        }

        Ok(resolved)
    }
}

fn validate_name(name: &str) -> SampleResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SampleError::Validation(
            "Sample name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(SampleError::Validation(format!(
            "Sample name must not exceed {} characters",
            NAME_MAX_LEN
        )));
    }
    Ok(name.to_string())
}

fn validate_description(description: Option<String>) -> SampleResult<Option<String>> {
    match description {
        Some(desc) if desc.chars().count() > DESCRIPTION_MAX_LEN => {
            Err(SampleError::Validation(format!(
                "Sample description must not exceed {} characters",
                DESCRIPTION_MAX_LEN
            )))
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;

    fn request(name: &str) -> CreateSampleRequest {
        CreateSampleRequest {
            name: name.to_string(),
            description: None,
            active: None,
            created_by: None,
            tags: None,
        }
    }

    #[tokio::test]
    async fn create_and_get_round_trip() {
        let db = setup_test_db().await;
        let service = SampleService::new(db);

        let created = service
            .create(CreateSampleRequest {
                name: "  Alpha  ".to_string(),
                description: Some("first".to_string()),
                active: Some(false),
                created_by: Some("tester".to_string()),
                tags: Some(vec!["blue".to_string(), "green".to_string()]),
            })
            .await
            .unwrap();

        assert_eq!(created.name, "Alpha");
        assert!(!created.active);
        assert_eq!(created.tags.len(), 2);

        let fetched = service.get(created.id).await.unwrap();
        assert_eq!(fetched.name, "Alpha");
        assert_eq!(fetched.created_by.as_deref(), Some("tester"));
        assert_eq!(fetched.tags.len(), 2);
    }

    #[tokio::test]
    async fn duplicate_name_rejected() {
        let db = setup_test_db().await;
        let service = SampleService::new(db);

        service.create(request("Alpha")).await.unwrap();
        let err = service.create(request("Alpha")).await.unwrap_err();
        assert!(matches!(err, SampleError::Validation(_)));
    }

    #[tokio::test]
    async fn empty_and_overlong_names_rejected() {
        let db = setup_test_db().await;
        let service = SampleService::new(db);

        let err = service.create(request("   ")).await.unwrap_err();
        assert!(matches!(err, SampleError::Validation(_)));

        let long = "x".repeat(NAME_MAX_LEN + 1);
        let err = service.create(request(&long)).await.unwrap_err();
        assert!(matches!(err, SampleError::Validation(_)));
    }

    #[tokio::test]
    async fn update_replaces_tags_only_when_given() {
        let db = setup_test_db().await;
        let service = SampleService::new(db);

        let created = service
            .create(CreateSampleRequest {
                name: "Alpha".to_string(),
                description: None,
                active: None,
                created_by: None,
                tags: Some(vec!["blue".to_string()]),
            })
            .await
            .unwrap();

        let updated = service
            .update(
                created.id,
                UpdateSampleRequest {
                    name: "Alpha".to_string(),
                    description: Some("renamed".to_string()),
                    active: None,
                    updated_by: Some("editor".to_string()),
                    tags: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.tags, vec!["blue".to_string()]);
        assert_eq!(updated.updated_by.as_deref(), Some("editor"));

        let updated = service
            .update(
                created.id,
                UpdateSampleRequest {
                    name: "Alpha".to_string(),
                    description: None,
                    active: None,
                    updated_by: None,
                    tags: Some(vec!["red".to_string()]),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.tags, vec!["red".to_string()]);
    }

    #[tokio::test]
    async fn delete_missing_sample_is_not_found() {
        let db = setup_test_db().await;
        let service = SampleService::new(db);

        let err = service.delete(999).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
