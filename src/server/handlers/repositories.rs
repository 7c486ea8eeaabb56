use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::database::entities::{repositories, repository_tags, tags};
use crate::errors::{SampleError, SampleResult};
use crate::models::{CatalogItemModel, CreateCatalogItemRequest};
use crate::server::app::AppState;
use crate::server::handlers::{error_response, ApiError};
use crate::services::TagService;

#[utoipa::path(
    get,
    path = "/api/v1/repositories",
    responses(
        (status = 200, description = "List all repositories", body = [CatalogItemModel])
    )
)]
pub async fn list_repositories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CatalogItemModel>>, ApiError> {
    let rows = repositories::Entity::find()
        .order_by_asc(repositories::Column::Id)
        .all(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?;

    let mut items = Vec::with_capacity(rows.len());
    for repo in rows {
        let tags = repo
            .find_related(tags::Entity)
            .all(&state.db)
            .await
            .map_err(|e| error_response(e.into()))?;
        items.push(CatalogItemModel::from_repository(repo, tags));
    }
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/v1/repositories",
    request_body = CreateCatalogItemRequest,
    responses(
        (status = 201, description = "Repository created", body = CatalogItemModel),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_repository(
    State(state): State<AppState>,
    Json(payload): Json<CreateCatalogItemRequest>,
) -> Result<(StatusCode, Json<CatalogItemModel>), ApiError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(error_response(SampleError::Validation(
            "Repository name must not be empty".to_string(),
        )));
    }

    let existing = repositories::Entity::find()
        .filter(repositories::Column::Name.eq(name.as_str()))
        .one(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?;
    if existing.is_some() {
        return Err(error_response(SampleError::Validation(format!(
            "Repository with name '{}' already exists",
            name
        ))));
    }

    let now = Utc::now();
    let repo = repositories::ActiveModel {
        name: Set(name),
        description: Set(payload.description),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| error_response(e.into()))?;

    let tags = match payload.tags {
        Some(names) => set_tags(&state.db, repo.id, &names)
            .await
            .map_err(error_response)?,
        None => Vec::new(),
    };

    Ok((
        StatusCode::CREATED,
        Json(CatalogItemModel::from_repository(repo, tags)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/repositories/{id}",
    params(
        ("id" = i32, Path, description = "Repository ID")
    ),
    responses(
        (status = 200, description = "Repository found", body = CatalogItemModel),
        (status = 404, description = "Repository not found")
    )
)]
pub async fn get_repository(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CatalogItemModel>, ApiError> {
    let repo = repositories::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?
        .ok_or_else(|| error_response(SampleError::NotFound(id)))?;
    let tags = repo
        .find_related(tags::Entity)
        .all(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?;
    Ok(Json(CatalogItemModel::from_repository(repo, tags)))
}

#[utoipa::path(
    put,
    path = "/api/v1/repositories/{id}",
    params(
        ("id" = i32, Path, description = "Repository ID")
    ),
    request_body = CreateCatalogItemRequest,
    responses(
        (status = 200, description = "Repository updated", body = CatalogItemModel),
        (status = 404, description = "Repository not found")
    )
)]
pub async fn update_repository(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CreateCatalogItemRequest>,
) -> Result<Json<CatalogItemModel>, ApiError> {
    let repo = repositories::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?
        .ok_or_else(|| error_response(SampleError::NotFound(id)))?;

    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(error_response(SampleError::Validation(
            "Repository name must not be empty".to_string(),
        )));
    }

    let mut active: repositories::ActiveModel = repo.into();
    active.name = Set(name);
    active.description = Set(payload.description);
    active.updated_at = Set(Utc::now());
    let repo = active
        .update(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?;

    let tags = match payload.tags {
        Some(names) => set_tags(&state.db, repo.id, &names)
            .await
            .map_err(error_response)?,
        None => repo
            .find_related(tags::Entity)
            .all(&state.db)
            .await
            .map_err(|e| error_response(e.into()))?,
    };

    Ok(Json(CatalogItemModel::from_repository(repo, tags)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/repositories/{id}",
    params(
        ("id" = i32, Path, description = "Repository ID")
    ),
    responses(
        (status = 204, description = "Repository deleted"),
        (status = 404, description = "Repository not found")
    )
)]
pub async fn delete_repository(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let result = repositories::Entity::delete_by_id(id)
        .exec(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?;
    if result.rows_affected == 0 {
        return Err(error_response(SampleError::NotFound(id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn set_tags(
    db: &DatabaseConnection,
    repository_id: i32,
    names: &[String],
) -> SampleResult<Vec<tags::Model>> {
    let resolved = TagService::new(db.clone()).resolve_names(names).await?;

    repository_tags::Entity::delete_many()
        .filter(repository_tags::Column::RepositoryId.eq(repository_id))
        .exec(db)
        .await?;

    for tag in &resolved {
        repository_tags::ActiveModel {
            repository_id: Set(repository_id),
            tag_id: Set(tag.id),
        }
        .insert(db)
        .await?;
    }

    Ok(resolved)
}
