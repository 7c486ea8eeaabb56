use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::database::entities::tags;
use crate::errors::SampleError;
use crate::models::{CreateTagRequest, TagModel};
use crate::server::app::AppState;
use crate::server::handlers::{error_response, ApiError};

#[utoipa::path(
    get,
    path = "/api/v1/tags",
    responses(
        (status = 200, description = "List all tags", body = [TagModel])
    )
)]
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<TagModel>>, ApiError> {
    let tags = tags::Entity::find()
        .order_by_asc(tags::Column::Id)
        .all(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?;
    Ok(Json(tags.into_iter().map(TagModel::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/tags",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Tag created", body = TagModel),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_tag(
    State(state): State<AppState>,
    Json(payload): Json<CreateTagRequest>,
) -> Result<(StatusCode, Json<TagModel>), ApiError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(error_response(SampleError::Validation(
            "Tag name must not be empty".to_string(),
        )));
    }

    let existing = tags::Entity::find()
        .filter(tags::Column::Name.eq(name.as_str()))
        .one(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?;
    if existing.is_some() {
        return Err(error_response(SampleError::Validation(format!(
            "Tag with name '{}' already exists",
            name
        ))));
    }

    let tag = tags::ActiveModel {
        name: Set(name),
        description: Set(payload.description),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| error_response(e.into()))?;

    Ok((StatusCode::CREATED, Json(TagModel::from(tag))))
}

#[utoipa::path(
    get,
    path = "/api/v1/tags/{id}",
    params(
        ("id" = i32, Path, description = "Tag ID")
    ),
    responses(
        (status = 200, description = "Tag found", body = TagModel),
        (status = 404, description = "Tag not found")
    )
)]
pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TagModel>, ApiError> {
    let tag = tags::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?
        .ok_or_else(|| error_response(SampleError::NotFound(id)))?;
    Ok(Json(TagModel::from(tag)))
}

#[utoipa::path(
    put,
    path = "/api/v1/tags/{id}",
    params(
        ("id" = i32, Path, description = "Tag ID")
    ),
    request_body = CreateTagRequest,
    responses(
        (status = 200, description = "Tag updated", body = TagModel),
        (status = 404, description = "Tag not found")
    )
)]
pub async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CreateTagRequest>,
) -> Result<Json<TagModel>, ApiError> {
    let tag = tags::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?
        .ok_or_else(|| error_response(SampleError::NotFound(id)))?;

    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(error_response(SampleError::Validation(
            "Tag name must not be empty".to_string(),
        )));
    }

    let other = tags::Entity::find()
        .filter(tags::Column::Name.eq(name.as_str()))
        .one(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?;
    if other.map(|t| t.id != id).unwrap_or(false) {
        return Err(error_response(SampleError::Validation(format!(
            "Tag with name '{}' already exists",
            name
        ))));
    }

    let mut active: tags::ActiveModel = tag.into();
    active.name = Set(name);
    active.description = Set(payload.description);
    let tag = active
        .update(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?;

    Ok(Json(TagModel::from(tag)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tags/{id}",
    params(
        ("id" = i32, Path, description = "Tag ID")
    ),
    responses(
        (status = 204, description = "Tag deleted"),
        (status = 404, description = "Tag not found")
    )
)]
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let result = tags::Entity::delete_by_id(id)
        .exec(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?;
    if result.rows_affected == 0 {
        return Err(error_response(SampleError::NotFound(id)));
    }
    Ok(StatusCode::NO_CONTENT)
}
