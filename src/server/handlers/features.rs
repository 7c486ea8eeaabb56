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

use crate::database::entities::{feature_tags, features, tags};
use crate::errors::{SampleError, SampleResult};
use crate::models::{CatalogItemModel, CreateCatalogItemRequest};
use crate::server::app::AppState;
use crate::server::handlers::{error_response, ApiError};
use crate::services::TagService;

#[utoipa::path(
    get,
    path = "/api/v1/features",
    responses(
        (status = 200, description = "List all features", body = [CatalogItemModel])
    )
)]
pub async fn list_features(
    State(state): State<AppState>,
) -> Result<Json<Vec<CatalogItemModel>>, ApiError> {
    let rows = features::Entity::find()
        .order_by_asc(features::Column::Id)
        .all(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?;

    let mut items = Vec::with_capacity(rows.len());
    for feature in rows {
        let tags = feature
            .find_related(tags::Entity)
            .all(&state.db)
            .await
            .map_err(|e| error_response(e.into()))?;
        items.push(CatalogItemModel::from_feature(feature, tags));
    }
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/v1/features",
    request_body = CreateCatalogItemRequest,
    responses(
        (status = 201, description = "Feature created", body = CatalogItemModel),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_feature(
    State(state): State<AppState>,
    Json(payload): Json<CreateCatalogItemRequest>,
) -> Result<(StatusCode, Json<CatalogItemModel>), ApiError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(error_response(SampleError::Validation(
            "Feature name must not be empty".to_string(),
        )));
    }

    let existing = features::Entity::find()
        .filter(features::Column::Name.eq(name.as_str()))
        .one(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?;
    if existing.is_some() {
        return Err(error_response(SampleError::Validation(format!(
            "Feature with name '{}' already exists",
            name
        ))));
    }

    let now = Utc::now();
    let feature = features::ActiveModel {
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
        Some(names) => set_tags(&state.db, feature.id, &names)
            .await
            .map_err(error_response)?,
        None => Vec::new(),
    };

    Ok((
        StatusCode::CREATED,
        Json(CatalogItemModel::from_feature(feature, tags)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/features/{id}",
    params(
        ("id" = i32, Path, description = "Feature ID")
    ),
    responses(
        (status = 200, description = "Feature found", body = CatalogItemModel),
        (status = 404, description = "Feature not found")
    )
)]
pub async fn get_feature(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CatalogItemModel>, ApiError> {
    let feature = features::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?
        .ok_or_else(|| error_response(SampleError::NotFound(id)))?;
    let tags = feature
        .find_related(tags::Entity)
        .all(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?;
    Ok(Json(CatalogItemModel::from_feature(feature, tags)))
}

#[utoipa::path(
    put,
    path = "/api/v1/features/{id}",
    params(
        ("id" = i32, Path, description = "Feature ID")
    ),
    request_body = CreateCatalogItemRequest,
    responses(
        (status = 200, description = "Feature updated", body = CatalogItemModel),
        (status = 404, description = "Feature not found")
    )
)]
pub async fn update_feature(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CreateCatalogItemRequest>,
) -> Result<Json<CatalogItemModel>, ApiError> {
    let feature = features::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?
        .ok_or_else(|| error_response(SampleError::NotFound(id)))?;

    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(error_response(SampleError::Validation(
            "Feature name must not be empty".to_string(),
        )));
    }

    let mut active: features::ActiveModel = feature.into();
    active.name = Set(name);
    active.description = Set(payload.description);
    active.updated_at = Set(Utc::now());
    let feature = active
        .update(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?;

    let tags = match payload.tags {
        Some(names) => set_tags(&state.db, feature.id, &names)
            .await
            .map_err(error_response)?,
        None => feature
            .find_related(tags::Entity)
            .all(&state.db)
            .await
            .map_err(|e| error_response(e.into()))?,
    };

    Ok(Json(CatalogItemModel::from_feature(feature, tags)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/features/{id}",
    params(
        ("id" = i32, Path, description = "Feature ID")
    ),
    responses(
        (status = 204, description = "Feature deleted"),
        (status = 404, description = "Feature not found")
    )
)]
pub async fn delete_feature(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let result = features::Entity::delete_by_id(id)
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
    feature_id: i32,
    names: &[String],
) -> SampleResult<Vec<tags::Model>> {
    let resolved = TagService::new(db.clone()).resolve_names(names).await?;

    feature_tags::Entity::delete_many()
        .filter(feature_tags::Column::FeatureId.eq(feature_id))
        .exec(db)
        .await?;

    for tag in &resolved {
        feature_tags::ActiveModel {
            feature_id: Set(feature_id),
            tag_id: Set(tag.id),
        }
        .insert(db)
        .await?;
    }

    Ok(resolved)
}
