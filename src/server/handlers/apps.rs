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

use crate::database::entities::{app_tags, apps, tags};
use crate::errors::{SampleError, SampleResult};
use crate::models::{CatalogItemModel, CreateCatalogItemRequest};
use crate::server::app::AppState;
use crate::server::handlers::{error_response, ApiError};
use crate::services::TagService;

#[utoipa::path(
    get,
    path = "/api/v1/apps",
    responses(
        (status = 200, description = "List all apps", body = [CatalogItemModel])
    )
)]
pub async fn list_apps(
    State(state): State<AppState>,
) -> Result<Json<Vec<CatalogItemModel>>, ApiError> {
    let rows = apps::Entity::find()
        .order_by_asc(apps::Column::Id)
        .all(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?;

    let mut items = Vec::with_capacity(rows.len());
    for app in rows {
        let tags = app
            .find_related(tags::Entity)
            .all(&state.db)
            .await
            .map_err(|e| error_response(e.into()))?;
        items.push(CatalogItemModel::from_app(app, tags));
    }
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/v1/apps",
    request_body = CreateCatalogItemRequest,
    responses(
        (status = 201, description = "App created", body = CatalogItemModel),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_app_item(
    State(state): State<AppState>,
    Json(payload): Json<CreateCatalogItemRequest>,
) -> Result<(StatusCode, Json<CatalogItemModel>), ApiError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(error_response(SampleError::Validation(
            "App name must not be empty".to_string(),
        )));
    }

    let existing = apps::Entity::find()
        .filter(apps::Column::Name.eq(name.as_str()))
        .one(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?;
    if existing.is_some() {
        return Err(error_response(SampleError::Validation(format!(
            "App with name '{}' already exists",
            name
        ))));
    }

    let now = Utc::now();
    let app = apps::ActiveModel {
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
        Some(names) => set_tags(&state.db, app.id, &names)
            .await
            .map_err(error_response)?,
        None => Vec::new(),
    };

    Ok((
        StatusCode::CREATED,
        Json(CatalogItemModel::from_app(app, tags)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/apps/{id}",
    params(
        ("id" = i32, Path, description = "App ID")
    ),
    responses(
        (status = 200, description = "App found", body = CatalogItemModel),
        (status = 404, description = "App not found")
    )
)]
pub async fn get_app(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CatalogItemModel>, ApiError> {
    let app = apps::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?
        .ok_or_else(|| error_response(SampleError::NotFound(id)))?;
    let tags = app
        .find_related(tags::Entity)
        .all(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?;
    Ok(Json(CatalogItemModel::from_app(app, tags)))
}

#[utoipa::path(
    put,
    path = "/api/v1/apps/{id}",
    params(
        ("id" = i32, Path, description = "App ID")
    ),
    request_body = CreateCatalogItemRequest,
    responses(
        (status = 200, description = "App updated", body = CatalogItemModel),
        (status = 404, description = "App not found")
    )
)]
pub async fn update_app(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CreateCatalogItemRequest>,
) -> Result<Json<CatalogItemModel>, ApiError> {
    let app = apps::Entity::find_by_id(id)
        .one(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?
        .ok_or_else(|| error_response(SampleError::NotFound(id)))?;

    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(error_response(SampleError::Validation(
            "App name must not be empty".to_string(),
        )));
    }

    let mut active: apps::ActiveModel = app.into();
    active.name = Set(name);
    active.description = Set(payload.description);
    active.updated_at = Set(Utc::now());
    let app = active
        .update(&state.db)
        .await
        .map_err(|e| error_response(e.into()))?;

    let tags = match payload.tags {
        Some(names) => set_tags(&state.db, app.id, &names)
            .await
            .map_err(error_response)?,
        None => app
            .find_related(tags::Entity)
            .all(&state.db)
            .await
            .map_err(|e| error_response(e.into()))?,
    };

    Ok(Json(CatalogItemModel::from_app(app, tags)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/apps/{id}",
    params(
        ("id" = i32, Path, description = "App ID")
    ),
    responses(
        (status = 204, description = "App deleted"),
        (status = 404, description = "App not found")
    )
)]
pub async fn delete_app(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let result = apps::Entity::delete_by_id(id)
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
    app_id: i32,
    names: &[String],
) -> SampleResult<Vec<tags::Model>> {
    let resolved = TagService::new(db.clone()).resolve_names(names).await?;

    app_tags::Entity::delete_many()
        .filter(app_tags::Column::AppId.eq(app_id))
        .exec(db)
        .await?;

    for tag in &resolved {
        app_tags::ActiveModel {
            app_id: Set(app_id),
            tag_id: Set(tag.id),
        }
        .insert(db)
        .await?;
    }

    Ok(resolved)
}
