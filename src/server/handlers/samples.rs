use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::SampleError;
use crate::models::{CreateSampleRequest, SampleModel, UpdateSampleRequest};
use crate::search::{SearchRequest, SearchResponse};
use crate::server::app::AppState;
use crate::server::handlers::{error_response, ApiError};
use crate::services::{ExportForm, ExportService, ImportReport, ImportService, InitService, SampleService, SearchService};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportForm {
    #[serde(default)]
    pub samples: Vec<CreateSampleRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitForm {
    pub count: u32,
}

#[utoipa::path(
    get,
    path = "/api/v1/samples",
    responses(
        (status = 200, description = "List all samples", body = [SampleModel])
    )
)]
pub async fn list_samples(
    State(state): State<AppState>,
) -> Result<Json<Vec<SampleModel>>, ApiError> {
    let samples = SampleService::new(state.db)
        .list_all()
        .await
        .map_err(error_response)?;
    Ok(Json(samples))
}

#[utoipa::path(
    post,
    path = "/api/v1/samples",
    request_body = CreateSampleRequest,
    responses(
        (status = 201, description = "Sample created", body = SampleModel),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_sample(
    State(state): State<AppState>,
    Json(payload): Json<CreateSampleRequest>,
) -> Result<(StatusCode, Json<SampleModel>), ApiError> {
    let sample = SampleService::new(state.db)
        .create(payload)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(sample)))
}

#[utoipa::path(
    get,
    path = "/api/v1/samples/{id}",
    params(
        ("id" = i32, Path, description = "Sample ID")
    ),
    responses(
        (status = 200, description = "Sample found", body = SampleModel),
        (status = 404, description = "Sample not found")
    )
)]
pub async fn get_sample(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SampleModel>, ApiError> {
    let sample = SampleService::new(state.db)
        .get(id)
        .await
        .map_err(error_response)?;
    Ok(Json(sample))
}

#[utoipa::path(
    put,
    path = "/api/v1/samples/{id}",
    params(
        ("id" = i32, Path, description = "Sample ID")
    ),
    request_body = UpdateSampleRequest,
    responses(
        (status = 200, description = "Sample updated", body = SampleModel),
        (status = 404, description = "Sample not found")
    )
)]
pub async fn update_sample(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateSampleRequest>,
) -> Result<Json<SampleModel>, ApiError> {
    let sample = SampleService::new(state.db)
        .update(id, payload)
        .await
        .map_err(error_response)?;
    Ok(Json(sample))
}

#[utoipa::path(
    delete,
    path = "/api/v1/samples/{id}",
    params(
        ("id" = i32, Path, description = "Sample ID")
    ),
    responses(
        (status = 204, description = "Sample deleted"),
        (status = 404, description = "Sample not found")
    )
)]
pub async fn delete_sample(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    SampleService::new(state.db)
        .delete(id)
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/samples/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Paged search result", body = SearchResponse)
    )
)]
pub async fn search_samples(
    State(state): State<AppState>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let response = SearchService::new(state.db)
        .search(&payload)
        .await
        .map_err(error_response)?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/v1/samples/import",
    request_body = ImportForm,
    responses(
        (status = 200, description = "Import report", body = ImportReport)
    )
)]
pub async fn import_samples(
    State(state): State<AppState>,
    Json(payload): Json<ImportForm>,
) -> Result<Json<ImportReport>, ApiError> {
    let report = ImportService::new(state.db)
        .import_many(&payload.samples)
        .await;
    Ok(Json(report))
}

#[utoipa::path(
    post,
    path = "/api/v1/samples/export",
    request_body = ExportForm,
    responses(
        (status = 200, description = "Rendered export document as attachment")
    )
)]
pub async fn export_samples(
    State(state): State<AppState>,
    Json(payload): Json<ExportForm>,
) -> Result<(HeaderMap, Vec<u8>), ApiError> {
    let file = ExportService::new(state.db)
        .export(&payload)
        .await
        .map_err(error_response)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&file.content_type)
            .map_err(|e| error_response(SampleError::ExportFailed(e.to_string())))?,
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file.filename))
            .map_err(|e| error_response(SampleError::ExportFailed(e.to_string())))?,
    );

    Ok((headers, file.bytes))
}

#[utoipa::path(
    post,
    path = "/api/v1/samples/init",
    request_body = InitForm,
    responses(
        (status = 200, description = "Created mock samples", body = [SampleModel]),
        (status = 400, description = "Count out of range")
    )
)]
pub async fn init_samples(
    State(state): State<AppState>,
    Json(payload): Json<InitForm>,
) -> Result<Json<Vec<SampleModel>>, ApiError> {
    let created = InitService::new(state.db)
        .init_many(payload.count)
        .await
        .map_err(error_response)?;
    Ok(Json(created))
}
