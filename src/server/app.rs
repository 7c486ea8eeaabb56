use axum::{
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use anyhow::Result;
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;

use super::handlers::{apps, features, health, repositories, samples, tags};
use crate::models;
use crate::search;
use crate::services::{export_service, import_service};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        samples::list_samples,
        samples::create_sample,
        samples::get_sample,
        samples::update_sample,
        samples::delete_sample,
        samples::search_samples,
        samples::import_samples,
        samples::export_samples,
        samples::init_samples,
        tags::list_tags,
        tags::create_tag,
        tags::get_tag,
        tags::update_tag,
        tags::delete_tag,
        features::list_features,
        features::create_feature,
        features::get_feature,
        features::update_feature,
        features::delete_feature,
        repositories::list_repositories,
        repositories::create_repository,
        repositories::get_repository,
        repositories::update_repository,
        repositories::delete_repository,
        apps::list_apps,
        apps::create_app_item,
        apps::get_app,
        apps::update_app,
        apps::delete_app,
    ),
    components(schemas(
        models::SampleModel,
        models::TagModel,
        models::CatalogItemModel,
        models::CreateSampleRequest,
        models::UpdateSampleRequest,
        models::CreateTagRequest,
        models::CreateCatalogItemRequest,
        search::SearchRequest,
        search::SortItem,
        search::FilterModel,
        search::FilterItem,
        search::LogicOperator,
        search::SearchResponse,
        import_service::AlertLevel,
        import_service::ImportReport,
        import_service::ImportReportItem,
        export_service::ExportFormat,
        export_service::ExportForm,
        samples::ImportForm,
        samples::InitForm,
    ))
)]
pub struct ApiDoc;

pub async fn create_app(db: DatabaseConnection, cors_origin: Option<&str>) -> Result<Router> {
    let state = AppState { db };

    let cors = match cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<axum::http::HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(health::health_check))
        .route("/api-docs/openapi.json", get(openapi_doc))
        .nest("/api/v1", api_v1_routes())
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}

async fn openapi_doc() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        // Sample routes
        .route("/samples", get(samples::list_samples))
        .route("/samples", post(samples::create_sample))
        .route("/samples/search", post(samples::search_samples))
        .route("/samples/import", post(samples::import_samples))
        .route("/samples/export", post(samples::export_samples))
        .route("/samples/init", post(samples::init_samples))
        .route("/samples/:id", get(samples::get_sample))
        .route("/samples/:id", put(samples::update_sample))
        .route("/samples/:id", delete(samples::delete_sample))
        // Tag routes
        .route("/tags", get(tags::list_tags))
        .route("/tags", post(tags::create_tag))
        .route("/tags/:id", get(tags::get_tag))
        .route("/tags/:id", put(tags::update_tag))
        .route("/tags/:id", delete(tags::delete_tag))
        // Feature routes
        .route("/features", get(features::list_features))
        .route("/features", post(features::create_feature))
        .route("/features/:id", get(features::get_feature))
        .route("/features/:id", put(features::update_feature))
        .route("/features/:id", delete(features::delete_feature))
        // Repository routes
        .route("/repositories", get(repositories::list_repositories))
        .route("/repositories", post(repositories::create_repository))
        .route("/repositories/:id", get(repositories::get_repository))
        .route("/repositories/:id", put(repositories::update_repository))
        .route("/repositories/:id", delete(repositories::delete_repository))
        // App routes
        .route("/apps", get(apps::list_apps))
        .route("/apps", post(apps::create_app_item))
        .route("/apps/:id", get(apps::get_app))
        .route("/apps/:id", put(apps::update_app))
        .route("/apps/:id", delete(apps::delete_app))
}
