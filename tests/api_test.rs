use anyhow::Result;
use axum::http::StatusCode;
use axum_test::TestServer;
use samplegrid::database::migrations::Migrator;
use samplegrid::server::app::create_app;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tempfile::NamedTempFile;

async fn setup_test_server() -> Result<TestServer> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());
    // Keep the database file on disk for the whole test; dropping the guard
    // here would delete it while pooled connections are still being opened.
    temp_file.keep()?;

    let db = Database::connect(&db_url).await?;
    Migrator::up(&db, None).await?;

    let app = create_app(db, None).await?;
    let server = TestServer::new(app)?;

    Ok(server)
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let server = setup_test_server().await?;

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["service"], "samplegrid");
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_openapi_document() -> Result<()> {
    let server = setup_test_server().await?;

    let response = server.get("/api-docs/openapi.json").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let doc: Value = response.json();
    assert!(doc["paths"]["/api/v1/samples/search"].is_object());
    assert!(doc["components"]["schemas"]["SampleModel"].is_object());

    // every routed endpoint is documented, including the id-scoped ones
    assert!(doc["paths"]["/api/v1/tags/{id}"]["put"].is_object());
    for resource in ["features", "repositories", "apps"] {
        let item = &doc["paths"][format!("/api/v1/{}/{{id}}", resource)];
        assert!(item["get"].is_object(), "missing get for {}", resource);
        assert!(item["put"].is_object(), "missing put for {}", resource);
        assert!(item["delete"].is_object(), "missing delete for {}", resource);
    }

    Ok(())
}

#[tokio::test]
async fn test_samples_crud_api() -> Result<()> {
    let server = setup_test_server().await?;

    // Create
    let create_payload = json!({
        "name": "Test Sample",
        "description": "Created via API test",
        "tags": ["alpha", "beta"]
    });

    let response = server.post("/api/v1/samples").json(&create_payload).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let sample: Value = response.json();
    let sample_id = sample["id"].as_i64().unwrap();
    assert_eq!(sample["name"], "Test Sample");
    assert_eq!(sample["active"], true);
    assert_eq!(sample["tags"].as_array().unwrap().len(), 2);

    // List
    let response = server.get("/api/v1/samples").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let samples: Vec<Value> = response.json();
    assert_eq!(samples.len(), 1);

    // Get single
    let response = server.get(&format!("/api/v1/samples/{}", sample_id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let fetched: Value = response.json();
    assert_eq!(fetched["name"], "Test Sample");

    // Update
    let update_payload = json!({
        "name": "Updated Sample",
        "description": "Updated via API test",
        "active": false,
        "updatedBy": "api-test"
    });
    let response = server
        .put(&format!("/api/v1/samples/{}", sample_id))
        .json(&update_payload)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let updated: Value = response.json();
    assert_eq!(updated["name"], "Updated Sample");
    assert_eq!(updated["active"], false);
    assert_eq!(updated["updatedBy"], "api-test");
    // Tags were not sent, so they must be preserved.
    assert_eq!(updated["tags"].as_array().unwrap().len(), 2);

    // Delete
    let response = server
        .delete(&format!("/api/v1/samples/{}", sample_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server.get(&format!("/api/v1/samples/{}", sample_id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_name_returns_bad_request() -> Result<()> {
    let server = setup_test_server().await?;

    let payload = json!({"name": "Duplicate"});
    let response = server.post("/api/v1/samples").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = server.post("/api/v1/samples").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"], "VALIDATION_FAILED");

    Ok(())
}

#[tokio::test]
async fn test_search_endpoint() -> Result<()> {
    let server = setup_test_server().await?;

    for (name, active) in [("One", true), ("Two", true), ("Three", false)] {
        let response = server
            .post("/api/v1/samples")
            .json(&json!({"name": name, "active": active}))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let search_payload = json!({
        "page": 0,
        "pageSize": 10,
        "filterModel": {
            "items": [{"field": "active", "operator": "equals", "value": true}],
            "logicOperator": "and"
        }
    });

    let response = server
        .post("/api/v1/samples/search")
        .json(&search_payload)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["totalCount"], 2);
    assert_eq!(body["rows"].as_array().unwrap().len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_import_endpoint_reports_outcome() -> Result<()> {
    let server = setup_test_server().await?;

    let import_payload = json!({
        "samples": [
            {"name": "Imported One"},
            {"name": "Imported Two"}
        ]
    });

    let response = server
        .post("/api/v1/samples/import")
        .json(&import_payload)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let report: Value = response.json();
    assert_eq!(report["totalProvided"], 2);
    assert_eq!(report["totalCreated"], 2);
    assert_eq!(report["alertLevel"], "success");
    assert_eq!(report["items"].as_array().unwrap().len(), 2);

    // Re-import the same batch and expect duplicates.
    let response = server
        .post("/api/v1/samples/import")
        .json(&import_payload)
        .await;
    let report: Value = response.json();
    assert_eq!(report["totalDuplicates"], 2);
    assert_eq!(report["alertLevel"], "warning");

    Ok(())
}

#[tokio::test]
async fn test_export_endpoint_sends_attachment() -> Result<()> {
    let server = setup_test_server().await?;

    server
        .post("/api/v1/samples")
        .json(&json!({"name": "Exported"}))
        .await;

    let response = server
        .post("/api/v1/samples/export")
        .json(&json!({"format": "csv"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers.get("content-type").unwrap(), "text/csv");
    let disposition = headers.get("content-disposition").unwrap().to_str()?;
    assert!(disposition.starts_with("attachment; filename="));
    assert!(disposition.contains("_samples.csv"));

    let body = response.text();
    assert!(body.starts_with("ID,Name,Description,Active"));

    Ok(())
}

#[tokio::test]
async fn test_init_endpoint_validates_count() -> Result<()> {
    let server = setup_test_server().await?;

    let response = server
        .post("/api/v1/samples/init")
        .json(&json!({"count": 3}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let created: Vec<Value> = response.json();
    assert_eq!(created.len(), 3);

    let response = server
        .post("/api/v1/samples/init")
        .json(&json!({"count": 0}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_tags_api() -> Result<()> {
    let server = setup_test_server().await?;

    let response = server
        .post("/api/v1/tags")
        .json(&json!({"name": "infra", "description": "infrastructure"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let tag: Value = response.json();
    let tag_id = tag["id"].as_i64().unwrap();

    let response = server.get("/api/v1/tags").await;
    let tags: Vec<Value> = response.json();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["name"], "infra");

    let response = server
        .put(&format!("/api/v1/tags/{}", tag_id))
        .json(&json!({"name": "infrastructure"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let renamed: Value = response.json();
    assert_eq!(renamed["name"], "infrastructure");

    let response = server.delete(&format!("/api/v1/tags/{}", tag_id)).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    Ok(())
}

#[tokio::test]
async fn test_catalog_items_api() -> Result<()> {
    let server = setup_test_server().await?;

    for path in ["features", "repositories", "apps"] {
        let response = server
            .post(&format!("/api/v1/{}", path))
            .json(&json!({"name": "Shared Name", "tags": ["common"]}))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        let item: Value = response.json();
        assert_eq!(item["name"], "Shared Name");
        assert_eq!(item["tags"][0], "common");

        let response = server.get(&format!("/api/v1/{}", path)).await;
        let items: Vec<Value> = response.json();
        assert_eq!(items.len(), 1);
    }

    // The shared tag must only exist once across the three catalogs.
    let response = server.get("/api/v1/tags").await;
    let tags: Vec<Value> = response.json();
    assert_eq!(tags.len(), 1);

    Ok(())
}
