use samplegrid::database::migrations::Migrator;
use samplegrid::models::CreateSampleRequest;
use samplegrid::services::SampleService;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

#[allow(dead_code)]
pub fn sample_request(name: &str, active: bool) -> CreateSampleRequest {
    CreateSampleRequest {
        name: name.to_string(),
        description: None,
        active: Some(active),
        created_by: None,
        tags: None,
    }
}

#[allow(dead_code)]
pub async fn seed_samples(db: &DatabaseConnection, specs: &[(&str, bool)]) {
    let service = SampleService::new(db.clone());
    for (name, active) in specs {
        service
            .create(sample_request(name, *active))
            .await
            .expect("Failed to seed sample");
    }
}
