mod common;

use common::{sample_request, setup_db};
use samplegrid::models::CreateSampleRequest;
use samplegrid::services::{AlertLevel, ImportService, SampleService};

#[tokio::test]
async fn fresh_batch_imports_completely() {
    let db = setup_db().await;
    let service = ImportService::new(db);

    let requests: Vec<CreateSampleRequest> = (1..=4)
        .map(|i| sample_request(&format!("Sample {}", i), true))
        .collect();

    let report = service.import_many(&requests).await;
    assert_eq!(report.total_provided, 4);
    assert_eq!(report.total_created, 4);
    assert_eq!(report.total_duplicates, 0);
    assert_eq!(report.total_errors, 0);
    assert_eq!(report.total_skipped, 0);
    assert_eq!(report.alert_level, AlertLevel::Success);
    assert_eq!(report.message, "Successfully imported 4 of 4 samples");
    assert!(report.items.iter().all(|i| i.created));
}

#[tokio::test]
async fn reimporting_same_batch_reports_duplicates() {
    let db = setup_db().await;
    let service = ImportService::new(db);

    let requests: Vec<CreateSampleRequest> = (1..=3)
        .map(|i| sample_request(&format!("Sample {}", i), true))
        .collect();

    service.import_many(&requests).await;
    let report = service.import_many(&requests).await;

    assert_eq!(report.total_created, 0);
    assert_eq!(report.total_duplicates, 3);
    assert_eq!(report.alert_level, AlertLevel::Warning);
    assert!(report.items.iter().all(|i| !i.created));
    assert!(report
        .items
        .iter()
        .all(|i| i.alert_level == AlertLevel::Info));
}

#[tokio::test]
async fn empty_batch_is_a_warning() {
    let db = setup_db().await;
    let service = ImportService::new(db);

    let report = service.import_many(&[]).await;
    assert_eq!(report.total_provided, 0);
    assert_eq!(report.alert_level, AlertLevel::Warning);
    assert_eq!(report.message, "No samples provided for import");
    assert!(report.items.is_empty());
}

#[tokio::test]
async fn mixed_batch_is_info_and_keeps_order() {
    let db = setup_db().await;
    SampleService::new(db.clone())
        .create(sample_request("Existing", true))
        .await
        .unwrap();

    let service = ImportService::new(db);
    let requests = vec![
        sample_request("Existing", true),
        sample_request("New One", true),
        sample_request("", true),
        sample_request("New Two", true),
    ];

    let report = service.import_many(&requests).await;
    assert_eq!(report.total_provided, 4);
    assert_eq!(report.total_created, 2);
    assert_eq!(report.total_duplicates, 1);
    assert_eq!(report.total_errors, 1);
    assert_eq!(report.alert_level, AlertLevel::Info);

    let names: Vec<_> = report.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Existing", "New One", "", "New Two"]);
    assert!(!report.items[0].created);
    assert!(report.items[1].created);
    assert!(!report.items[2].created);
    assert!(report.items[3].created);
}

#[tokio::test]
async fn invalid_only_batch_is_an_error() {
    let db = setup_db().await;
    let service = ImportService::new(db);

    let long = "x".repeat(200);
    let requests = vec![sample_request("", true), sample_request(&long, true)];

    let report = service.import_many(&requests).await;
    assert_eq!(report.total_created, 0);
    assert_eq!(report.total_errors, 2);
    assert_eq!(report.alert_level, AlertLevel::Error);
}

#[tokio::test]
async fn one_failure_does_not_stop_the_batch() {
    let db = setup_db().await;
    let service = ImportService::new(db.clone());

    let requests = vec![
        sample_request("Good One", true),
        sample_request("", true),
        sample_request("Good Two", true),
    ];

    let report = service.import_many(&requests).await;
    assert_eq!(report.total_created, 2);

    let all = SampleService::new(db).list_all().await.unwrap();
    assert_eq!(all.len(), 2);
}
