use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::SampleError;
use crate::models::CreateSampleRequest;
use crate::services::SampleService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportReportItem {
    pub name: String,
    pub created: bool,
    pub message: String,
    pub alert_level: AlertLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub total_provided: u64,
    pub total_created: u64,
    pub total_duplicates: u64,
    pub total_errors: u64,
    pub total_skipped: u64,
    pub alert_level: AlertLevel,
    pub message: String,
    pub items: Vec<ImportReportItem>,
}

/// Bulk import of samples. Each item is processed independently and one
/// failure never aborts the rest of the batch.
#[derive(Clone)]
pub struct ImportService {
    sample_service: SampleService,
}

impl ImportService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            sample_service: SampleService::new(db),
        }
    }

    pub async fn import_many(&self, requests: &[CreateSampleRequest]) -> ImportReport {
        if requests.is_empty() {
            return ImportReport {
                total_provided: 0,
                total_created: 0,
                total_duplicates: 0,
                total_errors: 0,
                total_skipped: 0,
                alert_level: AlertLevel::Warning,
                message: "No samples provided for import".to_string(),
                items: Vec::new(),
            };
        }

        let mut items = Vec::with_capacity(requests.len());
        let mut counts = Counts::default();

        for request in requests {
            let name = request.name.trim().to_string();
            let item = match self.sample_service.find_by_name(&name).await {
                Ok(Some(_)) => {
                    counts.duplicates += 1;
                    ImportReportItem {
                        name,
                        created: false,
                        message: "A sample with this name already exists".to_string(),
                        alert_level: AlertLevel::Info,
                    }
                }
                Ok(None) => match self.sample_service.create(request.clone()).await {
                    Ok(created) => {
                        counts.created += 1;
                        ImportReportItem {
                            name: created.name,
                            created: true,
                            message: "Sample created".to_string(),
                            alert_level: AlertLevel::Success,
                        }
                    }
                    Err(SampleError::Validation(detail)) => {
                        counts.errors += 1;
                        ImportReportItem {
                            name,
                            created: false,
                            message: detail,
                            alert_level: AlertLevel::Error,
                        }
                    }
                    Err(err) => {
                        counts.skipped += 1;
                        tracing::warn!("Import could not create sample '{}': {}", name, err);
                        ImportReportItem {
                            name,
                            created: false,
                            message: format!("Creation failed: {}", err),
                            alert_level: AlertLevel::Error,
                        }
                    }
                },
                Err(err) => {
                    counts.skipped += 1;
                    tracing::warn!("Import lookup failed for sample '{}': {}", name, err);
                    ImportReportItem {
                        name,
                        created: false,
                        message: format!("Creation failed: {}", err),
                        alert_level: AlertLevel::Error,
                    }
                }
            };
            items.push(item);
        }

        let total_provided = requests.len() as u64;
        let (alert_level, message) = summarize(total_provided, &counts);

        ImportReport {
            total_provided,
            total_created: counts.created,
            total_duplicates: counts.duplicates,
            total_errors: counts.errors,
            total_skipped: counts.skipped,
            alert_level,
            message,
            items,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Counts {
    created: u64,
    duplicates: u64,
    errors: u64,
    skipped: u64,
}

/// Collapse the per-item outcomes into one overall level and message.
/// An all-duplicate run stays a warning while any error or skip makes the
/// whole run an error, regardless of proportions.
fn summarize(provided: u64, counts: &Counts) -> (AlertLevel, String) {
    if counts.created == provided {
        return (
            AlertLevel::Success,
            format!(
                "Successfully imported {} of {} samples",
                counts.created, provided
            ),
        );
    }

    let mut parts = Vec::new();
    if counts.duplicates > 0 {
        parts.push(format!("{} duplicates", counts.duplicates));
    }
    if counts.errors > 0 {
        parts.push(format!("{} errors", counts.errors));
    }
    if counts.skipped > 0 {
        parts.push(format!("{} skipped", counts.skipped));
    }
    let detail = parts.join(", ");

    if counts.created > 0 {
        return (
            AlertLevel::Info,
            format!(
                "Imported {} of {} samples ({})",
                counts.created, provided, detail
            ),
        );
    }

    let level = if counts.errors == 0 && counts.skipped == 0 {
        AlertLevel::Warning
    } else {
        AlertLevel::Error
    };
    (level, format!("No samples imported ({})", detail))
}
