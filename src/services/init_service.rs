use rand::Rng;
use sea_orm::DatabaseConnection;

use crate::errors::{SampleError, SampleResult};
use crate::models::{truncate_chars, CreateSampleRequest, SampleModel, NAME_MAX_LEN};
use crate::services::SampleService;

const MAX_INIT_COUNT: u32 = 100;

const ADJECTIVES: [&str; 16] = [
    "Agile", "Bright", "Calm", "Daring", "Eager", "Fuzzy", "Gentle", "Hidden", "Icy", "Jolly",
    "Keen", "Lively", "Mellow", "Nimble", "Polished", "Quiet",
];

const NOUNS: [&str; 16] = [
    "Falcon", "Harbor", "Meadow", "Comet", "Lantern", "Summit", "Willow", "Canyon", "Ember",
    "Glacier", "Orchard", "Prairie", "Reef", "Thicket", "Voyage", "Zephyr",
];

/// Seeds the catalog with generated mock samples.
#[derive(Clone)]
pub struct InitService {
    sample_service: SampleService,
}

impl InitService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            sample_service: SampleService::new(db),
        }
    }

    /// Create `count` mock samples. Individual creation failures are logged
    /// and skipped, so the result may hold fewer than `count` entries.
    pub async fn init_many(&self, count: u32) -> SampleResult<Vec<SampleModel>> {
        if count < 1 || count > MAX_INIT_COUNT {
            return Err(SampleError::Validation(format!(
                "Init count must be between 1 and {}",
                MAX_INIT_COUNT
            )));
        }

        let mut created = Vec::with_capacity(count as usize);
        for i in 1..=count {
            let request = mock_request(i);
            match self.sample_service.create(request).await {
                Ok(sample) => created.push(sample),
                Err(err) => {
                    tracing::warn!("Skipping mock sample {}: {}", i, err);
                }
            }
        }

        tracing::info!("Initialized {} of {} mock samples", created.len(), count);
        Ok(created)
    }
}

fn mock_request(index: u32) -> CreateSampleRequest {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.gen_range(0..NOUNS.len())];

    let name = truncate_chars(&format!("{} {} {}", adjective, noun, index), NAME_MAX_LEN);
    CreateSampleRequest {
        name,
        description: Some(format!("Generated sample inspired by a {} {}", adjective.to_lowercase(), noun.to_lowercase())),
        active: Some(true),
        created_by: Some("init".to_string()),
        tags: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;

    #[test]
    fn mock_names_stay_within_limit() {
        for i in [1, 50, 100] {
            let request = mock_request(i);
            assert!(request.name.chars().count() <= NAME_MAX_LEN);
            assert!(request.name.ends_with(&i.to_string()));
        }
    }

    #[tokio::test]
    async fn init_creates_requested_count() {
        let db = setup_test_db().await;
        let service = InitService::new(db);

        let created = service.init_many(5).await.unwrap();
        assert_eq!(created.len(), 5);

        let names: std::collections::HashSet<_> = created.iter().map(|s| &s.name).collect();
        assert_eq!(names.len(), 5);
    }

    #[tokio::test]
    async fn out_of_range_counts_are_rejected() {
        let db = setup_test_db().await;
        let service = InitService::new(db);

        assert!(matches!(
            service.init_many(0).await.unwrap_err(),
            SampleError::Validation(_)
        ));
        assert!(matches!(
            service.init_many(101).await.unwrap_err(),
            SampleError::Validation(_)
        ));
    }
}
