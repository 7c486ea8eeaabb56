use std::collections::HashSet;

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::database::entities::tags;
use crate::errors::SampleResult;

/// Resolves tag names to rows, creating missing tags on the fly.
#[derive(Clone)]
pub struct TagService {
    db: DatabaseConnection,
}

impl TagService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Find or create a tag for each name. Names are deduplicated within the
    /// request so one operation never inserts the same tag twice. Blank names
    /// are ignored.
    pub async fn resolve_names(&self, names: &[String]) -> SampleResult<Vec<tags::Model>> {
        let mut seen = HashSet::new();
        let mut resolved = Vec::new();

        for name in names {
            let name = name.trim();
            if name.is_empty() || !seen.insert(name.to_string()) {
                continue;
            }

            let existing = tags::Entity::find()
                .filter(tags::Column::Name.eq(name))
                .one(&self.db)
                .await?;

            let tag = match existing {
                Some(tag) => tag,
                None => {
                    tags::ActiveModel {
                        name: Set(name.to_string()),
                        ..Default::default()
                    }
                    .insert(&self.db)
                    .await?
                }
            };
            resolved.push(tag);
        }

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;

    #[tokio::test]
    async fn resolve_creates_missing_and_reuses_existing() {
        let db = setup_test_db().await;
        let service = TagService::new(db.clone());

        let first = service
            .resolve_names(&["alpha".to_string(), "beta".to_string()])
            .await
            .unwrap();
        assert_eq!(first.len(), 2);

        let second = service
            .resolve_names(&["beta".to_string(), "gamma".to_string()])
            .await
            .unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].id, first[1].id);

        let all = tags::Entity::find().all(&db).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn duplicate_names_in_one_call_resolve_once() {
        let db = setup_test_db().await;
        let service = TagService::new(db.clone());

        let resolved = service
            .resolve_names(&[
                "dup".to_string(),
                "dup".to_string(),
                "  ".to_string(),
                "dup ".to_string(),
            ])
            .await
            .unwrap();
        assert_eq!(resolved.len(), 1);

        let all = tags::Entity::find().all(&db).await.unwrap();
        assert_eq!(all.len(), 1);
    }
}
