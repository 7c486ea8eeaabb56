use sea_orm::{
    DatabaseConnection, EntityTrait, LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use crate::database::entities::{sample_tags, samples, tags};
use crate::errors::SampleResult;
use crate::models::SampleModel;
use crate::search::predicate;
use crate::search::{SearchRequest, SearchResponse, SortItem};

const DEFAULT_PAGE_SIZE: u64 = 10;

/// Read-only paged search over samples.
#[derive(Clone)]
pub struct SearchService {
    db: DatabaseConnection,
}

impl SearchService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn search(&self, request: &SearchRequest) -> SampleResult<SearchResponse> {
        let query = self.build_query(request);
        let page_size = if request.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            request.page_size
        };

        let paginator = query.paginate(&self.db, page_size);
        let total_count = paginator.num_items().await?;
        let rows = paginator.fetch_page(request.page).await?;

        Ok(SearchResponse {
            rows: self.with_tags(rows).await?,
            total_count,
        })
    }

    /// Run the same filter and sort without paging. Used by exports.
    pub async fn fetch_filtered(&self, request: &SearchRequest) -> SampleResult<Vec<SampleModel>> {
        let rows = self.build_query(request).all(&self.db).await?;
        self.with_tags(rows).await
    }

    fn build_query(&self, request: &SearchRequest) -> Select<samples::Entity> {
        let mut query = samples::Entity::find();
        if let Some(model) = &request.filter_model {
            query = query.filter(predicate::build_condition(model));
        }
        apply_sort(query, &request.sort_items)
    }

    async fn with_tags(&self, rows: Vec<samples::Model>) -> SampleResult<Vec<SampleModel>> {
        let tag_groups = rows
            .load_many_to_many(tags::Entity, sample_tags::Entity, &self.db)
            .await?;
        Ok(rows
            .into_iter()
            .zip(tag_groups)
            .map(|(sample, tags)| SampleModel::from_entity(sample, tags))
            .collect())
    }
}

/// Apply requested sort items in order, dropping unknown fields. Falls back
/// to newest-first when no usable sort remains.
fn apply_sort(mut query: Select<samples::Entity>, items: &[SortItem]) -> Select<samples::Entity> {
    let mut applied = false;
    for item in items {
        let Some((column, _)) = predicate::field_schema(&item.field) else {
            continue;
        };
        query = if item.direction.eq_ignore_ascii_case("desc") {
            query.order_by_desc(column)
        } else {
            query.order_by_asc(column)
        };
        applied = true;
    }
    if !applied {
        query = query.order_by_desc(samples::Column::Id);
    }
    query
}
