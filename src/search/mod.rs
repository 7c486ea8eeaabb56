pub mod predicate;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::SampleModel;

fn default_page_size() -> u64 {
    10
}

fn default_direction() -> String {
    "asc".to_string()
}

/// Paged search request as sent by DataGrid style clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    #[serde(default)]
    pub sort_items: Vec<SortItem>,
    #[serde(default)]
    pub filter_model: Option<FilterModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SortItem {
    pub field: String,
    #[serde(default = "default_direction")]
    pub direction: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterModel {
    #[serde(default)]
    pub items: Vec<FilterItem>,
    #[serde(default)]
    pub logic_operator: LogicOperator,
}

/// A single column predicate. Any missing part renders the item inert.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterItem {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub value: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogicOperator {
    #[default]
    And,
    Or,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub rows: Vec<SampleModel>,
    pub total_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_apply() {
        let req: SearchRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.page, 0);
        assert_eq!(req.page_size, 10);
        assert!(req.sort_items.is_empty());
        assert!(req.filter_model.is_none());
    }

    #[test]
    fn filter_model_parses_camel_case() {
        let json = r#"{
            "page": 2,
            "pageSize": 25,
            "sortItems": [{"field": "name", "direction": "desc"}],
            "filterModel": {
                "items": [{"field": "active", "operator": "is", "value": true}],
                "logicOperator": "or"
            }
        }"#;
        let req: SearchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.page, 2);
        assert_eq!(req.page_size, 25);
        assert_eq!(req.sort_items[0].direction, "desc");
        let model = req.filter_model.unwrap();
        assert_eq!(model.logic_operator, LogicOperator::Or);
        assert_eq!(model.items.len(), 1);
    }

    #[test]
    fn filter_item_tolerates_missing_parts() {
        let item: FilterItem = serde_json::from_str(r#"{"field": "name"}"#).unwrap();
        assert!(item.operator.is_none());
        assert!(item.value.is_none());
    }
}
