use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{ColumnTrait, Condition};

use crate::database::entities::samples;

use super::{FilterItem, FilterModel, LogicOperator};

/// How values are converted and compared for a given column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Text,
    Boolean,
    Timestamp,
}

/// Map a client-facing field name onto its column and kind.
/// Unknown fields have no schema entry and any filter on them is dropped.
pub fn field_schema(field: &str) -> Option<(samples::Column, FieldKind)> {
    match field {
        "id" => Some((samples::Column::Id, FieldKind::Numeric)),
        "name" => Some((samples::Column::Name, FieldKind::Text)),
        "description" => Some((samples::Column::Description, FieldKind::Text)),
        "active" => Some((samples::Column::Active, FieldKind::Boolean)),
        "createdAt" => Some((samples::Column::CreatedAt, FieldKind::Timestamp)),
        "createdBy" => Some((samples::Column::CreatedBy, FieldKind::Text)),
        "updatedAt" => Some((samples::Column::UpdatedAt, FieldKind::Timestamp)),
        "updatedBy" => Some((samples::Column::UpdatedBy, FieldKind::Text)),
        _ => None,
    }
}

/// Build the WHERE condition for a filter model. Items that cannot be
/// interpreted contribute nothing rather than failing the request.
pub fn build_condition(model: &FilterModel) -> Condition {
    let mut condition = match model.logic_operator {
        LogicOperator::Or => Condition::any(),
        LogicOperator::And => Condition::all(),
    };
    for item in &model.items {
        if let Some(item_cond) = item_condition(item) {
            condition = condition.add(item_cond);
        }
    }
    condition
}

fn item_condition(item: &FilterItem) -> Option<Condition> {
    let field = item.field.as_deref()?;
    let operator = item.operator.as_deref()?;
    let (column, kind) = field_schema(field)?;

    match kind {
        FieldKind::Numeric => numeric_condition(column, operator, item.value.as_ref()?),
        FieldKind::Text => text_condition(column, operator, item.value.as_ref()),
        FieldKind::Boolean => boolean_condition(column, operator, item.value.as_ref()?),
        FieldKind::Timestamp => timestamp_condition(column, operator, item.value.as_ref()?),
    }
}

fn numeric_condition(
    column: samples::Column,
    operator: &str,
    value: &serde_json::Value,
) -> Option<Condition> {
    let n = as_i64(value)?;
    let expr = match operator {
        "=" | "equals" => column.eq(n),
        "!=" | "not" => column.ne(n),
        ">" | "greaterThan" => column.gt(n),
        ">=" | "greaterThanOrEqual" => column.gte(n),
        "<" | "lessThan" => column.lt(n),
        "<=" | "lessThanOrEqual" => column.lte(n),
        _ => return None,
    };
    Some(Condition::all().add(expr))
}

fn text_condition(
    column: samples::Column,
    operator: &str,
    value: Option<&serde_json::Value>,
) -> Option<Condition> {
    // Emptiness checks ignore the value entirely.
    match operator {
        "isEmpty" => {
            return Some(Condition::any().add(column.is_null()).add(column.eq("")));
        }
        "isNotEmpty" => {
            return Some(Condition::all().add(column.is_not_null()).add(column.ne("")));
        }
        _ => {}
    }

    let text = as_text(value?)?;
    let lowered = text.to_lowercase();

    if operator == "equals" {
        let expr = Expr::expr(Func::lower(Expr::col(column))).eq(lowered);
        return Some(Condition::all().add(expr));
    }

    // `%` and `_` in the user value are literals, not wildcards.
    let escaped = escape_like(&lowered);
    let pattern = match operator {
        "contains" => format!("%{}%", escaped),
        "startsWith" => format!("{}%", escaped),
        "endsWith" => format!("%{}", escaped),
        _ => return None,
    };
    let expr = Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\'));
    Some(Condition::all().add(expr))
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn boolean_condition(
    column: samples::Column,
    operator: &str,
    value: &serde_json::Value,
) -> Option<Condition> {
    let b = as_bool(value)?;
    match operator {
        "is" | "equals" => Some(Condition::all().add(column.eq(b))),
        _ => None,
    }
}

fn timestamp_condition(
    column: samples::Column,
    operator: &str,
    value: &serde_json::Value,
) -> Option<Condition> {
    let ts = as_timestamp(value)?;
    let expr = match operator {
        "is" | "equals" => column.eq(ts),
        "not" => column.ne(ts),
        "after" | ">" => column.gt(ts),
        "onOrAfter" | ">=" => column.gte(ts),
        "before" | "<" => column.lt(ts),
        "onOrBefore" | "<=" => column.lte(ts),
        _ => return None,
    };
    Some(Condition::all().add(expr))
}

fn as_i64(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_bool(value: &serde_json::Value) -> Option<bool> {
    match value {
        serde_json::Value::Bool(b) => Some(*b),
        serde_json::Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn as_timestamp(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::Number(n) => DateTime::from_timestamp_millis(n.as_i64()?),
        serde_json::Value::String(s) => {
            let millis = s.trim().parse::<i64>().ok()?;
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    }
}
