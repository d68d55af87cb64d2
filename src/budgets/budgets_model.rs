use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Database model for per-category monthly budgets.
///
/// At most one budget is expected per (category, month, year) for a user, but
/// this is assumed by query patterns, not enforced by a constraint.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub limit_amount: f64,
    pub month: i32,
    pub year: i32,
}

/// Request body for budget create/update calls.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRequest {
    pub category_id: String,
    pub limit_amount: f64,
    pub month: i32,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Budget joined with the category it limits, for display.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetWithCategory {
    #[serde(flatten)]
    pub budget: Budget,
    pub category_name: String,
    pub category_kind: String,
}
