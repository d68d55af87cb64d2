use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Database model for income/expense transactions.
///
/// `date` is an ISO-8601 string as the server sends it; month filtering is a
/// prefix match on `YYYY-MM`.
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
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub note: String,
    pub amount: f64,
    pub date: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category_id: String,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == crate::categories::KIND_INCOME
    }

    pub fn is_expense(&self) -> bool {
        self.kind == crate::categories::KIND_EXPENSE
    }
}

/// Request body for transaction create/update calls.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub note: String,
    pub amount: f64,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category_id: String,
}

/// Per-month income/expense totals derived from the local cache.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month: i32,
    pub year: i32,
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}
