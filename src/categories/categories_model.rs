use diesel::prelude::*;
use serde::{Deserialize, Serialize};

pub const KIND_INCOME: &str = "Income";
pub const KIND_EXPENSE: &str = "Expense";

/// Database model for categories.
///
/// There is no uniqueness constraint on (name, kind); two categories with the
/// same name and different ids are distinct entities.
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
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub user_id: String,
}

impl Category {
    pub fn is_income(&self) -> bool {
        self.kind == KIND_INCOME
    }

    pub fn is_expense(&self) -> bool {
        self.kind == KIND_EXPENSE
    }
}

/// Request body for category create/update calls.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}
