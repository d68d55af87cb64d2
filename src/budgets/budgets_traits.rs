use crate::budgets::budgets_model::{Budget, BudgetRequest, BudgetWithCategory};
use crate::errors::Result;
use async_trait::async_trait;

/// Remote endpoints for budgets.
#[async_trait]
pub trait BudgetsApi: Send + Sync {
    async fn fetch_budgets(&self) -> Result<Vec<Budget>>;
    async fn fetch_budget(&self, id: &str) -> Result<Budget>;
    async fn create_budget(&self, request: &BudgetRequest) -> Result<Budget>;
    async fn update_budget(&self, id: &str, request: &BudgetRequest) -> Result<Budget>;
    async fn delete_budget(&self, id: &str) -> Result<()>;
}

/// Trait for budget repository operations (local cache)
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    fn get_all_budgets(&self) -> Result<Vec<Budget>>;
    fn get_budget_by_id(&self, id: &str) -> Result<Option<Budget>>;
    fn get_budgets_for_month(&self, month: i32, year: i32) -> Result<Vec<Budget>>;
    fn get_budgets_for_category(&self, category_id: &str) -> Result<Vec<Budget>>;
    fn get_budgets_with_categories(&self, month: i32, year: i32)
        -> Result<Vec<BudgetWithCategory>>;
    async fn upsert_budget(&self, budget: Budget) -> Result<Budget>;
    async fn upsert_budgets(&self, budgets: Vec<Budget>) -> Result<usize>;
    async fn delete_budget(&self, id: &str) -> Result<usize>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    async fn get_budgets(&self) -> Result<Vec<Budget>>;
    async fn get_budget(&self, id: &str) -> Result<Budget>;
    async fn create_budget(&self, request: BudgetRequest) -> Result<Budget>;
    async fn update_budget(&self, id: &str, request: BudgetRequest) -> Result<Budget>;
    async fn delete_budget(&self, id: &str) -> Result<()>;
    /// Local-cache view used by the monthly budget screen.
    fn get_budgets_for_month(&self, month: i32, year: i32) -> Result<Vec<BudgetWithCategory>>;
    fn observe_budgets(&self) -> tokio::sync::broadcast::Receiver<crate::events::StoreEvent>;
}
