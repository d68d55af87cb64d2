use crate::errors::Result;
use crate::transactions::transactions_model::{MonthlySummary, Transaction, TransactionRequest};
use async_trait::async_trait;

/// Remote endpoints for transactions.
#[async_trait]
pub trait TransactionsApi: Send + Sync {
    async fn fetch_transactions(&self) -> Result<Vec<Transaction>>;
    async fn fetch_transaction(&self, id: &str) -> Result<Transaction>;
    async fn create_transaction(&self, request: &TransactionRequest) -> Result<Transaction>;
    async fn update_transaction(
        &self,
        id: &str,
        request: &TransactionRequest,
    ) -> Result<Transaction>;
    async fn delete_transaction(&self, id: &str) -> Result<()>;
}

/// Trait for transaction repository operations (local cache)
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn get_all_transactions(&self) -> Result<Vec<Transaction>>;
    fn get_transaction_by_id(&self, id: &str) -> Result<Option<Transaction>>;
    /// Transactions whose date falls in the given month, most recent first.
    fn get_transactions_in_month(&self, month: i32, year: i32) -> Result<Vec<Transaction>>;
    async fn upsert_transaction(&self, transaction: Transaction) -> Result<Transaction>;
    async fn upsert_transactions(&self, transactions: Vec<Transaction>) -> Result<usize>;
    async fn delete_transaction(&self, id: &str) -> Result<usize>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    async fn get_transactions(&self) -> Result<Vec<Transaction>>;
    async fn get_transaction(&self, id: &str) -> Result<Transaction>;
    async fn create_transaction(&self, request: TransactionRequest) -> Result<Transaction>;
    async fn update_transaction(
        &self,
        id: &str,
        request: TransactionRequest,
    ) -> Result<Transaction>;
    async fn delete_transaction(&self, id: &str) -> Result<()>;
    /// Computed from the local cache only; callers refresh via `get_transactions`.
    fn get_monthly_summary(&self, month: i32, year: i32) -> Result<MonthlySummary>;
    fn observe_transactions(&self) -> tokio::sync::broadcast::Receiver<crate::events::StoreEvent>;
}
