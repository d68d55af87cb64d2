use crate::errors::{Error, Result};
use crate::events::{EventBus, StoreEvent};
use crate::transactions::transactions_model::{MonthlySummary, Transaction, TransactionRequest};
use crate::transactions::transactions_traits::{
    TransactionRepositoryTrait, TransactionServiceTrait, TransactionsApi,
};
use async_trait::async_trait;
use log::{error, warn};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Transactions are server-authoritative, same recipe as categories: the
/// cache only exists so lists and monthly summaries survive going offline.
pub struct TransactionService {
    api: Arc<dyn TransactionsApi>,
    repository: Arc<dyn TransactionRepositoryTrait>,
    events: EventBus,
}

impl TransactionService {
    pub fn new(
        api: Arc<dyn TransactionsApi>,
        repository: Arc<dyn TransactionRepositoryTrait>,
        events: EventBus,
    ) -> Self {
        TransactionService {
            api,
            repository,
            events,
        }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn get_transactions(&self) -> Result<Vec<Transaction>> {
        match self.api.fetch_transactions().await {
            Ok(remote) => {
                self.repository.upsert_transactions(remote.clone()).await?;
                self.events.publish(StoreEvent::TransactionsChanged);
                Ok(remote)
            }
            Err(e) if e.is_network() => {
                warn!("Fetching transactions failed, using cache: {}", e);
                self.repository.get_all_transactions()
            }
            Err(e) => {
                error!("Failed to fetch transactions: {}", e);
                Err(e)
            }
        }
    }

    async fn get_transaction(&self, id: &str) -> Result<Transaction> {
        match self.api.fetch_transaction(id).await {
            Ok(remote) => Ok(self.repository.upsert_transaction(remote).await?),
            Err(e) if e.is_network() => {
                warn!("Fetching transaction {} failed, using cache: {}", id, e);
                self.repository
                    .get_transaction_by_id(id)?
                    .ok_or_else(|| Error::NotFound(format!("transaction {}", id)))
            }
            Err(e) => Err(e),
        }
    }

    async fn create_transaction(&self, request: TransactionRequest) -> Result<Transaction> {
        let created = self.api.create_transaction(&request).await?;
        let cached = self.repository.upsert_transaction(created).await?;
        self.events.publish(StoreEvent::TransactionsChanged);
        Ok(cached)
    }

    async fn update_transaction(
        &self,
        id: &str,
        request: TransactionRequest,
    ) -> Result<Transaction> {
        let updated = self.api.update_transaction(id, &request).await?;
        let cached = self.repository.upsert_transaction(updated).await?;
        self.events.publish(StoreEvent::TransactionsChanged);
        Ok(cached)
    }

    async fn delete_transaction(&self, id: &str) -> Result<()> {
        self.api.delete_transaction(id).await?;
        self.repository.delete_transaction(id).await?;
        self.events.publish(StoreEvent::TransactionsChanged);
        Ok(())
    }

    fn get_monthly_summary(&self, month: i32, year: i32) -> Result<MonthlySummary> {
        let rows = self.repository.get_transactions_in_month(month, year)?;

        let total_income: f64 = rows.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
        let total_expense: f64 = rows
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum();

        Ok(MonthlySummary {
            month,
            year,
            total_income,
            total_expense,
            balance: total_income - total_expense,
        })
    }

    fn observe_transactions(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}
