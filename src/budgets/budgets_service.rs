use crate::auth::token_store::SessionHandle;
use crate::budgets::budgets_model::{Budget, BudgetRequest, BudgetWithCategory};
use crate::budgets::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait, BudgetsApi};
use crate::errors::{Error, Result};
use crate::events::{EventBus, StoreEvent};
use async_trait::async_trait;
use log::{debug, error, warn};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Budgets are server-authoritative with a cache-refresh on every successful
/// read or write; the list read falls back to the cache when offline.
pub struct BudgetService {
    api: Arc<dyn BudgetsApi>,
    repository: Arc<dyn BudgetRepositoryTrait>,
    session: SessionHandle,
    events: EventBus,
}

impl BudgetService {
    pub fn new(
        api: Arc<dyn BudgetsApi>,
        repository: Arc<dyn BudgetRepositoryTrait>,
        session: SessionHandle,
        events: EventBus,
    ) -> Self {
        BudgetService {
            api,
            repository,
            session,
            events,
        }
    }

    fn with_user(&self, mut request: BudgetRequest) -> BudgetRequest {
        if request.user_id.is_none() {
            request.user_id = self.session.user_id();
        }
        request
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    async fn get_budgets(&self) -> Result<Vec<Budget>> {
        match self.api.fetch_budgets().await {
            Ok(remote) => {
                self.repository.upsert_budgets(remote.clone()).await?;
                self.events.publish(StoreEvent::BudgetsChanged);
                Ok(remote)
            }
            Err(e) if e.is_network() => {
                let cached = self.repository.get_all_budgets()?;
                if cached.is_empty() {
                    error!("Fetching budgets failed and cache is empty: {}", e);
                    Err(e)
                } else {
                    debug!("Using {} cached budgets", cached.len());
                    Ok(cached)
                }
            }
            Err(e) => {
                error!("Failed to fetch budgets: {}", e);
                Err(e)
            }
        }
    }

    async fn get_budget(&self, id: &str) -> Result<Budget> {
        match self.api.fetch_budget(id).await {
            Ok(remote) => Ok(self.repository.upsert_budget(remote).await?),
            Err(e) if e.is_network() => {
                warn!("Fetching budget {} failed, using cache: {}", id, e);
                self.repository
                    .get_budget_by_id(id)?
                    .ok_or_else(|| Error::NotFound(format!("budget {}", id)))
            }
            Err(e) => Err(e),
        }
    }

    async fn create_budget(&self, request: BudgetRequest) -> Result<Budget> {
        let request = self.with_user(request);
        let created = self.api.create_budget(&request).await?;
        let cached = self.repository.upsert_budget(created).await?;
        self.events.publish(StoreEvent::BudgetsChanged);
        Ok(cached)
    }

    async fn update_budget(&self, id: &str, request: BudgetRequest) -> Result<Budget> {
        let request = self.with_user(request);
        let updated = self.api.update_budget(id, &request).await?;
        let cached = self.repository.upsert_budget(updated).await?;
        self.events.publish(StoreEvent::BudgetsChanged);
        Ok(cached)
    }

    async fn delete_budget(&self, id: &str) -> Result<()> {
        self.api.delete_budget(id).await?;
        self.repository.delete_budget(id).await?;
        self.events.publish(StoreEvent::BudgetsChanged);
        Ok(())
    }

    fn get_budgets_for_month(&self, month: i32, year: i32) -> Result<Vec<BudgetWithCategory>> {
        self.repository.get_budgets_with_categories(month, year)
    }

    fn observe_budgets(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}
