use crate::auth::token_store::SessionHandle;
use crate::categories::categories_model::{Category, CategoryRequest};
use crate::categories::categories_traits::{
    CategoriesApi, CategoryRepositoryTrait, CategoryServiceTrait,
};
use crate::errors::{Error, Result};
use crate::events::{EventBus, StoreEvent};
use async_trait::async_trait;
use log::{error, warn};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Categories are server-authoritative: writes go to the server first and the
/// cache is refreshed from the response. Reads prefer the server and fall
/// back to the cache when the network is unavailable.
pub struct CategoryService {
    api: Arc<dyn CategoriesApi>,
    repository: Arc<dyn CategoryRepositoryTrait>,
    session: SessionHandle,
    events: EventBus,
}

impl CategoryService {
    pub fn new(
        api: Arc<dyn CategoriesApi>,
        repository: Arc<dyn CategoryRepositoryTrait>,
        session: SessionHandle,
        events: EventBus,
    ) -> Self {
        CategoryService {
            api,
            repository,
            session,
            events,
        }
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn get_categories(&self) -> Result<Vec<Category>> {
        match self.api.fetch_categories().await {
            Ok(remote) => {
                self.repository.upsert_categories(remote.clone()).await?;
                self.events.publish(StoreEvent::CategoriesChanged);
                Ok(remote)
            }
            Err(e) if e.is_network() => {
                warn!("Fetching categories failed, using cache: {}", e);
                self.repository.get_all_categories()
            }
            Err(e) => {
                error!("Failed to fetch categories: {}", e);
                Err(e)
            }
        }
    }

    async fn get_category(&self, id: &str) -> Result<Category> {
        match self.api.fetch_category(id).await {
            Ok(remote) => Ok(self.repository.upsert_category(remote).await?),
            Err(e) if e.is_network() => {
                warn!("Fetching category {} failed, using cache: {}", id, e);
                self.repository
                    .get_category_by_id(id)?
                    .ok_or_else(|| Error::NotFound(format!("category {}", id)))
            }
            Err(e) => Err(e),
        }
    }

    async fn create_category(&self, name: String, kind: String) -> Result<Category> {
        let request = CategoryRequest {
            name,
            kind,
            user_id: self.session.user_id(),
        };
        let created = self.api.create_category(&request).await?;
        let cached = self.repository.upsert_category(created).await?;
        self.events.publish(StoreEvent::CategoriesChanged);
        Ok(cached)
    }

    async fn update_category(&self, id: &str, name: String, kind: String) -> Result<Category> {
        let request = CategoryRequest {
            name,
            kind,
            user_id: self.session.user_id(),
        };
        let updated = self.api.update_category(id, &request).await?;
        let cached = self.repository.upsert_category(updated).await?;
        self.events.publish(StoreEvent::CategoriesChanged);
        Ok(cached)
    }

    async fn delete_category(&self, id: &str) -> Result<()> {
        self.api.delete_category(id).await?;
        self.repository.delete_category(id).await?;
        self.events.publish(StoreEvent::CategoriesChanged);
        Ok(())
    }

    fn observe_categories(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}
