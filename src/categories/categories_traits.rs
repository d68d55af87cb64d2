use crate::categories::categories_model::{Category, CategoryRequest};
use crate::errors::Result;
use async_trait::async_trait;

/// Remote endpoints for categories.
#[async_trait]
pub trait CategoriesApi: Send + Sync {
    async fn fetch_categories(&self) -> Result<Vec<Category>>;
    async fn fetch_category(&self, id: &str) -> Result<Category>;
    async fn create_category(&self, request: &CategoryRequest) -> Result<Category>;
    async fn update_category(&self, id: &str, request: &CategoryRequest) -> Result<Category>;
    async fn delete_category(&self, id: &str) -> Result<()>;
}

/// Trait for category repository operations (local cache)
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    fn get_all_categories(&self) -> Result<Vec<Category>>;
    fn get_category_by_id(&self, id: &str) -> Result<Option<Category>>;
    fn get_categories_by_kind(&self, kind: &str) -> Result<Vec<Category>>;
    async fn upsert_category(&self, category: Category) -> Result<Category>;
    async fn upsert_categories(&self, categories: Vec<Category>) -> Result<usize>;
    async fn delete_category(&self, id: &str) -> Result<usize>;
}

/// Trait for category service operations
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    async fn get_categories(&self) -> Result<Vec<Category>>;
    async fn get_category(&self, id: &str) -> Result<Category>;
    async fn create_category(&self, name: String, kind: String) -> Result<Category>;
    async fn update_category(&self, id: &str, name: String, kind: String) -> Result<Category>;
    async fn delete_category(&self, id: &str) -> Result<()>;
    fn observe_categories(&self) -> tokio::sync::broadcast::Receiver<crate::events::StoreEvent>;
}
