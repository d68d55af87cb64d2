use crate::errors::Result;
use crate::users::users_model::User;
use async_trait::async_trait;

/// Remote endpoints for the current user.
#[async_trait]
pub trait UsersApi: Send + Sync {
    async fn fetch_current_user(&self) -> Result<User>;
    async fn update_current_user(&self, user: &User) -> Result<User>;
}

/// Trait for user repository operations (local cache)
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_user_by_id(&self, id: &str) -> Result<Option<User>>;
    async fn upsert_user(&self, user: User) -> Result<User>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Fetch the current user, preferring the server and falling back to the
    /// cached row when the network is unavailable.
    async fn get_current_user(&self) -> Result<User>;
    async fn update_current_user(&self, user: User) -> Result<User>;
}
