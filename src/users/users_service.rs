use crate::auth::token_store::SessionHandle;
use crate::errors::{Error, Result};
use crate::events::{EventBus, StoreEvent};
use crate::users::users_model::User;
use crate::users::users_traits::{UserRepositoryTrait, UserServiceTrait, UsersApi};
use async_trait::async_trait;
use log::{error, warn};
use std::sync::Arc;

pub struct UserService {
    api: Arc<dyn UsersApi>,
    repository: Arc<dyn UserRepositoryTrait>,
    session: SessionHandle,
    events: EventBus,
}

impl UserService {
    pub fn new(
        api: Arc<dyn UsersApi>,
        repository: Arc<dyn UserRepositoryTrait>,
        session: SessionHandle,
        events: EventBus,
    ) -> Self {
        UserService {
            api,
            repository,
            session,
            events,
        }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn get_current_user(&self) -> Result<User> {
        match self.api.fetch_current_user().await {
            Ok(user) => {
                let cached = self.repository.upsert_user(user).await?;
                self.events.publish(StoreEvent::UsersChanged);
                Ok(cached)
            }
            Err(e) if e.is_network() => {
                warn!("Fetching current user failed, using cache: {}", e);
                let user_id = self
                    .session
                    .user_id()
                    .ok_or_else(|| Error::NotFound("current user".to_string()))?;
                self.repository
                    .get_user_by_id(&user_id)?
                    .ok_or_else(|| Error::NotFound("current user".to_string()))
            }
            Err(e) => {
                error!("Failed to fetch current user: {}", e);
                Err(e)
            }
        }
    }

    async fn update_current_user(&self, user: User) -> Result<User> {
        let updated = self.api.update_current_user(&user).await?;
        let cached = self.repository.upsert_user(updated).await?;
        self.events.publish(StoreEvent::UsersChanged);
        Ok(cached)
    }
}
