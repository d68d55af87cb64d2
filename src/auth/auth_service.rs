use crate::auth::auth_model::{AuthResponse, LoginRequest, RegisterRequest, Session};
use crate::auth::auth_traits::{AuthApi, AuthServiceTrait};
use crate::auth::token_store::TokenStore;
use crate::errors::Result;
use crate::events::{EventBus, StoreEvent};
use async_trait::async_trait;
use log::{error, info};
use std::sync::Arc;

pub struct AuthService {
    api: Arc<dyn AuthApi>,
    tokens: Arc<TokenStore>,
    events: EventBus,
}

impl AuthService {
    pub fn new(api: Arc<dyn AuthApi>, tokens: Arc<TokenStore>, events: EventBus) -> Self {
        AuthService {
            api,
            tokens,
            events,
        }
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn login(&self, request: LoginRequest) -> Result<AuthResponse> {
        let response = self.api.login(&request).await.map_err(|e| {
            error!("Login failed: {}", e);
            e
        })?;

        // Persist token
        self.tokens.save_token(&response.token)?;
        self.events.publish(StoreEvent::SessionChanged);
        info!("Logged in as {}", response.email);
        Ok(response)
    }

    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse> {
        let response = self.api.register(&request).await.map_err(|e| {
            error!("Registration failed: {}", e);
            e
        })?;

        // Register returns the same shape as login, token included
        self.tokens.save_token(&response.token)?;
        self.events.publish(StoreEvent::SessionChanged);
        info!("Registered account for {}", response.email);
        Ok(response)
    }

    async fn logout(&self) -> Result<()> {
        self.tokens.clear()?;
        self.events.publish(StoreEvent::SessionChanged);
        Ok(())
    }

    fn current_session(&self) -> Session {
        self.tokens.session()
    }

    fn observe_session(&self) -> tokio::sync::broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}
