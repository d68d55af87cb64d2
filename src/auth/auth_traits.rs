use crate::auth::auth_model::{AuthResponse, LoginRequest, RegisterRequest, Session};
use crate::errors::Result;
use async_trait::async_trait;

/// Remote endpoints for account login and registration.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse>;
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse>;
}

/// Trait for auth service operations
#[async_trait]
pub trait AuthServiceTrait: Send + Sync {
    async fn login(&self, request: LoginRequest) -> Result<AuthResponse>;
    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse>;
    async fn logout(&self) -> Result<()>;
    fn current_session(&self) -> Session;
    fn observe_session(&self) -> tokio::sync::broadcast::Receiver<crate::events::StoreEvent>;
}
