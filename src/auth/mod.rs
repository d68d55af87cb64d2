pub mod auth_model;
pub mod auth_service;
pub mod auth_traits;
pub mod jwt;
pub mod token_store;

pub use auth_model::{AuthResponse, LoginRequest, RegisterRequest, Session};
pub use auth_service::AuthService;
pub use auth_traits::{AuthApi, AuthServiceTrait};
pub use token_store::{SessionHandle, TokenStore};
