#![allow(dead_code)]

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::sync::Arc;
use tempfile::TempDir;

use fintrack_core::auth::auth_model::{AuthResponse, LoginRequest, RegisterRequest};
use fintrack_core::auth::{AuthApi, TokenStore};
use fintrack_core::db::{self, DbPool, WriteHandle};
use fintrack_core::errors::{Error, Result};
use fintrack_core::events::EventBus;
use fintrack_core::goals::{
    ContributionRequest, GoalsApi, SavingContribution, SavingGoal, SavingGoalRequest,
};
use fintrack_core::transactions::{Transaction, TransactionRequest, TransactionsApi};

/// Fresh on-disk database with a running writer actor. The temp dir is held
/// so the sqlite file lives as long as the fixture.
pub struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    pub events: EventBus,
    pub tokens: Arc<TokenStore>,
    _dir: TempDir,
}

/// Must be called from within a tokio runtime; the writer actor is a task.
pub fn setup() -> TestDb {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("fintrack.db");
    let pool = db::create_pool(db_path.to_str().unwrap()).unwrap();
    db::run_migrations(&pool).unwrap();
    let writer = db::spawn_writer(pool.clone());
    let tokens = Arc::new(TokenStore::new(pool.clone()).unwrap());
    TestDb {
        pool,
        writer,
        events: EventBus::default(),
        tokens,
        _dir: dir,
    }
}

/// Unsigned JWT with the given JSON payload, good enough for claim parsing.
pub fn make_token(payload: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload);
    format!("{}.{}.signature", header, body)
}

pub fn goal(id: &str, title: &str, goal_amount: f64, goal_date: &str) -> SavingGoal {
    SavingGoal {
        id: id.to_string(),
        user_id: Some("user-1".to_string()),
        title: title.to_string(),
        goal_amount,
        current_amount: 0.0,
        goal_date: goal_date.to_string(),
        is_completed: false,
        sync_status: String::new(),
        updated_at: String::new(),
    }
}

pub fn contribution(id: &str, goal_id: &str, amount: f64) -> SavingContribution {
    SavingContribution {
        id: id.to_string(),
        goal_id: goal_id.to_string(),
        amount,
        note: None,
        created_at: "2025-06-01T10:00:00Z".to_string(),
    }
}

/// Simulates having no connectivity at all.
pub struct OfflineApi;

#[async_trait]
impl GoalsApi for OfflineApi {
    async fn fetch_goals(&self) -> Result<Vec<SavingGoal>> {
        Err(Error::Network("offline".to_string()))
    }
    async fn fetch_goal(&self, _id: &str) -> Result<SavingGoal> {
        Err(Error::Network("offline".to_string()))
    }
    async fn create_goal(&self, _request: &SavingGoalRequest) -> Result<SavingGoal> {
        Err(Error::Network("offline".to_string()))
    }
    async fn update_goal(&self, _id: &str, _request: &SavingGoalRequest) -> Result<SavingGoal> {
        Err(Error::Network("offline".to_string()))
    }
    async fn delete_goal(&self, _id: &str) -> Result<()> {
        Err(Error::Network("offline".to_string()))
    }
    async fn fetch_contributions(&self, _goal_id: &str) -> Result<Vec<SavingContribution>> {
        Err(Error::Network("offline".to_string()))
    }
    async fn create_contribution(
        &self,
        _goal_id: &str,
        _request: &ContributionRequest,
    ) -> Result<SavingContribution> {
        Err(Error::Network("offline".to_string()))
    }
    async fn delete_contribution(&self, _id: &str) -> Result<()> {
        Err(Error::Network("offline".to_string()))
    }
}

#[async_trait]
impl TransactionsApi for OfflineApi {
    async fn fetch_transactions(&self) -> Result<Vec<Transaction>> {
        Err(Error::Network("offline".to_string()))
    }
    async fn fetch_transaction(&self, _id: &str) -> Result<Transaction> {
        Err(Error::Network("offline".to_string()))
    }
    async fn create_transaction(&self, _request: &TransactionRequest) -> Result<Transaction> {
        Err(Error::Network("offline".to_string()))
    }
    async fn update_transaction(
        &self,
        _id: &str,
        _request: &TransactionRequest,
    ) -> Result<Transaction> {
        Err(Error::Network("offline".to_string()))
    }
    async fn delete_transaction(&self, _id: &str) -> Result<()> {
        Err(Error::Network("offline".to_string()))
    }
}

/// Accepts writes and answers with the server's canonical representation,
/// rewriting client-generated ids the way the real API does.
pub struct EchoGoalsApi {
    pub server_goal_id: String,
    pub server_contribution_id: String,
}

impl EchoGoalsApi {
    pub fn new(server_goal_id: &str, server_contribution_id: &str) -> Self {
        EchoGoalsApi {
            server_goal_id: server_goal_id.to_string(),
            server_contribution_id: server_contribution_id.to_string(),
        }
    }
}

#[async_trait]
impl GoalsApi for EchoGoalsApi {
    async fn fetch_goals(&self) -> Result<Vec<SavingGoal>> {
        Err(Error::Network("offline".to_string()))
    }
    async fn fetch_goal(&self, _id: &str) -> Result<SavingGoal> {
        Err(Error::Network("offline".to_string()))
    }
    async fn create_goal(&self, request: &SavingGoalRequest) -> Result<SavingGoal> {
        Ok(SavingGoal {
            id: self.server_goal_id.clone(),
            user_id: Some("user-1".to_string()),
            title: request.title.clone(),
            goal_amount: request.goal_amount,
            current_amount: request.current_amount,
            goal_date: request.goal_date.clone(),
            is_completed: false,
            sync_status: String::new(),
            updated_at: String::new(),
        })
    }
    async fn update_goal(&self, id: &str, request: &SavingGoalRequest) -> Result<SavingGoal> {
        Ok(SavingGoal {
            id: id.to_string(),
            user_id: Some("user-1".to_string()),
            title: request.title.clone(),
            goal_amount: request.goal_amount,
            current_amount: request.current_amount,
            goal_date: request.goal_date.clone(),
            is_completed: false,
            sync_status: String::new(),
            updated_at: String::new(),
        })
    }
    async fn delete_goal(&self, _id: &str) -> Result<()> {
        Ok(())
    }
    async fn fetch_contributions(&self, _goal_id: &str) -> Result<Vec<SavingContribution>> {
        Err(Error::Network("offline".to_string()))
    }
    async fn create_contribution(
        &self,
        _goal_id: &str,
        request: &ContributionRequest,
    ) -> Result<SavingContribution> {
        Ok(SavingContribution {
            id: self.server_contribution_id.clone(),
            goal_id: request.goal_id.clone(),
            amount: request.amount,
            note: request.note.clone(),
            created_at: request.created_at.clone(),
        })
    }
    async fn delete_contribution(&self, _id: &str) -> Result<()> {
        Ok(())
    }
}

/// Auth endpoint stub that hands back a fixed token.
pub struct StubAuthApi {
    pub token: String,
}

#[async_trait]
impl AuthApi for StubAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        Ok(AuthResponse {
            token: self.token.clone(),
            email: request.email.clone(),
            expires_in: 3600,
        })
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        Ok(AuthResponse {
            token: self.token.clone(),
            email: request.email.clone(),
            expires_in: 3600,
        })
    }
}
