//! HTTP client for the finance tracker REST API.
//!
//! One method per domain operation, JSON request/response bodies, and a
//! bearer-token Authorization header read synchronously from the cached
//! session before every request.

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::auth::auth_model::{AuthResponse, LoginRequest, RegisterRequest};
use crate::auth::auth_traits::AuthApi;
use crate::auth::token_store::SessionHandle;
use crate::budgets::budgets_model::{Budget, BudgetRequest};
use crate::budgets::budgets_traits::BudgetsApi;
use crate::categories::categories_model::{Category, CategoryRequest};
use crate::categories::categories_traits::CategoriesApi;
use crate::errors::{Error, Result};
use crate::goals::goals_model::{
    ContributionRequest, SavingContribution, SavingGoal, SavingGoalRequest,
};
use crate::goals::goals_traits::GoalsApi;
use crate::reports::reports_model::{Report, ReportRequest};
use crate::reports::reports_traits::ReportsApi;
use crate::transactions::transactions_model::{Transaction, TransactionRequest};
use crate::transactions::transactions_traits::TransactionsApi;
use crate::users::users_model::User;
use crate::users::users_traits::UsersApi;

/// Fixed connect/read timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Stateless request/response client for the remote REST authority.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    session: SessionHandle,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// `session` supplies the bearer token; requests made while logged out
    /// simply carry no Authorization header.
    pub fn new(base_url: &str, session: SessionHandle) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Create default headers for API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.session.token() {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, value);
            }
        }
        headers
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[Api] GET {}", url);

        let response = self.client.get(&url).headers(self.headers()).send().await?;
        self.parse_response(response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[Api] POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(body)
            .send()
            .await?;
        self.parse_response(response).await
    }

    async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[Api] PUT {}", url);

        let response = self
            .client
            .put(&url)
            .headers(self.headers())
            .json(body)
            .send()
            .await?;
        self.parse_response(response).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[Api] DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .headers(self.headers())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::api_error(status.as_u16(), &body));
        }
        Ok(())
    }

    /// Parse an HTTP response, handling errors appropriately.
    async fn parse_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status.as_u16(), &body));
        }

        if body.trim().is_empty() {
            return Err(Error::EmptyResponse);
        }

        Ok(serde_json::from_str(&body)?)
    }

    fn api_error(status: u16, body: &str) -> Error {
        // Try to parse the error body for a better message
        let message = serde_json::from_str::<ApiErrorResponse>(body)
            .ok()
            .and_then(|e| e.message.or(e.error))
            .unwrap_or_else(|| body.chars().take(200).collect());
        Error::Api { status, message }
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        self.post("/api/Account/login", request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        self.post("/api/Account/register", request).await
    }
}

#[async_trait]
impl UsersApi for ApiClient {
    async fn fetch_current_user(&self) -> Result<User> {
        self.get("/api/Users/me").await
    }

    async fn update_current_user(&self, user: &User) -> Result<User> {
        self.put("/api/Users/me", user).await
    }
}

#[async_trait]
impl CategoriesApi for ApiClient {
    async fn fetch_categories(&self) -> Result<Vec<Category>> {
        self.get("/api/Categories").await
    }

    async fn fetch_category(&self, id: &str) -> Result<Category> {
        self.get(&format!("/api/Categories/{}", id)).await
    }

    async fn create_category(&self, request: &CategoryRequest) -> Result<Category> {
        self.post("/api/Categories", request).await
    }

    async fn update_category(&self, id: &str, request: &CategoryRequest) -> Result<Category> {
        self.put(&format!("/api/Categories/{}", id), request).await
    }

    async fn delete_category(&self, id: &str) -> Result<()> {
        self.delete(&format!("/api/Categories/{}", id)).await
    }
}

#[async_trait]
impl TransactionsApi for ApiClient {
    async fn fetch_transactions(&self) -> Result<Vec<Transaction>> {
        self.get("/api/Transactions").await
    }

    async fn fetch_transaction(&self, id: &str) -> Result<Transaction> {
        self.get(&format!("/api/Transactions/{}", id)).await
    }

    async fn create_transaction(&self, request: &TransactionRequest) -> Result<Transaction> {
        self.post("/api/Transactions", request).await
    }

    async fn update_transaction(
        &self,
        id: &str,
        request: &TransactionRequest,
    ) -> Result<Transaction> {
        self.put(&format!("/api/Transactions/{}", id), request).await
    }

    async fn delete_transaction(&self, id: &str) -> Result<()> {
        self.delete(&format!("/api/Transactions/{}", id)).await
    }
}

#[async_trait]
impl BudgetsApi for ApiClient {
    async fn fetch_budgets(&self) -> Result<Vec<Budget>> {
        self.get("/api/Budgets").await
    }

    async fn fetch_budget(&self, id: &str) -> Result<Budget> {
        self.get(&format!("/api/Budgets/{}", id)).await
    }

    async fn create_budget(&self, request: &BudgetRequest) -> Result<Budget> {
        self.post("/api/Budgets", request).await
    }

    async fn update_budget(&self, id: &str, request: &BudgetRequest) -> Result<Budget> {
        self.put(&format!("/api/Budgets/{}", id), request).await
    }

    async fn delete_budget(&self, id: &str) -> Result<()> {
        self.delete(&format!("/api/Budgets/{}", id)).await
    }
}

#[async_trait]
impl GoalsApi for ApiClient {
    async fn fetch_goals(&self) -> Result<Vec<SavingGoal>> {
        self.get("/api/SavingGoals").await
    }

    async fn fetch_goal(&self, id: &str) -> Result<SavingGoal> {
        self.get(&format!("/api/SavingGoals/{}", id)).await
    }

    async fn create_goal(&self, request: &SavingGoalRequest) -> Result<SavingGoal> {
        self.post("/api/SavingGoals", request).await
    }

    async fn update_goal(&self, id: &str, request: &SavingGoalRequest) -> Result<SavingGoal> {
        self.put(&format!("/api/SavingGoals/{}", id), request).await
    }

    async fn delete_goal(&self, id: &str) -> Result<()> {
        self.delete(&format!("/api/SavingGoals/{}", id)).await
    }

    async fn fetch_contributions(&self, goal_id: &str) -> Result<Vec<SavingContribution>> {
        self.get(&format!("/api/SavingGoals/{}/contributions", goal_id))
            .await
    }

    async fn create_contribution(
        &self,
        goal_id: &str,
        request: &ContributionRequest,
    ) -> Result<SavingContribution> {
        self.post(
            &format!("/api/SavingGoals/{}/contributions", goal_id),
            request,
        )
        .await
    }

    async fn delete_contribution(&self, id: &str) -> Result<()> {
        self.delete(&format!("/api/Contributions/{}", id)).await
    }
}

#[async_trait]
impl ReportsApi for ApiClient {
    async fn fetch_reports(&self) -> Result<Vec<Report>> {
        self.get("/api/Reports").await
    }

    async fn generate_report(&self, request: &ReportRequest) -> Result<Report> {
        self.post("/api/Reports/generate", request).await
    }

    async fn fetch_report(&self, id: &str) -> Result<Report> {
        self.get(&format!("/api/Reports/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token_store::TokenStore;
    use crate::db;
    use tempfile::TempDir;

    fn session_handle() -> SessionHandle {
        let dir = TempDir::new().unwrap();
        let db_path = db::init(dir.path().to_str().unwrap()).unwrap();
        let pool = db::create_pool(&db_path).unwrap();
        db::run_migrations(&pool).unwrap();
        let store = TokenStore::new(pool).unwrap();
        // Leak the tempdir so the sqlite file outlives the store in this test.
        std::mem::forget(dir);
        store.handle()
    }

    #[test]
    fn client_normalizes_trailing_slash() {
        let client = ApiClient::new("https://api.example.com/", session_handle()).unwrap();
        assert_eq!(client.base_url, "https://api.example.com");
    }

    #[test]
    fn api_error_prefers_server_message() {
        let err = ApiClient::api_error(400, r#"{"message":"bad month"}"#);
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad month");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn api_error_falls_back_to_raw_body() {
        let err = ApiClient::api_error(500, "Internal Server Error");
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
