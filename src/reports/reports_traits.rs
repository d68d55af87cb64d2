use crate::errors::Result;
use crate::reports::reports_model::{Report, ReportRequest};
use async_trait::async_trait;

#[async_trait]
pub trait ReportsApi: Send + Sync {
    async fn fetch_reports(&self) -> Result<Vec<Report>>;
    async fn fetch_report(&self, id: &str) -> Result<Report>;
    async fn generate_report(&self, request: &ReportRequest) -> Result<Report>;
}

#[async_trait]
pub trait ReportServiceTrait: Send + Sync {
    async fn get_reports(&self) -> Result<Vec<Report>>;
    async fn get_report(&self, id: &str) -> Result<Report>;
    async fn generate_report(&self, month: i32, year: i32) -> Result<Report>;
}
