use crate::errors::Result;
use crate::reports::reports_model::{Report, ReportRequest};
use crate::reports::reports_traits::{ReportServiceTrait, ReportsApi};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

/// Thin passthrough to the reports endpoints. There is no local cache for
/// reports, so a remote failure is surfaced to the caller as-is.
pub struct ReportService {
    api: Arc<dyn ReportsApi>,
}

impl ReportService {
    pub fn new(api: Arc<dyn ReportsApi>) -> Self {
        ReportService { api }
    }
}

#[async_trait]
impl ReportServiceTrait for ReportService {
    async fn get_reports(&self) -> Result<Vec<Report>> {
        self.api.fetch_reports().await
    }

    async fn get_report(&self, id: &str) -> Result<Report> {
        self.api.fetch_report(id).await
    }

    async fn generate_report(&self, month: i32, year: i32) -> Result<Report> {
        debug!("Requesting report generation for {}-{}", year, month);
        self.api
            .generate_report(&ReportRequest { month, year })
            .await
    }
}
