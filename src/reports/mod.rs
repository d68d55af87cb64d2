pub mod reports_model;
pub mod reports_service;
pub mod reports_traits;

pub use reports_model::{CategoryBreakdown, Report, ReportRequest};
pub use reports_service::ReportService;
pub use reports_traits::{ReportServiceTrait, ReportsApi};
