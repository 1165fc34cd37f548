//! Reports module - production summaries over a date range.

mod aggregator;
mod csv_export;
mod reports_model;
mod reports_service;
mod reports_traits;

pub use aggregator::{aggregate, sort_for_display};
pub use csv_export::render_csv;
pub use reports_model::{DashboardSummary, GroupBy, ProductionReportRow};
pub use reports_service::ReportService;
pub use reports_traits::ReportServiceTrait;
