use super::reports_model::{DashboardSummary, GroupBy, ProductionReportRow};
use crate::errors::Result;
use crate::utils::DateRange;

/// Trait for report service operations
pub trait ReportServiceTrait: Send + Sync {
    /// Rows for every key with entries in `range`, in display order.
    fn production_report(
        &self,
        range: &DateRange,
        group_by: GroupBy,
    ) -> Result<Vec<ProductionReportRow>>;

    fn dashboard(&self) -> Result<DashboardSummary>;
}
