use log::debug;
use std::sync::Arc;

use super::aggregator::{aggregate, sort_for_display};
use super::reports_model::{DashboardSummary, GroupBy, ProductionReportRow};
use super::reports_traits::ReportServiceTrait;
use crate::areas::AreaRepositoryTrait;
use crate::colaboradores::ColaboradorRepositoryTrait;
use crate::constants::RECENT_LANCAMENTOS_LIMIT;
use crate::errors::Result;
use crate::lancamentos::{LancamentoFilter, LancamentoRepositoryTrait, LancamentoServiceTrait};
use crate::metas::MetaRepositoryTrait;
use crate::utils::DateRange;

/// Read-only summaries built from enriched lancamentos.
pub struct ReportService {
    lancamento_service: Arc<dyn LancamentoServiceTrait>,
    lancamento_repository: Arc<dyn LancamentoRepositoryTrait>,
    area_repository: Arc<dyn AreaRepositoryTrait>,
    colaborador_repository: Arc<dyn ColaboradorRepositoryTrait>,
    meta_repository: Arc<dyn MetaRepositoryTrait>,
}

impl ReportService {
    pub fn new(
        lancamento_service: Arc<dyn LancamentoServiceTrait>,
        lancamento_repository: Arc<dyn LancamentoRepositoryTrait>,
        area_repository: Arc<dyn AreaRepositoryTrait>,
        colaborador_repository: Arc<dyn ColaboradorRepositoryTrait>,
        meta_repository: Arc<dyn MetaRepositoryTrait>,
    ) -> Self {
        Self {
            lancamento_service,
            lancamento_repository,
            area_repository,
            colaborador_repository,
            meta_repository,
        }
    }
}

impl ReportServiceTrait for ReportService {
    fn production_report(
        &self,
        range: &DateRange,
        group_by: GroupBy,
    ) -> Result<Vec<ProductionReportRow>> {
        let entries = self
            .lancamento_service
            .list_lancamentos(&LancamentoFilter::for_range(range))?;
        let mut rows = aggregate(&entries, range, group_by)?;
        sort_for_display(&mut rows);
        debug!(
            "Production report by {} for {}..={}: {} entries, {} rows",
            group_by,
            range.start(),
            range.end(),
            entries.len(),
            rows.len()
        );
        Ok(rows)
    }

    fn dashboard(&self) -> Result<DashboardSummary> {
        Ok(DashboardSummary {
            total_areas: self.area_repository.list()?.len(),
            total_colaboradores: self.colaborador_repository.list()?.len(),
            total_metas: self.meta_repository.list()?.len(),
            total_lancamentos: self.lancamento_repository.count()?,
            lancamentos_recentes: self
                .lancamento_service
                .recent_lancamentos(RECENT_LANCAMENTOS_LIMIT)?,
        })
    }
}
