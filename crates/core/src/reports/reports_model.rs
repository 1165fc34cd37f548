use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lancamentos::LancamentoView;

/// Key a production report groups entries by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    Colaborador,
    Area,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Colaborador => "colaborador",
            GroupBy::Area => "area",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a production report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductionReportRow {
    pub key_id: String,
    pub key_label: String,
    #[serde(rename = "total_produzido")]
    pub total_produced: i64,
    /// `total_produced / distinct days with entries`.
    #[serde(rename = "media_producao", alias = "media_diaria")]
    pub average_daily: f64,
    /// Sum of `valor_receber` over entries that had an active meta.
    #[serde(rename = "total_valor")]
    pub total_value: Decimal,
    /// Entries counted in `total_produced` but missing from `total_value`
    /// because no meta was in force for them.
    #[serde(rename = "lancamentos_sem_meta")]
    pub entries_without_goal: usize,
}

/// Counts and the latest entries shown on the dashboard landing page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub total_areas: usize,
    pub total_colaboradores: usize,
    pub total_metas: usize,
    pub total_lancamentos: i64,
    pub lancamentos_recentes: Vec<LancamentoView>,
}
