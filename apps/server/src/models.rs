//! Wire DTOs: tolerant request bodies and query strings converted into typed,
//! validated core inputs, plus response shapes that extend core models.

use chrono::NaiveDateTime;
use producao_core::{
    areas::NewArea,
    colaboradores::NewColaborador,
    errors::{Error as CoreError, Result, ValidationError},
    lancamentos::{LancamentoFilter, LancamentoUpdate, NewLancamento},
    metas::{Meta, MetaUpdate, NewMeta},
    observacoes::{NewObservacao, ObservacaoFilter, ObservacaoUpdate, TipoObservacao},
    reports::{GroupBy, ProductionReportRow},
    users::{Permissions, Role, User},
    utils::{parse_iso_date, parse_optional_iso_date, DateRange},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

fn required<T>(field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| ValidationError::MissingField(field.to_string()).into())
}

/// Blank query parameters count as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn optional_date(field: &str, value: Option<String>) -> Result<Option<chrono::NaiveDate>> {
    parse_optional_iso_date(field, value.as_deref())
}

// ===================== Users =====================

#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub last_login: Option<NaiveDateTime>,
    pub permissions: Permissions,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            last_login: user.last_login,
            permissions: user.role.permissions(),
        }
    }
}

// ===================== Areas & colaboradores =====================

#[derive(Debug, Deserialize)]
pub struct NamePayload {
    pub nome: Option<String>,
}

impl TryFrom<NamePayload> for NewArea {
    type Error = CoreError;

    fn try_from(payload: NamePayload) -> Result<Self> {
        Ok(NewArea::new(required("nome", payload.nome)?))
    }
}

impl TryFrom<NamePayload> for NewColaborador {
    type Error = CoreError;

    fn try_from(payload: NamePayload) -> Result<Self> {
        Ok(NewColaborador::new(required("nome", payload.nome)?))
    }
}

// ===================== Metas =====================

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct MetaPayload {
    pub nome: Option<String>,
    pub area_id: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub meta_quantidade: Option<i32>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub valor_unitario: Option<Decimal>,
    pub data_vigencia: Option<String>,
}

impl TryFrom<MetaPayload> for NewMeta {
    type Error = CoreError;

    fn try_from(payload: MetaPayload) -> Result<Self> {
        Ok(NewMeta {
            name: required("nome", payload.nome)?,
            area_id: required("area_id", payload.area_id)?,
            target_quantity: required("meta_quantidade", payload.meta_quantidade)?,
            unit_value: required("valor_unitario", payload.valor_unitario)?,
            effective_date: optional_date("data_vigencia", payload.data_vigencia)?,
        })
    }
}

impl TryFrom<MetaPayload> for MetaUpdate {
    type Error = CoreError;

    fn try_from(payload: MetaPayload) -> Result<Self> {
        Ok(MetaUpdate {
            name: payload.nome,
            area_id: payload.area_id,
            target_quantity: payload.meta_quantidade,
            unit_value: payload.valor_unitario,
            effective_date: optional_date("data_vigencia", payload.data_vigencia)?,
        })
    }
}

/// A meta with its area's name resolved.
#[derive(Debug, Serialize)]
pub struct MetaResponse {
    #[serde(flatten)]
    pub meta: Meta,
    pub area_nome: Option<String>,
}

// ===================== Lancamentos =====================

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct LancamentoPayload {
    pub data: Option<String>,
    pub area_id: Option<String>,
    pub colaborador_id: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub quantidade_realizada: Option<i32>,
}

impl TryFrom<LancamentoPayload> for NewLancamento {
    type Error = CoreError;

    fn try_from(payload: LancamentoPayload) -> Result<Self> {
        let date = required("data", payload.data)?;
        Ok(NewLancamento {
            date: parse_iso_date("data", &date)?,
            area_id: required("area_id", payload.area_id)?,
            colaborador_id: required("colaborador_id", payload.colaborador_id)?,
            quantity_done: required("quantidade_realizada", payload.quantidade_realizada)?,
        })
    }
}

impl TryFrom<LancamentoPayload> for LancamentoUpdate {
    type Error = CoreError;

    fn try_from(payload: LancamentoPayload) -> Result<Self> {
        Ok(LancamentoUpdate {
            date: optional_date("data", payload.data)?,
            area_id: payload.area_id,
            colaborador_id: payload.colaborador_id,
            quantity_done: payload.quantidade_realizada,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LancamentoQuery {
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
    pub area_id: Option<String>,
    pub colaborador_id: Option<String>,
}

impl TryFrom<LancamentoQuery> for LancamentoFilter {
    type Error = CoreError;

    fn try_from(query: LancamentoQuery) -> Result<Self> {
        Ok(LancamentoFilter {
            start_date: optional_date("data_inicio", query.data_inicio)?,
            end_date: optional_date("data_fim", query.data_fim)?,
            area_id: non_blank(query.area_id),
            colaborador_id: non_blank(query.colaborador_id),
        })
    }
}

// ===================== Observacoes =====================

#[derive(Debug, Deserialize)]
pub struct ObservacaoPayload {
    pub colaborador_id: Option<String>,
    pub data: Option<String>,
    pub tipo_observacao: Option<String>,
    /// Absent keeps the stored text; `null` clears it.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub descricao: Option<Option<String>>,
}

fn parse_tipo(value: Option<String>) -> Result<Option<TipoObservacao>> {
    value.map(|label| label.parse()).transpose()
}

impl TryFrom<ObservacaoPayload> for NewObservacao {
    type Error = CoreError;

    fn try_from(payload: ObservacaoPayload) -> Result<Self> {
        let date = required("data", payload.data)?;
        Ok(NewObservacao {
            colaborador_id: required("colaborador_id", payload.colaborador_id)?,
            date: parse_iso_date("data", &date)?,
            tipo: required("tipo_observacao", parse_tipo(payload.tipo_observacao)?)?,
            description: payload.descricao.flatten(),
        })
    }
}

impl TryFrom<ObservacaoPayload> for ObservacaoUpdate {
    type Error = CoreError;

    fn try_from(payload: ObservacaoPayload) -> Result<Self> {
        Ok(ObservacaoUpdate {
            colaborador_id: payload.colaborador_id,
            date: optional_date("data", payload.data)?,
            tipo: parse_tipo(payload.tipo_observacao)?,
            description: payload.descricao,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ObservacaoQuery {
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
    pub colaborador_id: Option<String>,
    pub tipo_observacao: Option<String>,
}

impl TryFrom<ObservacaoQuery> for ObservacaoFilter {
    type Error = CoreError;

    fn try_from(query: ObservacaoQuery) -> Result<Self> {
        Ok(ObservacaoFilter {
            start_date: optional_date("data_inicio", query.data_inicio)?,
            end_date: optional_date("data_fim", query.data_fim)?,
            colaborador_id: non_blank(query.colaborador_id),
            tipo: parse_tipo(non_blank(query.tipo_observacao))?,
        })
    }
}

// ===================== Reports =====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
    pub format: Option<String>,
}

impl ReportQuery {
    /// Both bounds are required for reports.
    pub fn range(&self) -> Result<DateRange> {
        let start = required("data_inicio", non_blank(self.data_inicio.clone()))?;
        let end = required("data_fim", non_blank(self.data_fim.clone()))?;
        DateRange::new(
            parse_iso_date("data_inicio", &start)?,
            parse_iso_date("data_fim", &end)?,
        )
    }

    pub fn format(&self) -> Result<ReportFormat> {
        match non_blank(self.format.clone()).as_deref() {
            None | Some("json") => Ok(ReportFormat::Json),
            Some("csv") => Ok(ReportFormat::Csv),
            Some(other) => Err(CoreError::invalid_input(format!(
                "format must be 'json' or 'csv' (got '{other}')"
            ))),
        }
    }
}

/// A report row plus the legacy alias key (`colaborador` or `area`) that
/// carries the row label.
#[derive(Debug, Serialize)]
pub struct ReportRowResponse {
    #[serde(flatten)]
    pub row: ProductionReportRow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colaborador: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

impl ReportRowResponse {
    pub fn new(row: ProductionReportRow, group_by: GroupBy) -> Self {
        let label = Some(row.key_label.clone());
        let (colaborador, area) = match group_by {
            GroupBy::Colaborador => (label, None),
            GroupBy::Area => (None, label),
        };
        Self {
            row,
            colaborador,
            area,
        }
    }
}
