//! In-memory repositories shared by service tests.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::RwLock;

use crate::areas::{Area, AreaRepositoryTrait, NewArea};
use crate::colaboradores::{Colaborador, ColaboradorRepositoryTrait, NewColaborador};
use crate::errors::{Error, Result};
use crate::lancamentos::{Lancamento, LancamentoFilter, LancamentoRepositoryTrait, NewLancamento};
use crate::metas::{Meta, MetaRepositoryTrait, NewMeta};
use crate::observacoes::{
    NewObservacao, Observacao, ObservacaoFilter, ObservacaoRepositoryTrait, TipoObservacao,
};
use crate::users::{RequestContext, Role, User};

fn user(role: Role) -> User {
    User {
        id: format!("{}-id", role.as_str()),
        username: role.as_str().to_string(),
        email: format!("{}@example.com", role.as_str()),
        role,
        is_active: true,
        created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        last_login: None,
        password_hash: String::new(),
    }
}

pub fn admin_ctx() -> RequestContext {
    RequestContext::new(user(Role::Admin))
}

pub fn standard_ctx() -> RequestContext {
    RequestContext::new(user(Role::Standard))
}

#[derive(Default)]
pub struct InMemoryLedger {
    pub areas: RwLock<Vec<Area>>,
    pub colaboradores: RwLock<Vec<Colaborador>>,
    pub metas: RwLock<Vec<Meta>>,
    pub lancamentos: RwLock<Vec<Lancamento>>,
    pub observacoes: RwLock<Vec<Observacao>>,
    sequence: AtomicU32,
}

impl InMemoryLedger {
    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Strictly increasing timestamps so creation order is observable.
    fn now(&self) -> NaiveDateTime {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + chrono::Duration::seconds(i64::from(seq))
    }

    pub fn seed_area(&self, name: &str) -> Area {
        let area = Area {
            id: self.next_id("area"),
            name: name.to_string(),
        };
        self.areas.write().unwrap().push(area.clone());
        area
    }

    pub fn seed_colaborador(&self, name: &str) -> Colaborador {
        let colaborador = Colaborador {
            id: self.next_id("colaborador"),
            name: name.to_string(),
        };
        self.colaboradores.write().unwrap().push(colaborador.clone());
        colaborador
    }

    pub fn seed_meta(
        &self,
        area_id: &str,
        target_quantity: i32,
        unit_value: Decimal,
        effective_date: Option<NaiveDate>,
    ) -> Meta {
        let meta = Meta {
            id: self.next_id("meta"),
            name: "Meta".to_string(),
            area_id: area_id.to_string(),
            target_quantity,
            unit_value,
            effective_date,
            created_at: self.now(),
        };
        self.metas.write().unwrap().push(meta.clone());
        meta
    }

    pub fn seed_lancamento(
        &self,
        area_id: &str,
        colaborador_id: &str,
        date: NaiveDate,
        quantity_done: i32,
    ) -> Lancamento {
        let lancamento = Lancamento {
            id: self.next_id("lancamento"),
            date,
            area_id: area_id.to_string(),
            colaborador_id: colaborador_id.to_string(),
            quantity_done,
            created_at: self.now(),
        };
        self.lancamentos.write().unwrap().push(lancamento.clone());
        lancamento
    }

    pub fn seed_observacao(
        &self,
        colaborador_id: &str,
        date: NaiveDate,
        tipo: TipoObservacao,
    ) -> Observacao {
        let observacao = Observacao {
            id: self.next_id("observacao"),
            colaborador_id: colaborador_id.to_string(),
            date,
            tipo,
            description: None,
        };
        self.observacoes.write().unwrap().push(observacao.clone());
        observacao
    }
}

fn replace<T: Clone>(
    rows: &RwLock<Vec<T>>,
    id_of: impl Fn(&T) -> &str,
    id: &str,
    row: T,
) -> Result<T> {
    let mut rows = rows.write().unwrap();
    let slot = rows
        .iter_mut()
        .find(|existing| id_of(existing) == id)
        .ok_or_else(|| Error::NotFound(id.to_string()))?;
    *slot = row.clone();
    Ok(row)
}

fn remove<T>(rows: &RwLock<Vec<T>>, id_of: impl Fn(&T) -> &str, id: &str) -> usize {
    let mut rows = rows.write().unwrap();
    let before = rows.len();
    rows.retain(|existing| id_of(existing) != id);
    before - rows.len()
}

#[async_trait]
impl AreaRepositoryTrait for InMemoryLedger {
    fn list(&self) -> Result<Vec<Area>> {
        let mut areas = self.areas.read().unwrap().clone();
        areas.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(areas)
    }

    fn find_by_id(&self, area_id: &str) -> Result<Option<Area>> {
        Ok(self.areas.read().unwrap().iter().find(|a| a.id == area_id).cloned())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Area>> {
        Ok(self.areas.read().unwrap().iter().find(|a| a.name == name).cloned())
    }

    fn has_dependents(&self, area_id: &str) -> Result<bool> {
        Ok(self.metas.read().unwrap().iter().any(|m| m.area_id == area_id)
            || self
                .lancamentos
                .read()
                .unwrap()
                .iter()
                .any(|l| l.area_id == area_id))
    }

    async fn create(&self, new_area: NewArea) -> Result<Area> {
        Ok(self.seed_area(&new_area.name))
    }

    async fn update(&self, area: Area) -> Result<Area> {
        let id = area.id.clone();
        replace(&self.areas, |a| a.id.as_str(), &id, area)
    }

    async fn delete(&self, area_id: &str) -> Result<usize> {
        Ok(remove(&self.areas, |a| a.id.as_str(), area_id))
    }
}

#[async_trait]
impl ColaboradorRepositoryTrait for InMemoryLedger {
    fn list(&self) -> Result<Vec<Colaborador>> {
        let mut colaboradores = self.colaboradores.read().unwrap().clone();
        colaboradores.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(colaboradores)
    }

    fn find_by_id(&self, colaborador_id: &str) -> Result<Option<Colaborador>> {
        Ok(self
            .colaboradores
            .read()
            .unwrap()
            .iter()
            .find(|c| c.id == colaborador_id)
            .cloned())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Colaborador>> {
        Ok(self
            .colaboradores
            .read()
            .unwrap()
            .iter()
            .find(|c| c.name == name)
            .cloned())
    }

    fn has_dependents(&self, colaborador_id: &str) -> Result<bool> {
        Ok(self
            .lancamentos
            .read()
            .unwrap()
            .iter()
            .any(|l| l.colaborador_id == colaborador_id)
            || self
                .observacoes
                .read()
                .unwrap()
                .iter()
                .any(|o| o.colaborador_id == colaborador_id))
    }

    async fn create(&self, new_colaborador: NewColaborador) -> Result<Colaborador> {
        Ok(self.seed_colaborador(&new_colaborador.name))
    }

    async fn update(&self, colaborador: Colaborador) -> Result<Colaborador> {
        let id = colaborador.id.clone();
        replace(&self.colaboradores, |c| c.id.as_str(), &id, colaborador)
    }

    async fn delete(&self, colaborador_id: &str) -> Result<usize> {
        Ok(remove(&self.colaboradores, |c| c.id.as_str(), colaborador_id))
    }
}

#[async_trait]
impl MetaRepositoryTrait for InMemoryLedger {
    fn list(&self) -> Result<Vec<Meta>> {
        Ok(self.metas.read().unwrap().clone())
    }

    fn list_by_area(&self, area_id: &str) -> Result<Vec<Meta>> {
        Ok(self
            .metas
            .read()
            .unwrap()
            .iter()
            .filter(|m| m.area_id == area_id)
            .cloned()
            .collect())
    }

    fn find_by_id(&self, meta_id: &str) -> Result<Option<Meta>> {
        Ok(self.metas.read().unwrap().iter().find(|m| m.id == meta_id).cloned())
    }

    async fn create(&self, new_meta: NewMeta) -> Result<Meta> {
        let mut meta = self.seed_meta(
            &new_meta.area_id,
            new_meta.target_quantity,
            new_meta.unit_value,
            new_meta.effective_date,
        );
        meta.name = new_meta.name;
        let id = meta.id.clone();
        replace(&self.metas, |m| m.id.as_str(), &id, meta)
    }

    async fn update(&self, meta_id: &str, changes: NewMeta) -> Result<Meta> {
        let current = MetaRepositoryTrait::find_by_id(self, meta_id)?
            .ok_or_else(|| Error::not_found("Meta", meta_id))?;
        let meta = Meta {
            name: changes.name,
            area_id: changes.area_id,
            target_quantity: changes.target_quantity,
            unit_value: changes.unit_value,
            effective_date: changes.effective_date,
            ..current
        };
        replace(&self.metas, |m| m.id.as_str(), meta_id, meta)
    }

    async fn delete(&self, meta_id: &str) -> Result<usize> {
        Ok(remove(&self.metas, |m| m.id.as_str(), meta_id))
    }
}

#[async_trait]
impl LancamentoRepositoryTrait for InMemoryLedger {
    fn list(&self, filter: &LancamentoFilter) -> Result<Vec<Lancamento>> {
        let mut entries: Vec<Lancamento> = self
            .lancamentos
            .read()
            .unwrap()
            .iter()
            .filter(|l| filter.matches(l))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(entries)
    }

    fn find_by_id(&self, lancamento_id: &str) -> Result<Option<Lancamento>> {
        Ok(self
            .lancamentos
            .read()
            .unwrap()
            .iter()
            .find(|l| l.id == lancamento_id)
            .cloned())
    }

    fn find_duplicate(
        &self,
        colaborador_id: &str,
        area_id: &str,
        date: NaiveDate,
    ) -> Result<Option<Lancamento>> {
        Ok(self
            .lancamentos
            .read()
            .unwrap()
            .iter()
            .find(|l| l.colaborador_id == colaborador_id && l.area_id == area_id && l.date == date)
            .cloned())
    }

    fn count(&self) -> Result<i64> {
        Ok(self.lancamentos.read().unwrap().len() as i64)
    }

    fn list_recent(&self, limit: usize) -> Result<Vec<Lancamento>> {
        let mut entries = LancamentoRepositoryTrait::list(self, &LancamentoFilter::default())?;
        entries.truncate(limit);
        Ok(entries)
    }

    async fn create(&self, new_lancamento: NewLancamento) -> Result<Lancamento> {
        Ok(self.seed_lancamento(
            &new_lancamento.area_id,
            &new_lancamento.colaborador_id,
            new_lancamento.date,
            new_lancamento.quantity_done,
        ))
    }

    async fn update(&self, lancamento_id: &str, changes: NewLancamento) -> Result<Lancamento> {
        let current = LancamentoRepositoryTrait::find_by_id(self, lancamento_id)?
            .ok_or_else(|| Error::not_found("Lancamento", lancamento_id))?;
        let lancamento = Lancamento {
            date: changes.date,
            area_id: changes.area_id,
            colaborador_id: changes.colaborador_id,
            quantity_done: changes.quantity_done,
            ..current
        };
        replace(&self.lancamentos, |l| l.id.as_str(), lancamento_id, lancamento)
    }

    async fn delete(&self, lancamento_id: &str) -> Result<usize> {
        Ok(remove(&self.lancamentos, |l| l.id.as_str(), lancamento_id))
    }
}

#[async_trait]
impl ObservacaoRepositoryTrait for InMemoryLedger {
    fn list(&self, filter: &ObservacaoFilter) -> Result<Vec<Observacao>> {
        let mut observacoes: Vec<Observacao> = self
            .observacoes
            .read()
            .unwrap()
            .iter()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect();
        observacoes.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(observacoes)
    }

    fn find_by_id(&self, observacao_id: &str) -> Result<Option<Observacao>> {
        Ok(self
            .observacoes
            .read()
            .unwrap()
            .iter()
            .find(|o| o.id == observacao_id)
            .cloned())
    }

    async fn create(&self, new_observacao: NewObservacao) -> Result<Observacao> {
        let mut observacao = self.seed_observacao(
            &new_observacao.colaborador_id,
            new_observacao.date,
            new_observacao.tipo,
        );
        observacao.description = new_observacao.description;
        let id = observacao.id.clone();
        replace(&self.observacoes, |o| o.id.as_str(), &id, observacao)
    }

    async fn update(&self, observacao_id: &str, changes: NewObservacao) -> Result<Observacao> {
        let observacao = Observacao {
            id: observacao_id.to_string(),
            colaborador_id: changes.colaborador_id,
            date: changes.date,
            tipo: changes.tipo,
            description: changes.description,
        };
        replace(&self.observacoes, |o| o.id.as_str(), observacao_id, observacao)
    }

    async fn delete(&self, observacao_id: &str) -> Result<usize> {
        Ok(remove(&self.observacoes, |o| o.id.as_str(), observacao_id))
    }
}
