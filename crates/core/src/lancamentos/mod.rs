//! Lancamentos module - daily production entries and their derived balances.

mod balance_calculator;
mod lancamentos_model;
mod lancamentos_service;
mod lancamentos_traits;

pub use balance_calculator::{calculate_balance, payable_value, select_active_meta, BalanceCalculator};
pub use lancamentos_model::{
    Balance, Lancamento, LancamentoFilter, LancamentoUpdate, LancamentoView, NewLancamento,
};
pub use lancamentos_service::LancamentoService;
pub use lancamentos_traits::{LancamentoRepositoryTrait, LancamentoServiceTrait};
