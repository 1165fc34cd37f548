//! Groups enriched entries into report rows.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

use super::reports_model::{GroupBy, ProductionReportRow};
use crate::constants::CURRENCY_DECIMAL_PLACES;
use crate::errors::{Error, Result};
use crate::lancamentos::LancamentoView;
use crate::utils::DateRange;

#[derive(Default)]
struct Accumulator {
    label: String,
    total_produced: i64,
    days: HashSet<NaiveDate>,
    value_cents: i128,
    entries_without_goal: usize,
}

/// Exact integer cents of an already rounded payable value. `payable_value`
/// is the only place that rounds, so `rescale` here never drops digits.
fn cents(value: Decimal) -> i128 {
    debug_assert!(
        value.scale() <= CURRENCY_DECIMAL_PLACES,
        "payable value {value} was not rounded to cents"
    );
    let mut value = value;
    value.rescale(CURRENCY_DECIMAL_PLACES);
    value.mantissa()
}

fn group_key(view: &LancamentoView, group_by: GroupBy) -> (&str, &str) {
    match group_by {
        GroupBy::Colaborador => (&view.lancamento.colaborador_id, &view.colaborador_nome),
        GroupBy::Area => (&view.lancamento.area_id, &view.area_nome),
    }
}

/// Builds one row per key present among the entries dated inside `range`.
/// Entries outside the range are ignored. Rows come back unordered; see
/// [`sort_for_display`].
pub fn aggregate(
    entries: &[LancamentoView],
    range: &DateRange,
    group_by: GroupBy,
) -> Result<Vec<ProductionReportRow>> {
    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();

    for view in entries.iter().filter(|v| range.contains(v.lancamento.date)) {
        let quantity = view.lancamento.quantity_done;
        if quantity < 0 {
            return Err(Error::invalid_input(format!(
                "Lancamento {} has a negative quantity ({quantity})",
                view.lancamento.id
            )));
        }
        let (key_id, key_label) = group_key(view, group_by);
        let acc = groups.entry(key_id).or_default();
        if acc.label.is_empty() {
            acc.label = key_label.to_string();
        }
        acc.total_produced += i64::from(quantity);
        acc.days.insert(view.lancamento.date);
        match view.balance.valor_receber {
            Some(value) => acc.value_cents += cents(value),
            None => acc.entries_without_goal += 1,
        }
    }

    Ok(groups
        .into_iter()
        .map(|(key_id, acc)| ProductionReportRow {
            key_id: key_id.to_string(),
            key_label: acc.label,
            total_produced: acc.total_produced,
            average_daily: acc.total_produced as f64 / acc.days.len() as f64,
            total_value: Decimal::from_i128_with_scale(acc.value_cents, CURRENCY_DECIMAL_PLACES),
            entries_without_goal: acc.entries_without_goal,
        })
        .collect())
}

/// Highest `total_value` first, then `key_label` ascending. Stable.
pub fn sort_for_display(rows: &mut [ProductionReportRow]) {
    rows.sort_by(|a, b| {
        b.total_value
            .cmp(&a.total_value)
            .then_with(|| a.key_label.cmp(&b.key_label))
            .then_with(|| a.key_id.cmp(&b.key_id))
    });
}
