//! Per-entry balance computation.
//!
//! Pure functions over an entry and the metas of its area: no I/O, no
//! mutation. The service layer fetches the snapshot and hands it in.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

use super::lancamentos_model::{Balance, Lancamento};
use crate::constants::CURRENCY_DECIMAL_PLACES;
use crate::errors::{Error, Result};
use crate::metas::Meta;

/// Ordering key for goal precedence. `None < Some(_)`, so any dated meta
/// outranks an undated one; ties go to the most recently created.
fn precedence(meta: &Meta) -> (Option<NaiveDate>, chrono::NaiveDateTime, &str) {
    (meta.effective_date, meta.created_at, meta.id.as_str())
}

fn is_in_force(meta: &Meta, date: NaiveDate) -> bool {
    meta.effective_date.map_or(true, |effective| effective <= date)
}

/// Picks the meta in force for `area_id` on `date`: the latest
/// `effective_date` that is on or before `date`, undated metas last.
pub fn select_active_meta<'a>(
    metas: &'a [Meta],
    area_id: &str,
    date: NaiveDate,
) -> Option<&'a Meta> {
    metas
        .iter()
        .filter(|meta| meta.area_id == area_id && is_in_force(meta, date))
        .max_by(|a, b| precedence(a).cmp(&precedence(b)))
}

/// `quantity * unit_value` rounded half away from zero to cents.
pub fn payable_value(quantity: i32, unit_value: Decimal) -> Result<Decimal> {
    let raw = Decimal::from(quantity).checked_mul(unit_value).ok_or_else(|| {
        Error::invalid_input(format!(
            "valor_receber overflows for quantity {quantity} at {unit_value} per unit"
        ))
    })?;
    Ok(raw.round_dp_with_strategy(
        CURRENCY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    ))
}

fn balance_against(entry: &Lancamento, meta: Option<&Meta>) -> Result<Balance> {
    if entry.quantity_done < 0 {
        return Err(Error::invalid_input(format!(
            "Lancamento {} has a negative quantity ({})",
            entry.id, entry.quantity_done
        )));
    }
    let Some(meta) = meta else {
        return Ok(Balance::without_goal());
    };
    Ok(Balance {
        saldo: Some(i64::from(entry.quantity_done) - i64::from(meta.target_quantity)),
        valor_receber: Some(payable_value(entry.quantity_done, meta.unit_value)?),
        meta_id: Some(meta.id.clone()),
    })
}

/// Computes the balance of a single entry against the given metas.
pub fn calculate_balance(entry: &Lancamento, metas: &[Meta]) -> Result<Balance> {
    balance_against(entry, select_active_meta(metas, &entry.area_id, entry.date))
}

/// Balance calculator over a fixed set of metas, indexed by area so that
/// enriching many entries does not rescan every meta.
pub struct BalanceCalculator<'a> {
    by_area: HashMap<&'a str, Vec<&'a Meta>>,
}

impl<'a> BalanceCalculator<'a> {
    pub fn new(metas: &'a [Meta]) -> Self {
        let mut by_area: HashMap<&'a str, Vec<&'a Meta>> = HashMap::new();
        for meta in metas {
            by_area.entry(meta.area_id.as_str()).or_default().push(meta);
        }
        for candidates in by_area.values_mut() {
            candidates.sort_by(|a, b| precedence(b).cmp(&precedence(a)));
        }
        Self { by_area }
    }

    pub fn active_meta(&self, area_id: &str, date: NaiveDate) -> Option<&'a Meta> {
        self.by_area
            .get(area_id)?
            .iter()
            .copied()
            .find(|meta| is_in_force(meta, date))
    }

    pub fn balance_for(&self, entry: &Lancamento) -> Result<Balance> {
        balance_against(entry, self.active_meta(&entry.area_id, entry.date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn created(seq: u32) -> NaiveDateTime {
        d(2023, 12, 1).and_hms_opt(8, 0, seq).unwrap()
    }

    fn meta(id: &str, area: &str, target: i32, unit: Decimal, effective: Option<NaiveDate>) -> Meta {
        Meta {
            id: id.to_string(),
            name: format!("meta {id}"),
            area_id: area.to_string(),
            target_quantity: target,
            unit_value: unit,
            effective_date: effective,
            created_at: created(0),
        }
    }

    fn entry(area: &str, date: NaiveDate, quantity: i32) -> Lancamento {
        Lancamento {
            id: "l1".to_string(),
            date,
            area_id: area.to_string(),
            colaborador_id: "c1".to_string(),
            quantity_done: quantity,
            created_at: created(0),
        }
    }

    #[test]
    fn test_saldo_and_valor_for_surplus() {
        let metas = vec![meta("m1", "a", 100, dec!(0.50), Some(d(2024, 1, 1)))];
        let balance = calculate_balance(&entry("a", d(2024, 2, 1), 120), &metas).unwrap();
        assert_eq!(balance.saldo, Some(20));
        assert_eq!(balance.valor_receber, Some(dec!(60.00)));
        assert_eq!(balance.meta_id.as_deref(), Some("m1"));
    }

    #[test]
    fn test_deficit_is_negative_and_value_uses_full_quantity() {
        let metas = vec![meta("m1", "a", 100, dec!(0.50), None)];
        let balance = calculate_balance(&entry("a", d(2024, 2, 1), 80), &metas).unwrap();
        assert_eq!(balance.saldo, Some(-20));
        assert_eq!(balance.valor_receber, Some(dec!(40.00)));
    }

    #[test]
    fn test_exact_target_has_zero_saldo() {
        let metas = vec![meta("m1", "a", 50, dec!(1), None)];
        let balance = calculate_balance(&entry("a", d(2024, 2, 1), 50), &metas).unwrap();
        assert_eq!(balance.saldo, Some(0));
    }

    #[test]
    fn test_valor_rounds_half_away_from_zero() {
        assert_eq!(payable_value(1, dec!(0.125)).unwrap(), dec!(0.13));
        assert_eq!(payable_value(3, dec!(0.335)).unwrap(), dec!(1.01));
        assert_eq!(payable_value(7, dec!(0.333)).unwrap(), dec!(2.33));
        assert_eq!(payable_value(0, dec!(9.99)).unwrap(), dec!(0.00));
    }

    #[test]
    fn test_no_meta_yields_undefined_balance() {
        let metas = vec![meta("m1", "other", 10, dec!(1), None)];
        let balance = calculate_balance(&entry("a", d(2024, 2, 1), 10), &metas).unwrap();
        assert_eq!(balance, Balance::without_goal());
        assert!(!balance.has_goal());
    }

    #[test]
    fn test_meta_effective_after_entry_is_ignored() {
        let metas = vec![meta("m1", "a", 10, dec!(1), Some(d(2024, 6, 1)))];
        let balance = calculate_balance(&entry("a", d(2024, 5, 31), 10), &metas).unwrap();
        assert_eq!(balance.saldo, None);
        assert_eq!(balance.valor_receber, None);
    }

    #[test]
    fn test_active_meta_selection_by_effective_date() {
        let metas = vec![
            meta("jan", "a", 100, dec!(1), Some(d(2024, 1, 1))),
            meta("jun", "a", 150, dec!(1), Some(d(2024, 6, 1))),
        ];
        assert_eq!(
            select_active_meta(&metas, "a", d(2024, 3, 15)).map(|m| m.id.as_str()),
            Some("jan")
        );
        assert_eq!(
            select_active_meta(&metas, "a", d(2024, 7, 1)).map(|m| m.id.as_str()),
            Some("jun")
        );
        // Effective on the exact day.
        assert_eq!(
            select_active_meta(&metas, "a", d(2024, 6, 1)).map(|m| m.id.as_str()),
            Some("jun")
        );
        assert!(select_active_meta(&metas, "a", d(2023, 12, 31)).is_none());
    }

    #[test]
    fn test_dated_meta_overrides_undated() {
        let metas = vec![
            meta("undated", "a", 10, dec!(1), None),
            meta("dated", "a", 20, dec!(1), Some(d(2024, 1, 1))),
        ];
        assert_eq!(
            select_active_meta(&metas, "a", d(2024, 1, 2)).map(|m| m.id.as_str()),
            Some("dated")
        );
        // Before the dated meta starts only the undated one is in force.
        assert_eq!(
            select_active_meta(&metas, "a", d(2023, 6, 1)).map(|m| m.id.as_str()),
            Some("undated")
        );
    }

    #[test]
    fn test_same_effective_date_prefers_latest_created() {
        let mut older = meta("older", "a", 10, dec!(1), Some(d(2024, 1, 1)));
        older.created_at = created(1);
        let mut newer = meta("newer", "a", 20, dec!(1), Some(d(2024, 1, 1)));
        newer.created_at = created(2);
        let metas = vec![newer, older];
        assert_eq!(
            select_active_meta(&metas, "a", d(2024, 1, 5)).map(|m| m.id.as_str()),
            Some("newer")
        );
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        let metas = vec![meta("m1", "a", 10, dec!(1), None)];
        let err = calculate_balance(&entry("a", d(2024, 1, 1), -1), &metas).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_indexed_calculator_agrees_with_direct_selection() {
        let metas = vec![
            meta("a-undated", "a", 10, dec!(0.10), None),
            meta("a-jan", "a", 100, dec!(0.25), Some(d(2024, 1, 1))),
            meta("a-jun", "a", 150, dec!(0.30), Some(d(2024, 6, 1))),
            meta("b-mar", "b", 40, dec!(2.00), Some(d(2024, 3, 1))),
        ];
        let calculator = BalanceCalculator::new(&metas);
        let dates = [d(2023, 5, 1), d(2024, 1, 1), d(2024, 3, 15), d(2024, 8, 1)];

        for area in ["a", "b", "c"] {
            for date in dates {
                let e = entry(area, date, 77);
                assert_eq!(
                    calculator.balance_for(&e).unwrap(),
                    calculate_balance(&e, &metas).unwrap(),
                    "area {area} on {date}"
                );
            }
        }
    }
}
