/// Decimal places used for payable values.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Number of entries shown in the dashboard's recent list.
pub const RECENT_LANCAMENTOS_LIMIT: usize = 5;

/// Upper bound for a meta's `valor_unitario`. Any `i32` quantity times this
/// stays far inside the `Decimal` range.
pub const MAX_UNIT_VALUE: i64 = 1_000_000_000;
