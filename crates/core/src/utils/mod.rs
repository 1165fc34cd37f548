pub mod time_utils;

pub use time_utils::{parse_iso_date, parse_optional_iso_date, DateRange, DATE_FORMAT};
