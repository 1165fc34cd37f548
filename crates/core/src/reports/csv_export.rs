//! CSV rendering of report rows.

use csv::{QuoteStyle, WriterBuilder};

use super::reports_model::{GroupBy, ProductionReportRow};
use crate::errors::{Error, Result};

/// Renders rows as CSV with a header line and every field quoted. Rows are
/// written in the order given.
pub fn render_csv(rows: &[ProductionReportRow], group_by: GroupBy) -> Result<String> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    wtr.write_record([
        group_by.as_str(),
        "total_produzido",
        "media_producao",
        "total_valor",
        "lancamentos_sem_meta",
    ])?;

    for row in rows {
        wtr.write_record([
            row.key_label.clone(),
            row.total_produced.to_string(),
            format!("{:.2}", row.average_daily),
            row.total_value.to_string(),
            row.entries_without_goal.to_string(),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| Error::Unexpected(format!("Failed to flush CSV report: {e}")))?;
    String::from_utf8(bytes).map_err(|e| Error::Unexpected(format!("CSV report is not UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_header_and_quoted_values() {
        let rows = vec![ProductionReportRow {
            key_id: "c1".to_string(),
            key_label: "Silva, Ana".to_string(),
            total_produced: 45,
            average_daily: 15.0,
            total_value: dec!(4.50),
            entries_without_goal: 0,
        }];
        let csv = render_csv(&rows, GroupBy::Colaborador).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            r#""colaborador","total_produzido","media_producao","total_valor","lancamentos_sem_meta""#
        );
        assert_eq!(lines[1], r#""Silva, Ana","45","15.00","4.50","0""#);
    }

    #[test]
    fn test_empty_report_has_only_header() {
        let csv = render_csv(&[], GroupBy::Area).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with(r#""area","#));
    }
}
