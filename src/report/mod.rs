//! Presentation of projection results: statements, charts, summaries and CSV export

pub mod chart;
pub mod format;
pub mod statements;

pub use chart::{ChartPoint, ChartSeries};
pub use statements::{RowStyle, Statement, StatementRow, StatementTable};

use crate::projection::{MonthlySnapshot, ProjectionSummary};
use format::format_amount;
use std::io::Write;

/// Dashboard summary as text lines
pub fn render_summary(summary: &ProjectionSummary) -> String {
    let lines = [
        ("Months projected", summary.total_months.to_string()),
        ("Total sales", format_amount(summary.total_sales)),
        ("Total EBITDA", format_amount(summary.total_ebitda)),
        ("Total net profit", format_amount(summary.total_net_profit)),
        ("Total income tax", format_amount(summary.total_tax)),
        ("Total interest", format_amount(summary.total_interest)),
        ("Closing cash", format_amount(summary.final_cash)),
        ("Closing debt", format_amount(summary.final_debt)),
        ("Peak debt", format_amount(summary.peak_debt)),
        ("Max A - L deviation", format_amount(summary.max_balance_deviation)),
    ];

    lines
        .iter()
        .map(|(label, value)| format!("  {:<22} {:>16}\n", format!("{}:", label), value))
        .collect()
}

/// Write every snapshot as one CSV record with a header row
pub fn write_snapshots_csv<W: Write>(snapshots: &[MonthlySnapshot], writer: W) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for snapshot in snapshots {
        writer.serialize(snapshot)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::Assumptions;
    use crate::projection::{project, ProjectionConfig, ProjectionEngine};

    #[test]
    fn test_snapshots_csv() {
        let snapshots = project(&Assumptions::default());
        let mut buf = Vec::new();
        write_snapshots_csv(&snapshots, &mut buf).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "month_index");
        assert_eq!(&headers[1], "period_start");
        assert_eq!(&headers[2], "label");

        let parsed: Vec<MonthlySnapshot> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(parsed.len(), 24);
        assert_eq!(parsed[12].label, "1/2027");
        assert_eq!(parsed[12].period_start, snapshots[12].period_start);
    }

    #[test]
    fn test_render_summary() {
        let result =
            ProjectionEngine::new(Assumptions::default(), ProjectionConfig::default()).project();
        let text = render_summary(&result.summary());

        assert_eq!(text.lines().count(), 10);
        assert!(text.contains("Months projected:"));
        assert!(text.contains("192 000 000"));
    }
}
