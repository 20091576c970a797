//! Statement tables: the snapshot sequence pivoted into labelled line items

use super::format::format_amount;
use crate::projection::{MonthlySnapshot, ProjectionResult};
use serde::Serialize;
use std::fmt;
use std::io::Write;

const LABEL_WIDTH: usize = 32;
const VALUE_WIDTH: usize = 14;

/// Which statement to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement {
    ProfitAndLoss,
    CashFlow,
    BalanceSheet,
}

impl Statement {
    pub const ALL: [Statement; 3] = [
        Statement::ProfitAndLoss,
        Statement::CashFlow,
        Statement::BalanceSheet,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Statement::ProfitAndLoss => "Profit & Loss",
            Statement::CashFlow => "Cash Flow",
            Statement::BalanceSheet => "Balance Sheet",
        }
    }

    /// Build the table for a projection
    pub fn build(self, result: &ProjectionResult) -> StatementTable {
        match self {
            Statement::ProfitAndLoss => profit_and_loss(result),
            Statement::CashFlow => cash_flow(result),
            Statement::BalanceSheet => balance_sheet(result),
        }
    }
}

/// Rendering hints for a line item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowStyle {
    /// Subtotal or total line
    pub bold: bool,
    /// Component of the total above it
    pub indent: bool,
}

impl RowStyle {
    pub const PLAIN: RowStyle = RowStyle { bold: false, indent: false };
    pub const BOLD: RowStyle = RowStyle { bold: true, indent: false };
    pub const INDENT: RowStyle = RowStyle { bold: false, indent: true };
}

/// One line item across all months
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementRow {
    pub label: String,
    pub values: Vec<f64>,
    pub style: RowStyle,
}

impl StatementRow {
    fn from_snapshots(
        label: &str,
        snapshots: &[MonthlySnapshot],
        style: RowStyle,
        value: impl Fn(&MonthlySnapshot) -> f64,
    ) -> Self {
        Self {
            label: label.to_string(),
            values: snapshots.iter().map(value).collect(),
            style,
        }
    }

    /// Whether the value for a month should be highlighted as negative
    pub fn is_negative(&self, month: usize) -> bool {
        self.values.get(month).is_some_and(|v| *v < 0.0)
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// A statement: month labels as columns, line items as rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<StatementRow>,
}

impl fmt::Display for StatementTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = LABEL_WIDTH + self.headers.len() * (VALUE_WIDTH + 1);

        writeln!(f, "{}", self.title)?;
        write!(f, "{:<LABEL_WIDTH$}", "")?;
        for header in &self.headers {
            write!(f, " {:>VALUE_WIDTH$}", header)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", "=".repeat(width))?;

        for row in &self.rows {
            if row.style.bold {
                writeln!(f, "{}", "-".repeat(width))?;
            }
            let label = if row.style.indent {
                format!("  {}", row.label)
            } else {
                row.label.clone()
            };
            write!(f, "{:<LABEL_WIDTH$}", label)?;
            for value in &row.values {
                write!(f, " {:>VALUE_WIDTH$}", format_amount(*value))?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl StatementTable {
    /// Find a row by label
    pub fn row(&self, label: &str) -> Option<&StatementRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Fixed-width text rendering; bold rows get a rule above them
    pub fn render_text(&self) -> String {
        self.to_string()
    }

    /// CSV rendering: one line item per record, one column per month
    pub fn write_csv<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut writer = csv::Writer::from_writer(writer);

        let mut header = vec!["Item".to_string()];
        header.extend(self.headers.iter().cloned());
        writer.write_record(&header)?;

        for row in &self.rows {
            let mut record = vec![row.label.clone()];
            record.extend(row.values.iter().map(|v| format!("{:.2}", v)));
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }
}

fn table(
    statement: Statement,
    result: &ProjectionResult,
    rows: Vec<StatementRow>,
) -> StatementTable {
    StatementTable {
        title: statement.title().to_string(),
        headers: result.labels(),
        rows,
    }
}

/// Profit & loss: sales down to net profit; costs shown negative
pub fn profit_and_loss(result: &ProjectionResult) -> StatementTable {
    let s = &result.snapshots;
    let rows = vec![
        StatementRow::from_snapshots("Sales", s, RowStyle::PLAIN, |m| m.sales_net),
        StatementRow::from_snapshots("Cost of goods sold", s, RowStyle::PLAIN, |m| -m.cogs),
        StatementRow::from_snapshots("Gross margin", s, RowStyle::BOLD, |m| m.gross_margin()),
        StatementRow::from_snapshots("Personnel costs", s, RowStyle::PLAIN, |m| -m.total_wage_cost),
        StatementRow::from_snapshots("EBITDA", s, RowStyle::BOLD, |m| m.ebitda),
        StatementRow::from_snapshots("Interest", s, RowStyle::PLAIN, |m| m.interest),
        StatementRow::from_snapshots("EBT", s, RowStyle::BOLD, |m| m.ebt),
        StatementRow::from_snapshots("Income tax", s, RowStyle::PLAIN, |m| -m.tax),
        StatementRow::from_snapshots("Net profit", s, RowStyle::BOLD, |m| m.net_profit),
    ];
    table(Statement::ProfitAndLoss, result, rows)
}

/// Cash flow: opening cash through financing to closing cash and debt
pub fn cash_flow(result: &ProjectionResult) -> StatementTable {
    let s = &result.snapshots;
    let rows = vec![
        StatementRow::from_snapshots("Opening cash", s, RowStyle::BOLD, |m| m.opening_cash),
        StatementRow::from_snapshots("Collections", s, RowStyle::PLAIN, |m| m.receivables_inflow),
        StatementRow::from_snapshots("Purchase payments", s, RowStyle::PLAIN, |m| {
            -m.payment_outflow
        }),
        StatementRow::from_snapshots("Payroll", s, RowStyle::PLAIN, |m| -m.total_wage_cost),
        StatementRow::from_snapshots("VAT payment/refund", s, RowStyle::PLAIN, |m| {
            -m.vat_cash_flow
        }),
        StatementRow::from_snapshots("Operating cash flow", s, RowStyle::BOLD, |m| m.op_cash_flow),
        StatementRow::from_snapshots("Drawdown", s, RowStyle::INDENT, |m| m.financing_gap),
        StatementRow::from_snapshots("Repayment", s, RowStyle::INDENT, |m| -m.repayment),
        StatementRow::from_snapshots("Interest paid", s, RowStyle::INDENT, |m| m.interest),
        StatementRow::from_snapshots("Closing cash", s, RowStyle::BOLD, |m| m.cash_balance),
        StatementRow::from_snapshots("Revolving debt", s, RowStyle::PLAIN, |m| m.debt_balance),
    ];
    table(Statement::CashFlow, result, rows)
}

/// Balance sheet: assets, liabilities & equity, and the A - L check line
pub fn balance_sheet(result: &ProjectionResult) -> StatementTable {
    let s = &result.snapshots;
    let rows = vec![
        StatementRow::from_snapshots("Total assets", s, RowStyle::BOLD, |m| m.assets_total),
        StatementRow::from_snapshots("Cash", s, RowStyle::INDENT, |m| m.assets_money),
        StatementRow::from_snapshots("Receivables", s, RowStyle::INDENT, |m| m.assets_receivables),
        StatementRow::from_snapshots("Stock", s, RowStyle::INDENT, |m| m.assets_stock),
        StatementRow::from_snapshots("Total liabilities & equity", s, RowStyle::BOLD, |m| {
            m.liab_total
        }),
        StatementRow::from_snapshots("Equity", s, RowStyle::INDENT, |m| m.liab_equity),
        StatementRow::from_snapshots("Payables", s, RowStyle::INDENT, |m| m.liab_payables),
        StatementRow::from_snapshots("VAT liability", s, RowStyle::INDENT, |m| m.liab_vat),
        StatementRow::from_snapshots("Bank loans", s, RowStyle::INDENT, |m| m.liab_loans),
        StatementRow::from_snapshots("Check (A - L)", s, RowStyle::BOLD, |m| m.balance_check()),
    ];
    table(Statement::BalanceSheet, result, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::Assumptions;
    use crate::projection::{ProjectionConfig, ProjectionEngine};
    use approx::assert_relative_eq;

    fn default_result() -> ProjectionResult {
        ProjectionEngine::new(Assumptions::default(), ProjectionConfig::default()).project()
    }

    #[test]
    fn test_tables_have_one_column_per_month() {
        let result = default_result();
        for statement in Statement::ALL {
            let table = statement.build(&result);
            assert_eq!(table.headers.len(), 24);
            assert_eq!(table.headers[0], "1/2026");
            for row in &table.rows {
                assert_eq!(row.values.len(), 24, "{}: {}", table.title, row.label);
            }
        }
    }

    #[test]
    fn test_profit_and_loss_rows() {
        let table = profit_and_loss(&default_result());

        let cogs = table.row("Cost of goods sold").unwrap();
        assert_relative_eq!(cogs.values[0], -7_200_000.0, max_relative = 1e-12);
        assert!(cogs.is_negative(0));
        assert!(!cogs.is_negative(99));

        let net = table.row("Net profit").unwrap();
        assert!(net.style.bold);
        assert_relative_eq!(net.values[0], 632_000.0, max_relative = 1e-12);

        let tax = table.row("Income tax").unwrap();
        assert_relative_eq!(tax.values[0], -168_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_cash_flow_opening_row() {
        let result = default_result();
        let table = cash_flow(&result);
        let opening = table.row("Opening cash").unwrap();
        let closing = table.row("Closing cash").unwrap();

        assert_eq!(opening.values[0], 500_000.0);
        for i in 1..24 {
            assert_eq!(opening.values[i], closing.values[i - 1]);
        }
        assert!(table.row("Drawdown").unwrap().style.indent);
    }

    #[test]
    fn test_balance_sheet_check_row() {
        let result = default_result();
        let table = balance_sheet(&result);
        let check = table.row("Check (A - L)").unwrap();

        for (value, snapshot) in check.values.iter().zip(&result.snapshots) {
            assert_eq!(*value, snapshot.assets_total - snapshot.liab_total);
        }
    }

    #[test]
    fn test_render_text() {
        let table = profit_and_loss(&default_result());
        let text = table.render_text();
        assert_eq!(text, format!("{}", table));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Profit & Loss");
        assert!(lines[1].contains("1/2026"));
        assert!(lines[1].contains("12/2027"));
        assert!(text.contains("-7 200 000"));
        assert!(text.contains("632 000"));
    }

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        cash_flow(&default_result()).write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("Item,1/2026,2/2026"));
        assert!(lines.next().unwrap().starts_with("Opening cash,500000.00,"));
        assert_eq!(text.lines().count(), 12);
    }
}
