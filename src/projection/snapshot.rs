//! Monthly output records for projections

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Financial statements for one projected month
///
/// Debt is carried as a non-positive number (`debt_balance <= 0`); the
/// balance sheet shows it as the positive `liab_loans`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    // Timing
    pub month_index: u32,
    pub period_start: NaiveDate,
    pub label: String,

    // Opening balances (previous month's closing figures)
    pub opening_stock: f64,
    pub opening_cash: f64,
    pub opening_debt: f64,
    pub opening_equity: f64,
    pub opening_receivables: f64,
    pub opening_payables: f64,

    // Employees
    pub emp_count: f64,
    /// Gross wages plus employer levy
    pub total_wage_cost: f64,

    // Stock & purchases
    pub purchase_net: f64,
    pub purchase_vat_input: f64,
    pub cogs: f64,
    pub stock_balance: f64,
    /// Cash paid to suppliers this month
    pub payment_outflow: f64,

    // Sales
    pub sales_net: f64,
    pub sales_vat_output: f64,
    /// Cash collected from customers this month
    pub receivables_inflow: f64,
    pub margin_abs: f64,

    // VAT
    /// Accrued this month: output minus input (negative means refund due)
    pub vat_to_pay: f64,
    /// Settled this month, equal to last month's accrual
    pub vat_cash_flow: f64,

    // P&L
    pub ebitda: f64,
    pub ebit: f64,
    pub interest: f64,
    pub ebt: f64,
    pub tax: f64,
    pub net_profit: f64,

    // Cash flow
    pub op_cash_flow: f64,
    pub cash_before_fin: f64,
    /// Drawn on the revolving facility
    pub financing_gap: f64,
    /// Repaid to the revolving facility
    pub repayment: f64,
    pub cash_balance: f64,
    pub debt_balance: f64,

    // Balance sheet
    pub assets_money: f64,
    pub assets_receivables: f64,
    pub assets_stock: f64,
    pub assets_total: f64,

    pub liab_equity: f64,
    pub liab_payables: f64,
    pub liab_vat: f64,
    pub liab_loans: f64,
    pub liab_total: f64,
}

impl MonthlySnapshot {
    /// Create a new snapshot with zeroed figures
    pub fn new(month_index: u32, period_start: NaiveDate, label: String) -> Self {
        Self {
            month_index,
            period_start,
            label,
            opening_stock: 0.0,
            opening_cash: 0.0,
            opening_debt: 0.0,
            opening_equity: 0.0,
            opening_receivables: 0.0,
            opening_payables: 0.0,
            emp_count: 0.0,
            total_wage_cost: 0.0,
            purchase_net: 0.0,
            purchase_vat_input: 0.0,
            cogs: 0.0,
            stock_balance: 0.0,
            payment_outflow: 0.0,
            sales_net: 0.0,
            sales_vat_output: 0.0,
            receivables_inflow: 0.0,
            margin_abs: 0.0,
            vat_to_pay: 0.0,
            vat_cash_flow: 0.0,
            ebitda: 0.0,
            ebit: 0.0,
            interest: 0.0,
            ebt: 0.0,
            tax: 0.0,
            net_profit: 0.0,
            op_cash_flow: 0.0,
            cash_before_fin: 0.0,
            financing_gap: 0.0,
            repayment: 0.0,
            cash_balance: 0.0,
            debt_balance: 0.0,
            assets_money: 0.0,
            assets_receivables: 0.0,
            assets_stock: 0.0,
            assets_total: 0.0,
            liab_equity: 0.0,
            liab_payables: 0.0,
            liab_vat: 0.0,
            liab_loans: 0.0,
            liab_total: 0.0,
        }
    }

    /// Gross profit: net sales less cost of goods sold
    pub fn gross_margin(&self) -> f64 {
        self.sales_net - self.cogs
    }

    /// Balance-sheet check, assets minus liabilities
    pub fn balance_check(&self) -> f64 {
        self.assets_total - self.liab_total
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Calendar year of month index 0
    pub base_year: i32,

    /// Monthly snapshots in month-index order
    pub snapshots: Vec<MonthlySnapshot>,
}

impl ProjectionResult {
    pub fn new(base_year: i32) -> Self {
        Self {
            base_year,
            snapshots: Vec::new(),
        }
    }

    /// Add a snapshot
    pub fn add_snapshot(&mut self, snapshot: MonthlySnapshot) {
        self.snapshots.push(snapshot);
    }

    /// Month labels, in order
    pub fn labels(&self) -> Vec<String> {
        self.snapshots.iter().map(|s| s.label.clone()).collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_sales: f64 = self.snapshots.iter().map(|s| s.sales_net).sum();
        let total_ebitda: f64 = self.snapshots.iter().map(|s| s.ebitda).sum();
        let total_net_profit: f64 = self.snapshots.iter().map(|s| s.net_profit).sum();
        let total_tax: f64 = self.snapshots.iter().map(|s| s.tax).sum();
        let total_interest: f64 = self.snapshots.iter().map(|s| s.interest).sum();

        let final_cash = self.snapshots.last().map(|s| s.cash_balance).unwrap_or(0.0);
        let final_debt = self.snapshots.last().map(|s| s.debt_balance).unwrap_or(0.0);
        let peak_debt = self
            .snapshots
            .iter()
            .map(|s| s.debt_balance)
            .fold(0.0_f64, f64::min);
        let max_balance_deviation = self
            .snapshots
            .iter()
            .map(|s| s.balance_check().abs())
            .fold(0.0_f64, f64::max);

        ProjectionSummary {
            total_months: self.snapshots.len() as u32,
            total_sales,
            total_ebitda,
            total_net_profit,
            total_tax,
            total_interest,
            final_cash,
            final_debt,
            peak_debt,
            max_balance_deviation,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub total_sales: f64,
    pub total_ebitda: f64,
    pub total_net_profit: f64,
    pub total_tax: f64,
    pub total_interest: f64,
    pub final_cash: f64,
    pub final_debt: f64,
    /// Most negative debt balance reached
    pub peak_debt: f64,
    /// Largest absolute assets-minus-liabilities gap
    pub max_balance_deviation: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(index: u32, cash: f64, debt: f64, net_profit: f64) -> MonthlySnapshot {
        let date = NaiveDate::from_ymd_opt(2026, index + 1, 1).unwrap();
        let mut s = MonthlySnapshot::new(index, date, format!("{}/2026", index + 1));
        s.sales_net = 100.0;
        s.cash_balance = cash;
        s.debt_balance = debt;
        s.net_profit = net_profit;
        s
    }

    #[test]
    fn test_summary() {
        let mut result = ProjectionResult::new(2026);
        result.add_snapshot(snapshot(0, 0.0, -500.0, -20.0));
        result.add_snapshot(snapshot(1, 0.0, -800.0, 10.0));
        result.add_snapshot(snapshot(2, 150.0, 0.0, 30.0));

        let summary = result.summary();
        assert_eq!(summary.total_months, 3);
        assert_eq!(summary.total_sales, 300.0);
        assert_eq!(summary.total_net_profit, 20.0);
        assert_eq!(summary.final_cash, 150.0);
        assert_eq!(summary.final_debt, 0.0);
        assert_eq!(summary.peak_debt, -800.0);
        assert_eq!(result.labels(), vec!["1/2026", "2/2026", "3/2026"]);
    }

    #[test]
    fn test_empty_summary() {
        let summary = ProjectionResult::new(2026).summary();
        assert_eq!(summary.total_months, 0);
        assert_eq!(summary.final_cash, 0.0);
        assert_eq!(summary.peak_debt, 0.0);
    }
}
