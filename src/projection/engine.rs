//! Core projection engine for monthly P&L, cash flow and balance sheet

use crate::assumptions::Assumptions;
use super::state::ProjectionState;
use super::snapshot::{MonthlySnapshot, ProjectionResult};
use chrono::NaiveDate;
use log::{debug, trace};

/// Default number of projected months
pub const DEFAULT_MONTHS: u32 = 24;

/// Default calendar year of the first projected month
pub const DEFAULT_BASE_YEAR: i32 = 2026;

/// Earliest base year accepted from user input
pub const MIN_BASE_YEAR: i32 = 1;

/// Latest base year accepted from user input
pub const MAX_BASE_YEAR: i32 = 9999;

/// Whether a base year lies in the range accepted from the CLI and HTTP input
pub fn is_supported_base_year(year: i32) -> bool {
    (MIN_BASE_YEAR..=MAX_BASE_YEAR).contains(&year)
}

/// Default annual interest on the revolving facility
pub const DEFAULT_ANNUAL_INTEREST_RATE: f64 = 0.10;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Number of months to project
    pub months: u32,

    /// Calendar year of month index 0 (always January)
    pub base_year: i32,

    /// Annual interest rate charged on the opening debt balance
    pub annual_interest_rate: f64,

    /// First month index with employees on payroll
    pub payroll_start_month: u32,

    /// Months between invoicing and collecting the 90-day share
    pub collection_lag_months: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            months: DEFAULT_MONTHS,
            base_year: DEFAULT_BASE_YEAR,
            annual_interest_rate: DEFAULT_ANNUAL_INTEREST_RATE,
            payroll_start_month: 3,
            collection_lag_months: 3,
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
    config: ProjectionConfig,
}

/// Project the default 24-month horizon for the given assumptions
pub fn project(assumptions: &Assumptions) -> Vec<MonthlySnapshot> {
    ProjectionEngine::new(assumptions.clone(), ProjectionConfig::default())
        .project()
        .snapshots
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions and config
    pub fn new(assumptions: Assumptions, config: ProjectionConfig) -> Self {
        Self { assumptions, config }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run the projection over the configured horizon
    pub fn project(&self) -> ProjectionResult {
        debug!(
            "Projecting {} months from {} (sales {}, purchases {})",
            self.config.months,
            self.config.base_year,
            self.assumptions.monthly_sales,
            self.assumptions.monthly_purchase,
        );

        let mut result = ProjectionResult::new(self.config.base_year);
        let mut state = ProjectionState::from_assumptions(&self.assumptions);

        for _ in 0..self.config.months {
            let snapshot = self.calculate_month(&mut state);
            trace!(
                "{}: cash {:.2}, debt {:.2}, net profit {:.2}",
                snapshot.label,
                snapshot.cash_balance,
                snapshot.debt_balance,
                snapshot.net_profit,
            );
            result.add_snapshot(snapshot);
            state.advance_month();
        }

        result
    }

    /// Month label `month/year` and first calendar day for a month index
    pub fn period(&self, month_index: u32) -> (NaiveDate, String) {
        // month_index / 12 always fits in i32; the year saturates instead of wrapping
        let year = self.config.base_year.saturating_add((month_index / 12) as i32);
        let month = month_index % 12 + 1;
        // Years outside chrono's range fall back to the default date; the label stays exact
        let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default();
        (start, format!("{}/{}", month, year))
    }

    /// Calculate statements for a single month and roll the state forward
    fn calculate_month(&self, state: &mut ProjectionState) -> MonthlySnapshot {
        let (period_start, label) = self.period(state.month_index);
        let mut row = MonthlySnapshot::new(state.month_index, period_start, label);

        row.opening_stock = state.stock;
        row.opening_cash = state.cash;
        row.opening_debt = state.debt;
        row.opening_equity = state.equity;
        row.opening_receivables = state.receivables;
        row.opening_payables = state.payables;

        self.calculate_payroll(state, &mut row);
        let purchase_liability = self.calculate_purchases(state, &mut row);
        let invoiced = self.calculate_sales(state, &mut row);
        self.calculate_vat(state, &mut row);
        self.calculate_pnl(state, &mut row);
        self.calculate_financing(state, &mut row);
        self.roll_forward(state, &mut row, invoiced, purchase_liability);

        row
    }

    fn calculate_payroll(&self, state: &ProjectionState, row: &mut MonthlySnapshot) {
        let a = &self.assumptions;

        row.emp_count = if state.month_index >= self.config.payroll_start_month {
            a.employee_count
        } else {
            0.0
        };
        let gross_wages = row.emp_count * a.gross_wage;
        let employer_levy = gross_wages * a.payroll_tax_rate;
        row.total_wage_cost = gross_wages + employer_levy;
    }

    /// Purchases, stock and supplier payments; returns this month's liability incl. VAT
    fn calculate_purchases(&self, state: &ProjectionState, row: &mut MonthlySnapshot) -> f64 {
        let a = &self.assumptions;

        row.purchase_net = a.monthly_purchase;
        row.purchase_vat_input = a.monthly_purchase * a.domestic_purchase_share * a.vat_rate;
        let liability = row.purchase_net + row.purchase_vat_input;

        row.cogs = a.monthly_sales * (1.0 - a.margin);
        row.stock_balance = state.stock + row.purchase_net - row.cogs;

        // Prepaid share now, the rest of last month's liability falls due now
        let pay_current = liability * a.payment_prepayment;
        let pay_prior = state
            .prior_purchase_liability
            .map_or(0.0, |prior| prior * a.payment_due_next_month);
        row.payment_outflow = pay_current + pay_prior;

        liability
    }

    /// Sales and customer collections; returns this month's invoiced amount incl. VAT
    fn calculate_sales(&self, state: &mut ProjectionState, row: &mut MonthlySnapshot) -> f64 {
        let a = &self.assumptions;

        row.sales_net = a.monthly_sales;
        row.sales_vat_output = a.monthly_sales * a.domestic_share * a.vat_rate;
        let invoiced = row.sales_net + row.sales_vat_output;
        state.record_invoiced(invoiced);

        let collect_current = invoiced * (a.collection_prepayment + a.collection_14_days);
        let collect_lagged = state
            .invoiced_months_ago(self.config.collection_lag_months)
            .map_or(0.0, |earlier| earlier * a.collection_90_days);
        row.receivables_inflow = collect_current + collect_lagged;

        row.margin_abs = a.monthly_sales * a.margin;

        invoiced
    }

    /// VAT accrues this month and is settled one month later
    fn calculate_vat(&self, state: &ProjectionState, row: &mut MonthlySnapshot) {
        row.vat_to_pay = row.sales_vat_output - row.purchase_vat_input;
        row.vat_cash_flow = state.prior_vat_accrued.unwrap_or(0.0);
    }

    fn calculate_pnl(&self, state: &ProjectionState, row: &mut MonthlySnapshot) {
        row.ebitda = row.margin_abs - row.total_wage_cost;
        // No depreciation
        row.ebit = row.ebitda;
        // Opening debt is <= 0, so interest is an expense (<= 0)
        row.interest = state.debt * self.config.annual_interest_rate / 12.0;
        row.ebt = row.ebit + row.interest;

        // No loss carryforward, no credit on losses
        row.tax = if row.ebt > 0.0 {
            row.ebt * self.assumptions.corporate_tax_rate
        } else {
            0.0
        };
        row.net_profit = row.ebt - row.tax;
    }

    /// Revolving credit: borrow up to zero cash, or repay from surplus cash
    fn calculate_financing(&self, state: &ProjectionState, row: &mut MonthlySnapshot) {
        row.op_cash_flow =
            row.receivables_inflow - row.payment_outflow - row.total_wage_cost - row.vat_cash_flow;
        row.cash_before_fin = state.cash + row.op_cash_flow + row.interest;

        if row.cash_before_fin < 0.0 {
            row.financing_gap = -row.cash_before_fin;
        } else if state.debt < 0.0 {
            let debt_principal = -state.debt;
            row.repayment = row.cash_before_fin.min(debt_principal);
        }

        row.cash_balance = row.cash_before_fin + row.financing_gap - row.repayment;
        row.debt_balance = state.debt - row.financing_gap + row.repayment;
    }

    /// Close the balance sheet and carry closing balances into the state
    fn roll_forward(
        &self,
        state: &mut ProjectionState,
        row: &mut MonthlySnapshot,
        invoiced: f64,
        purchase_liability: f64,
    ) {
        let receivables = state.receivables + invoiced - row.receivables_inflow;
        let payables = state.payables + purchase_liability - row.payment_outflow;
        let equity = state.equity + row.net_profit;

        row.assets_money = row.cash_balance;
        row.assets_receivables = receivables;
        row.assets_stock = row.stock_balance;
        row.assets_total = row.assets_money + row.assets_receivables + row.assets_stock;

        row.liab_equity = equity;
        row.liab_payables = payables;
        row.liab_vat = row.vat_to_pay;
        row.liab_loans = -row.debt_balance;
        row.liab_total = row.liab_equity + row.liab_payables + row.liab_vat + row.liab_loans;

        state.stock = row.stock_balance;
        state.cash = row.cash_balance;
        state.debt = row.debt_balance;
        state.equity = equity;
        state.receivables = receivables;
        state.payables = payables;
        state.prior_purchase_liability = Some(purchase_liability);
        state.prior_vat_accrued = Some(row.vat_to_pay);
    }
}
