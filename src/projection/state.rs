//! Balances carried from one projected month to the next

use crate::assumptions::Assumptions;

/// Running balances between months
///
/// Holds the closing figures of the last computed month, plus the
/// prior-month amounts that later months settle against.
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Index of the month about to be computed (0-indexed)
    pub month_index: u32,

    pub stock: f64,
    pub cash: f64,
    /// Revolving debt, zero or negative
    pub debt: f64,
    /// Accumulated profit
    pub equity: f64,
    pub receivables: f64,
    pub payables: f64,

    /// Last month's purchase liability incl. VAT (`None` before month 0)
    pub prior_purchase_liability: Option<f64>,

    /// Last month's accrued VAT (`None` before month 0)
    pub prior_vat_accrued: Option<f64>,

    /// Invoiced amount (incl. VAT) of every month so far
    invoiced_history: Vec<f64>,
}

impl ProjectionState {
    /// Initialize state at projection start
    pub fn from_assumptions(assumptions: &Assumptions) -> Self {
        Self {
            month_index: 0,
            stock: assumptions.initial_stock,
            cash: assumptions.initial_cash,
            debt: 0.0,
            equity: 0.0,
            receivables: 0.0,
            payables: 0.0,
            prior_purchase_liability: None,
            prior_vat_accrued: None,
            invoiced_history: Vec::new(),
        }
    }

    /// Record the current month's invoiced amount
    pub fn record_invoiced(&mut self, invoiced: f64) {
        self.invoiced_history.push(invoiced);
    }

    /// Invoiced amount `months` before the most recently recorded month
    ///
    /// `Some(current)` for 0, `None` when the history is too short.
    pub fn invoiced_months_ago(&self, months: u32) -> Option<f64> {
        let latest = self.invoiced_history.len().checked_sub(1)?;
        let idx = latest.checked_sub(months as usize)?;
        self.invoiced_history.get(idx).copied()
    }

    /// Move to the next month
    pub fn advance_month(&mut self) {
        self.month_index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_balances() {
        let a = Assumptions {
            initial_cash: 123.0,
            initial_stock: 45.0,
            ..Default::default()
        };
        let state = ProjectionState::from_assumptions(&a);

        assert_eq!(state.month_index, 0);
        assert_eq!(state.cash, 123.0);
        assert_eq!(state.stock, 45.0);
        assert_eq!(state.debt, 0.0);
        assert_eq!(state.equity, 0.0);
        assert_eq!(state.receivables, 0.0);
        assert_eq!(state.payables, 0.0);
        assert_eq!(state.invoiced_months_ago(0), None);
    }

    #[test]
    fn test_invoiced_lookback() {
        let mut state = ProjectionState::from_assumptions(&Assumptions::default());
        for amount in [10.0, 20.0, 30.0] {
            state.record_invoiced(amount);
        }
        assert_eq!(state.invoiced_months_ago(3), None);

        state.record_invoiced(40.0);
        assert_eq!(state.invoiced_months_ago(0), Some(40.0));
        assert_eq!(state.invoiced_months_ago(1), Some(30.0));
        assert_eq!(state.invoiced_months_ago(3), Some(10.0));
    }
}
