//! Chart series for the dashboard: cash vs debt, EBITDA vs net profit

use crate::projection::{MonthlySnapshot, ProjectionResult};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// One plotted line or bar series across the projected months
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    fn from_snapshots(
        name: &str,
        snapshots: &[MonthlySnapshot],
        value: impl Fn(&MonthlySnapshot) -> f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            points: snapshots
                .iter()
                .map(|s| ChartPoint {
                    label: s.label.clone(),
                    value: value(s),
                })
                .collect(),
        }
    }

    /// Smallest and largest plotted value, for axis scaling
    pub fn range(&self) -> Option<(f64, f64)> {
        let mut values = self.points.iter().map(|p| p.value);
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

/// Cash balance and debt balance over time
pub fn cash_and_debt(result: &ProjectionResult) -> Vec<ChartSeries> {
    vec![
        ChartSeries::from_snapshots("Cash balance", &result.snapshots, |s| s.cash_balance),
        ChartSeries::from_snapshots("Debt balance", &result.snapshots, |s| s.debt_balance),
    ]
}

/// Monthly EBITDA against net profit
pub fn earnings(result: &ProjectionResult) -> Vec<ChartSeries> {
    vec![
        ChartSeries::from_snapshots("EBITDA", &result.snapshots, |s| s.ebitda),
        ChartSeries::from_snapshots("Net profit", &result.snapshots, |s| s.net_profit),
    ]
}

/// Every dashboard series
pub fn all_series(result: &ProjectionResult) -> Vec<ChartSeries> {
    let mut series = cash_and_debt(result);
    series.extend(earnings(result));
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::Assumptions;
    use crate::projection::{ProjectionConfig, ProjectionEngine};

    #[test]
    fn test_series_follow_snapshots() {
        let result =
            ProjectionEngine::new(Assumptions::default(), ProjectionConfig::default()).project();
        let series = all_series(&result);

        let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Cash balance", "Debt balance", "EBITDA", "Net profit"]);

        for s in &series {
            assert_eq!(s.points.len(), 24);
            assert_eq!(s.points[0].label, "1/2026");
        }
        assert_eq!(series[1].points[23].value, result.snapshots[23].debt_balance);
        assert_eq!(series[3].points[5].value, result.snapshots[5].net_profit);
    }

    #[test]
    fn test_range() {
        let series = ChartSeries {
            name: "x".to_string(),
            points: [3.0, -1.0, 7.0]
                .iter()
                .map(|&value| ChartPoint { label: String::new(), value })
                .collect(),
        };
        assert_eq!(series.range(), Some((-1.0, 7.0)));

        let empty = ChartSeries { name: "y".to_string(), points: Vec::new() };
        assert_eq!(empty.range(), None);
    }
}
