//! Scenario runner for batch and sensitivity projections
//!
//! Holds one projection config and runs it against many assumption sets.
//! Projections share no state, so batches run in parallel.

use crate::assumptions::{Assumptions, AssumptionsError};
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};
use log::debug;
use rayon::prelude::*;

/// Pre-configured scenario runner
///
/// # Example
/// ```
/// use financial_plan::{Assumptions, ScenarioRunner};
///
/// let runner = ScenarioRunner::new();
/// let base = Assumptions::default();
///
/// let sweep = runner.sensitivity(&base, "margin", &[0.08, 0.10, 0.12]).unwrap();
/// assert_eq!(sweep.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: ProjectionConfig,
}

impl ScenarioRunner {
    /// Create runner with the default 24-month config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with a custom config
    pub fn with_config(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Run a single projection
    pub fn run(&self, assumptions: &Assumptions) -> ProjectionResult {
        ProjectionEngine::new(assumptions.clone(), self.config.clone()).project()
    }

    /// Run projections for several assumption sets in parallel; output order matches input
    pub fn run_batch(&self, scenarios: &[Assumptions]) -> Vec<ProjectionResult> {
        debug!("Running batch of {} scenarios", scenarios.len());
        scenarios.par_iter().map(|a| self.run(a)).collect()
    }

    /// Vary one field over the given values, keeping everything else at `base`
    pub fn sensitivity(
        &self,
        base: &Assumptions,
        field: &str,
        values: &[f64],
    ) -> Result<Vec<(f64, ProjectionResult)>, AssumptionsError> {
        let scenarios = values
            .iter()
            .map(|&value| {
                let mut a = base.clone();
                a.set_field(field, value)?;
                Ok(a)
            })
            .collect::<Result<Vec<_>, AssumptionsError>>()?;

        let results = self.run_batch(&scenarios);
        Ok(values.iter().copied().zip(results).collect())
    }

    /// Get reference to the projection config
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_runner_batch() {
        let runner = ScenarioRunner::new();

        let scenarios: Vec<_> = [4_000_000.0, 8_000_000.0, 12_000_000.0]
            .iter()
            .map(|&sales| Assumptions {
                monthly_sales: sales,
                ..Default::default()
            })
            .collect();

        let results = runner.run_batch(&scenarios);
        assert_eq!(results.len(), 3);

        // Parallel results match sequential ones, in order
        for (a, result) in scenarios.iter().zip(&results) {
            assert_eq!(*result, runner.run(a));
        }

        // Higher sales should result in higher cumulative profit
        assert!(results[2].summary().total_net_profit > results[0].summary().total_net_profit);
    }

    #[test]
    fn test_sensitivity() {
        let runner = ScenarioRunner::new();
        let base = Assumptions::default();

        let sweep = runner
            .sensitivity(&base, "monthly_purchase", &[8_000_000.0, 12_000_000.0])
            .unwrap();
        assert_eq!(sweep.len(), 2);
        assert_eq!(sweep[0].0, 8_000_000.0);
        assert_eq!(sweep[0].1.snapshots[0].purchase_net, 8_000_000.0);

        // Buying more stock ties up more cash, so the facility is drawn deeper
        assert!(sweep[1].1.summary().peak_debt < sweep[0].1.summary().peak_debt);

        assert!(matches!(
            runner.sensitivity(&base, "not_a_field", &[1.0]),
            Err(AssumptionsError::UnknownField(_))
        ));
    }

    #[test]
    fn test_custom_config() {
        let runner = ScenarioRunner::with_config(ProjectionConfig {
            months: 12,
            ..Default::default()
        });
        assert_eq!(runner.run(&Assumptions::default()).snapshots.len(), 12);
    }
}
