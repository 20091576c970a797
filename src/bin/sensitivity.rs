//! Sweep one assumption over a range of values
//!
//! Outputs final cash, peak debt and cumulative profit per value as CSV

use anyhow::{bail, Context, Result};
use clap::Parser;
use financial_plan::{Assumptions, ScenarioRunner};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(
    name = "sensitivity",
    about = "Run the projection for a range of values of one assumption"
)]
struct Args {
    /// Assumption field to vary, e.g. monthly_sales
    field: String,

    /// First value of the sweep
    #[arg(long)]
    from: f64,

    /// Last value of the sweep (inclusive)
    #[arg(long)]
    to: f64,

    /// Number of values, evenly spaced
    #[arg(long, default_value_t = 11)]
    steps: usize,

    /// Base assumptions file (.json or .csv); built-in defaults when omitted
    #[arg(short, long)]
    assumptions: Option<PathBuf>,

    /// Output CSV path
    #[arg(short, long, default_value = "sensitivity_output.csv")]
    output: PathBuf,
}

#[derive(Debug, Serialize)]
struct SweepRow {
    value: f64,
    final_cash: f64,
    final_debt: f64,
    peak_debt: f64,
    total_ebitda: f64,
    total_net_profit: f64,
    total_interest: f64,
}

fn sweep_values(from: f64, to: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![from],
        n => {
            let step = (to - from) / (n - 1) as f64;
            (0..n).map(|i| from + step * i as f64).collect()
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let base = match &args.assumptions {
        Some(path) => Assumptions::from_path(path)
            .with_context(|| format!("loading assumptions from {}", path.display()))?,
        None => Assumptions::default(),
    };
    if base.get_field(&args.field).is_none() {
        bail!("unknown assumption field: {}", args.field);
    }

    let start = Instant::now();
    let values = sweep_values(args.from, args.to, args.steps);
    println!("Sweeping {} over {} values...", args.field, values.len());

    let runner = ScenarioRunner::new();
    let results = runner.sensitivity(&base, &args.field, &values)?;
    println!("Projections complete in {:?}", start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for (value, result) in &results {
        let summary = result.summary();
        writer.serialize(SweepRow {
            value: *value,
            final_cash: summary.final_cash,
            final_debt: summary.final_debt,
            peak_debt: summary.peak_debt,
            total_ebitda: summary.total_ebitda,
            total_net_profit: summary.total_net_profit,
            total_interest: summary.total_interest,
        })?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_values() {
        assert_eq!(sweep_values(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
        assert_eq!(sweep_values(5.0, 9.0, 1), vec![5.0]);
        assert!(sweep_values(0.0, 1.0, 0).is_empty());
    }
}
