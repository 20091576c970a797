//! Financial Plan CLI
//!
//! Command-line interface for running the 24-month projection

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use financial_plan::{
    assumptions::loader,
    projection,
    report::{self, Statement},
    Assumptions, ProjectionConfig, ProjectionEngine,
};
use log::warn;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StatementArg {
    Pnl,
    Cashflow,
    Balance,
    All,
}

impl StatementArg {
    fn statements(self) -> Vec<Statement> {
        match self {
            StatementArg::Pnl => vec![Statement::ProfitAndLoss],
            StatementArg::Cashflow => vec![Statement::CashFlow],
            StatementArg::Balance => vec![Statement::BalanceSheet],
            StatementArg::All => Statement::ALL.to_vec(),
        }
    }
}

/// Project monthly P&L, cash flow and balance sheet over 24 months
#[derive(Debug, Parser)]
#[command(name = "financial_plan", version, about)]
struct Cli {
    /// Assumptions file (.json or .csv); built-in defaults when omitted
    #[arg(short, long)]
    assumptions: Option<PathBuf>,

    /// Override one assumption, e.g. --set monthly_sales=9000000 (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    overrides: Vec<String>,

    /// Calendar year of the first projected month
    #[arg(
        long,
        default_value_t = projection::DEFAULT_BASE_YEAR,
        value_parser = clap::value_parser!(i32)
            .range(i64::from(projection::MIN_BASE_YEAR)..=i64::from(projection::MAX_BASE_YEAR))
    )]
    base_year: i32,

    /// Statement(s) to print
    #[arg(short, long, value_enum, default_value_t = StatementArg::All)]
    statement: StatementArg,

    /// Write every monthly snapshot to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full result as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Print the effective assumptions as field,value CSV and exit
    #[arg(long)]
    dump_assumptions: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut assumptions = match &cli.assumptions {
        Some(path) => Assumptions::from_path(path)
            .with_context(|| format!("loading assumptions from {}", path.display()))?,
        None => Assumptions::default(),
    };
    for assignment in &cli.overrides {
        assumptions
            .apply_override(assignment)
            .with_context(|| format!("applying --set {}", assignment))?;
    }

    if cli.dump_assumptions {
        loader::write_csv(&assumptions, std::io::stdout().lock())?;
        return Ok(());
    }

    for warning in assumptions.validate() {
        warn!("{}", warning);
    }

    let config = ProjectionConfig {
        base_year: cli.base_year,
        ..Default::default()
    };
    let engine = ProjectionEngine::new(assumptions, config);
    let result = engine.project();

    if let Some(path) = &cli.csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        report::write_snapshots_csv(&result.snapshots, BufWriter::new(file))?;
        println!("Monthly snapshots written to: {}", path.display());
    }

    if cli.json {
        let output = serde_json::json!({
            "assumptions": engine.assumptions(),
            "summary": result.summary(),
            "snapshots": result.snapshots,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Financial Plan v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");

    for statement in cli.statement.statements() {
        println!("{}", statement.build(&result).render_text());
    }

    println!("Summary:");
    print!("{}", report::render_summary(&result.summary()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_year_range() {
        let cli = Cli::try_parse_from(["financial_plan", "--base-year", "2030"]).unwrap();
        assert_eq!(cli.base_year, 2030);

        let cli = Cli::try_parse_from(["financial_plan"]).unwrap();
        assert_eq!(cli.base_year, projection::DEFAULT_BASE_YEAR);

        assert!(Cli::try_parse_from(["financial_plan", "--base-year", "2147483647"]).is_err());
        assert!(Cli::try_parse_from(["financial_plan", "--base-year", "0"]).is_err());
    }

    #[test]
    fn test_statement_selection() {
        let cli = Cli::try_parse_from(["financial_plan", "-s", "balance"]).unwrap();
        assert_eq!(cli.statement.statements(), vec![Statement::BalanceSheet]);
        assert_eq!(StatementArg::All.statements().len(), 3);
    }
}
