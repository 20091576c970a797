//! Financial Plan - 24-month projection engine for a trading company
//!
//! This library provides:
//! - Monthly P&L, cash flow and balance sheet projection from constant business assumptions
//! - Revolving-credit financing (automatic drawdown and repayment)
//! - Assumption loading (JSON/CSV) with advisory validation
//! - Statement tables, chart series and dashboard summaries
//! - Batch and sensitivity scenario runs

pub mod assumptions;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use assumptions::{Assumptions, AssumptionsError, ValidationWarning};
pub use projection::{
    project, MonthlySnapshot, ProjectionConfig, ProjectionEngine, ProjectionResult,
};
pub use scenario::ScenarioRunner;
