//! Projection engine for the 24-month financial plan

mod state;
mod engine;
mod snapshot;

pub use state::ProjectionState;
pub use engine::{
    is_supported_base_year, project, ProjectionConfig, ProjectionEngine,
    DEFAULT_ANNUAL_INTEREST_RATE, DEFAULT_BASE_YEAR, DEFAULT_MONTHS, MAX_BASE_YEAR, MIN_BASE_YEAR,
};
pub use snapshot::{MonthlySnapshot, ProjectionResult, ProjectionSummary};
