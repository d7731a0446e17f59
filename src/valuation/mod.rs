//! DCF valuation: projection, discounting, terminal value

mod engine;
mod cashflows;
pub mod discount;

pub use engine::{
    calculate_valuation, DegeneratePolicy, ValuationConfig, ValuationEngine,
    DEFAULT_RATE_TOLERANCE, PROJECTION_YEARS,
};
pub use cashflows::{ValuationResult, ValuationSummary, YearlyCalculation};
