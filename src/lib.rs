//! DCF Valuation - discounted-cash-flow business valuation engine
//!
//! This library provides:
//! - EBITDA and initial free cash flow derivation
//! - Five-year FCF projection with compounding growth and annual discounting
//! - Gordon-growth terminal value and total valuation
//! - CSV loading and batch valuation of many inputs

pub mod error;
pub mod input;
pub mod valuation;
pub mod batch;

// Re-export commonly used types
pub use error::{LoadError, ValuationError};
pub use input::{LabeledInput, ValuationInput};
pub use valuation::{
    calculate_valuation, DegeneratePolicy, ValuationConfig, ValuationEngine, ValuationResult,
    YearlyCalculation, PROJECTION_YEARS,
};
pub use batch::{BatchOutcome, BatchRunner};
