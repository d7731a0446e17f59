//! Core DCF valuation engine
//!
//! Pipeline, in order: EBITDA, initial FCF, five-year projection with
//! per-year discounting, Gordon-growth terminal value, total valuation.

use crate::error::ValuationError;
use crate::input::ValuationInput;
use super::cashflows::{final_fcf, ValuationResult, YearlyCalculation};
use super::discount::{gordon_growth_value, present_value};

/// Number of explicit projection years
pub const PROJECTION_YEARS: u32 = 5;

/// Default tolerance for treating discount and growth rates as equal
pub const DEFAULT_RATE_TOLERANCE: f64 = 1e-12;

/// What to do when discount rate equals growth rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Fail with `ValuationError::DegenerateRates`
    #[default]
    Reject,
    /// Compute anyway; terminal value and total come out non-finite
    Propagate,
}

/// Configuration for a valuation run
#[derive(Debug, Clone)]
pub struct ValuationConfig {
    pub degenerate_policy: DegeneratePolicy,

    /// `|discount - growth|` at or below this counts as degenerate
    pub rate_tolerance: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            degenerate_policy: DegeneratePolicy::Reject,
            rate_tolerance: DEFAULT_RATE_TOLERANCE,
        }
    }
}

impl ValuationConfig {
    /// Config that reproduces the unguarded formula
    pub fn propagating() -> Self {
        Self {
            degenerate_policy: DegeneratePolicy::Propagate,
            ..Default::default()
        }
    }
}

/// Stateless DCF engine; safe to share across threads
#[derive(Debug, Clone, Default)]
pub struct ValuationEngine {
    config: ValuationConfig,
}

impl ValuationEngine {
    pub fn new(config: ValuationConfig) -> Self {
        Self { config }
    }

    /// Run the full valuation for one input.
    ///
    /// Inputs are trusted to be finite (see `ValuationInput::validate`).
    pub fn calculate_valuation(&self, input: &ValuationInput) -> Result<ValuationResult, ValuationError> {
        if self.config.degenerate_policy == DegeneratePolicy::Reject
            && (input.discount_rate - input.growth_rate).abs() <= self.config.rate_tolerance
        {
            return Err(ValuationError::DegenerateRates {
                discount_rate: input.discount_rate,
                growth_rate: input.growth_rate,
            });
        }

        let ebitda = calculate_ebitda(input);
        if input.ebitda != 0.0 && input.ebitda != ebitda {
            log::debug!(
                "Ignoring reported EBITDA {:.2}; derived value is {:.2}",
                input.ebitda,
                ebitda
            );
        }

        let initial_fcf = calculate_initial_fcf(input, ebitda);
        let yearly_calculations = project_fcf(initial_fcf, input.growth_rate, input.discount_rate);

        let final_year_fcf = final_fcf(&yearly_calculations).unwrap_or(initial_fcf);
        let terminal_value = gordon_growth_value(final_year_fcf, input.growth_rate, input.discount_rate);
        let discounted_terminal_value = present_value(terminal_value, input.discount_rate, PROJECTION_YEARS);

        let sum_discounted_fcf: f64 = yearly_calculations.iter().map(|y| y.discounted_fcf).sum();
        let total_valuation = sum_discounted_fcf + discounted_terminal_value;

        log::debug!(
            "EBITDA={:.2} FCF0={:.2} PV(FCF)={:.2} TV={:.2} PV(TV)={:.2} Total={:.2}",
            ebitda,
            initial_fcf,
            sum_discounted_fcf,
            terminal_value,
            discounted_terminal_value,
            total_valuation
        );

        if !total_valuation.is_finite() {
            log::warn!(
                "Non-finite valuation (discount {}, growth {})",
                input.discount_rate,
                input.growth_rate
            );
        }

        Ok(ValuationResult {
            ebitda,
            initial_fcf,
            yearly_calculations,
            terminal_value,
            discounted_terminal_value,
            total_valuation,
        })
    }
}

/// Value one input with the default configuration
pub fn calculate_valuation(input: &ValuationInput) -> Result<ValuationResult, ValuationError> {
    ValuationEngine::default().calculate_valuation(input)
}

fn calculate_ebitda(input: &ValuationInput) -> f64 {
    input.revenue - input.operating_expenses
}

fn calculate_initial_fcf(input: &ValuationInput, ebitda: f64) -> f64 {
    let taxes = ebitda * input.tax_rate;
    ebitda - taxes - input.capex - input.working_capital
}

/// Year 1 carries the initial FCF unchanged; growth compounds from year 2
fn project_fcf(initial_fcf: f64, growth_rate: f64, discount_rate: f64) -> Vec<YearlyCalculation> {
    let mut calculations = Vec::with_capacity(PROJECTION_YEARS as usize);
    let mut fcf = initial_fcf;

    for year in 1..=PROJECTION_YEARS {
        if year > 1 {
            fcf *= 1.0 + growth_rate;
        }

        calculations.push(YearlyCalculation {
            year,
            fcf,
            discounted_fcf: present_value(fcf, discount_rate, year),
        });
    }

    calculations
}
