//! Valuation output structures

use serde::{Deserialize, Serialize};

/// Projected and discounted free cash flow for one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyCalculation {
    /// Projection year (1-indexed)
    pub year: u32,
    pub fcf: f64,
    pub discounted_fcf: f64,
}

/// Complete valuation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    /// Derived as revenue minus operating expenses
    pub ebitda: f64,

    /// Free cash flow before any growth is applied
    pub initial_fcf: f64,

    /// One entry per projection year, ascending
    pub yearly_calculations: Vec<YearlyCalculation>,

    /// Gordon-growth value at the end of the projection horizon
    pub terminal_value: f64,

    pub discounted_terminal_value: f64,

    /// Sum of discounted FCFs plus discounted terminal value
    pub total_valuation: f64,
}

impl ValuationResult {
    /// Present value of the explicit projection period
    pub fn sum_discounted_fcf(&self) -> f64 {
        self.yearly_calculations.iter().map(|y| y.discounted_fcf).sum()
    }

    /// Undiscounted FCF of the last projection year
    pub fn final_year_fcf(&self) -> f64 {
        final_fcf(&self.yearly_calculations).unwrap_or(0.0)
    }

    /// True when every reported figure is finite
    pub fn is_finite(&self) -> bool {
        self.ebitda.is_finite()
            && self.initial_fcf.is_finite()
            && self
                .yearly_calculations
                .iter()
                .all(|y| y.fcf.is_finite() && y.discounted_fcf.is_finite())
            && self.terminal_value.is_finite()
            && self.discounted_terminal_value.is_finite()
            && self.total_valuation.is_finite()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ValuationSummary {
        let pv_explicit_period = self.sum_discounted_fcf();

        let terminal_value_share = if self.total_valuation.is_finite() && self.total_valuation != 0.0 {
            Some(self.discounted_terminal_value / self.total_valuation)
        } else {
            None
        };

        ValuationSummary {
            ebitda: self.ebitda,
            initial_fcf: self.initial_fcf,
            pv_explicit_period,
            discounted_terminal_value: self.discounted_terminal_value,
            total_valuation: self.total_valuation,
            terminal_value_share,
        }
    }
}

/// FCF of the last entry in a projection
pub(crate) fn final_fcf(calculations: &[YearlyCalculation]) -> Option<f64> {
    calculations.last().map(|y| y.fcf)
}

/// Summary statistics for a valuation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationSummary {
    pub ebitda: f64,
    pub initial_fcf: f64,
    pub pv_explicit_period: f64,
    pub discounted_terminal_value: f64,
    pub total_valuation: f64,
    /// Fraction of total value coming from the terminal value
    pub terminal_value_share: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ValuationResult {
        let yearly_calculations = (1..=5)
            .map(|year| YearlyCalculation {
                year,
                fcf: 100.0,
                discounted_fcf: 10.0,
            })
            .collect();

        ValuationResult {
            ebitda: 200.0,
            initial_fcf: 100.0,
            yearly_calculations,
            terminal_value: 1_000.0,
            discounted_terminal_value: 150.0,
            total_valuation: 200.0,
        }
    }

    #[test]
    fn test_summary() {
        let summary = sample().summary();
        assert_eq!(summary.pv_explicit_period, 50.0);
        assert_eq!(summary.terminal_value_share, Some(0.75));
    }

    #[test]
    fn test_final_year_fcf() {
        let mut result = sample();
        result.yearly_calculations[4].fcf = 123.0;
        assert_eq!(result.final_year_fcf(), 123.0);

        result.yearly_calculations.clear();
        assert_eq!(result.final_year_fcf(), 0.0);
    }

    #[test]
    fn test_share_absent_for_zero_or_infinite_total() {
        let mut result = sample();
        result.total_valuation = 0.0;
        assert_eq!(result.summary().terminal_value_share, None);

        result.total_valuation = f64::INFINITY;
        assert_eq!(result.summary().terminal_value_share, None);
        assert!(!result.is_finite());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("initialFcf").is_some());
        assert!(json.get("discountedTerminalValue").is_some());
        assert_eq!(json["yearlyCalculations"][0]["discountedFcf"], 10.0);
    }
}
