//! Valuation input record as supplied by the calling layer

use serde::{Deserialize, Serialize};

use crate::error::ValuationError;

/// Financial inputs for a single DCF valuation
///
/// All currency fields share one unit; rates are fractional (0.03 = 3%).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationInput {
    pub revenue: f64,
    pub operating_expenses: f64,

    /// Reported EBITDA. Carried for the caller's record only;
    /// the engine always derives EBITDA from revenue and expenses.
    #[serde(default)]
    pub ebitda: f64,

    /// Reported net income. Carried for the caller's record only.
    #[serde(default)]
    pub net_income: f64,

    /// Per-year FCF growth applied from year 2 onward
    pub growth_rate: f64,

    /// Cost of capital used for discounting
    pub discount_rate: f64,

    /// Rate applied to EBITDA to estimate taxes
    pub tax_rate: f64,

    pub working_capital: f64,
    pub capex: f64,
}

impl ValuationInput {
    /// Create an input with reported EBITDA and net income left at zero
    pub fn new(
        revenue: f64,
        operating_expenses: f64,
        growth_rate: f64,
        discount_rate: f64,
        tax_rate: f64,
        working_capital: f64,
        capex: f64,
    ) -> Self {
        Self {
            revenue,
            operating_expenses,
            ebitda: 0.0,
            net_income: 0.0,
            growth_rate,
            discount_rate,
            tax_rate,
            working_capital,
            capex,
        }
    }

    /// Field names paired with values, in record order
    pub fn fields(&self) -> [(&'static str, f64); 9] {
        [
            ("revenue", self.revenue),
            ("operatingExpenses", self.operating_expenses),
            ("ebitda", self.ebitda),
            ("netIncome", self.net_income),
            ("growthRate", self.growth_rate),
            ("discountRate", self.discount_rate),
            ("taxRate", self.tax_rate),
            ("workingCapital", self.working_capital),
            ("capex", self.capex),
        ]
    }

    /// Boundary validation performed before the engine is invoked.
    ///
    /// Rejects non-finite fields and rates at or below -100%, where the
    /// `(1 + rate)` factors stop meaning anything. Does not check
    /// discount vs growth; the engine owns that decision.
    pub fn validate(&self) -> Result<(), ValuationError> {
        for (field, value) in self.fields() {
            if !value.is_finite() {
                return Err(ValuationError::InvalidInput {
                    field,
                    reason: format!("must be a finite number, got {}", value),
                });
            }
        }

        for (field, rate) in [("growthRate", self.growth_rate), ("discountRate", self.discount_rate)] {
            if rate <= -1.0 {
                return Err(ValuationError::InvalidInput {
                    field,
                    reason: format!("must be greater than -1, got {}", rate),
                });
            }
        }

        Ok(())
    }
}

/// An input paired with a caller-facing label (row id in batch files)
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledInput {
    pub id: String,
    pub input: ValuationInput,
}

impl LabeledInput {
    pub fn new(id: impl Into<String>, input: ValuationInput) -> Self {
        Self { id: id.into(), input }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_a() -> ValuationInput {
        ValuationInput::new(1_000_000.0, 600_000.0, 0.03, 0.10, 0.25, 50_000.0, 100_000.0)
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(scenario_a().validate().is_ok());
    }

    #[test]
    fn test_non_finite_field_rejected() {
        let mut input = scenario_a();
        input.capex = f64::NAN;

        match input.validate() {
            Err(ValuationError::InvalidInput { field, .. }) => assert_eq!(field, "capex"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_at_minus_one_rejected() {
        let mut input = scenario_a();
        input.discount_rate = -1.0;

        match input.validate() {
            Err(ValuationError::InvalidInput { field, .. }) => assert_eq!(field, "discountRate"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_equal_rates_are_not_a_boundary_error() {
        let mut input = scenario_a();
        input.growth_rate = 0.10;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = r#"{
            "revenue": 1000000,
            "operatingExpenses": 600000,
            "ebitda": 400000,
            "netIncome": 250000,
            "growthRate": 0.03,
            "discountRate": 0.10,
            "taxRate": 0.25,
            "workingCapital": 50000,
            "capex": 100000
        }"#;

        let input: ValuationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.operating_expenses, 600_000.0);
        assert_eq!(input.net_income, 250_000.0);
        assert_eq!(input.working_capital, 50_000.0);
    }

    #[test]
    fn test_reported_fields_default_to_zero() {
        let json = r#"{"revenue":1,"operatingExpenses":0,"growthRate":0,"discountRate":0.1,"taxRate":0,"workingCapital":0,"capex":0}"#;
        let input: ValuationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.ebitda, 0.0);
        assert_eq!(input.net_income, 0.0);
    }
}
