//! Error types for valuation and input loading

use thiserror::Error;

/// Errors raised while validating inputs or computing a valuation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValuationError {
    /// A field is non-finite or out of range
    #[error("invalid input field `{field}`: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    /// Gordon-growth terminal value would divide by zero
    #[error("discount rate must not equal growth rate (discount {discount_rate}, growth {growth_rate})")]
    DegenerateRates {
        discount_rate: f64,
        growth_rate: f64,
    },
}

/// Errors raised while reading valuation inputs from CSV
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Row parsed but failed validation (row is 1-based, header excluded)
    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: ValuationError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_message() {
        let err = ValuationError::DegenerateRates {
            discount_rate: 0.05,
            growth_rate: 0.05,
        };
        assert!(err.to_string().starts_with("discount rate must not equal growth rate"));
    }

    #[test]
    fn test_invalid_row_message_carries_row() {
        let err = LoadError::InvalidRow {
            row: 3,
            source: ValuationError::InvalidInput {
                field: "taxRate",
                reason: "must be finite".to_string(),
            },
        };
        assert_eq!(err.to_string(), "row 3: invalid input field `taxRate`: must be finite");
    }
}
