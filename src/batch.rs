//! Batch runner for valuing many inputs with one engine
//!
//! One failing input never aborts the batch; each outcome carries its own result.

use crate::error::ValuationError;
use crate::input::LabeledInput;
use crate::valuation::{ValuationConfig, ValuationEngine, ValuationResult, PROJECTION_YEARS};

/// Result of valuing one labeled input
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub id: String,
    pub result: Result<ValuationResult, ValuationError>,
}

/// Values a list of inputs in order
///
/// # Example
/// ```ignore
/// let runner = BatchRunner::default();
/// let inputs = load_inputs("companies.csv")?;
/// let outcomes = runner.run(&inputs);
/// BatchRunner::write_csv(&outcomes, std::io::stdout())?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    engine: ValuationEngine,
}

impl BatchRunner {
    pub fn new(config: ValuationConfig) -> Self {
        Self {
            engine: ValuationEngine::new(config),
        }
    }

    pub fn engine(&self) -> &ValuationEngine {
        &self.engine
    }

    /// Value every input, preserving input order
    pub fn run(&self, inputs: &[LabeledInput]) -> Vec<BatchOutcome> {
        let outcomes: Vec<BatchOutcome> = inputs
            .iter()
            .map(|labeled| BatchOutcome {
                id: labeled.id.clone(),
                result: self.engine.calculate_valuation(&labeled.input),
            })
            .collect();

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        log::info!(
            "Valued {} inputs ({} succeeded, {} failed)",
            outcomes.len(),
            outcomes.len() - failed,
            failed
        );

        outcomes
    }

    /// Header row for `write_csv`
    pub fn csv_header() -> Vec<String> {
        let mut header = vec!["id".to_string(), "ebitda".to_string(), "initialFcf".to_string()];
        header.extend((1..=PROJECTION_YEARS).map(|y| format!("fcfYear{}", y)));
        header.extend((1..=PROJECTION_YEARS).map(|y| format!("discountedFcfYear{}", y)));
        header.extend(
            ["terminalValue", "discountedTerminalValue", "totalValuation", "error"]
                .iter()
                .map(|s| s.to_string()),
        );
        header
    }

    /// Write one CSV row per outcome. Numbers are written at full precision;
    /// failed rows leave numeric columns empty and fill `error`.
    pub fn write_csv<W: std::io::Write>(outcomes: &[BatchOutcome], writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let header = Self::csv_header();
        csv_writer.write_record(&header)?;

        for outcome in outcomes {
            let mut record = Vec::with_capacity(header.len());
            record.push(outcome.id.clone());

            match &outcome.result {
                Ok(result) => {
                    record.push(result.ebitda.to_string());
                    record.push(result.initial_fcf.to_string());
                    record.extend(result.yearly_calculations.iter().map(|y| y.fcf.to_string()));
                    record.extend(result.yearly_calculations.iter().map(|y| y.discounted_fcf.to_string()));
                    record.push(result.terminal_value.to_string());
                    record.push(result.discounted_terminal_value.to_string());
                    record.push(result.total_valuation.to_string());
                    record.push(String::new());
                }
                Err(e) => {
                    record.resize(header.len() - 1, String::new());
                    record.push(e.to_string());
                }
            }

            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
