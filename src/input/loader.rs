//! Load valuation inputs from CSV
//!
//! Header uses the same camelCase names as the JSON record. An optional
//! `id` column labels each row; `ebitda` and `netIncome` may be omitted
//! as columns or left blank per row. Rows are validated all-or-nothing:
//! the first invalid row fails the whole load.

use super::{LabeledInput, ValuationInput};
use crate::error::LoadError;
use csv::Reader;
use std::path::Path;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "revenue")]
    revenue: f64,
    #[serde(rename = "operatingExpenses")]
    operating_expenses: f64,
    #[serde(rename = "ebitda", default)]
    ebitda: Option<f64>,
    #[serde(rename = "netIncome", default)]
    net_income: Option<f64>,
    #[serde(rename = "growthRate")]
    growth_rate: f64,
    #[serde(rename = "discountRate")]
    discount_rate: f64,
    #[serde(rename = "taxRate")]
    tax_rate: f64,
    #[serde(rename = "workingCapital")]
    working_capital: f64,
    #[serde(rename = "capex")]
    capex: f64,
}

impl CsvRow {
    fn into_labeled(self, row: usize) -> Result<LabeledInput, LoadError> {
        let input = ValuationInput {
            revenue: self.revenue,
            operating_expenses: self.operating_expenses,
            ebitda: self.ebitda.unwrap_or(0.0),
            net_income: self.net_income.unwrap_or(0.0),
            growth_rate: self.growth_rate,
            discount_rate: self.discount_rate,
            tax_rate: self.tax_rate,
            working_capital: self.working_capital,
            capex: self.capex,
        };

        input
            .validate()
            .map_err(|source| LoadError::InvalidRow { row, source })?;

        let id = match self.id {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => row.to_string(),
        };

        Ok(LabeledInput::new(id, input))
    }
}

/// Load all inputs from a CSV file
pub fn load_inputs<P: AsRef<Path>>(path: P) -> Result<Vec<LabeledInput>, LoadError> {
    let file = std::fs::File::open(path)?;
    load_inputs_from_reader(file)
}

/// Load inputs from any reader (e.g., string buffer, stdin)
pub fn load_inputs_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<LabeledInput>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut inputs = Vec::new();

    for (i, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        inputs.push(row.into_labeled(i + 1)?);
    }

    log::debug!("Loaded {} valuation inputs", inputs.len());
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValuationError;

    const HEADER: &str = "id,revenue,operatingExpenses,ebitda,netIncome,growthRate,discountRate,taxRate,workingCapital,capex";

    #[test]
    fn test_load_with_ids() {
        let data = format!(
            "{}\nacme,1000000,600000,400000,250000,0.03,0.10,0.25,50000,100000\nglobex,500000,300000,0,0,0.02,0.08,0.21,10000,20000\n",
            HEADER
        );

        let inputs = load_inputs_from_reader(data.as_bytes()).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].id, "acme");
        assert_eq!(inputs[0].input.revenue, 1_000_000.0);
        assert_eq!(inputs[0].input.net_income, 250_000.0);
        assert_eq!(inputs[1].id, "globex");
        assert_eq!(inputs[1].input.tax_rate, 0.21);
    }

    #[test]
    fn test_optional_columns_and_row_number_ids() {
        let data = "revenue,operatingExpenses,growthRate,discountRate,taxRate,workingCapital,capex\n\
                    1000,400,0.01,0.09,0.2,10,20\n\
                    2000,900,0.02,0.11,0.3,30,40\n";

        let inputs = load_inputs_from_reader(data.as_bytes()).unwrap();
        assert_eq!(inputs[0].id, "1");
        assert_eq!(inputs[1].id, "2");
        assert_eq!(inputs[1].input.ebitda, 0.0);
    }

    #[test]
    fn test_blank_id_falls_back_to_row_number() {
        let data = format!("{}\n,1000,400,0,0,0.01,0.09,0.2,10,20\n", HEADER);
        let inputs = load_inputs_from_reader(data.as_bytes()).unwrap();
        assert_eq!(inputs[0].id, "1");
    }

    #[test]
    fn test_blank_reported_fields_default_to_zero() {
        let data = format!(
            "{}\na,1000,400,,,0.01,0.09,0.2,10,20\nb,1000,400,350,,0.01,0.09,0.2,10,20\n",
            HEADER
        );

        let inputs = load_inputs_from_reader(data.as_bytes()).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].input.ebitda, 0.0);
        assert_eq!(inputs[0].input.net_income, 0.0);
        assert_eq!(inputs[1].input.ebitda, 350.0);
        assert_eq!(inputs[1].input.net_income, 0.0);
    }

    #[test]
    fn test_blank_required_field_is_csv_error() {
        let data = format!("{}\na,1000,,0,0,0.01,0.09,0.2,10,20\n", HEADER);
        assert!(matches!(
            load_inputs_from_reader(data.as_bytes()),
            Err(LoadError::Csv(_))
        ));
    }

    #[test]
    fn test_invalid_row_reports_row_number() {
        let data = format!(
            "{}\na,1000,400,0,0,0.01,0.09,0.2,10,20\nb,1000,400,0,0,0.01,-1.5,0.2,10,20\n",
            HEADER
        );

        match load_inputs_from_reader(data.as_bytes()) {
            Err(LoadError::InvalidRow { row, source }) => {
                assert_eq!(row, 2);
                assert!(matches!(
                    source,
                    ValuationError::InvalidInput { field: "discountRate", .. }
                ));
            }
            other => panic!("expected InvalidRow, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_field_is_csv_error() {
        let data = format!("{}\na,lots,400,0,0,0.01,0.09,0.2,10,20\n", HEADER);
        assert!(matches!(
            load_inputs_from_reader(data.as_bytes()),
            Err(LoadError::Csv(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            load_inputs("does/not/exist.csv"),
            Err(LoadError::Io(_))
        ));
    }
}
